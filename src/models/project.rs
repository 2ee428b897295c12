// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project records.
//!
//! A project is a password-protected panorama tour. Records are keyed by
//! the slug of their name and persisted together as one JSON object.

use super::hotspot::Hotspot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Panorama shown for the built-in demo projects.
pub const DEMO_IMAGE_URL: &str = "https://cdn.pannellum.org/2.5/example/examplepano.jpg";

/// Mapping from slug to project record.
pub type ProjectMap = BTreeMap<String, ProjectRecord>;

/// A stored project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Compared verbatim at login.
    pub password: String,
    /// Image URL or `data:` URI.
    pub image: String,
    pub title: String,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
    pub created_at: DateTime<Utc>,
}

impl ProjectRecord {
    /// Create a record stamped with the current time.
    pub fn new(password: String, image: String, title: String) -> Self {
        Self {
            password,
            image,
            title,
            hotspots: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Creation date as shown on project cards.
    pub fn created_label(&self) -> String {
        self.created_at.format("%d/%m/%Y").to_string()
    }
}

/// Projects available when nothing usable is persisted.
pub fn default_projects() -> ProjectMap {
    [
        ("projeto-demo", "123456", "Projeto Demo"),
        ("casa-modelo", "casa2024", "Casa Modelo"),
        ("apartamento-luxo", "luxo789", "Apartamento de Luxo"),
    ]
    .into_iter()
    .map(|(slug, password, title)| {
        (
            slug.to_string(),
            ProjectRecord::new(password.to_string(), DEMO_IMAGE_URL.to_string(), title.to_string()),
        )
    })
    .collect()
}
