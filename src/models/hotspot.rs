// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hotspot data structures.
//!
//! A hotspot is a navigation point placed on a panorama. Hotspots are
//! scoped to the scene they were placed on through `parent_id`; `None`
//! is the root scene of the project.

use serde::{Deserialize, Serialize};

/// A navigation point on a panorama, in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    pub pitch: f64,
    pub yaw: f64,
    /// Scene this hotspot is placed on (`None` for the root scene).
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Scene the hotspot leads to.
    #[serde(default)]
    pub target: Option<String>,
}

/// Working set of hotspots held by the project editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotspotList {
    entries: Vec<Hotspot>,
    current_scene: Option<String>,
}

impl HotspotList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the working set with a project's stored hotspots.
    pub fn load(&mut self, hotspots: &[Hotspot]) {
        self.entries = hotspots.to_vec();
    }

    /// Remove every hotspot, in every scene.
    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// Go back to the root scene.
    pub fn reset_scene(&mut self) {
        self.current_scene = None;
    }

    pub fn current_scene(&self) -> Option<&str> {
        self.current_scene.as_deref()
    }

    /// Hotspots placed on the current scene, in insertion order.
    pub fn for_current_scene(&self) -> Vec<&Hotspot> {
        self.for_scene(self.current_scene.as_deref())
    }

    /// Hotspots placed on `scene`, in insertion order.
    pub fn for_scene(&self, scene: Option<&str>) -> Vec<&Hotspot> {
        self.entries
            .iter()
            .filter(|h| h.parent_id.as_deref() == scene)
            .collect()
    }

    /// Snapshot of the whole working set for committing into a record.
    pub fn to_vec(&self) -> Vec<Hotspot> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
