// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Light/dark theme preference, persisted under its own storage key.

use crate::io::storage::KeyValueStore;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Read the stored preference. Anything but `"dark"` means light.
    pub fn load(storage: &dyn KeyValueStore) -> Self {
        match storage.get_string(THEME_KEY) {
            Ok(Some(value)) if value == "dark" => Theme::Dark,
            Ok(_) => Theme::Light,
            Err(e) => {
                log::warn!("Failed to read theme preference: {}", e);
                Theme::Light
            }
        }
    }

    pub fn save(self, storage: &mut dyn KeyValueStore) {
        if let Err(e) = storage.set_string(THEME_KEY, self.as_str()) {
            log::error!("Failed to save theme preference: {}", e);
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Label of the button that switches away from this theme.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "🌙 Dark Mode",
            Theme::Dark => "☀ Light Mode",
        }
    }

    pub fn apply(self, ctx: &egui::Context) {
        ctx.set_visuals(match self {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        });
    }
}
