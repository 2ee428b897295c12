// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hotspot list for the scene shown in the editor preview.

use crate::models::hotspot::HotspotList;

/// Result of hotspot panel interaction.
pub enum HotspotsAction {
    None,
    ClearAll,
}

pub fn show(ui: &mut egui::Ui, hotspots: &HotspotList) -> HotspotsAction {
    let mut action = HotspotsAction::None;

    ui.horizontal(|ui| {
        ui.strong("Hotspots");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(!hotspots.is_empty(), egui::Button::new("Remove all"))
                .clicked()
            {
                action = HotspotsAction::ClearAll;
            }
        });
    });

    ui.label(
        egui::RichText::new(format!("Scene: {}", hotspots.current_scene().unwrap_or("main")))
            .small()
            .weak(),
    );

    let current = hotspots.for_current_scene();
    if current.is_empty() {
        ui.label(egui::RichText::new("No hotspots in this scene").weak());
        return action;
    }

    for (index, hotspot) in current.iter().enumerate() {
        ui.label(format!(
            "{}. yaw {:.1}°, pitch {:.1}°{}",
            index + 1,
            hotspot.yaw,
            hotspot.pitch,
            hotspot
                .target
                .as_deref()
                .map(|t| format!(" → {}", t))
                .unwrap_or_default()
        ));
    }

    action
}
