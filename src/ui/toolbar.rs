// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Header bar shown above the viewer and the admin panel.

use crate::theme::Theme;

/// Result of header interaction.
pub enum ToolbarAction {
    None,
    ToggleTheme,
    BackToProjects,
    Logout,
}

/// Display the header with the page title and session buttons.
pub fn show(
    ui: &mut egui::Ui,
    title: &str,
    subtitle: Option<&str>,
    theme: Theme,
    can_go_back: bool,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.heading(title);
        if let Some(subtitle) = subtitle {
            ui.separator();
            ui.label(egui::RichText::new(subtitle).italics().weak());
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Logout").clicked() {
                action = ToolbarAction::Logout;
            }
            if can_go_back && ui.button("⬅ Projects").clicked() {
                action = ToolbarAction::BackToProjects;
            }
            if ui.button(theme.toggle_label()).clicked() {
                action = ToolbarAction::ToggleTheme;
            }
        });
    });

    action
}
