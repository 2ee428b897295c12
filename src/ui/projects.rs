// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Admin project list.
//!
//! Shows one card per stored project with its creation date, hotspot count
//! and view/edit/delete actions.

use crate::store::ProjectStore;

/// Result of project list interaction.
pub enum ProjectsAction {
    None,
    View(String),
    Edit(String),
    Delete(String),
    Create,
    Export,
    Import,
}

const CARD_WIDTH: f32 = 260.0;

/// Display the project cards.
pub fn show(ui: &mut egui::Ui, store: &ProjectStore) -> ProjectsAction {
    let mut action = ProjectsAction::None;

    ui.horizontal(|ui| {
        if ui.button("➕ New Project").clicked() {
            action = ProjectsAction::Create;
        }
        ui.separator();
        if ui.button("Export...").clicked() {
            action = ProjectsAction::Export;
        }
        if ui.button("Import...").clicked() {
            action = ProjectsAction::Import;
        }
    });
    ui.separator();

    if store.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new("No projects yet. Create one to get started.")
                    .color(egui::Color32::from_gray(150)),
            );
        });
        return action;
    }

    let columns = ((ui.available_width() / (CARD_WIDTH + 12.0)).floor() as usize).max(1);

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("projects_grid")
            .spacing([12.0, 12.0])
            .show(ui, |ui| {
                for (index, (slug, project)) in store.iter().enumerate() {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.set_width(CARD_WIDTH);
                        ui.label(egui::RichText::new(&project.title).strong().size(16.0));
                        ui.label(
                            egui::RichText::new(format!(
                                "360° Virtual Tour • {} • {} hotspots",
                                project.created_label(),
                                project.hotspots.len()
                            ))
                            .small()
                            .weak(),
                        );
                        ui.label(egui::RichText::new(slug).monospace().small());
                        ui.horizontal(|ui| {
                            if ui.small_button("👁 View").clicked() {
                                action = ProjectsAction::View(slug.clone());
                            }
                            if ui.small_button("✏ Edit").clicked() {
                                action = ProjectsAction::Edit(slug.clone());
                            }
                            if ui.small_button("🗑 Delete").clicked() {
                                action = ProjectsAction::Delete(slug.clone());
                            }
                        });
                    });
                    if (index + 1) % columns == 0 {
                        ui.end_row();
                    }
                }
            });
    });

    action
}
