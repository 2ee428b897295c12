// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project create/edit form with image preview and hotspot list.

use super::hotspots::{self, HotspotsAction};
use crate::editor::ProjectEditor;
use crate::viewer::PanoramaSession;

/// Result of editor form interaction.
pub enum EditorAction {
    None,
    PickImage,
    ClearImage,
    ClearHotspots,
    Submit,
    Cancel,
}

const PREVIEW_HEIGHT: f32 = 320.0;

/// Display the form. `preview` is drawn below the image picker when open.
pub fn show(
    ui: &mut egui::Ui,
    editor: &mut ProjectEditor,
    preview: Option<&mut Box<dyn PanoramaSession>>,
) -> EditorAction {
    let mut action = EditorAction::None;
    let editing = editor.editing().is_some();
    let busy = editor.is_busy();

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("project_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Project name");
                ui.text_edit_singleline(&mut editor.form.name);
                ui.end_row();

                ui.label("Password");
                ui.add(egui::TextEdit::singleline(&mut editor.form.password).password(true));
                ui.end_row();

                ui.label("Title");
                ui.text_edit_singleline(&mut editor.form.title);
                ui.end_row();

                ui.label("360° image");
                ui.horizontal(|ui| {
                    if ui.button("Choose image...").clicked() {
                        action = EditorAction::PickImage;
                    }
                    match editor.upload() {
                        Some(path) => {
                            let name = path
                                .file_name()
                                .map(|n| n.to_string_lossy().into_owned())
                                .unwrap_or_default();
                            ui.label(name);
                            if ui.small_button("✖").clicked() {
                                action = EditorAction::ClearImage;
                            }
                        }
                        None if editing => {
                            ui.label(egui::RichText::new("keeping current image").weak());
                        }
                        None => {
                            ui.label(egui::RichText::new("no image selected").weak());
                        }
                    }
                });
                ui.end_row();
            });

        if let Some(session) = preview {
            ui.add_space(8.0);
            egui::Frame::canvas(ui.style()).show(ui, |ui| {
                ui.set_min_height(PREVIEW_HEIGHT);
                ui.set_max_height(PREVIEW_HEIGHT);
                session.show(ui);
            });

            ui.add_space(8.0);
            if let HotspotsAction::ClearAll = hotspots::show(ui, editor.hotspots()) {
                action = EditorAction::ClearHotspots;
            }
        }

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            let label = if editing { "Save Changes" } else { "Create Project" };
            if ui.add_enabled(!busy, egui::Button::new(label)).clicked() {
                action = EditorAction::Submit;
            }
            if ui.button("Cancel").clicked() {
                action = EditorAction::Cancel;
            }
            if busy {
                ui.spinner();
                ui.label("Reading image...");
            }
        });
    });

    action
}
