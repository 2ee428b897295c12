// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Login screen.
//!
//! A toggle switches between the project login (name + password) and the
//! admin login (password only).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    User,
    Admin,
}

/// Contents of both login forms.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub mode: LoginMode,
    pub project_name: String,
    pub password: String,
    pub admin_password: String,
}

impl LoginForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Result of login screen interaction.
pub enum LoginAction {
    None,
    ModeChanged,
    SubmitUser,
    SubmitAdmin,
}

/// Display the login card.
pub fn show(ui: &mut egui::Ui, form: &mut LoginForm, error: Option<&str>) -> LoginAction {
    let mut action = LoginAction::None;

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.15);
        ui.heading(egui::RichText::new("VJ360").size(32.0).strong());
        ui.label(egui::RichText::new("360° virtual tours").weak());
        ui.add_space(20.0);

        egui::Frame::group(ui.style()).inner_margin(16.0).show(ui, |ui| {
            ui.set_max_width(320.0);

            let mut admin = form.mode == LoginMode::Admin;
            if ui.checkbox(&mut admin, "Admin mode").changed() {
                form.mode = if admin { LoginMode::Admin } else { LoginMode::User };
                action = LoginAction::ModeChanged;
            }
            ui.add_space(8.0);

            let enter = |response: &egui::Response| {
                response.lost_focus() && response.ctx.input(|i| i.key_pressed(egui::Key::Enter))
            };

            match form.mode {
                LoginMode::User => {
                    ui.label("Project name");
                    let name = ui.text_edit_singleline(&mut form.project_name);
                    ui.label("Password");
                    let password = ui.add(egui::TextEdit::singleline(&mut form.password).password(true));
                    ui.add_space(8.0);
                    if ui.button("Enter").clicked() || enter(&name) || enter(&password) {
                        action = LoginAction::SubmitUser;
                    }
                }
                LoginMode::Admin => {
                    ui.label("Admin password");
                    let password =
                        ui.add(egui::TextEdit::singleline(&mut form.admin_password).password(true));
                    ui.add_space(8.0);
                    if ui.button("Enter as admin").clicked() || enter(&password) {
                        action = LoginAction::SubmitAdmin;
                    }
                }
            }

            if let Some(error) = error {
                ui.add_space(8.0);
                ui.colored_label(ui.visuals().error_fg_color, error);
            }
        });
    });

    action
}
