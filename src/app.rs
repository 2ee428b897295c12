// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! `TourApp` owns the project store, the editor and both viewer slots,
//! decides which screen is visible and turns the actions returned by the
//! UI components into store, editor and viewer operations.

use crate::auth;
use crate::config::AppConfig;
use crate::editor::{ProjectEditor, Saved, SubmitOutcome};
use crate::io::serialization;
use crate::store::ProjectStore;
use crate::theme::Theme;
use crate::ui::editor_form::{self, EditorAction};
use crate::ui::login::{self, LoginAction, LoginForm};
use crate::ui::projects::{self, ProjectsAction};
use crate::ui::toolbar::{self, ToolbarAction};
use crate::viewer::equirect::EquirectRenderer;
use crate::viewer::{Anchor, PanoramaRenderer, ViewerConfig, ViewerSlot};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How long a toast stays visible.
const TOAST_LIFETIME: Duration = Duration::from_millis(2500);

/// Admin panel section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminSection {
    Projects,
    Create,
}

/// Visible screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    Viewer { slug: String, title: String, from_admin: bool },
    Admin(AdminSection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Ok,
    Warn,
    Danger,
}

/// Transient message shown at the bottom of the window.
struct Toast {
    message: String,
    kind: ToastKind,
    shown_at: Instant,
}

/// Main application state.
pub struct TourApp {
    store: ProjectStore,
    editor: ProjectEditor,
    renderer: Box<dyn PanoramaRenderer>,
    main_viewer: ViewerSlot,
    preview_viewer: ViewerSlot,
    screen: Screen,
    login: LoginForm,
    login_error: Option<String>,
    toast: Option<Toast>,
    /// Project awaiting delete confirmation.
    pending_delete: Option<String>,
    theme: Theme,
}

impl TourApp {
    pub fn new(store: ProjectStore, renderer: Box<dyn PanoramaRenderer>) -> Self {
        let theme = Theme::load(store.storage());
        Self {
            store,
            editor: ProjectEditor::new(),
            renderer,
            main_viewer: ViewerSlot::new(Anchor::Main),
            preview_viewer: ViewerSlot::new(Anchor::Preview),
            screen: Screen::Login,
            login: LoginForm::default(),
            login_error: None,
            toast: None,
            pending_delete: None,
            theme,
        }
    }

    /// Build the application from the runtime configuration.
    pub fn from_config(cc: &eframe::CreationContext<'_>, config: &AppConfig) -> Self {
        let store = ProjectStore::load(config.open_storage());
        let renderer = EquirectRenderer::new(config.fetch_timeout);
        let app = Self::new(store, Box::new(renderer));
        app.theme.apply(&cc.egui_ctx);
        app
    }

    fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.toast = Some(Toast {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        });
    }

    pub fn switch_login_mode(&mut self) {
        self.login_error = None;
    }

    /// Check the project login form and open the viewer on success.
    pub fn submit_user_login(&mut self) -> bool {
        match auth::login_user(&self.store, &self.login.project_name, &self.login.password) {
            Ok(slug) => {
                self.login_error = None;
                self.show_viewer(&slug, false);
                true
            }
            Err(e) => {
                self.login_error = Some(e.to_string());
                false
            }
        }
    }

    /// Check the admin login form and open the admin panel on success.
    pub fn submit_admin_login(&mut self) -> bool {
        match auth::login_admin(&self.login.admin_password) {
            Ok(()) => {
                self.login_error = None;
                self.show_section(AdminSection::Projects);
                true
            }
            Err(e) => {
                self.login_error = Some(e.to_string());
                false
            }
        }
    }

    /// Switch to the viewer and open the main panorama session for `slug`.
    pub fn show_viewer(&mut self, slug: &str, from_admin: bool) {
        let Some(project) = self.store.get(slug) else {
            log::warn!("Cannot view unknown project {}", slug);
            return;
        };
        let config = ViewerConfig::main(project.image.clone());
        let markers: Vec<_> = project
            .hotspots
            .iter()
            .filter(|h| h.parent_id.is_none())
            .cloned()
            .collect();
        self.screen = Screen::Viewer {
            slug: slug.to_string(),
            title: project.title.clone(),
            from_admin,
        };

        match self.main_viewer.open(self.renderer.as_ref(), &config) {
            Ok(()) => {
                if let Some(session) = self.main_viewer.session_mut() {
                    session.set_markers(&markers);
                }
            }
            Err(e) => self.show_toast(e.to_string(), ToastKind::Danger),
        }
    }

    /// Show an admin section. Returning to the project list discards the form.
    pub fn show_section(&mut self, section: AdminSection) {
        self.main_viewer.close();
        if section == AdminSection::Projects {
            self.reset_editor();
        }
        self.screen = Screen::Admin(section);
    }

    pub fn start_create(&mut self) {
        self.reset_editor();
        self.show_section(AdminSection::Create);
    }

    /// Open the form on an existing project, with its image in the preview.
    pub fn start_edit(&mut self, slug: &str) {
        self.reset_editor();
        if !self.editor.begin_edit(&self.store, slug) {
            return;
        }
        self.open_preview();
        self.show_section(AdminSection::Create);
    }

    fn reset_editor(&mut self) {
        self.editor.reset();
        self.preview_viewer.close();
    }

    /// Open the preview on the editor's current image, back at the root scene.
    fn open_preview(&mut self) {
        self.editor.hotspots_mut().reset_scene();
        let Some(source) = self.editor.preview_source(&self.store) else {
            self.preview_viewer.close();
            return;
        };
        match self
            .preview_viewer
            .open(self.renderer.as_ref(), &ViewerConfig::preview(source))
        {
            Ok(()) => {
                let markers: Vec<_> = self
                    .editor
                    .hotspots()
                    .for_current_scene()
                    .into_iter()
                    .cloned()
                    .collect();
                if let Some(session) = self.preview_viewer.session_mut() {
                    session.set_markers(&markers);
                }
            }
            Err(e) => self.show_toast(e.to_string(), ToastKind::Danger),
        }
    }

    /// Select (or clear) the image to upload.
    pub fn select_image(&mut self, path: Option<PathBuf>) {
        let cleared = path.is_none();
        self.editor.set_upload(path);
        if cleared {
            self.preview_viewer.close();
        } else {
            self.open_preview();
        }
    }

    /// Drop every hotspot from the working set and the preview.
    pub fn clear_hotspots(&mut self) {
        self.editor.hotspots_mut().clear_all();
        if let Some(session) = self.preview_viewer.session_mut() {
            session.remove_all_markers();
        }
    }

    pub fn submit_project(&mut self) {
        match self.editor.submit(&mut self.store) {
            Ok(SubmitOutcome::Saved(saved)) => self.finish_save(saved),
            Ok(SubmitOutcome::Pending) => {}
            Err(e) => self.show_toast(e.to_string(), ToastKind::Warn),
        }
    }

    /// Complete a background image read, if one has finished.
    pub fn poll_editor(&mut self) {
        match self.editor.poll(&mut self.store) {
            Some(Ok(saved)) => self.finish_save(saved),
            Some(Err(e)) => self.show_toast(e.to_string(), ToastKind::Danger),
            None => {}
        }
    }

    fn finish_save(&mut self, saved: Saved) {
        if saved.overwrote {
            self.show_toast(
                format!("Project updated. It replaced the existing project \"{}\".", saved.slug),
                ToastKind::Warn,
            );
        } else {
            self.show_toast(saved.message(), ToastKind::Ok);
        }
        if saved.form_cleared && self.screen == Screen::Admin(AdminSection::Create) {
            self.show_section(AdminSection::Projects);
        }
    }

    pub fn request_delete(&mut self, slug: &str) {
        if self.store.contains(slug) {
            self.pending_delete = Some(slug.to_string());
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(slug) = self.pending_delete.take() {
            if self.store.delete(&slug).is_some() {
                self.show_toast("Project deleted.", ToastKind::Ok);
            }
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Close both viewers and return to the project login.
    pub fn logout(&mut self) {
        self.main_viewer.close();
        self.reset_editor();
        self.login.reset();
        self.login_error = None;
        self.pending_delete = None;
        self.screen = Screen::Login;
        log::info!("Logged out");
    }

    pub fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.theme = self.theme.toggled();
        self.theme.save(self.store.storage_mut());
        self.theme.apply(ctx);
    }

    fn export_projects(&mut self, path: PathBuf) {
        match serialization::export(self.store.projects(), &path) {
            Ok(()) => {
                log::info!("Exported {} projects to {}", self.store.len(), path.display());
                self.show_toast("Projects exported.", ToastKind::Ok);
            }
            Err(e) => {
                log::error!("Failed to export projects: {}", e);
                self.show_toast("Export failed.", ToastKind::Danger);
            }
        }
    }

    fn import_projects(&mut self, path: PathBuf) {
        match serialization::import(&path) {
            Ok(projects) => {
                log::info!("Imported {} projects from {}", projects.len(), path.display());
                self.store.replace_all(projects);
                self.show_toast("Projects imported.", ToastKind::Ok);
            }
            Err(e) => {
                log::error!("Failed to import projects: {}", e);
                self.show_toast("Import failed.", ToastKind::Danger);
            }
        }
    }

    /// Surface load failures that happened after a session was constructed.
    fn report_viewer_errors(&mut self) {
        let errors: Vec<_> = [&mut self.main_viewer, &mut self.preview_viewer]
            .into_iter()
            .filter_map(|slot| slot.session_mut().and_then(|s| s.take_error()))
            .collect();
        for error in errors {
            self.show_toast(error.to_string(), ToastKind::Danger);
        }
    }

    fn handle_toolbar(&mut self, ctx: &egui::Context, action: ToolbarAction) {
        match action {
            ToolbarAction::ToggleTheme => self.toggle_theme(ctx),
            ToolbarAction::BackToProjects => self.show_section(AdminSection::Projects),
            ToolbarAction::Logout => self.logout(),
            ToolbarAction::None => {}
        }
    }

    fn handle_projects(&mut self, action: ProjectsAction) {
        match action {
            ProjectsAction::View(slug) => self.show_viewer(&slug, true),
            ProjectsAction::Edit(slug) => self.start_edit(&slug),
            ProjectsAction::Delete(slug) => self.request_delete(&slug),
            ProjectsAction::Create => self.start_create(),
            ProjectsAction::Export => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("JSON", &["json"])
                    .add_filter("YAML", &["yaml", "yml"])
                    .set_file_name("vj360_projects.json")
                    .save_file()
                {
                    self.export_projects(path);
                }
            }
            ProjectsAction::Import => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Backups", &["json", "yaml", "yml"])
                    .pick_file()
                {
                    self.import_projects(path);
                }
            }
            ProjectsAction::None => {}
        }
    }

    fn handle_editor(&mut self, action: EditorAction) {
        match action {
            EditorAction::PickImage => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Images", &["jpg", "jpeg", "png", "webp", "bmp", "tif", "tiff"])
                    .pick_file()
                {
                    self.select_image(Some(path));
                }
            }
            EditorAction::ClearImage => self.select_image(None),
            EditorAction::ClearHotspots => self.clear_hotspots(),
            EditorAction::Submit => self.submit_project(),
            EditorAction::Cancel => self.show_section(AdminSection::Projects),
            EditorAction::None => {}
        }
    }

    fn show_login(&mut self, ctx: &egui::Context) {
        let action = egui::CentralPanel::default()
            .show(ctx, |ui| login::show(ui, &mut self.login, self.login_error.as_deref()))
            .inner;

        match action {
            LoginAction::ModeChanged => self.switch_login_mode(),
            LoginAction::SubmitUser => {
                self.submit_user_login();
            }
            LoginAction::SubmitAdmin => {
                self.submit_admin_login();
            }
            LoginAction::None => {}
        }
    }

    fn show_viewer_screen(&mut self, ctx: &egui::Context, title: &str, from_admin: bool) {
        let theme = self.theme;
        let toolbar_action = egui::TopBottomPanel::top("viewer_header")
            .show(ctx, |ui| toolbar::show(ui, title, None, theme, from_admin))
            .inner;

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| match self.main_viewer.session_mut() {
                Some(session) => session.show(ui),
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.label(egui::RichText::new("Could not load the panorama.").weak());
                    });
                }
            });

        self.handle_toolbar(ctx, toolbar_action);
    }

    fn show_admin(&mut self, ctx: &egui::Context, section: AdminSection) {
        let (title, subtitle) = match section {
            AdminSection::Projects => ("Projects", "Manage your projects here."),
            AdminSection::Create if self.editor.editing().is_some() => {
                ("Edit Project", "Change the project settings.")
            }
            AdminSection::Create => ("Create Project", "Set up a new 360° project."),
        };

        let theme = self.theme;
        let toolbar_action = egui::TopBottomPanel::top("admin_header")
            .show(ctx, |ui| toolbar::show(ui, title, Some(subtitle), theme, false))
            .inner;

        let nav = egui::SidePanel::left("admin_nav")
            .resizable(false)
            .default_width(160.0)
            .show(ctx, |ui| {
                let mut selected = None;
                ui.add_space(8.0);
                if ui
                    .selectable_label(section == AdminSection::Projects, "📁 Projects")
                    .clicked()
                {
                    selected = Some(AdminSection::Projects);
                }
                if ui
                    .selectable_label(section == AdminSection::Create, "➕ Create Project")
                    .clicked()
                {
                    selected = Some(AdminSection::Create);
                }
                selected
            })
            .inner;

        match section {
            AdminSection::Projects => {
                let action = egui::CentralPanel::default()
                    .show(ctx, |ui| projects::show(ui, &self.store))
                    .inner;
                self.handle_projects(action);
            }
            AdminSection::Create => {
                let action = egui::CentralPanel::default()
                    .show(ctx, |ui| {
                        editor_form::show(ui, &mut self.editor, self.preview_viewer.session_mut())
                    })
                    .inner;
                self.handle_editor(action);
            }
        }

        match nav {
            Some(AdminSection::Create) if section != AdminSection::Create => self.start_create(),
            Some(AdminSection::Projects) if section != AdminSection::Projects => {
                self.show_section(AdminSection::Projects)
            }
            _ => {}
        }
        self.handle_toolbar(ctx, toolbar_action);
    }

    fn show_delete_confirmation(&mut self, ctx: &egui::Context) {
        let Some(slug) = self.pending_delete.clone() else {
            return;
        };
        let title = self
            .store
            .get(&slug)
            .map(|p| p.title.clone())
            .unwrap_or_else(|| slug.clone());

        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new("Delete project")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("Delete project \"{}\"?", title));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    confirmed = ui.button("Delete").clicked();
                    cancelled = ui.button("Cancel").clicked();
                });
            });

        if confirmed {
            self.confirm_delete();
        } else if cancelled {
            self.cancel_delete();
        }
    }

    fn show_toast_panel(&mut self, ctx: &egui::Context) {
        let Some(toast) = &self.toast else {
            return;
        };
        let elapsed = toast.shown_at.elapsed();
        if elapsed >= TOAST_LIFETIME {
            self.toast = None;
            return;
        }

        let color = match toast.kind {
            ToastKind::Ok => egui::Color32::from_rgb(22, 163, 74),
            ToastKind::Warn => egui::Color32::from_rgb(217, 119, 6),
            ToastKind::Danger => egui::Color32::from_rgb(220, 38, 38),
        };
        egui::TopBottomPanel::bottom("toast").show(ctx, |ui| {
            ui.colored_label(color, &toast.message);
        });
        ctx.request_repaint_after(TOAST_LIFETIME - elapsed);
    }
}

impl eframe::App for TourApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_editor();
        if self.editor.is_busy() {
            ctx.request_repaint();
        }
        self.report_viewer_errors();

        // Bottom panels are laid out before the central panel
        self.show_toast_panel(ctx);

        match self.screen.clone() {
            Screen::Login => self.show_login(ctx),
            Screen::Viewer { title, from_admin, .. } => self.show_viewer_screen(ctx, &title, from_admin),
            Screen::Admin(section) => self.show_admin(ctx, section),
        }

        self.show_delete_confirmation(ctx);
    }
}
