// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project create/edit form and its commit logic.
//!
//! Submitting validates the form, then either commits at once (editing
//! without a new image) or reads the uploaded image on a background
//! thread and commits when [`ProjectEditor::poll`] sees the result. Only
//! one read may be in flight; a second submit while it runs is refused.
//! A read that completes after the form was reset or reopened still
//! commits, but leaves the newer form alone.

use crate::error::{EditorError, MediaError};
use crate::io::media;
use crate::models::hotspot::{Hotspot, HotspotList};
use crate::models::project::ProjectRecord;
use crate::store::ProjectStore;
use crate::util::slug::slugify;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, TryRecvError};

/// Text fields of the project form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub name: String,
    pub password: String,
    pub title: String,
}

/// A committed project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    pub slug: String,
    pub created: bool,
    /// The submitted form was still open and has been cleared.
    pub form_cleared: bool,
    /// A rename replaced another project already stored under `slug`.
    pub overwrote: bool,
}

impl Saved {
    pub fn message(&self) -> &'static str {
        if self.created {
            "Project created successfully!"
        } else {
            "Project updated successfully!"
        }
    }
}

/// Result of a submit that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved(Saved),
    /// The image is being read; call `poll` until it completes.
    Pending,
}

/// A validated submission waiting for its image.
struct PendingCommit {
    slug: String,
    password: String,
    title: String,
    hotspots: Vec<Hotspot>,
    previous_slug: Option<String>,
    created_at: Option<DateTime<Utc>>,
    /// Form generation at submit time.
    generation: u64,
    receiver: Receiver<Result<String, MediaError>>,
}

/// Editor state for creating or editing one project.
#[derive(Default)]
pub struct ProjectEditor {
    pub form: ProjectForm,
    /// Slug of the project being edited, `None` when creating.
    editing: Option<String>,
    /// Newly selected image file.
    upload: Option<PathBuf>,
    hotspots: HotspotList,
    pending: Option<PendingCommit>,
    /// Bumped whenever the form is cleared or reopened.
    generation: u64,
}

impl ProjectEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the form for a new project.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.form = ProjectForm::default();
        self.editing = None;
        self.upload = None;
        self.hotspots = HotspotList::new();
    }

    /// Start editing `slug`, loading its fields and hotspots into the form.
    ///
    /// Returns `false` (and leaves the editor untouched) for an unknown slug.
    pub fn begin_edit(&mut self, store: &ProjectStore, slug: &str) -> bool {
        let Some(record) = store.get(slug) else {
            return false;
        };
        self.reset();
        self.form = ProjectForm {
            name: slug.to_string(),
            password: record.password.clone(),
            title: record.title.clone(),
        };
        self.editing = Some(slug.to_string());
        self.hotspots.load(&record.hotspots);
        log::info!("Editing project {} ({} hotspots)", slug, record.hotspots.len());
        true
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn upload(&self) -> Option<&Path> {
        self.upload.as_deref()
    }

    /// Select or clear the image file. Clearing it also drops the hotspot working set.
    pub fn set_upload(&mut self, path: Option<PathBuf>) {
        if path.is_none() {
            self.hotspots.clear_all();
        }
        self.hotspots.reset_scene();
        self.upload = path;
    }

    /// Image to show in the preview: the new upload, else the edited project's image.
    pub fn preview_source(&self, store: &ProjectStore) -> Option<String> {
        if let Some(path) = &self.upload {
            return Some(path.to_string_lossy().into_owned());
        }
        self.editing
            .as_deref()
            .and_then(|slug| store.get(slug))
            .map(|record| record.image.clone())
    }

    pub fn hotspots(&self) -> &HotspotList {
        &self.hotspots
    }

    pub fn hotspots_mut(&mut self) -> &mut HotspotList {
        &mut self.hotspots
    }

    /// Whether an image read is in flight.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Validate the form and commit it, or start reading the uploaded image.
    pub fn submit(&mut self, store: &mut ProjectStore) -> Result<SubmitOutcome, EditorError> {
        if self.pending.is_some() {
            return Err(EditorError::Busy);
        }

        let slug = slugify(self.form.name.trim());
        if slug.is_empty() {
            return Err(EditorError::EmptySlug);
        }
        let title = self.form.title.trim().to_string();
        if title.is_empty() {
            return Err(EditorError::EmptyTitle);
        }

        let existing = self.editing.as_deref().and_then(|previous| store.get(previous));

        if self.upload.is_none() {
            let Some(existing) = existing else {
                return Err(EditorError::MissingImage);
            };
            let record = ProjectRecord {
                password: self.form.password.clone(),
                image: existing.image.clone(),
                title,
                hotspots: self.hotspots.to_vec(),
                created_at: existing.created_at,
            };
            let overwrote = overwrites(store, &slug, self.editing.as_deref());
            store.upsert(&slug, record, self.editing.as_deref());
            self.reset();
            return Ok(SubmitOutcome::Saved(Saved {
                slug,
                created: false,
                form_cleared: true,
                overwrote,
            }));
        }

        if self.editing.is_none() && store.contains(&slug) {
            return Err(EditorError::DuplicateSlug);
        }

        let created_at = existing.map(|record| record.created_at);
        let path = self.upload.clone().unwrap_or_default();
        let (sender, receiver) = channel();
        std::thread::spawn(move || {
            let result = media::read_as_data_url(&path);
            if let Err(e) = &result {
                log::error!("Failed to read image {}: {}", path.display(), e);
            }
            let _ = sender.send(result);
        });

        self.pending = Some(PendingCommit {
            slug,
            password: self.form.password.clone(),
            title,
            hotspots: self.hotspots.to_vec(),
            previous_slug: self.editing.clone(),
            created_at,
            generation: self.generation,
            receiver,
        });
        Ok(SubmitOutcome::Pending)
    }

    /// Finish a pending submission once its image has been read.
    ///
    /// Returns `None` while nothing is pending or the read is still running.
    pub fn poll(&mut self, store: &mut ProjectStore) -> Option<Result<Saved, EditorError>> {
        let result = match self.pending.as_ref()?.receiver.try_recv() {
            Ok(result) => result.map_err(|e| EditorError::ImageRead(e.to_string())),
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                Err(EditorError::ImageRead("reader stopped unexpectedly".to_string()))
            }
        };
        let pending = self.pending.take()?;

        let image = match result {
            Ok(image) => image,
            Err(e) => return Some(Err(e)),
        };

        let record = ProjectRecord {
            password: pending.password,
            image,
            title: pending.title,
            hotspots: pending.hotspots,
            created_at: pending.created_at.unwrap_or_else(Utc::now),
        };
        let overwrote = overwrites(store, &pending.slug, pending.previous_slug.as_deref());
        store.upsert(&pending.slug, record, pending.previous_slug.as_deref());

        let form_cleared = pending.generation == self.generation;
        if form_cleared {
            self.reset();
        }

        Some(Ok(Saved {
            slug: pending.slug,
            created: pending.previous_slug.is_none(),
            form_cleared,
            overwrote,
        }))
    }
}

/// Whether renaming `previous` to `slug` replaces a different stored project.
fn overwrites(store: &ProjectStore, slug: &str, previous: Option<&str>) -> bool {
    let overwrote = previous.is_some_and(|previous| previous != slug) && store.contains(slug);
    if overwrote {
        log::warn!("Rename overwrites existing project {}", slug);
    }
    overwrote
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::{MemoryStore, SharedStore};
    use crate::models::hotspot::Hotspot;
    use std::time::{Duration, Instant};

    fn store() -> ProjectStore {
        ProjectStore::load(Box::new(MemoryStore::new()))
    }

    fn write_png(dir: &Path) -> PathBuf {
        let path = dir.join("pano.png");
        image::RgbaImage::from_pixel(2, 1, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();
        path
    }

    fn wait(editor: &mut ProjectEditor, store: &mut ProjectStore) -> Result<Saved, EditorError> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(result) = editor.poll(store) {
                return result;
            }
            assert!(Instant::now() < deadline, "image read never completed");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn fill(editor: &mut ProjectEditor, name: &str, password: &str, title: &str) {
        editor.form = ProjectForm {
            name: name.into(),
            password: password.into(),
            title: title.into(),
        };
    }

    #[test]
    fn test_validation_order() {
        let mut store = store();
        let mut editor = ProjectEditor::new();

        fill(&mut editor, " !! ", "pw", "");
        assert_eq!(editor.submit(&mut store), Err(EditorError::EmptySlug));

        fill(&mut editor, "Casa Nova", "pw", "   ");
        assert_eq!(editor.submit(&mut store), Err(EditorError::EmptyTitle));

        fill(&mut editor, "Casa Modelo", "pw", "Casa");
        assert_eq!(editor.submit(&mut store), Err(EditorError::MissingImage));

        editor.set_upload(Some(PathBuf::from("/nonexistent/pano.jpg")));
        assert_eq!(editor.submit(&mut store), Err(EditorError::DuplicateSlug));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_create_with_upload() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store();
        let mut editor = ProjectEditor::new();
        fill(&mut editor, "Casa Áurea!!", "segredo", "Casa Áurea");
        editor.set_upload(Some(write_png(dir.path())));

        assert_eq!(editor.submit(&mut store), Ok(SubmitOutcome::Pending));
        assert!(!store.contains("casa-aurea"));

        let saved = wait(&mut editor, &mut store).unwrap();
        assert_eq!(
            saved,
            Saved { slug: "casa-aurea".into(), created: true, form_cleared: true, overwrote: false }
        );

        let record = store.get("casa-aurea").unwrap();
        assert!(record.image.starts_with("data:image/png;base64,"));
        assert_eq!(record.title, "Casa Áurea");
        assert!(!editor.is_busy());
        assert_eq!(editor.form, ProjectForm::default());
    }

    #[test]
    fn test_second_submit_while_reading_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store();
        let mut editor = ProjectEditor::new();
        fill(&mut editor, "Duplo", "pw", "Duplo");
        editor.set_upload(Some(write_png(dir.path())));

        assert_eq!(editor.submit(&mut store), Ok(SubmitOutcome::Pending));
        assert_eq!(editor.submit(&mut store), Err(EditorError::Busy));

        wait(&mut editor, &mut store).unwrap();
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_edit_rename_keeps_image_and_creation_time() {
        let mut store = store();
        let original = store.get("casa-modelo").unwrap().clone();
        let mut editor = ProjectEditor::new();

        assert!(editor.begin_edit(&store, "casa-modelo"));
        assert_eq!(editor.form.password, "casa2024");
        editor.form.name = "Casa Modelo Reformada".into();

        let outcome = editor.submit(&mut store).unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Saved(Saved {
                slug: "casa-modelo-reformada".into(),
                created: false,
                form_cleared: true,
                overwrote: false,
            })
        );

        assert!(!store.contains("casa-modelo"));
        let renamed = store.get("casa-modelo-reformada").unwrap();
        assert_eq!(renamed.image, original.image);
        assert_eq!(renamed.created_at, original.created_at);
        assert_eq!(renamed.title, original.title);
    }

    #[test]
    fn test_edit_rename_with_new_image_keeps_creation_time() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store();
        let original = store.get("projeto-demo").unwrap().clone();
        let mut editor = ProjectEditor::new();

        editor.begin_edit(&store, "projeto-demo");
        editor.form.name = "Demo Novo".into();
        editor.set_upload(Some(write_png(dir.path())));
        assert_eq!(editor.submit(&mut store), Ok(SubmitOutcome::Pending));

        let saved = wait(&mut editor, &mut store).unwrap();
        assert!(!saved.created);
        assert!(!store.contains("projeto-demo"));
        let record = store.get("demo-novo").unwrap();
        assert_eq!(record.created_at, original.created_at);
        assert_ne!(record.image, original.image);
    }

    #[test]
    fn test_edit_commits_loaded_hotspots() {
        let mut store = store();
        let mut record = store.get("casa-modelo").unwrap().clone();
        record.hotspots.push(Hotspot { pitch: 0.0, yaw: 90.0, parent_id: None, target: None });
        store.upsert("casa-modelo", record, None);

        let mut editor = ProjectEditor::new();
        editor.begin_edit(&store, "casa-modelo");
        assert_eq!(editor.hotspots().len(), 1);
        editor.submit(&mut store).unwrap();
        assert_eq!(store.get("casa-modelo").unwrap().hotspots.len(), 1);

        editor.begin_edit(&store, "casa-modelo");
        editor.hotspots_mut().clear_all();
        editor.submit(&mut store).unwrap();
        assert!(store.get("casa-modelo").unwrap().hotspots.is_empty());
    }

    #[test]
    fn test_failed_read_keeps_form_and_store() {
        let mut store = store();
        let mut editor = ProjectEditor::new();
        fill(&mut editor, "Sem Imagem", "pw", "Sem Imagem");
        editor.set_upload(Some(PathBuf::from("/nonexistent/pano.jpg")));

        assert_eq!(editor.submit(&mut store), Ok(SubmitOutcome::Pending));
        assert!(matches!(wait(&mut editor, &mut store), Err(EditorError::ImageRead(_))));
        assert_eq!(store.len(), 3);
        assert_eq!(editor.form.title, "Sem Imagem");
        assert!(!editor.is_busy());
    }

    #[test]
    fn test_begin_edit_unknown_slug() {
        let store = store();
        let mut editor = ProjectEditor::new();
        assert!(!editor.begin_edit(&store, "missing"));
        assert_eq!(editor.editing(), None);
    }

    #[test]
    fn test_preview_source() {
        let store = store();
        let mut editor = ProjectEditor::new();
        assert_eq!(editor.preview_source(&store), None);

        editor.begin_edit(&store, "casa-modelo");
        assert_eq!(editor.preview_source(&store), Some(store.get("casa-modelo").unwrap().image.clone()));

        editor.set_upload(Some(PathBuf::from("/tmp/new.jpg")));
        assert_eq!(editor.preview_source(&store).as_deref(), Some("/tmp/new.jpg"));
    }

    #[test]
    fn test_rename_onto_existing_slug_is_flagged() {
        let mut store = store();
        let mut editor = ProjectEditor::new();
        editor.begin_edit(&store, "casa-modelo");
        editor.form.name = "Projeto Demo".into();

        let Ok(SubmitOutcome::Saved(saved)) = editor.submit(&mut store) else {
            panic!("rename without upload should commit at once");
        };
        assert!(saved.overwrote);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("projeto-demo").unwrap().password, "casa2024");

        editor.begin_edit(&store, "projeto-demo");
        let Ok(SubmitOutcome::Saved(saved)) = editor.submit(&mut store) else {
            panic!("edit without upload should commit at once");
        };
        assert!(!saved.overwrote);
    }

    #[test]
    fn test_editor_records_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let shared = SharedStore::default();
        let mut store = ProjectStore::load(Box::new(shared.clone()));
        let original_created = store.get("casa-modelo").unwrap().created_at;
        let mut editor = ProjectEditor::new();

        fill(&mut editor, "Casa Áurea", "segredo", "Casa Áurea");
        editor.set_upload(Some(write_png(dir.path())));
        editor.submit(&mut store).unwrap();
        wait(&mut editor, &mut store).unwrap();

        let mut with_hotspot = store.get("casa-modelo").unwrap().clone();
        with_hotspot.hotspots.push(Hotspot { pitch: -10.0, yaw: 45.0, parent_id: None, target: None });
        store.upsert("casa-modelo", with_hotspot, None);
        editor.begin_edit(&store, "casa-modelo");
        editor.form.name = "Casa Modelo Nova".into();
        editor.set_upload(Some(write_png(dir.path())));
        editor.submit(&mut store).unwrap();
        wait(&mut editor, &mut store).unwrap();

        let reloaded = ProjectStore::load(Box::new(shared));
        assert_eq!(reloaded.projects(), store.projects());

        let created = reloaded.get("casa-aurea").unwrap();
        assert!(created.image.starts_with("data:image/png;base64,"));
        assert_eq!(created.password, "segredo");

        let renamed = reloaded.get("casa-modelo-nova").unwrap();
        assert!(renamed.image.starts_with("data:image/png;base64,"));
        assert_eq!(renamed.created_at, original_created);
        assert_eq!(renamed.hotspots.len(), 1);
        assert!(!reloaded.contains("casa-modelo"));
    }

    #[test]
    fn test_late_commit_leaves_newer_form_alone() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store();
        let mut editor = ProjectEditor::new();
        fill(&mut editor, "Tarde", "pw", "Tarde");
        editor.set_upload(Some(write_png(dir.path())));
        editor.submit(&mut store).unwrap();

        editor.begin_edit(&store, "casa-modelo");
        let saved = wait(&mut editor, &mut store).unwrap();

        assert!(!saved.form_cleared);
        assert!(store.contains("tarde"));
        assert_eq!(editor.editing(), Some("casa-modelo"));
        assert_eq!(editor.form.password, "casa2024");
    }
}
