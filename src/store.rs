// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project store.
//!
//! Holds every project in memory and writes the complete map back to
//! storage after each mutation. The in-memory map stays authoritative when
//! a write fails; the next successful save catches storage up.

use crate::io::storage::KeyValueStore;
use crate::models::project::{default_projects, ProjectMap, ProjectRecord};

/// Storage key of the serialized project map.
pub const PROJECTS_KEY: &str = "vj360_projects";

/// All projects, keyed by slug.
pub struct ProjectStore {
    projects: ProjectMap,
    storage: Box<dyn KeyValueStore>,
    /// Bumped on every mutation so views know when to refresh.
    revision: u64,
}

impl ProjectStore {
    /// Load the persisted projects, falling back to the demo set when
    /// nothing is stored or the stored data cannot be read.
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let projects = match storage.get_string(PROJECTS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<ProjectMap>(&raw) {
                Ok(projects) => {
                    log::info!("Loaded {} projects from storage", projects.len());
                    projects
                }
                Err(e) => {
                    log::warn!("Stored projects are unreadable, using defaults: {}", e);
                    default_projects()
                }
            },
            Ok(None) => {
                log::info!("No stored projects, using defaults");
                default_projects()
            }
            Err(e) => {
                log::warn!("Failed to read stored projects, using defaults: {}", e);
                default_projects()
            }
        };

        Self {
            projects,
            storage,
            revision: 0,
        }
    }

    /// Write the full project map to storage.
    ///
    /// Failures are logged and reported through the return value only.
    pub fn save(&mut self) -> bool {
        let json = match serde_json::to_string(&self.projects) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize projects: {}", e);
                return false;
            }
        };
        match self.storage.set_string(PROJECTS_KEY, &json) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to save projects: {}", e);
                false
            }
        }
    }

    pub fn get(&self, slug: &str) -> Option<&ProjectRecord> {
        self.projects.get(slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.projects.contains_key(slug)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ProjectRecord)> {
        self.projects.iter()
    }

    pub fn projects(&self) -> &ProjectMap {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Insert or overwrite `slug`. When `previous_slug` names a different
    /// key (a rename), that key is removed first.
    pub fn upsert(&mut self, slug: &str, record: ProjectRecord, previous_slug: Option<&str>) {
        if let Some(previous) = previous_slug.filter(|p| *p != slug) {
            self.projects.remove(previous);
            log::info!("Renamed project {} -> {}", previous, slug);
        }
        if self.projects.insert(slug.to_string(), record).is_some() {
            log::info!("Updated project {}", slug);
        } else {
            log::info!("Created project {}", slug);
        }
        self.touch();
    }

    /// Remove a project. Removing an unknown slug changes nothing.
    pub fn delete(&mut self, slug: &str) -> Option<ProjectRecord> {
        let removed = self.projects.remove(slug)?;
        log::info!("Deleted project {}, total: {}", slug, self.projects.len());
        self.touch();
        Some(removed)
    }

    /// Replace every project at once (backup import).
    pub fn replace_all(&mut self, projects: ProjectMap) {
        log::info!("Replacing {} projects with {}", self.projects.len(), projects.len());
        self.projects = projects;
        self.touch();
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    pub fn storage_mut(&mut self) -> &mut dyn KeyValueStore {
        self.storage.as_mut()
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::{MemoryStore, SharedStore};

    fn record(title: &str) -> ProjectRecord {
        ProjectRecord::new("secret".into(), "data:image/png;base64,AAAA".into(), title.into())
    }

    #[test]
    fn test_defaults_when_nothing_stored() {
        let store = ProjectStore::load(Box::new(MemoryStore::new()));
        assert_eq!(store.len(), 3);
        assert!(store.contains("projeto-demo"));
    }

    #[test]
    fn test_defaults_when_storage_corrupt() {
        let mut storage = MemoryStore::new();
        storage.set_string(PROJECTS_KEY, "{ definitely not json").unwrap();
        let store = ProjectStore::load(Box::new(storage));
        assert_eq!(store.len(), 3);

        let mut storage = MemoryStore::new();
        storage.set_string(PROJECTS_KEY, "null").unwrap();
        assert_eq!(ProjectStore::load(Box::new(storage)).len(), 3);
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let shared = SharedStore::default();
        let mut store = ProjectStore::load(Box::new(shared.clone()));
        store.upsert("casa-aurea", record("Casa Áurea"), None);
        store.delete("casa-modelo");

        let reloaded = ProjectStore::load(Box::new(shared));
        assert_eq!(reloaded.projects(), store.projects());
        assert!(reloaded.contains("casa-aurea"));
        assert!(!reloaded.contains("casa-modelo"));
    }

    #[test]
    fn test_rename_removes_previous_key() {
        let mut store = ProjectStore::load(Box::new(MemoryStore::new()));
        let mut renamed = store.get("casa-modelo").unwrap().clone();
        renamed.title = "Casa Nova".into();
        store.upsert("casa-nova", renamed.clone(), Some("casa-modelo"));

        assert!(!store.contains("casa-modelo"));
        assert_eq!(store.get("casa-nova"), Some(&renamed));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let shared = SharedStore::default();
        let mut store = ProjectStore::load(Box::new(shared.clone()));
        let revision = store.revision();

        assert!(store.delete("missing").is_none());
        assert_eq!(store.revision(), revision);
        assert_eq!(store.len(), 3);
        assert_eq!(shared.get_string(PROJECTS_KEY).unwrap(), None);
    }

    #[test]
    fn test_delete_removes_from_storage() {
        let shared = SharedStore::default();
        let mut store = ProjectStore::load(Box::new(shared.clone()));
        assert!(store.delete("projeto-demo").is_some());

        let raw = shared.get_string(PROJECTS_KEY).unwrap().unwrap();
        let persisted: ProjectMap = serde_json::from_str(&raw).unwrap();
        assert!(!persisted.contains_key("projeto-demo"));
        assert_eq!(persisted.len(), 2);
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let mut store = ProjectStore::load(Box::new(MemoryStore::with_quota(8)));
        store.upsert("novo", record("Novo"), None);

        assert!(store.contains("novo"));
        assert_eq!(store.len(), 4);
        assert!(!store.save());
    }

    #[test]
    fn test_revision_tracks_mutations() {
        let mut store = ProjectStore::load(Box::new(MemoryStore::new()));
        assert_eq!(store.revision(), 0);
        store.upsert("a", record("A"), None);
        store.replace_all(ProjectMap::new());
        assert_eq!(store.revision(), 2);
        assert!(store.is_empty());
    }
}
