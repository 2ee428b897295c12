// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project backup export and import.
//!
//! The whole project map can be written to and read back from YAML or
//! JSON files, chosen by file extension.

use crate::models::project::ProjectMap;
use crate::util::slug::is_slug;
use anyhow::{bail, Result};
use std::path::Path;

/// Backup file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupFormat {
    Json,
    Yaml,
}

impl BackupFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            other => bail!("Unsupported file extension: {:?}", other),
        }
    }
}

/// Write every project to `path` in the format implied by its extension.
pub fn export(projects: &ProjectMap, path: &Path) -> Result<()> {
    let text = match BackupFormat::from_path(path)? {
        BackupFormat::Yaml => serde_yaml::to_string(projects)?,
        BackupFormat::Json => serde_json::to_string_pretty(projects)?,
    };
    std::fs::write(path, text)?;
    Ok(())
}

/// Read a backup written by [`export`].
///
/// The whole file is rejected if any key is not already a slug, since such
/// a project could never be logged into (or an empty key would match any
/// symbol-only name).
pub fn import(path: &Path) -> Result<ProjectMap> {
    let format = BackupFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    let projects: ProjectMap = match format {
        BackupFormat::Yaml => serde_yaml::from_str(&text)?,
        BackupFormat::Json => serde_json::from_str(&text)?,
    };
    if let Some(key) = projects.keys().find(|key| !is_slug(key)) {
        bail!("Invalid project key in backup: {:?}", key);
    }
    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hotspot::Hotspot;
    use crate::models::project::default_projects;

    #[test]
    fn test_yaml_backup_keeps_hotspots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.yaml");
        let mut projects = default_projects();
        projects.get_mut("casa-modelo").unwrap().hotspots.push(Hotspot {
            pitch: -3.5,
            yaw: 120.0,
            parent_id: None,
            target: Some("sala".to_string()),
        });

        export(&projects, &path).unwrap();
        assert_eq!(import(&path).unwrap(), projects);
    }

    #[test]
    fn test_unsupported_extension() {
        let path = Path::new("backup.txt");
        assert!(BackupFormat::from_path(path).is_err());
        assert!(export(&default_projects(), path).is_err());
    }

    #[test]
    fn test_json_import_of_invalid_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(import(&path).is_err());
    }

    #[test]
    fn test_import_rejects_keys_that_are_not_slugs() {
        let dir = tempfile::tempdir().unwrap();
        let record = r#"{"password":"x","image":"data:image/png;base64,AAAA","title":"T","createdAt":"2024-01-01T00:00:00Z"}"#;

        for key in ["", "Casa Nova", "casa--nova"] {
            let path = dir.path().join("keys.json");
            std::fs::write(&path, format!(r#"{{"{}": {}, "ok": {}}}"#, key, record, record)).unwrap();
            assert!(import(&path).is_err(), "key {:?} was admitted", key);
        }

        let path = dir.path().join("good.json");
        std::fs::write(&path, format!(r#"{{"casa-nova": {}}}"#, record)).unwrap();
        assert!(import(&path).unwrap().contains_key("casa-nova"));
    }
}
