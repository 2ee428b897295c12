// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Runtime configuration.
//!
//! Settings come from environment variables, with defaults for everything:
//!
//! - `VJ360_DATA_DIR`: directory holding the stored projects and theme
//! - `VJ360_FETCH_TIMEOUT_SECS`: timeout for panoramas referenced by URL
//!
//! Log verbosity is controlled separately through `RUST_LOG`.

use crate::io::storage::{DirStore, KeyValueStore, MemoryStore};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub fetch_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("VJ360_DATA_DIR").filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup("VJ360_FETCH_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.fetch_timeout = Duration::from_secs(secs),
                _ => log::warn!("Ignoring invalid VJ360_FETCH_TIMEOUT_SECS={:?}", raw),
            }
        }

        config
    }

    /// Open the storage directory, falling back to memory-only storage
    /// when it cannot be created.
    pub fn open_storage(&self) -> Box<dyn KeyValueStore> {
        match DirStore::open(&self.data_dir) {
            Ok(store) => {
                log::info!("Using storage at {}", store.root().display());
                Box::new(store)
            }
            Err(e) => {
                log::error!(
                    "Cannot use storage at {}, changes will not persist: {}",
                    self.data_dir.display(),
                    e
                );
                Box::new(MemoryStore::new())
            }
        }
    }
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "vj360")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".vj360"))
}
