// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Key-value storage backends.
//!
//! The project store and the theme preference are plain strings stored
//! under fixed keys, the way a browser's local storage holds them.

use crate::error::StorageError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// String key-value storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Volatile storage, optionally limited to a byte quota.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects writes once keys and values exceed `bytes` in total.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            values: HashMap::new(),
            quota: Some(bytes),
        }
    }

    fn used_without(&self, key: &str) -> usize {
        self.values
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            if self.used_without(key) + key.len() + value.len() > quota {
                return Err(StorageError::Unavailable("quota exceeded".to_string()));
            }
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a directory holding one file per key.
#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Open (and create if needed) a storage directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::Unavailable(format!("invalid key {:?}", key)));
        }
        Ok(self.root.join(key))
    }
}

impl KeyValueStore for DirStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        // Write next to the target and rename so readers never see a partial value
        let tmp = self.root.join(format!(".{}.tmp", key));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory storage shared between handles, so tests can reload a fresh
/// store from what an earlier one wrote.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct SharedStore(std::rc::Rc<std::cell::RefCell<MemoryStore>>);

#[cfg(test)]
impl KeyValueStore for SharedStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.borrow().get_string(key)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.borrow_mut().set_string(key, value)
    }
}
