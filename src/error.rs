// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for storage, login, editing and panorama loading.
//!
//! Display strings double as the messages shown to the user.

use thiserror::Error;

/// Failure of the key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Login failure. Neither variant reveals which part of the credentials was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Incorrect project name or password!")]
    InvalidCredentials,
    #[error("Incorrect admin password!")]
    InvalidAdminPassword,
}

/// Rejected project submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("Enter a project name.")]
    EmptySlug,
    #[error("Enter a title.")]
    EmptyTitle,
    #[error("Select a 360° image.")]
    MissingImage,
    #[error("Project already exists!")]
    DuplicateSlug,
    #[error("A save is already in progress.")]
    Busy,
    #[error("Could not read the image: {0}")]
    ImageRead(String),
}

/// Failure to decode or fetch an image.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("malformed data URI")]
    MalformedDataUri,
    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("pixel buffer does not match the image size")]
    PixelBuffer,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to start a panorama session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewerError {
    #[error("Could not load the panorama.")]
    EmptySource,
    #[error("Could not load the panorama.")]
    UnsupportedSource(String),
    #[error("Could not load the panorama.")]
    Load(String),
}
