// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Login checks for end users and the administrator.
//!
//! Passwords are stored and compared as plain strings. There is no
//! hashing, rate limiting or lockout.

use crate::error::AuthError;
use crate::store::ProjectStore;
use crate::util::slug::slugify;

/// The single administrator password.
pub const ADMIN_PASSWORD: &str = "admin123";

/// Check end-user credentials and return the slug of the opened project.
///
/// An unknown project and a wrong password produce the same error.
pub fn login_user(store: &ProjectStore, project_name: &str, password: &str) -> Result<String, AuthError> {
    let slug = slugify(project_name.trim());
    match store.get(&slug) {
        Some(record) if record.password == password => {
            log::info!("User login to project {}", slug);
            Ok(slug)
        }
        _ => {
            log::warn!("Rejected user login for {:?}", slug);
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Check the administrator password.
pub fn login_admin(password: &str) -> Result<(), AuthError> {
    if password == ADMIN_PASSWORD {
        log::info!("Admin login");
        Ok(())
    } else {
        log::warn!("Rejected admin login");
        Err(AuthError::InvalidAdminPassword)
    }
}
