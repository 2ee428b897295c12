// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the VJ360 application.
//!
//! Each component draws itself and returns an action enum that the
//! application root turns into state changes.

pub mod canvas;
pub mod editor_form;
pub mod hotspots;
pub mod login;
pub mod projects;
pub mod toolbar;
