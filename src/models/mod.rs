// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for persisted projects and their hotspots.

pub mod hotspot;
pub mod project;
