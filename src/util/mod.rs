// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Small pure helpers shared by the store and the viewer.

pub mod geometry;
pub mod slug;
