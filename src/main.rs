// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! VJ360 - 360° virtual tours
//!
//! A desktop application for publishing password-protected panorama
//! tours: visitors open a project with its name and password, and an
//! administrator creates, edits, previews and deletes projects.

mod app;
mod auth;
mod config;
mod editor;
mod error;
mod io;
mod models;
mod store;
mod theme;
mod ui;
mod util;
mod viewer;

use anyhow::Result;
use app::TourApp;
use config::AppConfig;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = AppConfig::from_env();
    log::info!("Starting VJ360 with data dir {}", config.data_dir.display());

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("VJ360 - 360° Virtual Tours"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "VJ360",
        options,
        Box::new(move |cc| Ok(Box::new(TourApp::from_config(cc, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
