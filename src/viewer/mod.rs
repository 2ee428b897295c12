// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Panorama viewer adapter.
//!
//! Rendering is delegated to a [`PanoramaRenderer`]. The application only
//! constructs sessions, draws them, clears their markers and destroys them.
//! Each [`ViewerSlot`] owns at most one live session; opening a new one
//! destroys the previous session of the same slot first.

pub mod equirect;
#[cfg(test)]
pub mod testing;

use crate::error::ViewerError;
use crate::models::hotspot::Hotspot;

/// Where a session is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// End-user viewing.
    Main,
    /// In-editor preview.
    Preview,
}

impl Anchor {
    pub fn id(self) -> &'static str {
        match self {
            Anchor::Main => "panorama",
            Anchor::Preview => "previewPanorama",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Equirectangular,
}

/// Options handed to the renderer when a session is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub projection: Projection,
    pub source: String,
    pub auto_load: bool,
    /// Degrees per second; negative turns left.
    pub auto_rotate: Option<f32>,
    pub compass: bool,
    pub show_zoom_ctrl: bool,
    pub show_fullscreen_ctrl: bool,
}

impl ViewerConfig {
    /// Settings for the end-user viewer.
    pub fn main(source: impl Into<String>) -> Self {
        Self {
            projection: Projection::Equirectangular,
            source: source.into(),
            auto_load: true,
            auto_rotate: Some(-2.0),
            compass: true,
            show_zoom_ctrl: true,
            show_fullscreen_ctrl: true,
        }
    }

    /// Settings for the editor preview.
    pub fn preview(source: impl Into<String>) -> Self {
        Self {
            projection: Projection::Equirectangular,
            source: source.into(),
            auto_load: true,
            auto_rotate: None,
            compass: false,
            show_zoom_ctrl: false,
            show_fullscreen_ctrl: false,
        }
    }
}

/// A live rendering session.
pub trait PanoramaSession {
    /// Draw the session into the remaining space of `ui`.
    fn show(&mut self, ui: &mut egui::Ui);

    /// Replace the hotspot markers drawn on the panorama.
    fn set_markers(&mut self, markers: &[Hotspot]);

    fn remove_all_markers(&mut self);

    /// A load failure not yet reported to the user.
    fn take_error(&mut self) -> Option<ViewerError>;

    /// Release everything the session holds. Called exactly once.
    fn destroy(&mut self);
}

/// Factory of rendering sessions.
pub trait PanoramaRenderer {
    fn construct(
        &self,
        anchor: Anchor,
        config: &ViewerConfig,
    ) -> Result<Box<dyn PanoramaSession>, ViewerError>;
}

/// Holder of the single session for one anchor.
pub struct ViewerSlot {
    anchor: Anchor,
    session: Option<Box<dyn PanoramaSession>>,
}

impl ViewerSlot {
    pub fn new(anchor: Anchor) -> Self {
        Self {
            anchor,
            session: None,
        }
    }

    /// Destroy any current session, then construct a new one.
    ///
    /// On failure the slot is left empty.
    pub fn open(
        &mut self,
        renderer: &dyn PanoramaRenderer,
        config: &ViewerConfig,
    ) -> Result<(), ViewerError> {
        self.close();
        match renderer.construct(self.anchor, config) {
            Ok(session) => {
                self.session = Some(session);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to start {} viewer: {:?}", self.anchor.id(), e);
                Err(e)
            }
        }
    }

    /// Destroy the current session, if any.
    pub fn close(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.destroy();
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session_mut(&mut self) -> Option<&mut Box<dyn PanoramaSession>> {
        self.session.as_mut()
    }
}

impl Drop for ViewerSlot {
    fn drop(&mut self) {
        self.close();
    }
}
