// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Built-in equirectangular panorama renderer.
//!
//! Images are fetched and decoded on a background thread; the texture is
//! uploaded on the first frame after decoding finishes.

use super::{Anchor, PanoramaRenderer, PanoramaSession, ViewerConfig};
use crate::error::{MediaError, ViewerError};
use crate::io::media::{self, ImageSource, LoadedImage};
use crate::models::hotspot::Hotspot;
use crate::ui::canvas::{self, CanvasAction, CanvasOptions, ViewState};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::time::Duration;

/// Renderer drawing panoramas with egui textures.
pub struct EquirectRenderer {
    fetch_timeout: Duration,
}

impl EquirectRenderer {
    pub fn new(fetch_timeout: Duration) -> Self {
        Self { fetch_timeout }
    }
}

impl EquirectRenderer {
    fn open_session(&self, anchor: Anchor, config: &ViewerConfig) -> Result<EquirectSession, ViewerError> {
        match ImageSource::classify(&config.source) {
            None => return Err(ViewerError::EmptySource),
            Some(ImageSource::File(path)) if !path.is_file() => {
                return Err(ViewerError::UnsupportedSource(path.display().to_string()));
            }
            Some(_) => {}
        }

        let mut session = EquirectSession {
            anchor,
            config: config.clone(),
            fetch_timeout: self.fetch_timeout,
            state: LoadState::Idle,
            view: ViewState::default(),
            markers: Vec::new(),
            error: None,
        };
        if config.auto_load {
            session.start_loading();
        }
        log::info!("Started {} viewer", anchor.id());
        Ok(session)
    }
}

impl PanoramaRenderer for EquirectRenderer {
    fn construct(
        &self,
        anchor: Anchor,
        config: &ViewerConfig,
    ) -> Result<Box<dyn PanoramaSession>, ViewerError> {
        Ok(Box::new(self.open_session(anchor, config)?))
    }
}

enum LoadState {
    Idle,
    Loading(Receiver<Result<LoadedImage, MediaError>>),
    Ready(egui::TextureHandle),
    Failed,
    Destroyed,
}

struct EquirectSession {
    anchor: Anchor,
    config: ViewerConfig,
    fetch_timeout: Duration,
    state: LoadState,
    view: ViewState,
    markers: Vec<Hotspot>,
    error: Option<ViewerError>,
}

impl EquirectSession {
    fn start_loading(&mut self) {
        let (sender, receiver) = channel();
        let source = self.config.source.clone();
        let timeout = self.fetch_timeout;
        std::thread::spawn(move || {
            let _ = sender.send(media::load_image(&source, timeout, media::MAX_TEXTURE_SIDE));
        });
        self.state = LoadState::Loading(receiver);
    }

    /// Upload the decoded image once the loader thread finishes. The image is
    /// shrunk first if the GPU cannot hold a texture that large.
    fn poll_loader(&mut self, ctx: &egui::Context) {
        let LoadState::Loading(receiver) = &self.state else {
            return;
        };
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(MediaError::Fetch("loader stopped".to_string())),
        };
        let max_side = u32::try_from(ctx.input(|i| i.max_texture_side)).unwrap_or(u32::MAX);
        match result.and_then(|loaded| loaded.fit_within(max_side)) {
            Ok(loaded) => {
                let size = [loaded.width as usize, loaded.height as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
                let texture = ctx.load_texture(self.anchor.id(), color_image, egui::TextureOptions::LINEAR);
                log::info!("Panorama loaded ({}x{})", loaded.width, loaded.height);
                self.state = LoadState::Ready(texture);
            }
            Err(e) => {
                log::error!("Failed to load panorama: {}", e);
                self.error = Some(ViewerError::Load(e.to_string()));
                self.state = LoadState::Failed;
            }
        }
    }

    fn options(&self) -> CanvasOptions {
        CanvasOptions {
            auto_rotate: self.config.auto_rotate,
            compass: self.config.compass,
            zoom_controls: self.config.show_zoom_ctrl,
            fullscreen_control: self.config.show_fullscreen_ctrl,
        }
    }
}

impl PanoramaSession for EquirectSession {
    fn show(&mut self, ui: &mut egui::Ui) {
        self.poll_loader(ui.ctx());
        let options = self.options();
        let mut load_requested = false;

        match &self.state {
            LoadState::Idle => {
                load_requested = ui
                    .centered_and_justified(|ui| ui.button("Load panorama").clicked())
                    .inner;
            }
            LoadState::Loading(_) => {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
                ui.ctx().request_repaint();
            }
            LoadState::Ready(texture) => {
                let texture = texture.clone();
                if let CanvasAction::ToggleFullscreen =
                    canvas::show(ui, &texture, &mut self.view, &self.markers, options)
                {
                    let fullscreen = ui.ctx().input(|i| i.viewport().fullscreen.unwrap_or(false));
                    ui.ctx()
                        .send_viewport_cmd(egui::ViewportCommand::Fullscreen(!fullscreen));
                }
            }
            LoadState::Failed => {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new("Could not load the panorama.").weak());
                });
            }
            LoadState::Destroyed => {}
        }

        if load_requested {
            self.start_loading();
        }
    }

    fn set_markers(&mut self, markers: &[Hotspot]) {
        self.markers = markers.to_vec();
    }

    fn remove_all_markers(&mut self) {
        self.markers.clear();
    }

    fn take_error(&mut self) -> Option<ViewerError> {
        self.error.take()
    }

    fn destroy(&mut self) {
        // Dropping the texture handle frees it; a pending loader sees a closed channel
        self.state = LoadState::Destroyed;
        self.markers.clear();
        log::info!("Destroyed {} viewer", self.anchor.id());
    }
}
