// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Renderer double that records session lifecycles.

use super::{Anchor, PanoramaRenderer, PanoramaSession, ViewerConfig};
use crate::error::ViewerError;
use crate::models::hotspot::Hotspot;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct Counters {
    constructed: Cell<usize>,
    live: Cell<usize>,
    markers: Cell<usize>,
    last_source: RefCell<Option<String>>,
}

/// Counts constructed and live sessions. Empty sources fail to construct.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    counters: Rc<Counters>,
}

impl RecordingRenderer {
    pub fn constructed(&self) -> usize {
        self.counters.constructed.get()
    }

    pub fn live(&self) -> usize {
        self.counters.live.get()
    }

    pub fn markers(&self) -> usize {
        self.counters.markers.get()
    }

    pub fn last_source(&self) -> Option<String> {
        self.counters.last_source.borrow().clone()
    }
}

impl PanoramaRenderer for RecordingRenderer {
    fn construct(
        &self,
        _anchor: Anchor,
        config: &ViewerConfig,
    ) -> Result<Box<dyn PanoramaSession>, ViewerError> {
        if config.source.trim().is_empty() {
            return Err(ViewerError::EmptySource);
        }
        let counters = &self.counters;
        counters.constructed.set(counters.constructed.get() + 1);
        counters.live.set(counters.live.get() + 1);
        *counters.last_source.borrow_mut() = Some(config.source.clone());
        Ok(Box::new(RecordingSession {
            counters: Rc::clone(&self.counters),
        }))
    }
}

struct RecordingSession {
    counters: Rc<Counters>,
}

impl PanoramaSession for RecordingSession {
    fn show(&mut self, _ui: &mut egui::Ui) {}

    fn set_markers(&mut self, markers: &[Hotspot]) {
        self.counters.markers.set(markers.len());
    }

    fn remove_all_markers(&mut self) {
        self.counters.markers.set(0);
    }

    fn take_error(&mut self) -> Option<ViewerError> {
        None
    }

    fn destroy(&mut self) {
        self.counters.live.set(self.counters.live.get() - 1);
    }
}
