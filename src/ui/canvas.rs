// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Panorama canvas.
//!
//! Draws the visible part of an equirectangular texture, hotspot markers
//! and the optional compass/zoom/fullscreen controls. Dragging looks
//! around and scrolling zooms.

use crate::models::hotspot::Hotspot;
use crate::util::geometry::{pitch_to_v, project_to_view, visible_spans, wrap_yaw};

const MIN_HFOV: f32 = 30.0;
const MAX_HFOV: f32 = 120.0;

/// Camera orientation, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub yaw: f32,
    pub pitch: f32,
    pub hfov: f32,
    /// Auto-rotation stops once the user moves the view.
    pub interacted: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            hfov: 100.0,
            interacted: false,
        }
    }
}

impl ViewState {
    pub fn zoom_by(&mut self, delta: f32) {
        self.hfov = (self.hfov - delta).clamp(MIN_HFOV, MAX_HFOV);
    }
}

/// Overlay controls and motion of the canvas.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasOptions {
    pub auto_rotate: Option<f32>,
    pub compass: bool,
    pub zoom_controls: bool,
    pub fullscreen_control: bool,
}

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    ToggleFullscreen,
}

/// Display the panorama and handle mouse interactions.
pub fn show(
    ui: &mut egui::Ui,
    texture: &egui::TextureHandle,
    view: &mut ViewState,
    markers: &[Hotspot],
    options: CanvasOptions,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    let rect = ui.available_rect_before_wrap();
    if rect.width() < 1.0 || rect.height() < 1.0 {
        return action;
    }
    let response = ui.allocate_rect(rect, egui::Sense::drag());

    let vfov = (view.hfov * rect.height() / rect.width()).min(180.0);

    if response.dragged() {
        let delta = response.drag_delta();
        view.yaw = wrap_yaw(view.yaw - delta.x * view.hfov / rect.width());
        view.pitch += delta.y * vfov / rect.height();
        view.interacted = true;
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll != 0.0 {
            view.zoom_by(scroll * 0.1);
            view.interacted = true;
        }
    }
    if let Some(rate) = options.auto_rotate.filter(|_| !view.interacted) {
        let dt = ui.input(|i| i.stable_dt);
        view.yaw = wrap_yaw(view.yaw + rate * dt);
        ui.ctx().request_repaint();
    }

    let max_pitch = (90.0 - vfov / 2.0).max(0.0);
    view.pitch = view.pitch.clamp(-max_pitch, max_pitch);

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, egui::Color32::BLACK);

    let v_top = pitch_to_v(view.pitch + vfov / 2.0);
    let v_bottom = pitch_to_v(view.pitch - vfov / 2.0);
    for span in visible_spans(view.yaw, view.hfov) {
        let screen = egui::Rect::from_min_max(
            egui::pos2(rect.left() + span.x0 * rect.width(), rect.top()),
            egui::pos2(rect.left() + span.x1 * rect.width(), rect.bottom()),
        );
        let uv = egui::Rect::from_min_max(egui::pos2(span.u0, v_top), egui::pos2(span.u1, v_bottom));
        painter.image(texture.id(), screen, uv, egui::Color32::WHITE);
    }

    for hotspot in markers {
        if let Some((fx, fy)) = project_to_view(
            hotspot.yaw as f32,
            hotspot.pitch as f32,
            view.yaw,
            view.pitch,
            view.hfov,
            vfov,
        ) {
            let center = egui::pos2(rect.left() + fx * rect.width(), rect.top() + fy * rect.height());
            painter.circle_filled(center, 9.0, egui::Color32::from_rgba_unmultiplied(255, 255, 255, 200));
            painter.circle_stroke(center, 9.0, egui::Stroke::new(2.0, egui::Color32::from_rgb(37, 99, 235)));
        }
    }

    if options.compass {
        draw_compass(&painter, rect, view.yaw);
    }

    if options.zoom_controls || options.fullscreen_control {
        let mut top = rect.top() + 8.0;
        let button_size = egui::vec2(28.0, 28.0);
        let mut next_button = |ui: &mut egui::Ui, label: &str| {
            let button_rect = egui::Rect::from_min_size(egui::pos2(rect.right() - 36.0, top), button_size);
            top += 32.0;
            ui.put(button_rect, egui::Button::new(label)).clicked()
        };
        if options.zoom_controls {
            if next_button(ui, "+") {
                view.zoom_by(10.0);
            }
            if next_button(ui, "−") {
                view.zoom_by(-10.0);
            }
        }
        if options.fullscreen_control && next_button(ui, "⛶") {
            action = CanvasAction::ToggleFullscreen;
        }
    }

    action
}

/// Draw a compass whose needle points north (yaw 0).
fn draw_compass(painter: &egui::Painter, rect: egui::Rect, yaw: f32) {
    let center = rect.left_top() + egui::vec2(32.0, 32.0);
    let radius = 20.0;
    painter.circle_filled(center, radius, egui::Color32::from_black_alpha(140));
    painter.circle_stroke(center, radius, egui::Stroke::new(1.0, egui::Color32::WHITE));

    let angle = (-yaw).to_radians();
    let tip = center + egui::vec2(angle.sin(), -angle.cos()) * (radius - 4.0);
    painter.line_segment([center, tip], egui::Stroke::new(3.0, egui::Color32::from_rgb(220, 38, 38)));
    painter.text(
        center + egui::vec2(0.0, radius + 8.0),
        egui::Align2::CENTER_CENTER,
        "N",
        egui::FontId::proportional(11.0),
        egui::Color32::WHITE,
    );
}
