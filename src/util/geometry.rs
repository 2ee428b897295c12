// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module maps view angles onto an equirectangular texture and
//! projects panorama coordinates (yaw, pitch in degrees) onto the screen.

/// Horizontal slice of an equirectangular texture visible on screen.
///
/// `u0..u1` is the texture range (0.0 to 1.0) and `x0..x1` the matching
/// fraction of the viewport width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureSpan {
    pub u0: f32,
    pub u1: f32,
    pub x0: f32,
    pub x1: f32,
}

/// Wrap an angle in degrees into `[-180, 180)`.
pub fn wrap_yaw(yaw: f32) -> f32 {
    (yaw + 180.0).rem_euclid(360.0) - 180.0
}

/// Texture column (0.0 to 1.0) for a yaw in degrees. Yaw 0 is the texture center.
pub fn yaw_to_u(yaw: f32) -> f32 {
    (wrap_yaw(yaw) + 180.0) / 360.0
}

/// Texture row (0.0 to 1.0) for a pitch in degrees. Pitch +90 is the top row.
pub fn pitch_to_v(pitch: f32) -> f32 {
    ((90.0 - pitch.clamp(-90.0, 90.0)) / 180.0).clamp(0.0, 1.0)
}

/// Visible texture spans for a view centered on `yaw` with horizontal field of view `hfov`.
///
/// A view crossing the ±180° seam is split into two spans.
pub fn visible_spans(yaw: f32, hfov: f32) -> Vec<TextureSpan> {
    let hfov = hfov.clamp(1.0, 360.0);
    let width = hfov / 360.0;
    let start = yaw_to_u(yaw - hfov / 2.0);
    let end = start + width;

    if end <= 1.0 {
        return vec![TextureSpan { u0: start, u1: end, x0: 0.0, x1: 1.0 }];
    }

    let split = (1.0 - start) / width;
    vec![
        TextureSpan { u0: start, u1: 1.0, x0: 0.0, x1: split },
        TextureSpan { u0: 0.0, u1: end - 1.0, x0: split, x1: 1.0 },
    ]
}

/// Project a panorama coordinate onto the viewport as fractions of its width and height.
///
/// Returns `None` when the point lies outside the current view.
pub fn project_to_view(
    point_yaw: f32,
    point_pitch: f32,
    view_yaw: f32,
    view_pitch: f32,
    hfov: f32,
    vfov: f32,
) -> Option<(f32, f32)> {
    let dx = wrap_yaw(point_yaw - view_yaw);
    let dy = view_pitch - point_pitch;
    if dx.abs() > hfov / 2.0 || dy.abs() > vfov / 2.0 {
        return None;
    }
    Some((0.5 + dx / hfov, 0.5 + dy / vfov))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.0001
    }

    #[test]
    fn test_wrap_yaw() {
        assert!(approx(wrap_yaw(190.0), -170.0));
        assert!(approx(wrap_yaw(-190.0), 170.0));
        assert!(approx(wrap_yaw(720.0), 0.0));
    }

    #[test]
    fn test_texture_coordinates() {
        assert!(approx(yaw_to_u(0.0), 0.5));
        assert!(approx(yaw_to_u(-180.0), 0.0));
        assert!(approx(pitch_to_v(90.0), 0.0));
        assert!(approx(pitch_to_v(-90.0), 1.0));
        assert!(approx(pitch_to_v(0.0), 0.5));
    }

    #[test]
    fn test_single_span_inside_texture() {
        let spans = visible_spans(0.0, 90.0);
        assert_eq!(spans.len(), 1);
        assert!(approx(spans[0].u0, 0.375));
        assert!(approx(spans[0].u1, 0.625));
    }

    #[test]
    fn test_span_split_at_seam() {
        let spans = visible_spans(180.0, 90.0);
        assert_eq!(spans.len(), 2);
        assert!(approx(spans[0].u0, 0.875));
        assert!(approx(spans[0].u1, 1.0));
        assert!(approx(spans[0].x1, 0.5));
        assert!(approx(spans[1].u0, 0.0));
        assert!(approx(spans[1].u1, 0.125));
        assert!(approx(spans[1].x0, 0.5));
    }

    #[test]
    fn test_projection_inside_and_outside_view() {
        let center = project_to_view(10.0, 0.0, 10.0, 0.0, 90.0, 60.0).unwrap();
        assert!(approx(center.0, 0.5) && approx(center.1, 0.5));

        let across_seam = project_to_view(-175.0, 0.0, 175.0, 0.0, 90.0, 60.0).unwrap();
        assert!(approx(across_seam.0, 0.5 + 10.0 / 90.0));

        assert!(project_to_view(90.0, 0.0, 0.0, 0.0, 90.0, 60.0).is_none());
        assert!(project_to_view(0.0, 45.0, 0.0, 0.0, 90.0, 60.0).is_none());
    }
}
