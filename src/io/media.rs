// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Panorama image loading.
//!
//! Uploaded images are embedded in project records as `data:` URIs. Any
//! stored image source (data URI, remote URL or local path) can be decoded
//! into RGBA pixels suitable for display in egui.

use crate::error::MediaError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Longest texture side produced by the loader. The GPU limit may be
/// lower; see [`LoadedImage::fit_within`].
pub const MAX_TEXTURE_SIDE: u32 = 8192;

/// Largest remote image accepted, in bytes.
const MAX_REMOTE_BYTES: u64 = 64 * 1024 * 1024;

/// Decoded image data ready for texture upload.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl LoadedImage {
    /// Downscale so neither side exceeds `max_side`, keeping the aspect ratio.
    pub fn fit_within(self, max_side: u32) -> Result<Self, MediaError> {
        let Some((width, height)) = fitted_size(self.width, self.height, max_side) else {
            return Ok(self);
        };
        let rgba = image::RgbaImage::from_raw(self.width, self.height, self.pixels)
            .ok_or(MediaError::PixelBuffer)?;
        let resized = image::imageops::resize(&rgba, width, height, image::imageops::FilterType::Triangle);
        Ok(Self {
            width,
            height,
            pixels: resized.into_raw(),
        })
    }
}

/// Target size when `width`x`height` exceeds `max_side`, or `None` if it fits.
fn fitted_size(width: u32, height: u32, max_side: u32) -> Option<(u32, u32)> {
    let max_side = max_side.max(1);
    let longest = width.max(height);
    if longest <= max_side {
        return None;
    }
    let scale = |side: u32| ((side as u64 * max_side as u64 / longest as u64) as u32).max(1);
    Some((scale(width), scale(height)))
}

/// Where an image source string points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    DataUri,
    Remote,
    File(PathBuf),
}

impl ImageSource {
    /// Classify a stored image string. Empty sources are rejected.
    pub fn classify(source: &str) -> Option<Self> {
        let source = source.trim();
        if source.is_empty() {
            None
        } else if source.starts_with("data:") {
            Some(Self::DataUri)
        } else if source.starts_with("http://") || source.starts_with("https://") {
            Some(Self::Remote)
        } else {
            Some(Self::File(PathBuf::from(source)))
        }
    }
}

/// Read an image file into a self-contained `data:<mime>;base64,...` URI.
pub fn read_as_data_url(path: &Path) -> Result<String, MediaError> {
    let bytes = std::fs::read(path)?;
    let guessed = mime_guess::from_path(path).first_or_octet_stream();
    let mime = if guessed.type_() == mime_guess::mime::IMAGE {
        guessed.to_string()
    } else {
        image::guess_format(&bytes)
            .map(|format| format.to_mime_type().to_string())
            .unwrap_or_else(|_| guessed.to_string())
    };
    Ok(format!("data:{};base64,{}", mime, BASE64.encode(&bytes)))
}

/// Split a base64 `data:` URI into its MIME type and payload bytes.
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>), MediaError> {
    let rest = uri.strip_prefix("data:").ok_or(MediaError::MalformedDataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(MediaError::MalformedDataUri)?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or(MediaError::MalformedDataUri)?;
    let bytes = BASE64.decode(payload.trim())?;
    Ok((mime.to_string(), bytes))
}

/// Fetch the raw bytes behind an image source.
pub fn fetch_bytes(source: &str, timeout: Duration) -> Result<Vec<u8>, MediaError> {
    let source = source.trim();
    match ImageSource::classify(source) {
        Some(ImageSource::DataUri) => decode_data_uri(source).map(|(_, bytes)| bytes),
        Some(ImageSource::Remote) => {
            let agent = ureq::AgentBuilder::new().timeout(timeout).build();
            let response = agent
                .get(source)
                .call()
                .map_err(|e| MediaError::Fetch(e.to_string()))?;
            let mut bytes = Vec::new();
            response
                .into_reader()
                .take(MAX_REMOTE_BYTES)
                .read_to_end(&mut bytes)?;
            Ok(bytes)
        }
        Some(ImageSource::File(path)) => Ok(std::fs::read(path)?),
        None => Err(MediaError::Fetch("empty image source".to_string())),
    }
}

/// Decode image bytes into RGBA pixels, downscaling so that neither side
/// exceeds `max_side`.
pub fn decode_image(bytes: &[u8], max_side: u32) -> Result<LoadedImage, MediaError> {
    let mut img = image::load_from_memory(bytes)?;
    if let Some((width, height)) = fitted_size(img.width(), img.height(), max_side) {
        img = img.resize_exact(width, height, image::imageops::FilterType::Triangle);
    }
    let rgba = img.to_rgba8();
    Ok(LoadedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

/// Fetch and decode an image source.
pub fn load_image(source: &str, timeout: Duration, max_side: u32) -> Result<LoadedImage, MediaError> {
    let bytes = fetch_bytes(source, timeout)?;
    decode_image(&bytes, max_side)
}
