// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file loading.
//!
//! This module turns image sources into pixels: reading uploaded files,
//! parsing `data:` URLs, fetching remote photos and decoding them into the
//! premultiplied RGBA rasters the compositor draws from.

use crate::error::{EditorError, Result};
use crate::models::slide::ImageSource;
use base64::Engine;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tiny_skia::{IntSize, Pixmap};

/// Remote images larger than this are rejected.
const MAX_REMOTE_BYTES: u64 = 64 * 1024 * 1024;

/// Parse a `data:image/...;base64,` URL into an inline image.
pub fn parse_data_url(url: &str) -> Result<ImageSource> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| EditorError::InvalidDataUrl("missing data: prefix".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| EditorError::InvalidDataUrl("missing ',' separator".into()))?;
    if !header.ends_with(";base64") {
        return Err(EditorError::InvalidDataUrl(format!(
            "only base64 payloads are supported, got {header:?}"
        )));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| EditorError::InvalidDataUrl(e.to_string()))?;
    Ok(ImageSource::inline(bytes))
}

/// Read an uploaded image file into an inline image.
pub fn read_image_file(path: &Path) -> Result<ImageSource> {
    let bytes = std::fs::read(path)?;
    image::guess_format(&bytes)
        .map_err(|e| EditorError::decode(format!("{}: {}", path.display(), e)))?;
    log::info!("Read image: {} ({} bytes)", path.display(), bytes.len());
    Ok(ImageSource::inline(bytes))
}

/// Read a batch of uploads. Any failure fails the whole batch.
pub fn read_image_files(paths: &[PathBuf]) -> Result<Vec<ImageSource>> {
    paths.iter().map(|path| read_image_file(path)).collect()
}

/// Get the encoded bytes behind a source, fetching remote ones.
pub fn load_bytes(source: &ImageSource) -> Result<Arc<[u8]>> {
    match source {
        ImageSource::Inline(image) => Ok(Arc::from(image.bytes())),
        ImageSource::Remote(url) if url.starts_with("data:") => match parse_data_url(url)? {
            ImageSource::Inline(image) => Ok(Arc::from(image.bytes())),
            ImageSource::Remote(_) => Err(EditorError::InvalidDataUrl(url.clone())),
        },
        ImageSource::Remote(url) if url.starts_with("http://") || url.starts_with("https://") => {
            fetch_remote(url)
        }
        ImageSource::Remote(url) => {
            let path = url.strip_prefix("file://").unwrap_or(url);
            std::fs::read(path)
                .map(Arc::from)
                .map_err(|e| EditorError::fetch(url.clone(), e))
        }
    }
}

fn fetch_remote(url: &str) -> Result<Arc<[u8]>> {
    let response = ureq::get(url).call().map_err(|e| EditorError::fetch(url, e))?;
    let bytes = read_limited(response.into_reader(), MAX_REMOTE_BYTES, url)?;
    log::info!("Fetched {} ({} bytes)", url, bytes.len());
    Ok(Arc::from(bytes))
}

/// Read a whole body, failing once it grows past `limit` bytes.
fn read_limited(reader: impl Read, limit: u64, url: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader
        .take(limit + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| EditorError::fetch(url, e))?;
    if bytes.len() as u64 > limit {
        return Err(EditorError::fetch(url, format!("image exceeds {limit} bytes")));
    }
    Ok(bytes)
}

/// Decode encoded image bytes into a premultiplied raster.
pub fn decode_background(bytes: &[u8]) -> Result<Pixmap> {
    let rgba = image::load_from_memory(bytes)
        .map_err(EditorError::decode)?
        .to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut pixels = rgba.into_raw();
    premultiply_in_place(&mut pixels);

    let size = IntSize::from_wh(width, height)
        .ok_or_else(|| EditorError::decode(format!("empty image ({width}x{height})")))?;
    Pixmap::from_vec(pixels, size)
        .ok_or_else(|| EditorError::decode("pixel buffer does not match image size"))
}

/// Fetch and decode a slide's photo.
pub fn load_background(source: &ImageSource) -> Result<Pixmap> {
    let bytes = load_bytes(source)?;
    let pixmap = decode_background(&bytes)?;
    log::debug!(
        "Decoded {} ({}x{})",
        source.describe(),
        pixmap.width(),
        pixmap.height()
    );
    Ok(pixmap)
}

fn premultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        for c in &mut px[..3] {
            *c = ((*c as u16 * a + 127) / 255) as u8;
        }
    }
}
