// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Export of the active slide as a PNG.
//!
//! Export is all or nothing: if the photo cannot be fetched or decoded no
//! image is produced.

use super::media::load_background;
use crate::error::{EditorError, Result};
use crate::models::slide::Slide;
use crate::render::Compositor;
use std::path::Path;
use std::sync::Arc;
use tiny_skia::Pixmap;

/// A finished export, ready to be written.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub png: Vec<u8>,
    pub size: u32,
}

impl ExportArtifact {
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.png)?;
        log::info!(
            "Exported {} ({}x{} px, {} bytes)",
            path.display(),
            self.size,
            self.size,
            self.png.len()
        );
        Ok(())
    }
}

/// `<prefix>-<6 char token>.png`, unique enough to avoid clobbering
/// earlier exports from the same session.
pub fn export_file_name(prefix: &str) -> String {
    let token = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}.png", prefix, &token[..6])
}

/// Composite `slide` at `size` and encode it.
///
/// `cached` is the already decoded photo if the preview has one; otherwise
/// the photo is loaded here.
pub fn export_slide(
    compositor: &Compositor,
    slide: &Slide,
    cached: Option<Arc<Pixmap>>,
    logo_text: &str,
    size: u32,
    prefix: &str,
) -> Result<ExportArtifact> {
    let background = match cached {
        Some(pixmap) => pixmap,
        None => Arc::new(load_background(&slide.image)?),
    };

    let canvas = compositor.render(slide, Some(&*background), logo_text, size)?;
    let png = canvas.encode_png().map_err(EditorError::encode)?;

    Ok(ExportArtifact {
        file_name: export_file_name(prefix),
        png,
        size,
    })
}
