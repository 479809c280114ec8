// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! Conversions between the percent space captions are stored in and the
//! pixels of a square raster of side `size`. Position, font size and outline
//! width all scale by the same `size / REFERENCE_CANVAS` factor, which is
//! what keeps a caption in the same relative place at any resolution.

use crate::models::overlay::Position;

/// Side of the canvas font sizes are expressed against.
pub const REFERENCE_CANVAS: f64 = 500.0;

/// Fraction of the output width taken by the side logo bar.
pub const SIDE_BAR_FRACTION: f64 = 0.08;

/// Logo font size as a fraction of the output size.
pub const LOGO_FONT_FRACTION: f64 = 0.035;

/// Caption outline width as a fraction of the scaled font size.
pub const OUTLINE_FRACTION: f64 = 0.08;

/// Convert percent coordinates to pixel coordinates.
pub fn percent_to_pixels(position: Position, size: f64) -> (f64, f64) {
    (position.x / 100.0 * size, position.y / 100.0 * size)
}

/// Convert a pixel delta on a surface of `container` pixels to percent.
pub fn pixels_to_percent(delta: f64, container: f64) -> f64 {
    if container <= 0.0 {
        return 0.0;
    }
    delta / container * 100.0
}

/// Font size from the reference canvas scaled to a raster of side `size`.
pub fn scaled_font_size(font_size: f64, size: f64) -> f64 {
    font_size * (size / REFERENCE_CANVAS)
}

/// Outline stroke width for a caption drawn at `scaled_font_size`.
pub fn outline_width(scaled_font_size: f64) -> f64 {
    scaled_font_size * OUTLINE_FRACTION
}

/// Width of the side logo bar on a raster of side `size`.
pub fn side_bar_width(size: f64) -> f64 {
    size * SIDE_BAR_FRACTION
}

/// Placement of an image scaled to cover a square box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverFit {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Scale an image so it fills a `size` square, centered, cropping overflow
/// symmetrically on the long axis.
pub fn cover_fit(image_width: u32, image_height: u32, size: f64) -> CoverFit {
    let (w, h) = (image_width.max(1) as f64, image_height.max(1) as f64);
    let scale = (size / w).max(size / h);
    CoverFit {
        scale,
        offset_x: size / 2.0 - w / 2.0 * scale,
        offset_y: size / 2.0 - h / 2.0 * scale,
    }
}
