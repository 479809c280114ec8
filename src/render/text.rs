// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Text shaping and glyph outlines.
//!
//! Captions are drawn as real glyph outlines so that the same path can be
//! stroked and then filled. Text is shaped with rustybuzz, outlines are
//! pulled from the face and emitted straight into a tiny-skia path.

use crate::config::FontConfig;
use crate::models::overlay::FontStyle;
use rustybuzz::ttf_parser::{GlyphId, OutlineBuilder};
use rustybuzz::{Face, UnicodeBuffer};
use std::sync::Arc;
use tiny_skia::PathBuilder;

/// Raw font file bytes plus the face index inside the file.
#[derive(Clone)]
pub struct FontFace {
    data: Arc<Vec<u8>>,
    index: u32,
}

impl FontFace {
    pub fn new(data: Vec<u8>, index: u32) -> Self {
        Self {
            data: Arc::new(data),
            index,
        }
    }

    fn parse(&self) -> Option<Face<'_>> {
        Face::from_slice(&self.data, self.index)
    }
}

/// Fallback faces shipped with the binary, used when the preferred families
/// are neither configured nor installed.
const BUNDLED_FUN: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");
const BUNDLED_CLEAN: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansCondensed-Bold.ttf");

/// The faces used for each caption style.
#[derive(Clone, Default)]
pub struct FontBook {
    fun: Option<FontFace>,
    clean: Option<FontFace>,
}

impl FontBook {
    /// A book without faces. Rendering visible text with it is an error.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Only the faces compiled into the binary.
    pub fn bundled() -> Self {
        Self {
            fun: Some(FontFace::new(BUNDLED_FUN.to_vec(), 0)),
            clean: Some(FontFace::new(BUNDLED_CLEAN.to_vec(), 0)),
        }
    }

    /// Resolve both styles, preferring configured font files, then installed
    /// fonts of the style's family, then the bundled faces.
    pub fn load(config: &FontConfig) -> Self {
        let mut db = fontdb::Database::new();
        for path in [&config.fun, &config.clean].into_iter().flatten() {
            if let Err(e) = db.load_font_file(path) {
                log::warn!("Failed to load font {}: {}", path.display(), e);
            }
        }
        db.load_system_fonts();

        let bundled = Self::bundled();
        Self {
            fun: resolve(&db, FontStyle::Fun).or(bundled.fun),
            clean: resolve(&db, FontStyle::Clean).or(bundled.clean),
        }
    }

    /// Face for a style, borrowing the other style's face if it is missing.
    pub fn face(&self, style: FontStyle) -> Option<&FontFace> {
        match style {
            FontStyle::Fun => self.fun.as_ref().or(self.clean.as_ref()),
            FontStyle::Clean => self.clean.as_ref().or(self.fun.as_ref()),
        }
    }
}

fn resolve(db: &fontdb::Database, style: FontStyle) -> Option<FontFace> {
    let families = [fontdb::Family::Name(style.family())];
    let Some(id) = db.query(&fontdb::Query {
        families: &families,
        weight: fontdb::Weight::BOLD,
        ..Default::default()
    }) else {
        log::info!("{} is not installed; using the bundled face for {:?} captions", style.family(), style);
        return None;
    };
    let face = db.with_face_data(id, |data, index| FontFace::new(data.to_vec(), index))?;
    log::info!("Using font {:?} for {:?} captions", style.family(), style);
    Some(face)
}

/// A single line of text laid out around an anchor point.
pub struct TextLine {
    /// Glyph outlines, `None` when nothing is visible (empty or blank text).
    pub path: Option<tiny_skia::Path>,
    pub width: f32,
    /// Height of the em box, ascent to descent.
    pub height: f32,
}

/// Shape `text` at `px` and build its outline so the line is horizontally
/// centered on the origin and the middle of its em box sits on y = 0.
pub fn layout_centered(face: &FontFace, text: &str, px: f32) -> Option<TextLine> {
    let face = face.parse()?;
    let units = face.units_per_em() as f32;
    if units <= 0.0 || px <= 0.0 {
        return None;
    }
    let scale = px / units;

    let mut buffer = UnicodeBuffer::new();
    buffer.push_str(text);
    let glyphs = rustybuzz::shape(&face, &[], buffer);

    let width: f32 = glyphs
        .glyph_positions()
        .iter()
        .map(|p| p.x_advance as f32 * scale)
        .sum();
    let ascent = face.ascender() as f32 * scale;
    let descent = face.descender() as f32 * scale;
    let baseline = (ascent + descent) / 2.0;

    let mut builder = PathBuilder::new();
    let mut pen_x = -width / 2.0;
    for (info, pos) in glyphs.glyph_infos().iter().zip(glyphs.glyph_positions()) {
        let mut pen = GlyphPen {
            builder: &mut builder,
            scale,
            dx: pen_x + pos.x_offset as f32 * scale,
            dy: baseline - pos.y_offset as f32 * scale,
        };
        face.outline_glyph(GlyphId(info.glyph_id as u16), &mut pen);
        pen_x += pos.x_advance as f32 * scale;
    }

    Some(TextLine {
        path: builder.finish(),
        width,
        height: ascent - descent,
    })
}

/// Writes font-unit outlines into a pixel-space path, flipping y.
struct GlyphPen<'a> {
    builder: &'a mut PathBuilder,
    scale: f32,
    dx: f32,
    dy: f32,
}

impl GlyphPen<'_> {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (self.dx + x * self.scale, self.dy - y * self.scale)
    }
}

impl OutlineBuilder for GlyphPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Rough line size used for hit-testing when no face is available.
pub fn estimate_line(text: &str, px: f32) -> (f32, f32) {
    (text.chars().count() as f32 * px * 0.6, px)
}
