// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Text overlay data structures.
//!
//! An overlay is one caption placed on a slide. Its position is stored in
//! percent space (0.0 to 100.0 of the square slide) and its font size is
//! expressed against the 500 unit reference canvas, so the same overlay
//! lands in the same relative place at every output resolution.

use super::color::Color;
use std::fmt;

/// Opaque overlay identity, unique within its slide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OverlayId(String);

impl OverlayId {
    /// Create a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OverlayId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A position in percent space. Not clamped: values outside 0..=100 put the
/// caption partly or fully off the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The two caption presentation styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    /// Rounded display face ("Fredoka").
    #[default]
    Fun,
    /// Geometric sans ("Poppins").
    Clean,
}

impl FontStyle {
    pub const ALL: [FontStyle; 2] = [FontStyle::Fun, FontStyle::Clean];

    /// Font family the style resolves to.
    pub fn family(self) -> &'static str {
        match self {
            FontStyle::Fun => "Fredoka",
            FontStyle::Clean => "Poppins",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FontStyle::Fun => "Fun (Fredoka)",
            FontStyle::Clean => "Clean (Poppins)",
        }
    }
}

/// One caption on a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    pub id: OverlayId,
    pub text: String,
    pub position: Position,
    /// Pixel size on the 500 unit reference canvas.
    pub font_size: f64,
    pub color: Color,
    pub font_style: FontStyle,
}

impl TextOverlay {
    pub const DEFAULT_TEXT: &'static str = "Edit Me";
    pub const DEFAULT_FONT_SIZE: f64 = 24.0;

    /// Create a caption with a fresh id.
    pub fn new(text: impl Into<String>, position: Position, font_size: f64, color: Color) -> Self {
        Self {
            id: OverlayId::generate(),
            text: text.into(),
            position,
            font_size,
            color,
            font_style: FontStyle::default(),
        }
    }

    /// The caption produced by "add text": centered, white, 24px, Fun.
    pub fn placeholder() -> Self {
        Self::new(
            Self::DEFAULT_TEXT,
            Position::new(50.0, 50.0),
            Self::DEFAULT_FONT_SIZE,
            Color::WHITE,
        )
    }

    pub fn with_id(mut self, id: impl Into<OverlayId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_style(mut self, font_style: FontStyle) -> Self {
        self.font_style = font_style;
        self
    }

    /// Merge the fields set in `patch`. The id is never touched.
    pub fn apply(&mut self, patch: &OverlayPatch) {
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(font_style) = patch.font_style {
            self.font_style = font_style;
        }
    }
}

/// Partial update for a [`TextOverlay`]. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayPatch {
    pub text: Option<String>,
    pub position: Option<Position>,
    pub font_size: Option<f64>,
    pub color: Option<Color>,
    pub font_style: Option<FontStyle>,
}

impl OverlayPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn font_size(font_size: f64) -> Self {
        Self {
            font_size: Some(font_size),
            ..Default::default()
        }
    }

    pub fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn font_style(font_style: FontStyle) -> Self {
        Self {
            font_style: Some(font_style),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_defaults() {
        let overlay = TextOverlay::placeholder();
        assert_eq!(overlay.text, "Edit Me");
        assert_eq!(overlay.position, Position::new(50.0, 50.0));
        assert_eq!(overlay.font_size, 24.0);
        assert_eq!(overlay.color, Color::WHITE);
        assert_eq!(overlay.font_style, FontStyle::Fun);
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(OverlayId::generate(), OverlayId::generate());
    }

    #[test]
    fn test_apply_text_leaves_other_fields() {
        let mut overlay = TextOverlay::placeholder().with_style(FontStyle::Clean);
        let before = overlay.clone();
        overlay.apply(&OverlayPatch::text("Wajib Beli!"));

        assert_eq!(overlay.text, "Wajib Beli!");
        assert_eq!(overlay.id, before.id);
        assert_eq!(overlay.position, before.position);
        assert_eq!(overlay.font_size, before.font_size);
        assert_eq!(overlay.color, before.color);
        assert_eq!(overlay.font_style, before.font_style);
    }

    #[test]
    fn test_apply_accepts_empty_text_and_offcanvas_position() {
        let mut overlay = TextOverlay::placeholder();
        overlay.apply(&OverlayPatch {
            text: Some(String::new()),
            position: Some(Position::new(-20.0, 130.0)),
            ..Default::default()
        });
        assert_eq!(overlay.text, "");
        assert_eq!(overlay.position, Position::new(-20.0, 130.0));
    }
}
