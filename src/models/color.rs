// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Caption colors.

use std::fmt;

/// An sRGB color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const YELLOW: Color = Color::rgb(0xfa, 0xcc, 0x15);
    pub const CYAN: Color = Color::rgb(0x25, 0xf4, 0xee);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `white` or `black`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "white" => return Some(Self::WHITE),
            "black" => return Some(Self::BLACK),
            _ => {}
        }

        let hex = value.strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Self {
                r: nibble(0)?,
                g: nibble(1)?,
                b: nibble(2)?,
                a: nibble(3)?,
            }),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => None,
        }
    }

    pub fn to_egui(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// Preset swatches offered by the property editor.
pub const PALETTE: [Color; 22] = [
    // Mono
    Color::rgb(0xff, 0xff, 0xff),
    Color::rgb(0x00, 0x00, 0x00),
    Color::rgb(0x1f, 0x29, 0x37),
    Color::rgb(0x4b, 0x55, 0x63),
    // Brand pink / cyan
    Color::rgb(0xfe, 0x2c, 0x55),
    Color::rgb(0x25, 0xf4, 0xee),
    // Reds & pinks
    Color::rgb(0xef, 0x44, 0x44),
    Color::rgb(0xb9, 0x1c, 0x1c),
    Color::rgb(0xf4, 0x72, 0xb6),
    Color::rgb(0xbe, 0x18, 0x5d),
    // Yellows & oranges
    Color::rgb(0xfa, 0xcc, 0x15),
    Color::rgb(0xa1, 0x62, 0x07),
    Color::rgb(0xfb, 0x92, 0x3c),
    Color::rgb(0xc2, 0x41, 0x0c),
    // Greens
    Color::rgb(0x4a, 0xde, 0x80),
    Color::rgb(0x15, 0x80, 0x3d),
    Color::rgb(0x14, 0xb8, 0xa6),
    // Blues & purples
    Color::rgb(0x60, 0xa5, 0xfa),
    Color::rgb(0x1d, 0x4e, 0xd8),
    Color::rgb(0xa8, 0x55, 0xf7),
    Color::rgb(0x7e, 0x22, 0xce),
    Color::rgb(0xe8, 0x79, 0xf9),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse("#FACC15"), Some(Color::YELLOW));
        assert_eq!(Color::parse("#fff"), Some(Color::WHITE));
        assert_eq!(
            Color::parse("#00000080"),
            Some(Color { r: 0, g: 0, b: 0, a: 0x80 })
        );
        assert_eq!(Color::parse("#f008").map(|c| c.a), Some(0x88));
        assert_eq!(Color::parse("White"), Some(Color::WHITE));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Color::parse("FACC15"), None);
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("#gggggg"), None);
        assert_eq!(Color::parse("#é12"), None);
    }

    #[test]
    fn test_display_roundtrips() {
        for color in PALETTE {
            assert_eq!(Color::parse(&color.to_string()), Some(color));
        }
        assert_eq!(Color { r: 1, g: 2, b: 3, a: 4 }.to_string(), "#01020304");
    }
}
