// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Slide compositor.
//!
//! One function draws a slide at any square output size. The preview and the
//! export both call it, only the size differs, so what is shown while editing
//! is what gets saved.
//!
//! Paint order, back to front:
//!
//! 1. Background photo, cover fit and centered
//! 2. Side logo bar (rightmost 8%, 60% black) with a faint divider
//! 3. Logo text, rotated 90 degrees counter-clockwise, with a soft shadow
//! 4. Captions in slide order, outline stroked first and then filled

use super::shadow::gaussian_blur;
use super::text::{estimate_line, layout_centered, FontBook};
use crate::error::{EditorError, Result};
use crate::models::color::Color as CaptionColor;
use crate::models::overlay::{FontStyle, TextOverlay};
use crate::models::slide::Slide;
use crate::util::geometry::{
    cover_fit, outline_width, percent_to_pixels, scaled_font_size, side_bar_width,
    LOGO_FONT_FRACTION,
};
use tiny_skia::{
    Color, FillRule, FilterQuality, LineJoin, Paint, Pixmap, PixmapPaint, Rect, Stroke, Transform,
};

/// Shown where the photo would be while it is still loading.
const PLACEHOLDER: CaptionColor = CaptionColor::rgb(0xf3, 0xf4, 0xf6);

/// Reference size the divider width and shadow blur are tuned for.
const TUNED_SIZE: f32 = 1080.0;

/// Axis-aligned box around a caption, in output pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionBox {
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
}

impl CaptionBox {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (x - self.center_x).abs() <= self.width / 2.0 && (y - self.center_y).abs() <= self.height / 2.0
    }
}

/// Draws slides. Holds the fonts, nothing else, so it can be shared
/// between the UI thread and export workers.
#[derive(Clone)]
pub struct Compositor {
    fonts: FontBook,
}

impl Compositor {
    pub fn new(fonts: FontBook) -> Self {
        Self { fonts }
    }

    /// Composite `slide` into a `size` x `size` raster.
    ///
    /// `background` is the decoded slide photo; `None` paints a neutral
    /// placeholder instead (used by the preview while the photo loads).
    pub fn render(
        &self,
        slide: &Slide,
        background: Option<&Pixmap>,
        logo_text: &str,
        size: u32,
    ) -> Result<Pixmap> {
        let mut canvas = Pixmap::new(size, size)
            .ok_or_else(|| EditorError::render(format!("invalid output size {size}")))?;
        let side = size as f32;

        self.draw_background(&mut canvas, background, side);
        self.draw_side_bar(&mut canvas, side);
        self.draw_logo(&mut canvas, logo_text, side)?;
        for overlay in &slide.overlays {
            self.draw_caption(&mut canvas, overlay, side)?;
        }

        Ok(canvas)
    }

    fn draw_background(&self, canvas: &mut Pixmap, background: Option<&Pixmap>, side: f32) {
        let Some(image) = background else {
            canvas.fill(PLACEHOLDER.to_skia());
            return;
        };

        let fit = cover_fit(image.width(), image.height(), side as f64);
        let transform = Transform::from_row(
            fit.scale as f32,
            0.0,
            0.0,
            fit.scale as f32,
            fit.offset_x as f32,
            fit.offset_y as f32,
        );
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..Default::default()
        };
        canvas.draw_pixmap(0, 0, image.as_ref(), &paint, transform, None);
    }

    fn draw_side_bar(&self, canvas: &mut Pixmap, side: f32) {
        // Whole-pixel edges, no anti-aliasing. tiny-skia's anti-aliased rect
        // filler asserts on sub-pixel slivers.
        let left = (side - side_bar_width(side as f64) as f32).round();

        if let Some(rect) = Rect::from_ltrb(left, 0.0, side, side) {
            canvas.fill_rect(rect, &flat(Color::from_rgba8(0, 0, 0, 153)), Transform::identity(), None);
        }

        let line = (2.0 * side / TUNED_SIZE).round().max(1.0);
        let line_left = (left - line / 2.0).round();
        if let Some(rect) = Rect::from_ltrb(line_left, 0.0, line_left + line, side) {
            canvas.fill_rect(rect, &flat(Color::from_rgba8(255, 255, 255, 51)), Transform::identity(), None);
        }
    }

    fn draw_logo(&self, canvas: &mut Pixmap, logo_text: &str, side: f32) -> Result<()> {
        if logo_text.trim().is_empty() {
            return Ok(());
        }
        let face = self
            .fonts
            .face(FontStyle::Fun)
            .ok_or_else(|| EditorError::render("no font available for the logo"))?;
        let px = side * LOGO_FONT_FRACTION as f32;
        let Some(path) = layout_centered(face, logo_text, px).and_then(|line| line.path) else {
            return Ok(());
        };

        let bar = side_bar_width(side as f64) as f32;
        let blur = (5.0 * side / TUNED_SIZE).round() as u32;

        // Shadow is rendered into a strip around the bar only.
        let margin = (3 * blur) as f32;
        let strip_left = (side - bar - margin).floor().max(0.0);
        let strip_width = (side - strip_left).ceil() as u32;
        let to_bar = |dx: f32| Transform::from_rotate(-90.0).post_translate(side - bar / 2.0 - dx, side / 2.0);

        if let Some(mut shadow) = Pixmap::new(strip_width, side as u32) {
            shadow.fill_path(&path, &solid(Color::BLACK), FillRule::Winding, to_bar(strip_left), None);
            gaussian_blur(&mut shadow, blur);
            canvas.draw_pixmap(
                strip_left as i32,
                0,
                shadow.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }

        canvas.fill_path(&path, &solid(Color::WHITE), FillRule::Winding, to_bar(0.0), None);
        Ok(())
    }

    fn draw_caption(&self, canvas: &mut Pixmap, overlay: &TextOverlay, side: f32) -> Result<()> {
        if overlay.text.trim().is_empty() {
            return Ok(());
        }
        let face = self.fonts.face(overlay.font_style).ok_or_else(|| {
            EditorError::render(format!("no font available for caption {:?}", overlay.text))
        })?;
        let px = scaled_font_size(overlay.font_size, side as f64) as f32;
        let Some(path) = layout_centered(face, &overlay.text, px).and_then(|line| line.path) else {
            return Ok(());
        };

        let (x, y) = percent_to_pixels(overlay.position, side as f64);
        let transform = Transform::from_translate(x as f32, y as f32);

        let stroke = Stroke {
            width: outline_width(px as f64) as f32,
            line_join: LineJoin::Round,
            miter_limit: 2.0,
            ..Default::default()
        };
        canvas.stroke_path(&path, &solid(Color::BLACK), &stroke, transform, None);
        canvas.fill_path(&path, &solid(overlay.color.to_skia()), FillRule::Winding, transform, None);
        Ok(())
    }

    /// Where a caption lands on a `size` raster, for hit-testing. Uses the
    /// shaped width when a face is available and an estimate otherwise.
    pub fn caption_box(&self, overlay: &TextOverlay, size: f32) -> CaptionBox {
        let px = scaled_font_size(overlay.font_size, size as f64) as f32;
        let (x, y) = percent_to_pixels(overlay.position, size as f64);
        let (width, height) = self
            .fonts
            .face(overlay.font_style)
            .and_then(|face| layout_centered(face, &overlay.text, px))
            .map(|line| (line.width, line.height))
            .unwrap_or_else(|| estimate_line(&overlay.text, px));

        CaptionBox {
            center_x: x as f32,
            center_y: y as f32,
            // Empty captions stay grabbable.
            width: width.max(px),
            height,
        }
    }

    /// Topmost caption under a point, if any.
    pub fn hit_test<'a>(&self, slide: &'a Slide, size: f32, x: f32, y: f32) -> Option<&'a TextOverlay> {
        slide
            .overlays
            .iter()
            .rev()
            .find(|overlay| self.caption_box(overlay, size).contains(x, y))
    }
}

fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

fn flat(color: Color) -> Paint<'static> {
    let mut paint = solid(color);
    paint.anti_alias = false;
    paint
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::overlay::Position;
    use crate::models::slide::ImageSource;

    fn compositor() -> Compositor {
        Compositor::new(FontBook::bundled())
    }

    fn caption(text: &str, color: CaptionColor) -> TextOverlay {
        TextOverlay::new(text, Position::new(40.0, 50.0), 60.0, color)
    }

    fn slide() -> Slide {
        Slide::new(ImageSource::Remote("unused".into()))
    }

    fn solid_image(width: u32, height: u32, color: Color) -> Pixmap {
        let mut pixmap = Pixmap::new(width, height).unwrap();
        pixmap.fill(color);
        pixmap
    }

    fn rgb(canvas: &Pixmap, x: u32, y: u32) -> (u8, u8, u8) {
        let px = canvas.pixel(x, y).unwrap();
        (px.red(), px.green(), px.blue())
    }

    #[test]
    fn test_background_and_side_bar() {
        let red = solid_image(2, 1, Color::from_rgba8(255, 0, 0, 255));
        let canvas = compositor().render(&slide(), Some(&red), "Logo", 100).unwrap();

        let (r, g, b) = rgb(&canvas, 10, 50);
        assert!(r >= 250 && g <= 5 && b <= 5);
        let (r, g, b) = rgb(&canvas, 99, 5);
        assert!((100..=104).contains(&r), "bar red channel was {r}");
        assert!(g <= 5 && b <= 5);
        assert_eq!(canvas.pixel(99, 5).unwrap().alpha(), 255);
    }

    #[test]
    fn test_cover_fit_crops_wide_image_symmetrically() {
        let mut image = Pixmap::new(4, 2).unwrap();
        for y in 0..2 {
            for x in 0..4 {
                let color = if x < 2 { [0, 0, 255, 255] } else { [0, 255, 0, 255] };
                let idx = (y * 4 + x) * 4;
                image.data_mut()[idx..idx + 4].copy_from_slice(&color);
            }
        }

        let canvas = compositor().render(&slide(), Some(&image), "", 100).unwrap();

        let (_, g, b) = rgb(&canvas, 20, 50);
        assert!(b > 200 && g < 55, "left of center should be blue, got g={g} b={b}");
        let (_, g, b) = rgb(&canvas, 75, 50);
        assert!(g > 200 && b < 55, "right of center should be green, got g={g} b={b}");
    }

    #[test]
    fn test_missing_background_uses_placeholder() {
        let canvas = compositor().render(&slide(), None, "Logo", 50).unwrap();
        assert_eq!(rgb(&canvas, 5, 5), (0xf3, 0xf4, 0xf6));
    }

    #[test]
    fn test_bar_geometry_is_relative() {
        let white = solid_image(8, 8, Color::WHITE);
        for (size, outside, inside) in [(500u32, 455u32, 470u32), (1080, 985, 1000)] {
            let canvas = compositor().render(&slide(), Some(&white), "", size).unwrap();
            assert!(rgb(&canvas, outside, 10).0 >= 250, "size {size}");
            assert!(rgb(&canvas, inside, 10).0 < 110, "size {size}");
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let image = solid_image(3, 5, Color::from_rgba8(10, 120, 200, 255));
        let mut slide = slide();
        slide.overlays.push(TextOverlay::placeholder());
        let a = compositor().render(&slide, Some(&image), "SneakPeekArts", 120).unwrap();
        let b = compositor().render(&slide, Some(&image), "SneakPeekArts", 120).unwrap();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn test_zero_size_is_an_error() {
        assert!(matches!(
            compositor().render(&slide(), None, "", 0),
            Err(EditorError::Render(_))
        ));
    }

    #[test]
    fn test_caption_box_scales_with_output() {
        let estimating = Compositor::new(FontBook::empty());
        let overlay = TextOverlay::placeholder();
        let export = estimating.caption_box(&overlay, 1080.0);
        assert_eq!((export.center_x, export.center_y), (540.0, 540.0));
        assert!((export.height - 51.84).abs() < 1e-3);

        let preview = estimating.caption_box(&overlay, 500.0);
        assert!((export.width / preview.width - 2.16).abs() < 1e-3);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut slide = slide();
        let below = TextOverlay::placeholder().with_id("below");
        let above = TextOverlay::placeholder().with_id("above");
        slide.overlays.push(below);
        slide.overlays.push(above);

        let hit = compositor().hit_test(&slide, 500.0, 250.0, 250.0);
        assert_eq!(hit.map(|o| o.id.as_str()), Some("above"));
        assert!(compositor().hit_test(&slide, 500.0, 10.0, 10.0).is_none());
    }

    #[test]
    fn test_caption_outline_sits_under_fill() {
        let mut slide = slide();
        slide.overlays.push(caption("HHHH", CaptionColor::WHITE));
        let red = solid_image(1, 1, Color::from_rgba8(255, 0, 0, 255));

        let canvas = compositor().render(&slide, Some(&red), "", 500).unwrap();

        let pixels: Vec<(u8, u8, u8)> = (0..400)
            .flat_map(|x| (200..300).map(move |y| (x, y)))
            .map(|(x, y)| rgb(&canvas, x, y))
            .collect();
        assert!(pixels.contains(&(255, 255, 255)), "fill should be visible");
        assert!(pixels.contains(&(0, 0, 0)), "outline should be visible");
    }

    #[test]
    fn test_later_caption_paints_over_earlier() {
        let mut slide = slide();
        slide.overlays.push(caption("HHHH", CaptionColor::rgb(255, 0, 0)));
        slide.overlays.push(caption("HHHH", CaptionColor::rgb(0, 0, 255)));
        let white = solid_image(1, 1, Color::WHITE);

        let canvas = compositor().render(&slide, Some(&white), "", 500).unwrap();

        let pixels: Vec<(u8, u8, u8)> = (0..400)
            .flat_map(|x| (200..300).map(move |y| (x, y)))
            .map(|(x, y)| rgb(&canvas, x, y))
            .collect();
        assert!(pixels.contains(&(0, 0, 255)));
        assert!(!pixels.contains(&(255, 0, 0)), "earlier caption should be covered");
    }

    #[test]
    fn test_logo_stays_in_side_bar() {
        let white = solid_image(1, 1, Color::WHITE);
        let plain = compositor().render(&slide(), Some(&white), "", 500).unwrap();
        let branded = compositor().render(&slide(), Some(&white), "SneakPeekArts", 500).unwrap();

        let changed: Vec<u32> = (0..500u32)
            .flat_map(|x| (0..500u32).map(move |y| (x, y)))
            .filter(|&(x, y)| plain.pixel(x, y) != branded.pixel(x, y))
            .map(|(x, _)| x)
            .collect();
        assert!(!changed.is_empty(), "logo should be drawn");
        // Bar starts at 460; the shadow may bleed three blur radii past it.
        assert!(changed.iter().all(|&x| x >= 454), "leftmost change at {:?}", changed.iter().min());
        assert!(changed.iter().filter(|&&x| x >= 460).count() * 2 > changed.len());
    }

    #[test]
    fn test_every_output_size_renders() {
        for size in 1..=1200 {
            assert!(compositor().render(&slide(), None, "", size).is_ok(), "size {size}");
        }
    }

    #[test]
    fn test_small_and_odd_sizes_render_text() {
        let mut slide = slide();
        slide.overlays.push(TextOverlay::placeholder());
        for size in (1..=48).chain([499, 500, 501, 999, 1079, 1080, 1081, 1200]) {
            assert!(
                compositor().render(&slide, None, "SneakPeekArts", size).is_ok(),
                "size {size}"
            );
        }
    }

    #[test]
    fn test_visible_text_without_fonts_is_an_error() {
        let bare = Compositor::new(FontBook::empty());
        let mut captioned = slide();
        captioned.overlays.push(TextOverlay::placeholder());

        assert!(matches!(
            bare.render(&captioned, None, "", 100),
            Err(EditorError::Render(_))
        ));
        assert!(matches!(
            bare.render(&slide(), None, "Logo", 100),
            Err(EditorError::Render(_))
        ));
    }

    #[test]
    fn test_blank_text_needs_no_fonts() {
        let bare = Compositor::new(FontBook::empty());
        let mut slide = slide();
        slide.overlays.push(caption("  ", CaptionColor::WHITE));
        assert!(bare.render(&slide, None, " ", 100).is_ok());
    }
}
