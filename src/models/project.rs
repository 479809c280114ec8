// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project state management.
//!
//! `Project` owns the listing being edited plus the transient selection.
//! Every structural edit goes through it. Edits are total: an unknown id or
//! a forbidden edit (deleting the last slide) is a silent no-op, never an
//! error.

use super::color::Color;
use super::overlay::{OverlayId, OverlayPatch, Position, TextOverlay};
use super::slide::{ImageSource, Slide, SlideId, SlidePatch};

/// At most this many generated phrases become captions.
pub const MAX_GENERATED_PHRASES: usize = 3;

/// The whole document: a non-empty run of slides sharing one logo caption.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListing {
    slides: Vec<Slide>,
    logo_text: String,
    active_slide_index: usize,
}

impl ProductListing {
    /// Create a listing holding a single slide.
    pub fn new(first: Slide, logo_text: impl Into<String>) -> Self {
        Self {
            slides: vec![first],
            logo_text: logo_text.into(),
            active_slide_index: 0,
        }
    }

    /// The listing a session starts with.
    pub fn seeded(placeholder_image_url: &str, logo_text: impl Into<String>) -> Self {
        let slide = Slide {
            id: SlideId::from("slide-1"),
            image: ImageSource::Remote(format!("{placeholder_image_url}?random=1")),
            overlays: vec![
                TextOverlay::new(
                    "BUAYA KAWAN SETIA!",
                    Position::new(50.0, 10.0),
                    32.0,
                    Color::YELLOW,
                )
                .with_id("ov-1"),
                TextOverlay::new("80cm & 100cm", Position::new(50.0, 85.0), 24.0, Color::WHITE)
                    .with_id("ov-2")
                    .with_style(super::overlay::FontStyle::Clean),
            ],
        };
        Self::new(slide, logo_text)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn logo_text(&self) -> &str {
        &self.logo_text
    }

    pub fn active_slide_index(&self) -> usize {
        self.active_slide_index
    }

    pub fn active_slide(&self) -> &Slide {
        &self.slides[self.active_slide_index]
    }

    fn active_slide_mut(&mut self) -> &mut Slide {
        &mut self.slides[self.active_slide_index]
    }
}

/// Editor state: the listing plus the selected overlay.
#[derive(Debug, Clone)]
pub struct Project {
    listing: ProductListing,
    selected_overlay: Option<OverlayId>,
    revision: u64,
}

impl Project {
    pub fn new(listing: ProductListing) -> Self {
        Self {
            listing,
            selected_overlay: None,
            revision: 0,
        }
    }

    pub fn listing(&self) -> &ProductListing {
        &self.listing
    }

    pub fn active_slide(&self) -> &Slide {
        self.listing.active_slide()
    }

    /// Counter bumped on every change, used to know when to re-composite.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn selected_overlay_id(&self) -> Option<&OverlayId> {
        self.selected_overlay.as_ref()
    }

    /// The selected overlay, if it lives on the active slide.
    pub fn selected_overlay(&self) -> Option<&TextOverlay> {
        let id = self.selected_overlay.as_ref()?;
        self.active_slide().overlay(id)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    pub fn select(&mut self, overlay: Option<OverlayId>) {
        if self.selected_overlay != overlay {
            self.selected_overlay = overlay;
            self.touch();
        }
    }

    pub fn set_logo_text(&mut self, logo_text: impl Into<String>) {
        self.listing.logo_text = logo_text.into();
        self.touch();
    }

    /// Switch the active slide. Out of range indices are clamped.
    pub fn set_active_slide(&mut self, index: usize) {
        let index = index.min(self.listing.slides.len() - 1);
        if index != self.listing.active_slide_index {
            self.listing.active_slide_index = index;
            self.selected_overlay = None;
            self.touch();
        }
    }

    /// Append a slide seeded with one caption and make it active.
    pub fn add_slide(&mut self, image: ImageSource) -> SlideId {
        let slide = Slide::new(image).with_overlay(TextOverlay::new(
            "New Slide",
            Position::new(50.0, 50.0),
            32.0,
            Color::WHITE,
        ));
        let id = slide.id.clone();
        self.listing.slides.push(slide);
        self.listing.active_slide_index = self.listing.slides.len() - 1;
        self.selected_overlay = None;
        self.touch();
        log::info!("Added slide {}, total: {}", id, self.listing.slides.len());
        id
    }

    /// Append a slide whose photo is a fresh random placeholder.
    pub fn add_blank_slide(&mut self, placeholder_image_url: &str) -> SlideId {
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.add_slide(ImageSource::Remote(format!(
            "{placeholder_image_url}?random={token}"
        )))
    }

    /// Append one caption-less slide per image and jump to the first of them.
    pub fn import_slides(&mut self, images: Vec<ImageSource>) -> Vec<SlideId> {
        if images.is_empty() {
            return Vec::new();
        }

        let first_new = self.listing.slides.len();
        let ids: Vec<SlideId> = images
            .into_iter()
            .map(|image| {
                let slide = Slide::new(image);
                let id = slide.id.clone();
                self.listing.slides.push(slide);
                id
            })
            .collect();

        self.listing.active_slide_index = first_new;
        self.selected_overlay = None;
        self.touch();
        log::info!("Imported {} slides, total: {}", ids.len(), self.listing.slides.len());
        ids
    }

    /// Remove a slide. The last remaining slide is never removed.
    pub fn delete_slide(&mut self, id: &SlideId) {
        if self.listing.slides.len() <= 1 {
            log::debug!("Refusing to delete the only slide");
            return;
        }
        let Some(index) = self.listing.slides.iter().position(|s| &s.id == id) else {
            return;
        };

        let removed = self.listing.slides.remove(index);
        self.listing.active_slide_index = self
            .listing
            .active_slide_index
            .min(self.listing.slides.len() - 1);
        if let Some(selected) = &self.selected_overlay {
            if removed.overlay(selected).is_some() {
                self.selected_overlay = None;
            }
        }
        self.touch();
        log::info!("Deleted slide {}, total: {}", id, self.listing.slides.len());
    }

    pub fn update_slide(&mut self, id: &SlideId, patch: SlidePatch) {
        if let Some(slide) = self.listing.slides.iter_mut().find(|s| &s.id == id) {
            slide.apply(patch);
            self.touch();
        }
    }

    /// Replace the photo of whatever slide is active right now.
    pub fn set_active_image(&mut self, image: ImageSource) {
        let id = self.active_slide().id.clone();
        self.update_slide(&id, SlidePatch::image(image));
    }

    /// Append a placeholder caption to the active slide and select it.
    pub fn add_overlay(&mut self) -> OverlayId {
        let overlay = TextOverlay::placeholder();
        let id = overlay.id.clone();
        let slide = self.listing.active_slide_mut();
        slide.overlays.push(overlay);
        let total = slide.overlays.len();
        self.selected_overlay = Some(id.clone());
        self.touch();
        log::info!("Added overlay {}, total: {}", id, total);
        id
    }

    /// Remove a caption from the active slide.
    pub fn delete_overlay(&mut self, id: &OverlayId) {
        let slide = self.listing.active_slide_mut();
        let before = slide.overlays.len();
        slide.overlays.retain(|o| &o.id != id);
        if slide.overlays.len() == before {
            return;
        }
        let total = slide.overlays.len();

        if self.selected_overlay.as_ref() == Some(id) {
            self.selected_overlay = None;
        }
        self.touch();
        log::info!("Deleted overlay {}, total: {}", id, total);
    }

    /// Merge `patch` into a caption on the active slide. The revision only
    /// moves if the caption actually changed.
    pub fn update_overlay(&mut self, id: &OverlayId, patch: &OverlayPatch) {
        let slide = self.listing.active_slide_mut();
        let Some(overlay) = slide.overlays.iter_mut().find(|o| &o.id == id) else {
            return;
        };
        let before = overlay.clone();
        overlay.apply(patch);
        if *overlay != before {
            self.touch();
        }
    }

    /// Turn up to three generated phrases into staggered captions on the
    /// active slide. Returns the new ids; the first one becomes selected.
    pub fn apply_generated_phrases(&mut self, phrases: Vec<String>) -> Vec<OverlayId> {
        let overlays: Vec<TextOverlay> = phrases
            .into_iter()
            .take(MAX_GENERATED_PHRASES)
            .enumerate()
            .map(|(i, text)| {
                let color = if i % 2 == 0 { Color::YELLOW } else { Color::CYAN };
                TextOverlay::new(text, Position::new(50.0, 20.0 + 25.0 * i as f64), 42.0, color)
            })
            .collect();
        if overlays.is_empty() {
            return Vec::new();
        }

        let ids: Vec<OverlayId> = overlays.iter().map(|o| o.id.clone()).collect();
        self.listing.active_slide_mut().overlays.extend(overlays);
        self.selected_overlay = ids.first().cloned();
        self.touch();
        log::info!("Added {} generated overlays", ids.len());
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACEHOLDER: &str = "https://picsum.photos/800/800";

    fn project() -> Project {
        Project::new(ProductListing::seeded(PLACEHOLDER, "SneakPeekArts"))
    }

    fn png_source() -> ImageSource {
        ImageSource::inline(vec![0u8; 4])
    }

    #[test]
    fn test_seeded_listing() {
        let project = project();
        let listing = project.listing();
        assert_eq!(listing.slides().len(), 1);
        assert_eq!(listing.active_slide_index(), 0);
        assert_eq!(listing.logo_text(), "SneakPeekArts");
        assert_eq!(listing.active_slide().overlays.len(), 2);
        assert_eq!(listing.active_slide().overlays[0].text, "BUAYA KAWAN SETIA!");
    }

    #[test]
    fn test_delete_only_slide_is_noop() {
        let mut project = project();
        let before = project.listing().clone();
        let id = project.active_slide().id.clone();

        project.delete_slide(&id);

        assert_eq!(project.listing(), &before);
    }

    #[test]
    fn test_delete_slide_reclamps_active_index() {
        let mut project = project();
        project.add_slide(png_source());
        let last = project.add_slide(png_source());
        assert_eq!(project.listing().active_slide_index(), 2);

        project.delete_slide(&last);

        assert_eq!(project.listing().slides().len(), 2);
        assert_eq!(project.listing().active_slide_index(), 1);
    }

    #[test]
    fn test_delete_earlier_slide_keeps_index_in_bounds() {
        let mut project = project();
        let first = project.active_slide().id.clone();
        project.add_slide(png_source());
        project.set_active_slide(0);

        project.delete_slide(&first);

        assert_eq!(project.listing().slides().len(), 1);
        assert_eq!(project.listing().active_slide_index(), 0);
    }

    #[test]
    fn test_delete_unknown_slide_is_noop() {
        let mut project = project();
        project.add_slide(png_source());
        let revision = project.revision();

        project.delete_slide(&SlideId::from("nope"));

        assert_eq!(project.listing().slides().len(), 2);
        assert_eq!(project.revision(), revision);
    }

    #[test]
    fn test_add_slide_activates_and_seeds_caption() {
        let mut project = project();
        let id = project.add_slide(png_source());
        let slide = project.active_slide();
        assert_eq!(slide.id, id);
        assert_eq!(slide.overlays.len(), 1);
        assert_eq!(slide.overlays[0].text, "New Slide");
        assert_eq!(slide.overlays[0].font_size, 32.0);
    }

    #[test]
    fn test_add_blank_slide_uses_random_placeholder() {
        let mut project = project();
        project.add_blank_slide(PLACEHOLDER);
        match &project.active_slide().image {
            ImageSource::Remote(url) => assert!(url.starts_with(&format!("{PLACEHOLDER}?random="))),
            other => panic!("unexpected source {other:?}"),
        }
    }

    #[test]
    fn test_import_two_files_jumps_to_first_new_slide() {
        let mut project = project();
        project.add_slide(png_source());

        let ids = project.import_slides(vec![png_source(), png_source()]);

        let listing = project.listing();
        assert_eq!(ids.len(), 2);
        assert_eq!(listing.slides().len(), 4);
        assert_eq!(listing.active_slide_index(), 2);
        assert_eq!(listing.slides()[2].id, ids[0]);
        assert!(listing.slides()[2].overlays.is_empty());
        assert!(listing.slides()[3].overlays.is_empty());
    }

    #[test]
    fn test_import_nothing_is_noop() {
        let mut project = project();
        assert!(project.import_slides(Vec::new()).is_empty());
        assert_eq!(project.listing().slides().len(), 1);
    }

    #[test]
    fn test_add_then_delete_overlay_roundtrip() {
        let mut project = project();
        let before = project.active_slide().overlays.clone();

        let id = project.add_overlay();
        assert_eq!(project.selected_overlay_id(), Some(&id));
        project.delete_overlay(&id);

        assert_eq!(project.active_slide().overlays, before);
        assert_eq!(project.selected_overlay_id(), None);
    }

    #[test]
    fn test_delete_unselected_overlay_keeps_selection() {
        let mut project = project();
        let selected = project.add_overlay();
        project.delete_overlay(&OverlayId::from("ov-1"));

        assert_eq!(project.selected_overlay_id(), Some(&selected));
        assert_eq!(project.active_slide().overlays.len(), 2);
    }

    #[test]
    fn test_update_overlay_text_only() {
        let mut project = project();
        let id = OverlayId::from("ov-2");
        let before = project.active_slide().overlay(&id).cloned().unwrap();

        project.update_overlay(&id, &OverlayPatch::text("Murah Je!"));

        let after = project.active_slide().overlay(&id).unwrap();
        assert_eq!(after.text, "Murah Je!");
        assert_eq!(after.id, before.id);
        assert_eq!(after.position, before.position);
        assert_eq!(after.font_size, before.font_size);
        assert_eq!(after.color, before.color);
        assert_eq!(after.font_style, before.font_style);
    }

    #[test]
    fn test_update_unknown_overlay_is_noop() {
        let mut project = project();
        let before = project.listing().clone();
        project.update_overlay(&OverlayId::from("missing"), &OverlayPatch::font_size(99.0));
        assert_eq!(project.listing(), &before);
    }

    #[test]
    fn test_generated_phrases_take_three_and_stagger() {
        let mut project = project();
        let phrases = ["a", "b", "c", "d", "e"].map(String::from).to_vec();

        let ids = project.apply_generated_phrases(phrases);

        assert_eq!(ids.len(), 3);
        let overlays = &project.active_slide().overlays[2..];
        let ys: Vec<f64> = overlays.iter().map(|o| o.position.y).collect();
        assert_eq!(ys, vec![20.0, 45.0, 70.0]);
        assert!(overlays.iter().all(|o| o.font_size == 42.0 && o.position.x == 50.0));
        assert_eq!(overlays[0].color, Color::YELLOW);
        assert_eq!(overlays[1].color, Color::CYAN);
        assert_eq!(overlays[2].color, Color::YELLOW);
        assert_eq!(project.selected_overlay_id(), Some(&ids[0]));
    }

    #[test]
    fn test_generated_phrases_empty_adds_nothing() {
        let mut project = project();
        assert!(project.apply_generated_phrases(Vec::new()).is_empty());
        assert_eq!(project.active_slide().overlays.len(), 2);
    }

    #[test]
    fn test_set_active_slide_clamps_and_clears_selection() {
        let mut project = project();
        project.add_slide(png_source());
        project.set_active_slide(0);
        project.select(Some(OverlayId::from("ov-1")));
        assert_eq!(project.selected_overlay().map(|o| o.text.as_str()), Some("BUAYA KAWAN SETIA!"));

        project.set_active_slide(42);

        assert_eq!(project.listing().active_slide_index(), 1);
        assert_eq!(project.selected_overlay_id(), None);
    }

    #[test]
    fn test_set_active_image_replaces_only_active_photo() {
        let mut project = project();
        let first_image = project.active_slide().image.clone();
        project.add_slide(png_source());
        let generated = ImageSource::inline(vec![9u8; 8]);

        project.set_active_image(generated.clone());

        assert_eq!(project.active_slide().image, generated);
        assert_eq!(project.listing().slides()[0].image, first_image);
    }

    #[test]
    fn test_revision_bumps_on_change() {
        let mut project = project();
        let r0 = project.revision();
        project.set_logo_text("Kedai Buaya");
        assert!(project.revision() > r0);
        assert_eq!(project.listing().logo_text(), "Kedai Buaya");
    }

    #[test]
    fn test_patch_that_changes_nothing_keeps_revision() {
        let mut project = project();
        let id = OverlayId::from("ov-2");
        let current = project.active_slide().overlay(&id).cloned().unwrap();
        let r0 = project.revision();

        project.update_overlay(&id, &OverlayPatch::position(current.position));
        project.update_overlay(&id, &OverlayPatch::text(current.text.clone()));
        assert_eq!(project.revision(), r0);

        project.update_overlay(&id, &OverlayPatch::font_size(current.font_size + 1.0));
        assert!(project.revision() > r0);
    }
}
