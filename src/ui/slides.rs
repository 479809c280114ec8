// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Slide strip and listing-wide settings.

use crate::models::project::ProductListing;
use crate::models::slide::SlideId;

/// Result of slide panel interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum SlidesAction {
    None,
    Activate(usize),
    Delete(SlideId),
    SetLogoText(String),
}

/// Display the slide list and logo editor.
pub fn show(ui: &mut egui::Ui, listing: &ProductListing) -> SlidesAction {
    let mut action = SlidesAction::None;

    ui.heading("Slides");
    ui.separator();

    let can_delete = listing.slides().len() > 1;
    egui::ScrollArea::vertical()
        .id_source("slide_list")
        .max_height(ui.available_height() - 90.0)
        .show(ui, |ui| {
            for (index, slide) in listing.slides().iter().enumerate() {
                ui.horizontal(|ui| {
                    let active = index == listing.active_slide_index();
                    let title = format!("Slide {}  ·  {} captions", index + 1, slide.overlays.len());
                    if ui
                        .selectable_label(active, title)
                        .on_hover_text(slide.image.describe())
                        .clicked()
                        && !active
                    {
                        action = SlidesAction::Activate(index);
                    }
                    if can_delete && ui.small_button("✖").on_hover_text("Delete slide").clicked() {
                        action = SlidesAction::Delete(slide.id.clone());
                    }
                });
            }
        });

    ui.add_space(8.0);
    ui.separator();
    ui.label("Logo");
    let mut logo = listing.logo_text().to_string();
    if ui.text_edit_singleline(&mut logo).changed() {
        action = SlidesAction::SetLogoText(logo);
    }

    action
}
