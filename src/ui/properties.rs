// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Caption properties panel.
//!
//! Lists the captions on the active slide and edits the selected one: text,
//! size, font style and color. Edits are returned as patches; the panel
//! works on copies and never touches the document itself.

use crate::models::color::{Color, PALETTE};
use crate::models::overlay::{FontStyle, OverlayId, OverlayPatch, TextOverlay};
use crate::models::slide::Slide;
use std::ops::RangeInclusive;

/// Font sizes offered by the size slider.
pub const FONT_SIZE_RANGE: RangeInclusive<f64> = 12.0..=120.0;

/// Result of properties panel interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertiesAction {
    None,
    Select(OverlayId),
    Update(OverlayId, OverlayPatch),
    Delete(OverlayId),
}

/// Display the properties panel for the active slide.
pub fn show(ui: &mut egui::Ui, slide: &Slide, selected: Option<&TextOverlay>) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading("Captions");
    ui.separator();

    if slide.overlays.is_empty() {
        ui.label(egui::RichText::new("No captions yet").weak());
    }
    egui::ScrollArea::vertical()
        .id_source("caption_list")
        .max_height(160.0)
        .show(ui, |ui| {
            for overlay in &slide.overlays {
                let is_selected = selected.is_some_and(|s| s.id == overlay.id);
                let label = if overlay.text.trim().is_empty() {
                    "(empty)".to_string()
                } else {
                    overlay.text.clone()
                };
                if ui.selectable_label(is_selected, label).clicked() && !is_selected {
                    action = PropertiesAction::Select(overlay.id.clone());
                }
            }
        });

    ui.add_space(8.0);
    ui.separator();

    let Some(overlay) = selected else {
        ui.label(egui::RichText::new("Select a caption on the canvas to edit it").italics().weak());
        return action;
    };

    if let Some(edit) = editor(ui, overlay) {
        action = edit;
    }

    action
}

fn editor(ui: &mut egui::Ui, overlay: &TextOverlay) -> Option<PropertiesAction> {
    let id = &overlay.id;
    let mut action = None;

    ui.label("Text");
    let mut text = overlay.text.clone();
    if ui
        .add(egui::TextEdit::multiline(&mut text).desired_rows(2).desired_width(f32::INFINITY))
        .changed()
    {
        action = Some(PropertiesAction::Update(id.clone(), OverlayPatch::text(text)));
    }

    ui.add_space(6.0);
    ui.label("Size");
    let mut font_size = overlay.font_size;
    if ui
        .add(egui::Slider::new(&mut font_size, FONT_SIZE_RANGE).integer().suffix(" px"))
        .changed()
    {
        action = Some(PropertiesAction::Update(id.clone(), OverlayPatch::font_size(font_size)));
    }

    ui.add_space(6.0);
    ui.label("Font");
    ui.horizontal(|ui| {
        for style in FontStyle::ALL {
            if ui.selectable_label(overlay.font_style == style, style.label()).clicked()
                && overlay.font_style != style
            {
                action = Some(PropertiesAction::Update(id.clone(), OverlayPatch::font_style(style)));
            }
        }
    });

    ui.add_space(6.0);
    ui.label(format!("Color {}", overlay.color));
    if let Some(color) = swatches(ui, overlay.color) {
        action = Some(PropertiesAction::Update(id.clone(), OverlayPatch::color(color)));
    }
    ui.horizontal(|ui| {
        ui.label("Custom");
        if let Some(color) = hex_field(ui, id, overlay.color) {
            action = Some(PropertiesAction::Update(id.clone(), OverlayPatch::color(color)));
        }
    });

    ui.add_space(6.0);
    ui.label(
        egui::RichText::new(format!(
            "Position {:.1}%, {:.1}%",
            overlay.position.x, overlay.position.y
        ))
        .weak(),
    );

    ui.add_space(12.0);
    if ui
        .button(egui::RichText::new("🗑 Delete Caption").color(egui::Color32::LIGHT_RED))
        .clicked()
    {
        action = Some(PropertiesAction::Delete(id.clone()));
    }

    action
}

/// Palette grid. Returns the clicked color if it differs from `current`.
fn swatches(ui: &mut egui::Ui, current: Color) -> Option<Color> {
    let mut picked = None;
    egui::Grid::new("palette").spacing([4.0, 4.0]).show(ui, |ui| {
        for (i, color) in PALETTE.iter().enumerate() {
            let (rect, response) = ui.allocate_exact_size(egui::vec2(20.0, 20.0), egui::Sense::click());
            ui.painter().rect_filled(rect, 3.0, color.to_egui());
            let outline = if *color == current {
                egui::Stroke::new(2.0, egui::Color32::from_rgb(0x3b, 0x82, 0xf6))
            } else {
                egui::Stroke::new(1.0, egui::Color32::from_gray(90))
            };
            ui.painter().rect_stroke(rect, 3.0, outline);
            if response.on_hover_text(color.to_string()).clicked() && *color != current {
                picked = Some(*color);
            }
            if (i + 1) % 8 == 0 {
                ui.end_row();
            }
        }
    });
    picked
}

/// Free-form hex entry. The draft lives in egui memory while the field has
/// focus and is applied when focus leaves, if it parses.
fn hex_field(ui: &mut egui::Ui, id: &OverlayId, current: Color) -> Option<Color> {
    let field = ui.make_persistent_id(("caption_hex", id.as_str()));
    let mut hex = ui
        .data(|d| d.get_temp::<String>(field))
        .unwrap_or_else(|| current.to_string());
    let response = ui.add(
        egui::TextEdit::singleline(&mut hex)
            .desired_width(96.0)
            .hint_text("#rrggbb"),
    );

    if response.has_focus() {
        ui.data_mut(|d| d.insert_temp(field, hex));
        return None;
    }
    ui.data_mut(|d| d.remove::<String>(field));

    if !response.lost_focus() {
        return None;
    }
    match Color::parse(&hex) {
        Some(color) if color != current => Some(color),
        Some(_) => None,
        None => {
            log::debug!("Ignoring invalid color {:?}", hex);
            None
        }
    }
}
