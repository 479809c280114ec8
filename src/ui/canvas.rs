// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Preview surface for the active slide.
//!
//! Shows the composited preview texture and turns pointer input into
//! [`CanvasAction`]s. Captions are hit-tested with the same measurement the
//! compositor uses, so what you grab is what gets drawn.

use crate::models::overlay::OverlayId;
use crate::models::slide::Slide;
use crate::render::Compositor;

/// Result of canvas interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasAction {
    None,
    /// Primary button pressed on a caption.
    PressOverlay(OverlayId, egui::Pos2),
    /// Primary button pressed on the canvas but not on a caption.
    PressBackground,
    /// Pointer moved while dragging. Carries the current surface size.
    PointerMoved(egui::Pos2, egui::Vec2),
    /// Primary button released, wherever the pointer is.
    Released,
}

/// What the canvas needs to draw one frame.
pub struct CanvasView<'a> {
    pub slide: &'a Slide,
    pub texture: Option<&'a egui::TextureHandle>,
    pub selected: Option<&'a OverlayId>,
    pub dragging: bool,
    pub loading: bool,
    pub load_error: Option<&'a str>,
    /// Largest side the surface may take, in points.
    pub max_size: f32,
}

/// Display the preview and handle pointer interaction.
pub fn show(ui: &mut egui::Ui, compositor: &Compositor, view: CanvasView<'_>) -> CanvasAction {
    let available = ui.available_size();
    let side = view
        .max_size
        .min(available.x)
        .min(available.y - 24.0)
        .max(64.0);

    let mut action = CanvasAction::None;

    ui.vertical_centered(|ui| {
        let (rect, response) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        match view.texture {
            Some(texture) => {
                painter.image(
                    texture.id(),
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            None => {
                painter.rect_filled(rect, 0.0, egui::Color32::from_gray(243));
            }
        }

        if let Some(id) = view.selected {
            if let Some(overlay) = view.slide.overlay(id) {
                let caption = compositor.caption_box(overlay, side);
                let ring = egui::Rect::from_center_size(
                    rect.min + egui::vec2(caption.center_x, caption.center_y),
                    egui::vec2(caption.width, caption.height),
                )
                .expand(6.0);
                painter.rect_stroke(ring, 4.0, egui::Stroke::new(2.0, egui::Color32::from_rgb(0x3b, 0x82, 0xf6)));
            }
        }

        action = pointer_action(ui, compositor, &view, rect, &response);

        if view.dragging {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        } else if let Some(pos) = response.hover_pos() {
            let local = pos - rect.min;
            if compositor.hit_test(view.slide, side, local.x, local.y).is_some() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
            }
        }
    });

    ui.horizontal(|ui| {
        if view.loading {
            ui.spinner();
            ui.label("Loading photo...");
        } else if let Some(reason) = view.load_error {
            ui.label(egui::RichText::new(format!("Photo unavailable: {}", reason)).color(egui::Color32::LIGHT_RED));
        } else {
            ui.label(
                egui::RichText::new(format!("{} captions", view.slide.overlays.len()))
                    .weak(),
            );
        }
    });

    action
}

fn pointer_action(
    ui: &egui::Ui,
    compositor: &Compositor,
    view: &CanvasView<'_>,
    rect: egui::Rect,
    response: &egui::Response,
) -> CanvasAction {
    let (pressed, down, released, pointer) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.primary_released(),
            i.pointer.interact_pos(),
        )
    });

    if view.dragging {
        // Release is global so a drag that leaves the surface still ends.
        if released || !down {
            return CanvasAction::Released;
        }
        return match pointer {
            Some(pos) => CanvasAction::PointerMoved(pos, rect.size()),
            None => CanvasAction::None,
        };
    }

    if !pressed || !response.hovered() {
        return CanvasAction::None;
    }
    let Some(pos) = pointer else {
        return CanvasAction::None;
    };

    let local = pos - rect.min;
    match compositor.hit_test(view.slide, rect.width(), local.x, local.y) {
        Some(overlay) => CanvasAction::PressOverlay(overlay.id.clone(), pos),
        None => CanvasAction::PressBackground,
    }
}
