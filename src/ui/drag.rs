// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Caption dragging.
//!
//! Turns pointer gestures over the preview surface into position updates on
//! the project. Positions are never clamped, so a caption can be pushed off
//! the canvas on purpose.

use crate::models::overlay::{OverlayId, OverlayPatch, Position};
use crate::models::project::Project;
use crate::util::geometry::pixels_to_percent;

/// Transient drag state.
#[derive(Debug, Clone, PartialEq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        overlay: OverlayId,
        pointer_start: egui::Pos2,
        overlay_start: Position,
    },
}

/// Drag state machine over a single preview surface.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Pointer pressed on a caption: select it and start dragging.
    pub fn press_overlay(&mut self, project: &mut Project, overlay: &OverlayId, pointer: egui::Pos2) {
        let Some(start) = project.active_slide().overlay(overlay).map(|o| o.position) else {
            return;
        };
        project.select(Some(overlay.clone()));
        self.state = DragState::Dragging {
            overlay: overlay.clone(),
            pointer_start: pointer,
            overlay_start: start,
        };
        log::debug!("Started dragging overlay {} from ({:.1}, {:.1})", overlay, start.x, start.y);
    }

    /// Pointer pressed on empty canvas: clear the selection.
    pub fn press_background(&mut self, project: &mut Project) {
        project.select(None);
    }

    /// Pointer moved. `container` is the current pixel size of the surface.
    pub fn pointer_moved(&mut self, project: &mut Project, pointer: egui::Pos2, container: egui::Vec2) {
        let DragState::Dragging {
            overlay,
            pointer_start,
            overlay_start,
        } = &self.state
        else {
            return;
        };

        let delta = pointer - *pointer_start;
        let position = Position::new(
            overlay_start.x + pixels_to_percent(delta.x as f64, container.x as f64),
            overlay_start.y + pixels_to_percent(delta.y as f64, container.y as f64),
        );
        project.update_overlay(overlay, &OverlayPatch::position(position));
    }

    /// Pointer released anywhere, inside the surface or not.
    pub fn release(&mut self) {
        if let DragState::Dragging { overlay, .. } = &self.state {
            log::debug!("Stopped dragging overlay {}", overlay);
        }
        self.state = DragState::Idle;
    }
}
