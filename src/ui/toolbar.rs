// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the editor's document and generation actions.

/// Which background actions are in flight. Each one disables its own button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pending {
    pub phrases: bool,
    pub image: bool,
    pub export: bool,
    pub import: bool,
}

/// Result of toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    UploadImages,
    AddBlankSlide,
    AddText,
    GeneratePhrases,
    GenerateImage,
    Export,
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, pending: Pending) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let upload = if pending.import { "Uploading..." } else { "📁 Upload Photos" };
        if ui.add_enabled(!pending.import, egui::Button::new(upload)).clicked() {
            action = ToolbarAction::UploadImages;
        }
        if ui.button("➕ Blank Slide").clicked() {
            action = ToolbarAction::AddBlankSlide;
        }

        ui.separator();

        if ui.button("T Add Text").clicked() {
            action = ToolbarAction::AddText;
        }
        let phrases = if pending.phrases { "Writing..." } else { "✨ Magic Captions" };
        if ui.add_enabled(!pending.phrases, egui::Button::new(phrases)).clicked() {
            action = ToolbarAction::GeneratePhrases;
        }
        let image = if pending.image { "Generating..." } else { "🖼 Generate Photo" };
        if ui.add_enabled(!pending.image, egui::Button::new(image)).clicked() {
            action = ToolbarAction::GenerateImage;
        }

        ui.separator();

        let export = if pending.export { "Exporting..." } else { "💾 Export PNG" };
        if ui.add_enabled(!pending.export, egui::Button::new(export)).clicked() {
            action = ToolbarAction::Export;
        }

        if pending.phrases || pending.image || pending.export || pending.import {
            ui.spinner();
        }
    });

    action
}
