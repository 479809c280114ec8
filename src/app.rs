// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! `EditorApp` is the only owner of the document. Widgets report what the
//! user did as action enums and every change to the project happens here,
//! on the UI thread. Slow work (photo loading, generation, export) runs as
//! background tasks that are polled once per frame.

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::io::export::{export_slide, ExportArtifact};
use crate::io::media::read_image_files;
use crate::models::project::{ProductListing, Project};
use crate::models::slide::ImageSource;
use crate::providers::{self, ImageProvider, PhraseProvider};
use crate::render::background::BackgroundCache;
use crate::render::{Compositor, FontBook};
use crate::tasks::{take_finished, BackgroundTask};
use crate::ui::canvas::{self, CanvasAction, CanvasView};
use crate::ui::drag::DragController;
use crate::ui::properties::{self, PropertiesAction};
use crate::ui::slides::{self, SlidesAction};
use crate::ui::toolbar::{self, Pending, ToolbarAction};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "webp", "gif", "bmp", "tiff"];

/// What the preview texture was last composited from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PreviewKey {
    revision: u64,
    image: String,
    has_background: bool,
}

/// Main application state.
pub struct EditorApp {
    config: EditorConfig,

    /// The document being edited
    project: Project,

    /// Caption drag state over the preview
    drag: DragController,

    /// Shared with export workers
    compositor: Arc<Compositor>,

    /// Decoded slide photos for the preview
    backgrounds: BackgroundCache,

    phrase_provider: Arc<dyn PhraseProvider>,
    image_provider: Arc<dyn ImageProvider>,

    phrase_task: Option<BackgroundTask<Vec<String>>>,
    image_task: Option<BackgroundTask<ImageSource>>,
    export_task: Option<BackgroundTask<ExportArtifact>>,
    import_task: Option<BackgroundTask<Vec<ImageSource>>>,

    /// Finished export waiting for a destination
    finished_export: Option<ExportArtifact>,

    preview: Option<egui::TextureHandle>,
    preview_key: Option<PreviewKey>,

    /// Message for the modal alert, if one is showing
    alert: Option<String>,
}

impl EditorApp {
    pub fn new(
        config: EditorConfig,
        fonts: FontBook,
        phrase_provider: Arc<dyn PhraseProvider>,
        image_provider: Arc<dyn ImageProvider>,
    ) -> Self {
        let listing = ProductListing::seeded(&config.placeholder_image_url, config.logo_text.clone());
        Self {
            project: Project::new(listing),
            drag: DragController::new(),
            compositor: Arc::new(Compositor::new(fonts)),
            backgrounds: BackgroundCache::new(),
            phrase_provider,
            image_provider,
            phrase_task: None,
            image_task: None,
            export_task: None,
            import_task: None,
            finished_export: None,
            preview: None,
            preview_key: None,
            alert: None,
            config,
        }
    }

    fn pending(&self) -> Pending {
        Pending {
            phrases: self.phrase_task.is_some(),
            image: self.image_task.is_some(),
            export: self.export_task.is_some(),
            import: self.import_task.is_some(),
        }
    }

    /// Log a failed action and show it to the user.
    fn fail(&mut self, action: &str, error: EditorError) {
        log::error!("{} failed: {}", action, error);
        self.alert = Some(format!("{} failed: {}", action, error));
    }

    fn start_phrase_generation(&mut self) {
        if self.phrase_task.is_some() {
            return;
        }
        log::info!("Generating captions");
        self.phrase_task = Some(providers::spawn_phrases(self.phrase_provider.clone()));
    }

    fn start_image_generation(&mut self) {
        if self.image_task.is_some() {
            return;
        }
        log::info!("Generating product photo");
        self.image_task = Some(providers::spawn_image(self.image_provider.clone()));
    }

    fn start_export(&mut self) {
        if self.export_task.is_some() {
            return;
        }
        let slide = self.project.active_slide().clone();
        let cached = self.backgrounds.request(&slide.image);
        let compositor = self.compositor.clone();
        let logo_text = self.project.listing().logo_text().to_string();
        let size = self.config.export_size;
        let prefix = self.config.export_prefix.clone();

        log::info!("Exporting slide {} at {}px", slide.id, size);
        self.export_task = Some(BackgroundTask::spawn("export", move || {
            export_slide(&compositor, &slide, cached, &logo_text, size, &prefix)
        }));
    }

    fn start_import(&mut self, paths: Vec<PathBuf>) {
        if self.import_task.is_some() || paths.is_empty() {
            return;
        }
        log::info!("Importing {} photos", paths.len());
        self.import_task = Some(BackgroundTask::spawn("import", move || read_image_files(&paths)));
    }

    /// Collect finished background work. Results land on whatever slide is
    /// active when they arrive.
    fn poll_tasks(&mut self) {
        if let Some(result) = take_finished(&mut self.phrase_task) {
            let phrases = providers::phrases_or_fallback(result);
            self.project.apply_generated_phrases(phrases);
        }

        if let Some(result) = take_finished(&mut self.image_task) {
            match result {
                Ok(image) => self.project.set_active_image(image),
                Err(e) => self.fail("Image generation", e),
            }
        }

        if let Some(result) = take_finished(&mut self.import_task) {
            match result {
                Ok(images) => {
                    self.project.import_slides(images);
                }
                Err(e) => self.fail("Upload", e),
            }
        }

        if let Some(result) = take_finished(&mut self.export_task) {
            match result {
                Ok(artifact) => self.finished_export = Some(artifact),
                Err(e) => self.fail("Export", e),
            }
        }
    }

    /// Ask where to put a finished export and write it.
    fn deliver_export(&mut self) {
        let Some(artifact) = self.finished_export.take() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(artifact.file_name.as_str())
            .save_file()
        else {
            log::info!("Export save cancelled");
            return;
        };
        if let Err(e) = artifact.save(&path) {
            self.fail("Saving export", e);
        }
    }

    fn apply_toolbar_action(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::UploadImages => {
                if let Some(paths) = rfd::FileDialog::new()
                    .add_filter("Images", &IMAGE_EXTENSIONS)
                    .pick_files()
                {
                    self.start_import(paths);
                }
            }
            ToolbarAction::AddBlankSlide => {
                let url = self.config.placeholder_image_url.clone();
                self.project.add_blank_slide(&url);
            }
            ToolbarAction::AddText => {
                self.project.add_overlay();
            }
            ToolbarAction::GeneratePhrases => self.start_phrase_generation(),
            ToolbarAction::GenerateImage => self.start_image_generation(),
            ToolbarAction::Export => self.start_export(),
            ToolbarAction::None => {}
        }
    }

    fn apply_canvas_action(&mut self, action: CanvasAction) {
        match action {
            CanvasAction::PressOverlay(id, pointer) => self.drag.press_overlay(&mut self.project, &id, pointer),
            CanvasAction::PressBackground => self.drag.press_background(&mut self.project),
            CanvasAction::PointerMoved(pointer, container) => {
                self.drag.pointer_moved(&mut self.project, pointer, container)
            }
            CanvasAction::Released => self.drag.release(),
            CanvasAction::None => {}
        }
    }

    fn apply_properties_action(&mut self, action: PropertiesAction) {
        match action {
            PropertiesAction::Select(id) => self.project.select(Some(id)),
            PropertiesAction::Update(id, patch) => self.project.update_overlay(&id, &patch),
            PropertiesAction::Delete(id) => self.project.delete_overlay(&id),
            PropertiesAction::None => {}
        }
    }

    fn apply_slides_action(&mut self, action: SlidesAction) {
        match action {
            SlidesAction::Activate(index) => {
                self.drag.release();
                self.project.set_active_slide(index);
                self.backgrounds.retry(&self.project.active_slide().image);
            }
            SlidesAction::Delete(id) => {
                self.drag.release();
                self.project.delete_slide(&id);
            }
            SlidesAction::SetLogoText(text) => self.project.set_logo_text(text),
            SlidesAction::None => {}
        }
    }

    /// Collect finished photo loads and drop photos no slide uses anymore.
    fn sync_backgrounds(&mut self) {
        self.backgrounds.poll();
        self.backgrounds
            .retain(self.project.listing().slides().iter().map(|slide| &slide.image));
    }

    /// Re-composite the preview if the document or its photo changed.
    fn refresh_preview(&mut self, ctx: &egui::Context) {
        let slide = self.project.active_slide();
        let background = self.backgrounds.request(&slide.image);
        let key = PreviewKey {
            revision: self.project.revision(),
            image: slide.image.cache_key(),
            has_background: background.is_some(),
        };
        if self.preview.is_some() && self.preview_key.as_ref() == Some(&key) {
            return;
        }

        let rendered = self.compositor.render(
            slide,
            background.as_deref(),
            self.project.listing().logo_text(),
            self.config.preview_size,
        );
        match rendered {
            Ok(pixmap) => {
                let size = [pixmap.width() as usize, pixmap.height() as usize];
                let image = egui::ColorImage::from_rgba_premultiplied(size, pixmap.data());
                match self.preview.as_mut() {
                    Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
                    None => {
                        self.preview = Some(ctx.load_texture("preview", image, egui::TextureOptions::LINEAR));
                    }
                }
            }
            Err(e) => log::error!("Preview render failed: {}", e),
        }
        self.preview_key = Some(key);
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        // Only when no text field is focused, so editing a caption never
        // deletes it.
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.drag.release();
            self.project.select(None);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace)) {
            if let Some(id) = self.project.selected_overlay_id().cloned() {
                self.drag.release();
                self.project.delete_overlay(&id);
            }
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.as_deref() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Something went wrong")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.alert = None;
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_tasks();
        self.sync_backgrounds();
        self.deliver_export();

        let slide_image = &self.project.active_slide().image;
        let loading = self.backgrounds.is_loading(slide_image);
        if loading || self.pending() != Pending::default() {
            ctx.request_repaint();
        } else if self.backgrounds.error(slide_image).is_some() {
            ctx.request_repaint_after(Duration::from_secs(1));
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            let action = toolbar::show(ui, self.pending());
            ui.add_space(4.0);
            self.apply_toolbar_action(action);
        });

        let slides_action = egui::SidePanel::left("slides")
            .default_width(200.0)
            .show(ctx, |ui| slides::show(ui, self.project.listing()))
            .inner;
        self.apply_slides_action(slides_action);

        let properties_action = egui::SidePanel::right("properties")
            .default_width(260.0)
            .show(ctx, |ui| {
                properties::show(ui, self.project.active_slide(), self.project.selected_overlay())
            })
            .inner;
        self.apply_properties_action(properties_action);

        self.handle_keys(ctx);
        self.refresh_preview(ctx);

        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let slide = self.project.active_slide();
                let view = CanvasView {
                    slide,
                    texture: self.preview.as_ref(),
                    selected: self.project.selected_overlay_id(),
                    dragging: self.drag.is_dragging(),
                    loading: self.backgrounds.is_loading(&slide.image),
                    load_error: self.backgrounds.error(&slide.image),
                    max_size: self.config.preview_size as f32,
                };
                canvas::show(ui, &self.compositor, view)
            })
            .inner;
        self.apply_canvas_action(canvas_action);

        self.show_alert(ctx);
    }
}
