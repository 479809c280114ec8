// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! SneakPeek - captioned product photos for social-commerce listings
//!
//! A desktop editor for composing square product slides: a photo, a dark
//! side bar with a vertical logo, and draggable outlined captions, exported
//! as PNG.

mod app;
mod config;
mod error;
mod io;
mod models;
mod providers;
mod render;
mod tasks;
mod ui;
mod util;

use anyhow::Result;
use app::EditorApp;
use config::{api_key_from_env, EditorConfig};
use providers::gemini::GeminiClient;
use render::FontBook;
use std::sync::Arc;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = EditorConfig::load()?;
    let fonts = FontBook::load(&config.fonts);
    let client = Arc::new(GeminiClient::new(config.providers.clone(), api_key_from_env()));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("SneakPeek - Listing Editor"),
        ..Default::default()
    };

    let app = EditorApp::new(config, fonts, client.clone(), client);

    eframe::run_native(
        "SneakPeek",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
