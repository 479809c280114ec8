// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor configuration.
//!
//! Settings come from an optional YAML file (`SNEAKPEEK_CONFIG`, or
//! `sneakpeek.yaml` in the working directory). Every key has a default, so an
//! empty or missing file is fine. The provider API key is only ever taken
//! from the environment.

use crate::error::{EditorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "SNEAKPEEK_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "sneakpeek.yaml";
pub const API_KEY_ENVS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub logo_text: String,
    /// Side of the interactive preview surface, in points.
    pub preview_size: u32,
    /// Side of the exported PNG, in pixels.
    pub export_size: u32,
    pub export_prefix: String,
    /// Base URL for placeholder photos on blank slides.
    pub placeholder_image_url: String,
    pub fonts: FontConfig,
    pub providers: ProviderConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            logo_text: "SneakPeekArts".to_string(),
            preview_size: 500,
            export_size: 1080,
            export_prefix: "sneakpeek-listing".to_string(),
            placeholder_image_url: "https://picsum.photos/800/800".to_string(),
            fonts: FontConfig::default(),
            providers: ProviderConfig::default(),
        }
    }
}

/// Font files to use ahead of system fonts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub fun: Option<PathBuf>,
    pub clean: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub text_model: String,
    pub image_model: String,
    pub phrase_prompt: String,
    pub image_prompt: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            phrase_prompt: "Generate 5 very short, punchy, viral Malay phrases (Bahasa Melayu) \
                for a product on TikTok Shop. Context: a giant 80cm-100cm crocodile plushie \
                (Buaya Kawan Setia). Target: Malaysians. Tone: fun, hype, casual (Bahasa Pasar). \
                Each phrase must be 1 to 3 words. Examples: \"Memang Padu!\", \"Gebuu Sangat!\", \
                \"Wajib Beli!\", \"Peluk Best!\". Return ONLY a JSON array of strings."
                .to_string(),
            image_prompt: "A cute, giant, fluffy green crocodile plushie toy sitting in a bright, \
                cozy modern Malaysian home. High quality product photography, soft lighting, 4k, \
                instagram worthy."
                .to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml).map_err(|e| EditorError::config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml).map_err(EditorError::config)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `SNEAKPEEK_CONFIG`, else `sneakpeek.yaml` if it exists,
    /// else defaults.
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            log::info!("Loading config from {}", path);
            return Self::from_file(Path::new(&path));
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            log::info!("Loading config from {}", default_path.display());
            return Self::from_file(default_path);
        }
        log::info!("No config file, using defaults");
        Ok(Self::default())
    }

    fn validate(&self) -> Result<()> {
        if self.preview_size == 0 || self.export_size == 0 {
            return Err(EditorError::config("preview_size and export_size must be positive"));
        }
        Ok(())
    }
}

/// First non-empty API key found in the environment.
pub fn api_key_from_env() -> Option<String> {
    API_KEY_ENVS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|key| !key.trim().is_empty())
}
