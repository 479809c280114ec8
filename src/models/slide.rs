// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Slide data structures.

use super::overlay::TextOverlay;
use std::fmt;
use std::sync::Arc;

/// Opaque slide identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlideId(String);

impl SlideId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }
}

impl From<&str> for SlideId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An encoded bitmap held in memory (PNG, JPEG, ...).
///
/// Bytes are shared and never mutated, so cloning a slide is cheap. The key
/// identifies the resource for caching without hashing the bytes.
#[derive(Clone)]
pub struct InlineImage {
    key: String,
    bytes: Arc<[u8]>,
}

impl InlineImage {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            key: uuid::Uuid::new_v4().simple().to_string(),
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for InlineImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineImage")
            .field("key", &self.key)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl PartialEq for InlineImage {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

/// Where a slide's photo comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// `http(s)://` or `file://` URL, or a bare file path.
    Remote(String),
    Inline(InlineImage),
}

impl ImageSource {
    pub fn inline(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Inline(InlineImage::new(bytes))
    }

    /// Stable key for caching decoded backgrounds.
    pub fn cache_key(&self) -> String {
        match self {
            ImageSource::Remote(url) => format!("url:{url}"),
            ImageSource::Inline(image) => format!("inline:{}", image.key()),
        }
    }

    /// Short human readable description for logs and errors.
    pub fn describe(&self) -> String {
        match self {
            ImageSource::Remote(url) => url.clone(),
            ImageSource::Inline(image) => format!("inline image ({} bytes)", image.bytes().len()),
        }
    }
}

/// One product photo plus its captions. Overlay order is paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub id: SlideId,
    pub image: ImageSource,
    pub overlays: Vec<TextOverlay>,
}

impl Slide {
    pub fn new(image: ImageSource) -> Self {
        Self {
            id: SlideId::generate(),
            image,
            overlays: Vec::new(),
        }
    }

    pub fn with_overlay(mut self, overlay: TextOverlay) -> Self {
        self.overlays.push(overlay);
        self
    }

    pub fn overlay(&self, id: &super::overlay::OverlayId) -> Option<&TextOverlay> {
        self.overlays.iter().find(|o| &o.id == id)
    }

    /// Merge the fields set in `patch`. The id is never touched.
    pub fn apply(&mut self, patch: SlidePatch) {
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(overlays) = patch.overlays {
            self.overlays = overlays;
        }
    }
}

/// Partial update for a [`Slide`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlidePatch {
    pub image: Option<ImageSource>,
    pub overlays: Option<Vec<TextOverlay>>,
}

impl SlidePatch {
    pub fn image(image: ImageSource) -> Self {
        Self {
            image: Some(image),
            ..Default::default()
        }
    }
}
