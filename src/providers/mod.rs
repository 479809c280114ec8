// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Generated content: marketing phrases and product photos.
//!
//! Both capabilities are slow network calls, so they are run through
//! [`BackgroundTask`]. Phrase generation never fails from the user's point
//! of view: any error is replaced by a fixed set of phrases. Image
//! generation has no fallback and reports its error.

pub mod gemini;

use crate::error::Result;
use crate::models::slide::ImageSource;
use crate::tasks::BackgroundTask;
use std::sync::Arc;

/// Used whenever phrase generation fails or returns something unusable.
pub const FALLBACK_PHRASES: [&str; 5] = [
    "Memang Padu!",
    "Comel Gila!",
    "Wajib Beli!",
    "Peluk Best!",
    "Murah Je!",
];

/// Produces short marketing phrases.
pub trait PhraseProvider: Send + Sync {
    fn generate_phrases(&self) -> Result<Vec<String>>;
}

/// Produces a square product photo.
pub trait ImageProvider: Send + Sync {
    fn generate_image(&self) -> Result<ImageSource>;
}

/// The phrases to apply for a provider outcome.
pub fn phrases_or_fallback(result: Result<Vec<String>>) -> Vec<String> {
    match result {
        Ok(phrases) => phrases,
        Err(e) => {
            log::warn!("Phrase generation failed, using fallback phrases: {}", e);
            FALLBACK_PHRASES.iter().map(|s| s.to_string()).collect()
        }
    }
}

/// Start phrase generation. The task always succeeds with something to apply.
pub fn spawn_phrases(provider: Arc<dyn PhraseProvider>) -> BackgroundTask<Vec<String>> {
    BackgroundTask::spawn("phrases", move || Ok(phrases_or_fallback(provider.generate_phrases())))
}

/// Start image generation.
pub fn spawn_image(provider: Arc<dyn ImageProvider>) -> BackgroundTask<ImageSource> {
    BackgroundTask::spawn("image", move || provider.generate_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;
    use crate::models::project::{ProductListing, Project};
    use crate::tasks::tests::wait;

    struct Offline;

    impl PhraseProvider for Offline {
        fn generate_phrases(&self) -> Result<Vec<String>> {
            Err(EditorError::provider("network unreachable"))
        }
    }

    impl ImageProvider for Offline {
        fn generate_image(&self) -> Result<ImageSource> {
            Err(EditorError::provider("network unreachable"))
        }
    }

    struct Fixed(Vec<&'static str>);

    impl PhraseProvider for Fixed {
        fn generate_phrases(&self) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    fn project() -> Project {
        Project::new(ProductListing::seeded("https://example.com/p", "Logo"))
    }

    #[test]
    fn test_fallback_has_at_least_three_phrases() {
        let phrases = phrases_or_fallback(Err(EditorError::malformed("not json")));
        assert!(phrases.len() >= 3);
        assert_eq!(phrases[0], "Memang Padu!");
    }

    #[test]
    fn test_failed_provider_still_applies_phrases() {
        let mut project = project();
        let mut pending = Some(spawn_phrases(Arc::new(Offline)));

        let phrases = wait(&mut pending).unwrap();
        let ids = project.apply_generated_phrases(phrases);

        assert!(pending.is_none());
        assert_eq!(ids.len(), 3);
        assert_eq!(project.active_slide().overlays.len(), 5);
    }

    #[test]
    fn test_successful_provider_result_is_used() {
        let mut pending = Some(spawn_phrases(Arc::new(Fixed(vec!["Gebuu Sangat!"]))));
        assert_eq!(wait(&mut pending).unwrap(), vec!["Gebuu Sangat!".to_string()]);
    }

    #[test]
    fn test_failed_image_leaves_slide_untouched() {
        let mut project = project();
        let before = project.active_slide().image.clone();
        let mut pending = Some(spawn_image(Arc::new(Offline)));

        if let Ok(image) = wait(&mut pending) {
            project.set_active_image(image);
        }

        assert!(pending.is_none());
        assert_eq!(project.active_slide().image, before);
    }
}
