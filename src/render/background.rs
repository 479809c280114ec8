// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Decoded slide photos for the preview.
//!
//! Photos are fetched and decoded on worker threads the first time a slide
//! is shown. Entries live as long as a slide in the listing still uses the
//! photo; failed loads are retried after a pause or when the slide is
//! revisited.

use crate::io::media::load_background;
use crate::models::slide::ImageSource;
use crate::tasks::BackgroundTask;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tiny_skia::Pixmap;

/// How long a failed load is reported before it is attempted again.
const RETRY_AFTER: Duration = Duration::from_secs(15);

enum Entry {
    Loading(BackgroundTask<Pixmap>),
    Ready(Arc<Pixmap>),
    Failed { reason: String, at: Instant },
}

pub struct BackgroundCache {
    entries: HashMap<String, Entry>,
    retry_after: Duration,
}

impl Default for BackgroundCache {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            retry_after: RETRY_AFTER,
        }
    }
}

impl BackgroundCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The decoded photo if it is ready. Starts loading it otherwise.
    pub fn request(&mut self, source: &ImageSource) -> Option<Arc<Pixmap>> {
        let key = source.cache_key();
        match self.entries.get(&key) {
            Some(Entry::Ready(pixmap)) => return Some(pixmap.clone()),
            Some(Entry::Loading(_)) => return None,
            Some(Entry::Failed { at, .. }) if at.elapsed() < self.retry_after => return None,
            _ => {}
        }

        let job_source = source.clone();
        let task = BackgroundTask::spawn("background", move || load_background(&job_source));
        self.entries.insert(key, Entry::Loading(task));
        None
    }

    /// Forget a failed load so the next request tries again.
    pub fn retry(&mut self, source: &ImageSource) {
        let key = source.cache_key();
        if matches!(self.entries.get(&key), Some(Entry::Failed { .. })) {
            log::debug!("Retrying background {}", key);
            self.entries.remove(&key);
        }
    }

    /// Drop every entry whose photo is not in `live`. Loads still running
    /// for dropped entries finish into nothing.
    pub fn retain<'a>(&mut self, live: impl IntoIterator<Item = &'a ImageSource>) {
        let live: HashSet<String> = live.into_iter().map(ImageSource::cache_key).collect();
        let before = self.entries.len();
        self.entries.retain(|key, _| live.contains(key));
        if self.entries.len() < before {
            log::debug!("Evicted {} unused backgrounds, {} kept", before - self.len(), self.len());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_loading(&self, source: &ImageSource) -> bool {
        matches!(self.entries.get(&source.cache_key()), Some(Entry::Loading(_)))
    }

    pub fn error(&self, source: &ImageSource) -> Option<&str> {
        match self.entries.get(&source.cache_key()) {
            Some(Entry::Failed { reason, .. }) => Some(reason),
            _ => None,
        }
    }

    /// Collect finished loads. Returns true if anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        for (key, entry) in self.entries.iter_mut() {
            let Entry::Loading(task) = entry else {
                continue;
            };
            let Some(result) = task.poll() else {
                continue;
            };
            *entry = match result {
                Ok(pixmap) => Entry::Ready(Arc::new(pixmap)),
                Err(e) => {
                    log::warn!("Preview background {} failed: {}", key, e);
                    Entry::Failed {
                        reason: e.to_string(),
                        at: Instant::now(),
                    }
                }
            };
            changed = true;
        }
        changed
    }
}
