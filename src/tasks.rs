// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background jobs.
//!
//! Slow work (network calls, decoding, export) runs on a worker thread and
//! reports back over a channel that the UI polls once per frame. Holding an
//! `Option<BackgroundTask<_>>` is the in-flight flag for an action: the
//! owner takes it out as soon as `poll` yields, on success and failure alike.

use crate::error::{EditorError, Result};
use std::sync::mpsc::{channel, Receiver, TryRecvError};

/// Handle to a job running on its own thread.
pub struct BackgroundTask<T> {
    label: String,
    receiver: Receiver<Result<T>>,
}

impl<T: Send + 'static> BackgroundTask<T> {
    /// Run `job` on a new worker thread.
    pub fn spawn<F>(label: impl Into<String>, job: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let label = label.into();
        let (sender, receiver) = channel();
        let spawned = std::thread::Builder::new()
            .name(format!("job-{label}"))
            .spawn(move || {
                let _ = sender.send(job());
            });
        if let Err(e) = spawned {
            // The sender was moved into the closure and dropped with it, so
            // the first poll reports the task as aborted.
            log::error!("Failed to start {}: {}", label, e);
        }
        Self { label, receiver }
    }
}

impl<T> BackgroundTask<T> {
    /// `None` while running; the job's outcome once it has finished. A worker
    /// that died without answering is reported as `TaskAborted`.
    pub fn poll(&self) -> Option<Result<T>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(EditorError::TaskAborted(self.label.clone()))),
        }
    }
}

/// Poll `slot` and clear it once the job has finished.
pub fn take_finished<T>(slot: &mut Option<BackgroundTask<T>>) -> Option<Result<T>> {
    let result = slot.as_ref()?.poll()?;
    *slot = None;
    Some(result)
}
