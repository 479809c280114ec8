// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types shared by loading, compositing, export and the providers.
//!
//! Structural edits to the document never fail, so nothing in `models`
//! returns these. Everything that touches the network, the file system or
//! a decoder does.

pub type Result<T> = std::result::Result<T, EditorError>;

#[derive(thiserror::Error, Debug)]
pub enum EditorError {
    #[error("failed to fetch image from {source_desc}: {reason}")]
    ImageFetch { source_desc: String, reason: String },

    #[error("failed to decode image: {0}")]
    ImageDecode(String),

    #[error("invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("no API key configured (set GEMINI_API_KEY or API_KEY)")]
    MissingApiKey,

    #[error("render error: {0}")]
    Render(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("background task aborted: {0}")]
    TaskAborted(String),
}

impl EditorError {
    pub fn fetch(source_desc: impl Into<String>, reason: impl ToString) -> Self {
        Self::ImageFetch {
            source_desc: source_desc.into(),
            reason: reason.to_string(),
        }
    }

    pub fn decode(msg: impl ToString) -> Self {
        Self::ImageDecode(msg.to_string())
    }

    pub fn provider(msg: impl ToString) -> Self {
        Self::Provider(msg.to_string())
    }

    pub fn malformed(msg: impl ToString) -> Self {
        Self::MalformedResponse(msg.to_string())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn encode(msg: impl ToString) -> Self {
        Self::Encode(msg.to_string())
    }

    pub fn config(msg: impl ToString) -> Self {
        Self::Config(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(EditorError::decode("x").to_string().contains("failed to decode image:"));
        assert!(EditorError::render("x").to_string().contains("render error:"));
        assert!(EditorError::malformed("x")
            .to_string()
            .contains("malformed provider response:"));
        assert!(EditorError::fetch("https://a/b.png", "timeout")
            .to_string()
            .contains("https://a/b.png"));
    }

    #[test]
    fn io_errors_convert() {
        let err: EditorError = std::io::Error::other("boom").into();
        assert!(matches!(err, EditorError::Io(_)));
        assert!(err.to_string().contains("boom"));
    }
}
