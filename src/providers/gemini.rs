// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Gemini `generateContent` client.

use super::{ImageProvider, PhraseProvider};
use crate::config::ProviderConfig;
use crate::error::{EditorError, Result};
use crate::models::slide::ImageSource;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[allow(dead_code)]
    mime_type: Option<String>,
    data: String,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|content| content.parts.iter())
    }
}

pub struct GeminiClient {
    config: ProviderConfig,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: ProviderConfig, api_key: Option<String>) -> Self {
        if api_key.is_none() {
            log::warn!("No Gemini API key; generated phrases fall back and image generation is unavailable");
        }
        Self { config, api_key }
    }

    fn generate(&self, model: &str, body: serde_json::Value) -> Result<GenerateContentResponse> {
        let api_key = self.api_key.as_deref().ok_or(EditorError::MissingApiKey)?;
        let url = format!("{}/models/{}:generateContent", self.config.endpoint, model);
        log::info!("Calling {}", url);

        let response = ureq::post(&url)
            .set("x-goog-api-key", api_key)
            .send_json(body)
            .map_err(|e| match e {
                ureq::Error::Status(code, response) => EditorError::provider(format!(
                    "{} returned {}: {}",
                    model,
                    code,
                    response.status_text()
                )),
                other => EditorError::provider(other),
            })?;

        response
            .into_json::<GenerateContentResponse>()
            .map_err(EditorError::malformed)
    }
}

impl PhraseProvider for GeminiClient {
    fn generate_phrases(&self) -> Result<Vec<String>> {
        let body = json!({
            "contents": [{ "parts": [{ "text": self.config.phrase_prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": { "type": "ARRAY", "items": { "type": "STRING" } }
            }
        });
        parse_phrases(&self.generate(&self.config.text_model, body)?)
    }
}

impl ImageProvider for GeminiClient {
    fn generate_image(&self) -> Result<ImageSource> {
        let body = json!({
            "contents": [{ "parts": [{ "text": self.config.image_prompt }] }],
            "generationConfig": { "imageConfig": { "aspectRatio": "1:1" } }
        });
        parse_image(&self.generate(&self.config.image_model, body)?)
    }
}

/// The reply text is expected to be a JSON array of strings. No text at all
/// means no phrases.
fn parse_phrases(response: &GenerateContentResponse) -> Result<Vec<String>> {
    let text: String = response.parts().filter_map(|p| p.text.as_deref()).collect();
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str::<Vec<String>>(&text).map_err(EditorError::malformed)
}

fn parse_image(response: &GenerateContentResponse) -> Result<ImageSource> {
    let data = response
        .parts()
        .find_map(|p| p.inline_data.as_ref())
        .ok_or_else(|| EditorError::provider("no image data returned"))?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(data.data.trim())
        .map_err(EditorError::malformed)?;
    Ok(ImageSource::inline(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_phrases() {
        let reply = response(json!({
            "candidates": [{ "content": { "parts": [{ "text": "[\"Memang Padu!\", \"Wajib Beli!\"]" }] } }]
        }));
        assert_eq!(parse_phrases(&reply).unwrap(), vec!["Memang Padu!", "Wajib Beli!"]);
    }

    #[test]
    fn test_parse_phrases_without_text_is_empty() {
        assert!(parse_phrases(&response(json!({ "candidates": [] }))).unwrap().is_empty());
        assert!(parse_phrases(&response(json!({}))).unwrap().is_empty());
    }

    #[test]
    fn test_non_json_phrases_are_malformed() {
        let reply = response(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Memang Padu!" }] } }]
        }));
        assert!(matches!(parse_phrases(&reply), Err(EditorError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_image() {
        let encoded = base64::engine::general_purpose::STANDARD.encode([1u8, 2, 3]);
        let reply = response(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "here you go" },
                { "inlineData": { "mimeType": "image/png", "data": encoded } }
            ] } }]
        }));
        match parse_image(&reply).unwrap() {
            ImageSource::Inline(image) => assert_eq!(image.bytes(), &[1, 2, 3]),
            other => panic!("unexpected source {other:?}"),
        }
    }

    #[test]
    fn test_missing_image_is_provider_error() {
        let reply = response(json!({
            "candidates": [{ "content": { "parts": [{ "text": "sorry" }] } }]
        }));
        assert!(matches!(parse_image(&reply), Err(EditorError::Provider(_))));
    }

    #[test]
    fn test_missing_key_fails_without_network() {
        let client = GeminiClient::new(ProviderConfig::default(), None);
        assert!(matches!(client.generate_phrases(), Err(EditorError::MissingApiKey)));
        assert!(matches!(client.generate_image(), Err(EditorError::MissingApiKey)));
    }
}
