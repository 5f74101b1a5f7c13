//! Thin client for the Gemini text-generation API.
//!
//! The pipeline consumes the provider as a black box: given a prompt, return
//! a completion or fail. No retries are attempted; a single failure is
//! terminal for the request and the caller degrades to a fallback result.

use crate::config::Config;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Send a prompt to the Gemini API and return the completion text.
pub async fn generate_text(
    client: &reqwest::Client,
    config: &Config,
    prompt: &str,
    temperature: f32,
) -> Result<String> {
    let api_key = config
        .gemini_api_key
        .as_deref()
        .context("Gemini API key not configured")?;

    let url = format!(
        "{}/models/{}:generateContent",
        config.gemini_api_url, config.gemini_model
    );

    let request = GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
        generation_config: GenerationConfig {
            temperature,
            max_output_tokens: 1024,
        },
    };

    let response = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await
        .context("Failed to send request to Gemini API")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
        anyhow::bail!("Gemini API error ({}): {}", status, body);
    }

    let generate_response: GenerateResponse = response
        .json()
        .await
        .context("Failed to parse Gemini response")?;

    let text = generate_response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.parts.first())
        .map(|part| part.text.clone())
        .context("Gemini response contained no candidates")?;

    Ok(text)
}
