//! Language detection: heuristic word-overlap scoring in demo mode, a
//! Gemini call in live mode, with a fixed fallback code when the provider
//! fails.

use crate::config::Config;
use crate::gemini;
use crate::i18n::LanguageRegistry;
use tracing::warn;

/// Code returned when nothing matches or the provider call fails.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Near-zero randomness to bias toward the single most likely code.
const DETECTION_TEMPERATURE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMode {
    Heuristic,
    Ai,
    AiFallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Two-letter ISO 639-1 code (best guess)
    pub code: String,
    pub mode: DetectionMode,
}

/// Detect the language of `text` without any external call.
///
/// Counts how many whitespace-separated tokens of the lower-cased input are
/// literally contained in each language's stop-word list. The strictly
/// highest count wins; ties keep the earlier-declared language (English is
/// checked first), and an all-zero score defaults to English.
pub fn detect_heuristic(text: &str) -> Detection {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    let mut best_match = FALLBACK_LANGUAGE;
    let mut max_matches = 0;

    for lang in LanguageRegistry::get().detectable() {
        let matches = words
            .iter()
            .filter(|word| lang.common_words.contains(word))
            .count();
        if matches > max_matches {
            max_matches = matches;
            best_match = lang.code;
        }
    }

    Detection {
        code: best_match.to_string(),
        mode: DetectionMode::Heuristic,
    }
}

fn build_detection_prompt(text: &str) -> String {
    format!(
        r#"Detect the language of the following text. Respond with ONLY the two-letter ISO language code (e.g., "en" for English, "es" for Spanish, "fr" for French, etc.).

Text: "{}"

Language code:"#,
        text
    )
}

/// Detect the language of `text` via the Gemini provider.
///
/// The reply is trimmed, lower-cased, and truncated to two characters. On
/// provider failure the fixed default code is returned and the result is
/// marked as a fallback; no retry is attempted.
pub async fn detect_ai(client: &reqwest::Client, config: &Config, text: &str) -> Detection {
    let prompt = build_detection_prompt(text);

    match gemini::generate_text(client, config, &prompt, DETECTION_TEMPERATURE).await {
        Ok(reply) => {
            let code: String = reply.trim().to_lowercase().chars().take(2).collect();
            Detection {
                code,
                mode: DetectionMode::Ai,
            }
        }
        Err(e) => {
            warn!("AI language detection failed: {:#}", e);
            Detection {
                code: FALLBACK_LANGUAGE.to_string(),
                mode: DetectionMode::AiFallback,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn create_test_config(api_url: &str) -> Config {
        Config {
            gemini_api_key: Some("test-gemini-key".to_string()),
            gemini_api_url: api_url.to_string(),
            gemini_model: "gemini-1.5-flash".to_string(),
            mock_delay_ms: 0,
            storage_dir: "data".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }

    fn create_gemini_response(content: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": content}]}}
            ]
        })
    }

    // ==================== Heuristic Detection Tests ====================

    #[test]
    fn test_heuristic_detects_english() {
        let detection = detect_heuristic("hello where is the station");
        assert_eq!(detection.code, "en");
        assert_eq!(detection.mode, DetectionMode::Heuristic);
    }

    #[test]
    fn test_heuristic_detects_spanish() {
        let detection = detect_heuristic("hola gracias donde");
        assert_eq!(detection.code, "es");
    }

    #[test]
    fn test_heuristic_detects_french() {
        let detection = detect_heuristic("bonjour merci pourquoi");
        assert_eq!(detection.code, "fr");
    }

    #[test]
    fn test_heuristic_detects_german() {
        let detection = detect_heuristic("hallo danke warum nicht");
        assert_eq!(detection.code, "de");
    }

    #[test]
    fn test_heuristic_no_overlap_defaults_to_english() {
        let detection = detect_heuristic("zzz qqq xxyyzz");
        assert_eq!(detection.code, "en");
        assert_eq!(detection.mode, DetectionMode::Heuristic);
    }

    #[test]
    fn test_heuristic_tie_keeps_english() {
        // Equal counts between English and Spanish keep English.
        let detection = detect_heuristic("hello hola");
        assert_eq!(detection.code, "en");

        // "en" is in the Spanish and French lists, but one match never
        // strictly beats English's one match.
        let detection = detect_heuristic("you en");
        assert_eq!(detection.code, "en");
    }

    #[test]
    fn test_heuristic_is_case_insensitive() {
        let detection = detect_heuristic("HOLA GRACIAS");
        assert_eq!(detection.code, "es");
    }

    #[test]
    fn test_heuristic_requires_whole_token_match() {
        // "hello," with punctuation attached is not in the list, but bare
        // tokens still carry the score.
        let detection = detect_heuristic("hello, how are you?");
        assert_eq!(detection.code, "en");
    }

    // ==================== Prompt Tests ====================

    #[test]
    fn test_detection_prompt_contains_text_and_instructions() {
        let prompt = build_detection_prompt("Guten Tag");

        assert!(prompt.contains("Guten Tag"));
        assert!(prompt.contains("ONLY the two-letter ISO language code"));
        assert!(prompt.contains("Language code:"));
    }

    // ==================== AI Detection Tests ====================

    #[tokio::test]
    async fn test_detect_ai_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(create_gemini_response("es")))
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri());
        let client = reqwest::Client::new();

        let detection = detect_ai(&client, &config, "hola amigo").await;
        assert_eq!(detection.code, "es");
        assert_eq!(detection.mode, DetectionMode::Ai);
    }

    #[tokio::test]
    async fn test_detect_ai_cleans_verbose_reply() {
        let mock_server = MockServer::start().await;

        // Padded, upper-cased, chatty replies are reduced to two chars
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(create_gemini_response("  FRench\n")),
            )
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri());
        let client = reqwest::Client::new();

        let detection = detect_ai(&client, &config, "bonjour").await;
        assert_eq!(detection.code, "fr");
    }

    #[tokio::test]
    async fn test_detect_ai_provider_failure_falls_back_to_english() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri());
        let client = reqwest::Client::new();

        let detection = detect_ai(&client, &config, "hola amigo").await;
        assert_eq!(detection.code, "en");
        assert_eq!(detection.mode, DetectionMode::AiFallback);
    }

    #[tokio::test]
    async fn test_detect_ai_unreachable_provider_falls_back() {
        let config = create_test_config("http://127.0.0.1:1");
        let client = reqwest::Client::new();

        let detection = detect_ai(&client, &config, "hola amigo").await;
        assert_eq!(detection.code, "en");
        assert_eq!(detection.mode, DetectionMode::AiFallback);
    }
}
