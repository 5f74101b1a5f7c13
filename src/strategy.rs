//! Mode selection for the pipeline.
//!
//! Demo-mode vs. live behavior is decided once per request from credential
//! presence and carried as a tagged variant, so the branching lives here
//! instead of being scattered through the handlers. Both variants satisfy
//! the same detect/translate contract.

use crate::config::Config;
use crate::detect::{self, Detection};
use crate::translate::{self, Translation};

pub enum Strategy<'a> {
    /// No credential configured: heuristic detection and mock translation
    Heuristic { config: &'a Config },
    /// Credential configured: delegate to the Gemini provider
    Provider {
        client: &'a reqwest::Client,
        config: &'a Config,
    },
}

impl<'a> Strategy<'a> {
    /// Select the strategy for one request based on configuration presence.
    pub fn from_config(client: &'a reqwest::Client, config: &'a Config) -> Self {
        if config.is_live() {
            Strategy::Provider { client, config }
        } else {
            Strategy::Heuristic { config }
        }
    }

    /// Best-guess language code for `text`. Never fails: provider errors
    /// degrade to a fallback detection.
    pub async fn detect(&self, text: &str) -> Detection {
        match self {
            Strategy::Heuristic { .. } => detect::detect_heuristic(text),
            Strategy::Provider { client, config } => detect::detect_ai(client, config, text).await,
        }
    }

    /// Translate `text`. Never fails: provider errors degrade to a tagged
    /// fallback translation.
    pub async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Translation {
        match self {
            Strategy::Heuristic { config } => {
                translate::translate_mock(config, text, source_lang, target_lang).await
            }
            Strategy::Provider { client, config } => {
                translate::translate_ai(client, config, text, source_lang, target_lang).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::DetectionMode;
    use crate::translate::TranslationMode;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn demo_config() -> Config {
        Config {
            gemini_api_key: None,
            gemini_api_url: "http://unused.test".to_string(),
            gemini_model: "gemini-1.5-flash".to_string(),
            mock_delay_ms: 0,
            storage_dir: "data".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }

    fn live_config(api_url: &str) -> Config {
        Config {
            gemini_api_key: Some("test-gemini-key".to_string()),
            gemini_api_url: api_url.to_string(),
            ..demo_config()
        }
    }

    #[test]
    fn test_strategy_selection_without_credential() {
        let config = demo_config();
        let client = reqwest::Client::new();

        let strategy = Strategy::from_config(&client, &config);
        assert!(matches!(strategy, Strategy::Heuristic { .. }));
    }

    #[test]
    fn test_strategy_selection_with_credential() {
        let config = live_config("http://api.test");
        let client = reqwest::Client::new();

        let strategy = Strategy::from_config(&client, &config);
        assert!(matches!(strategy, Strategy::Provider { .. }));
    }

    #[tokio::test]
    async fn test_heuristic_strategy_detect_and_translate() {
        let config = demo_config();
        let client = reqwest::Client::new();
        let strategy = Strategy::from_config(&client, &config);

        let detection = strategy.detect("hola gracias").await;
        assert_eq!(detection.code, "es");
        assert_eq!(detection.mode, DetectionMode::Heuristic);

        let translation = strategy.translate("hello", "en", "es").await;
        assert_eq!(translation.text, "Hola, ¿cómo estás?");
        assert_eq!(translation.mode, TranslationMode::Mock);
    }

    #[tokio::test]
    async fn test_provider_strategy_delegates_to_gemini() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "Hola"}]}}]
            })))
            .mount(&mock_server)
            .await;

        let config = live_config(&mock_server.uri());
        let client = reqwest::Client::new();
        let strategy = Strategy::from_config(&client, &config);

        let translation = strategy.translate("Hello", "en", "es").await;
        assert_eq!(translation.text, "Hola");
        assert_eq!(translation.mode, TranslationMode::Ai);
    }

    #[tokio::test]
    async fn test_provider_strategy_failure_degrades_not_errors() {
        let config = live_config("http://127.0.0.1:1");
        let client = reqwest::Client::new();
        let strategy = Strategy::from_config(&client, &config);

        let detection = strategy.detect("hola").await;
        assert_eq!(detection.code, "en");
        assert_eq!(detection.mode, DetectionMode::AiFallback);

        let translation = strategy.translate("hola", "es", "en").await;
        assert_eq!(translation.mode, TranslationMode::AiFallback);
    }
}
