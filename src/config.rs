#[derive(Debug, Clone)]
pub struct Config {
    // Gemini provider
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub gemini_model: String,

    // Demo mode
    pub mock_delay_ms: u64,

    // Storage
    pub storage_dir: String,

    // Server
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            // Either variable name satisfies the credential requirement
            gemini_api_key: read_api_key(),
            gemini_api_url: std::env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),

            mock_delay_ms: std::env::var("MOCK_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(800),

            storage_dir: std::env::var("STORAGE_DIR").unwrap_or_else(|_| "data".to_string()),

            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }

    /// Whether a provider credential is configured. This is the single switch
    /// between demo-mode and live behavior for both detection and translation.
    pub fn is_live(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}

fn read_api_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| {
            std::env::var("GOOGLE_GENERATIVE_AI_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty())
        })
}
