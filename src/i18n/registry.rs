//! Language registry: single source of truth for all supported languages.
//!
//! Uses a singleton with `OnceLock` for thread-safe initialization. The
//! declaration order is significant: heuristic language detection iterates
//! languages in this order and earlier languages win count ties, so English
//! must stay first.

use std::sync::OnceLock;

/// Metadata for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "es", "fr")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Spanish")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "Español")
    pub native_name: &'static str,

    /// Common stop-words and greetings used by heuristic detection.
    /// Empty for languages that only carry a display name.
    pub common_words: &'static [&'static str],
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global registry instance, initializing it on first access.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Look up a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Display name for a code, falling back to the raw code when unknown.
    /// Unknown codes are passed through the pipeline unvalidated, so this
    /// must never fail.
    pub fn display_name<'a>(&self, code: &'a str) -> &'a str {
        self.get_by_code(code).map(|lang| lang.name).unwrap_or(code)
    }

    /// Languages that participate in heuristic detection, in declaration
    /// order (English first).
    pub fn detectable(&self) -> impl Iterator<Item = &LanguageConfig> {
        self.languages
            .iter()
            .filter(|lang| !lang.common_words.is_empty())
    }

    /// All registered languages.
    pub fn list_all(&self) -> &[LanguageConfig] {
        &self.languages
    }
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            common_words: &[
                "the", "and", "is", "in", "to", "of", "a", "that", "it", "with", "for", "as",
                "was", "on", "are", "you", "this", "be", "have", "hello", "thank", "where", "how",
                "what", "when", "why", "who",
            ],
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            common_words: &[
                "el", "la", "de", "que", "y", "a", "en", "un", "es", "se", "no", "te", "lo", "le",
                "da", "su", "por", "son", "con", "hola", "gracias", "donde", "como", "cuando",
                "quien",
            ],
        },
        LanguageConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            common_words: &[
                "le", "de", "et", "à", "un", "il", "être", "en", "avoir", "que", "pour", "dans",
                "ce", "son", "une", "sur", "avec", "bonjour", "merci", "où", "comment", "quoi",
                "quand", "pourquoi", "qui",
            ],
        },
        LanguageConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            common_words: &[
                "der", "die", "und", "in", "den", "von", "zu", "das", "mit", "sich", "des", "auf",
                "für", "ist", "im", "dem", "nicht", "ein", "hallo", "danke", "wo", "wie", "was",
                "wann", "warum", "wer",
            ],
        },
        LanguageConfig {
            code: "it",
            name: "Italian",
            native_name: "Italiano",
            common_words: &[
                "il", "di", "che", "e", "la", "per", "un", "in", "con", "non", "da", "su", "del",
                "le", "si", "una", "dei", "nel", "ciao", "grazie", "dove", "come", "cosa",
                "quando", "perché", "chi",
            ],
        },
        LanguageConfig {
            code: "pt",
            name: "Portuguese",
            native_name: "Português",
            common_words: &[
                "o", "de", "e", "a", "que", "do", "da", "em", "um", "para", "é", "com", "não",
                "uma", "os", "no", "se", "na", "olá", "obrigado", "onde", "como", "quando", "quem",
            ],
        },
        // Name-only languages: selectable as translation targets, not detected
        // heuristically.
        LanguageConfig {
            code: "ru",
            name: "Russian",
            native_name: "Русский",
            common_words: &[],
        },
        LanguageConfig {
            code: "ja",
            name: "Japanese",
            native_name: "日本語",
            common_words: &[],
        },
        LanguageConfig {
            code: "ko",
            name: "Korean",
            native_name: "한국어",
            common_words: &[],
        },
        LanguageConfig {
            code: "zh",
            name: "Chinese",
            native_name: "中文",
            common_words: &[],
        },
        LanguageConfig {
            code: "ar",
            name: "Arabic",
            native_name: "العربية",
            common_words: &[],
        },
        LanguageConfig {
            code: "hi",
            name: "Hindi",
            native_name: "हिन्दी",
            common_words: &[],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        // Should return the same instance (same memory address)
        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_english() {
        let registry = LanguageRegistry::get();
        let config = registry.get_by_code("en").expect("English should exist");

        assert_eq!(config.code, "en");
        assert_eq!(config.name, "English");
        assert_eq!(config.native_name, "English");
        assert!(!config.common_words.is_empty());
    }

    #[test]
    fn test_get_by_code_spanish() {
        let registry = LanguageRegistry::get();
        let config = registry.get_by_code("es").expect("Spanish should exist");

        assert_eq!(config.name, "Spanish");
        assert_eq!(config.native_name, "Español");
        assert!(config.common_words.contains(&"hola"));
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        let registry = LanguageRegistry::get();
        assert!(registry.get_by_code("xx").is_none());
    }

    #[test]
    fn test_display_name_known_code() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.display_name("fr"), "French");
        assert_eq!(registry.display_name("pt"), "Portuguese");
    }

    #[test]
    fn test_display_name_unknown_code_passes_through() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.display_name("tlh"), "tlh");
        assert_eq!(registry.display_name(""), "");
    }

    #[test]
    fn test_detectable_order_is_english_first() {
        let registry = LanguageRegistry::get();
        let codes: Vec<&str> = registry.detectable().map(|lang| lang.code).collect();

        // Tie-break order for heuristic detection
        assert_eq!(codes, vec!["en", "es", "fr", "de", "it", "pt"]);
    }

    #[test]
    fn test_name_only_languages_are_not_detectable() {
        let registry = LanguageRegistry::get();
        assert!(registry.detectable().all(|lang| lang.code != "ja"));
        assert!(registry.get_by_code("ja").is_some());
    }

    #[test]
    fn test_list_all_contains_twelve_languages() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.list_all().len(), 12);
    }
}
