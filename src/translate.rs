//! Translation: a deterministic canned-phrase table in demo mode, a Gemini
//! call in live mode, and a tagged fallback string when the provider fails.

use crate::config::Config;
use crate::gemini;
use crate::i18n::LanguageRegistry;
use std::time::Duration;
use tracing::warn;

/// Low-to-moderate randomness: slight stylistic variation, mostly stable.
const TRANSLATION_TEMPERATURE: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationMode {
    Mock,
    Ai,
    AiFallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub mode: TranslationMode,
}

/// A canned substitution rule, matched by substring against the lower-cased
/// input. Rules are tried in declaration order; the first match wins.
struct MockRule {
    needle: &'static str,
    output: RuleOutput,
}

enum RuleOutput {
    /// Fixed replacement phrase
    Fixed(&'static str),
    /// Splice the tail of the raw input after `marker` into a template,
    /// falling back to a stock name when nothing follows the marker.
    Name {
        marker: &'static str,
        prefix: &'static str,
        default_name: &'static str,
    },
}

struct MockTable {
    source: &'static str,
    target: &'static str,
    rules: &'static [MockRule],
    /// Prefix for inputs no rule matches, e.g. "Traducción"
    generic_prefix: &'static str,
}

static MOCK_TABLES: &[MockTable] = &[
    MockTable {
        source: "en",
        target: "es",
        rules: &[
            MockRule {
                needle: "hello",
                output: RuleOutput::Fixed("Hola, ¿cómo estás?"),
            },
            MockRule {
                needle: "thank",
                output: RuleOutput::Fixed("¡Muchas gracias!"),
            },
            MockRule {
                needle: "where",
                output: RuleOutput::Fixed("¿Dónde está el restaurante más cercano?"),
            },
            MockRule {
                needle: "good morning",
                output: RuleOutput::Fixed("Buenos días"),
            },
            MockRule {
                needle: "how are you",
                output: RuleOutput::Fixed("¿Cómo estás?"),
            },
            MockRule {
                needle: "my name is",
                output: RuleOutput::Name {
                    marker: "is ",
                    prefix: "Mi nombre es ",
                    default_name: "John",
                },
            },
        ],
        generic_prefix: "Traducción",
    },
    MockTable {
        source: "en",
        target: "fr",
        rules: &[
            MockRule {
                needle: "hello",
                output: RuleOutput::Fixed("Bonjour, comment allez-vous?"),
            },
            MockRule {
                needle: "thank",
                output: RuleOutput::Fixed("Merci beaucoup!"),
            },
            MockRule {
                needle: "where",
                output: RuleOutput::Fixed("Où est le restaurant le plus proche?"),
            },
            MockRule {
                needle: "good morning",
                output: RuleOutput::Fixed("Bonjour"),
            },
            MockRule {
                needle: "how are you",
                output: RuleOutput::Fixed("Comment allez-vous?"),
            },
            MockRule {
                needle: "my name is",
                output: RuleOutput::Name {
                    marker: "is ",
                    prefix: "Je m'appelle ",
                    default_name: "John",
                },
            },
        ],
        generic_prefix: "Traduction",
    },
    MockTable {
        source: "en",
        target: "de",
        rules: &[
            MockRule {
                needle: "hello",
                output: RuleOutput::Fixed("Hallo, wie geht es dir?"),
            },
            MockRule {
                needle: "thank",
                output: RuleOutput::Fixed("Vielen Dank!"),
            },
            MockRule {
                needle: "where",
                output: RuleOutput::Fixed("Wo ist das nächste Restaurant?"),
            },
            MockRule {
                needle: "good morning",
                output: RuleOutput::Fixed("Guten Morgen"),
            },
            MockRule {
                needle: "how are you",
                output: RuleOutput::Fixed("Wie geht es dir?"),
            },
            MockRule {
                needle: "my name is",
                output: RuleOutput::Name {
                    marker: "is ",
                    prefix: "Mein Name ist ",
                    default_name: "Hans",
                },
            },
        ],
        generic_prefix: "Übersetzung",
    },
    MockTable {
        source: "es",
        target: "en",
        rules: &[
            MockRule {
                needle: "hola",
                output: RuleOutput::Fixed("Hello, how are you?"),
            },
            MockRule {
                needle: "gracias",
                output: RuleOutput::Fixed("Thank you very much!"),
            },
            MockRule {
                needle: "buenos días",
                output: RuleOutput::Fixed("Good morning"),
            },
            MockRule {
                needle: "mi nombre es",
                output: RuleOutput::Name {
                    marker: "es ",
                    prefix: "My name is ",
                    default_name: "Juan",
                },
            },
        ],
        generic_prefix: "Translation",
    },
    MockTable {
        source: "fr",
        target: "en",
        rules: &[
            MockRule {
                needle: "bonjour",
                output: RuleOutput::Fixed("Hello, how are you?"),
            },
            MockRule {
                needle: "merci",
                output: RuleOutput::Fixed("Thank you very much!"),
            },
            MockRule {
                needle: "comment allez-vous",
                output: RuleOutput::Fixed("How are you?"),
            },
            MockRule {
                needle: "je m'appelle",
                output: RuleOutput::Name {
                    marker: "appelle ",
                    prefix: "My name is ",
                    default_name: "Pierre",
                },
            },
        ],
        generic_prefix: "Translation",
    },
    MockTable {
        source: "de",
        target: "en",
        rules: &[
            MockRule {
                needle: "hallo",
                output: RuleOutput::Fixed("Hello, how are you?"),
            },
            MockRule {
                needle: "danke",
                output: RuleOutput::Fixed("Thank you very much!"),
            },
            MockRule {
                needle: "guten morgen",
                output: RuleOutput::Fixed("Good morning"),
            },
            MockRule {
                needle: "mein name ist",
                output: RuleOutput::Name {
                    marker: "ist ",
                    prefix: "My name is ",
                    default_name: "Hans",
                },
            },
        ],
        generic_prefix: "Translation",
    },
];

/// Produce a demo-mode translation without any external call.
///
/// The first matching rule for the `(source, target)` pair wins; unmatched
/// input yields the pair's generic template; pairs outside the curated table
/// yield a bracketed template naming both languages.
pub fn mock_translate(text: &str, source_lang: &str, target_lang: &str) -> String {
    let lowered = text.to_lowercase();

    if let Some(table) = MOCK_TABLES
        .iter()
        .find(|table| table.source == source_lang && table.target == target_lang)
    {
        for rule in table.rules {
            if lowered.contains(rule.needle) {
                return match &rule.output {
                    RuleOutput::Fixed(phrase) => (*phrase).to_string(),
                    RuleOutput::Name {
                        marker,
                        prefix,
                        default_name,
                    } => {
                        // Splice from the raw text so the name keeps its case
                        let tail = text
                            .split_once(marker)
                            .map(|(_, rest)| rest)
                            .filter(|rest| !rest.is_empty())
                            .unwrap_or(default_name);
                        format!("{}{}", prefix, tail)
                    }
                };
            }
        }
        return format!("{}: {}", table.generic_prefix, text);
    }

    let registry = LanguageRegistry::get();
    format!(
        "[Mock Translation from {} to {}]: {}",
        registry.display_name(source_lang),
        registry.display_name(target_lang),
        text
    )
}

/// Demo-mode translation with an artificial delay simulating network
/// latency. Each call sleeps independently; concurrent requests are not
/// blocked by one another.
pub async fn translate_mock(
    config: &Config,
    text: &str,
    source_lang: &str,
    target_lang: &str,
) -> Translation {
    tokio::time::sleep(Duration::from_millis(config.mock_delay_ms)).await;

    Translation {
        text: mock_translate(text, source_lang, target_lang),
        mode: TranslationMode::Mock,
    }
}

fn build_translation_prompt(text: &str, source_language: &str, target_language: &str) -> String {
    format!(
        r#"You are a professional translator. Translate the following text from {} to {}.

Rules:
1. Provide ONLY the translation, no explanations or additional text
2. Maintain the original tone and style
3. Keep proper nouns and names as they are unless they have standard translations
4. For informal text, use informal translations; for formal text, use formal translations
5. If the text contains cultural references, adapt them appropriately for the target culture

Text to translate: "{}"

Translation:"#,
        source_language, target_language, text
    )
}

/// Clearly tagged result used when the provider call fails.
pub fn build_fallback_text(text: &str, target_lang: &str) -> String {
    format!(
        "[AI Error - Mock Translation]: {} → {}",
        text,
        target_lang.to_uppercase()
    )
}

/// Translate via the Gemini provider.
///
/// The prompt names the full source/target language names when the registry
/// knows them, otherwise the raw codes. Provider failure is terminal for the
/// request: the result degrades to the tagged fallback string, never an
/// error.
pub async fn translate_ai(
    client: &reqwest::Client,
    config: &Config,
    text: &str,
    source_lang: &str,
    target_lang: &str,
) -> Translation {
    let registry = LanguageRegistry::get();
    let prompt = build_translation_prompt(
        text,
        registry.display_name(source_lang),
        registry.display_name(target_lang),
    );

    match gemini::generate_text(client, config, &prompt, TRANSLATION_TEMPERATURE).await {
        Ok(reply) => Translation {
            text: reply.trim().to_string(),
            mode: TranslationMode::Ai,
        },
        Err(e) => {
            warn!("AI translation failed: {:#}", e);
            Translation {
                text: build_fallback_text(text, target_lang),
                mode: TranslationMode::AiFallback,
            }
        }
    }
}
