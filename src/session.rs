//! Orchestration layer: wires the strategy to the store, classifies
//! outcomes for the UI, and keeps the session user an explicit context
//! value instead of ambient global state.

use crate::store::{LocalStore, NewTranslation, TranslationRecord, User};
use crate::strategy::Strategy;
use crate::translate::{Translation, TranslationMode};
use tracing::warn;

/// Tri-state UI-facing classification of a translate request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationStatus {
    /// Live AI result
    Success,
    /// Degraded but usable: mock result or post-failure fallback
    Warning,
    /// The request itself failed (validation, transport)
    Error,
}

impl TranslationStatus {
    /// Mock and ai-fallback both classify as `Warning`, never `Error`: a
    /// usable result was still produced. The mode tag keeps them
    /// distinguishable to callers.
    pub fn classify(mode: TranslationMode) -> Self {
        match mode {
            TranslationMode::Ai => TranslationStatus::Success,
            TranslationMode::Mock | TranslationMode::AiFallback => TranslationStatus::Warning,
        }
    }
}

/// The session user for one request, if any.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub user: Option<User>,
}

impl SessionContext {
    pub fn for_user(user: Option<User>) -> Self {
        Self { user }
    }
}

#[derive(Debug)]
pub struct TranslateOutcome {
    pub translation: Translation,
    pub status: TranslationStatus,
    /// The persisted history record, when a session user exists and the
    /// write succeeded.
    pub saved: Option<TranslationRecord>,
}

/// Run one translate request end to end: invoke the strategy, classify the
/// outcome, and persist a history record best-effort.
///
/// Persistence failures are logged and swallowed; they never block showing
/// the translation to the caller.
pub async fn run_translation(
    strategy: &Strategy<'_>,
    store: &LocalStore,
    ctx: &SessionContext,
    text: &str,
    source_lang: &str,
    target_lang: &str,
) -> TranslateOutcome {
    let translation = strategy.translate(text, source_lang, target_lang).await;
    let status = TranslationStatus::classify(translation.mode);

    let saved = match &ctx.user {
        Some(user) => {
            let new = NewTranslation {
                user_id: user.id.clone(),
                source_text: text.to_string(),
                translated_text: translation.text.clone(),
                source_language: source_lang.to_string(),
                target_language: target_lang.to_string(),
            };
            match store.save_translation(new) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Failed to save translation to history: {:#}", e);
                    None
                }
            }
        }
        None => None,
    };

    TranslateOutcome {
        translation,
        status,
        saved,
    }
}

/// The source/target panel of the translate view. Swapping flips the
/// language codes and the displayed texts together; the caller never
/// observes a half-swapped state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguagePanel {
    pub source_lang: String,
    pub target_lang: String,
    pub source_text: String,
    pub translated_text: String,
}

impl LanguagePanel {
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.source_lang, &mut self.target_lang);
        std::mem::swap(&mut self.source_text, &mut self.translated_text);
    }
}
