//! Bridge to the generative-AI assistant.
//!
//! The [`Assistant`] trait is the narrow request/response contract the rest
//! of the client depends on.  [`gemini::GeminiAssistant`] talks to the real
//! service; [`DisabledAssistant`] stands in when no API key is configured.
//! Errors never leave the command layer: `commands::assistant` turns every
//! [`AssistantError`] into a fixed fallback reply.

pub mod gemini;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use campus_shared::types::Language;

/// Answer produced by the assistant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    pub text: String,
    /// Raw audio payload when the backend produced speech.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<Vec<u8>>,
    /// URLs the answer was grounded on.
    pub sources: Vec<String>,
}

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Assistant is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Assistant API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Assistant returned no text")]
    EmptyResponse,

    #[error("Invalid audio payload: {0}")]
    Audio(#[from] base64::DecodeError),
}

#[async_trait]
pub trait Assistant: Send + Sync {
    /// Free-form question answered in `language`.
    async fn ask(&self, prompt: &str, language: Language) -> Result<AssistantReply, AssistantError>;

    /// Translate `text` into `target`.
    async fn translate(&self, text: &str, target: Language) -> Result<String, AssistantError>;
}

/// Backend used when no API key is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledAssistant;

#[async_trait]
impl Assistant for DisabledAssistant {
    async fn ask(&self, _prompt: &str, _language: Language) -> Result<AssistantReply, AssistantError> {
        Err(AssistantError::NotConfigured)
    }

    async fn translate(&self, _text: &str, _target: Language) -> Result<String, AssistantError> {
        Err(AssistantError::NotConfigured)
    }
}

/// Fixed apology shown when the assistant fails.
pub fn fallback_text(language: Language) -> &'static str {
    match language {
        Language::Ar => "عذراً، لم يتمكن المساعد من الإجابة الآن. يرجى المحاولة لاحقاً.",
        Language::En => "Sorry, the assistant could not answer right now. Please try again later.",
        Language::Fr => "Désolé, l'assistant n'a pas pu répondre pour le moment. Veuillez réessayer plus tard.",
    }
}

pub fn fallback_reply(language: Language) -> AssistantReply {
    AssistantReply {
        text: fallback_text(language).to_string(),
        audio: None,
        sources: Vec::new(),
    }
}

/// Notice returned instead of a translation when no API key is set; it
/// carries the original text so nothing is lost.
pub fn disabled_notice(original: &str) -> String {
    format!("[Assistant disabled: set GEMINI_API_KEY] Original: {original}")
}

/// Languages offered as translation targets: every language except the one
/// the UI is already shown in.
pub fn target_languages(ui_language: Language) -> Vec<Language> {
    Language::ALL
        .into_iter()
        .filter(|l| *l != ui_language)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_exclude_ui_language() {
        assert_eq!(target_languages(Language::Ar), vec![Language::En, Language::Fr]);
        assert!(!target_languages(Language::Fr).contains(&Language::Fr));
    }

    #[test]
    fn fallback_has_no_sources() {
        let reply = fallback_reply(Language::En);
        assert!(reply.sources.is_empty());
        assert!(reply.audio.is_none());
        assert_eq!(reply.text, fallback_text(Language::En));
    }

    #[tokio::test]
    async fn disabled_backend_reports_not_configured() {
        let err = DisabledAssistant.ask("hi", Language::En).await.unwrap_err();
        assert!(matches!(err, AssistantError::NotConfigured));
    }
}
