//! Assistant panel commands.  Backend failures never reach the caller: they
//! are logged and replaced by the fallback reply or the disabled notice.

use std::sync::Arc;

use tracing::{debug, warn};

use campus_shared::types::Language;

use crate::assistant::{disabled_notice, fallback_reply, fallback_text, Assistant, AssistantError, AssistantReply};
use crate::error::CommandError;
use crate::state::{lock, SharedState};

fn backend(state: &SharedState) -> Result<Arc<dyn Assistant>, CommandError> {
    Ok(Arc::clone(&lock(state)?.assistant))
}

/// Ask a free-form question, answered in `language`.
pub async fn ask(state: &SharedState, prompt: &str, language: Language) -> Result<AssistantReply, CommandError> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(CommandError::InvalidInput("Question is empty".into()));
    }

    let assistant = backend(state)?;
    match assistant.ask(prompt, language).await {
        Ok(reply) => {
            debug!(sources = reply.sources.len(), audio = reply.audio.is_some(), "Assistant answered");
            Ok(reply)
        }
        Err(AssistantError::NotConfigured) => Ok(AssistantReply {
            text: disabled_notice(prompt),
            audio: None,
            sources: Vec::new(),
        }),
        Err(e) => {
            warn!(error = %e, "Assistant request failed");
            Ok(fallback_reply(language))
        }
    }
}

/// Translate `text` into `target`.  On failure the apology is given in
/// `ui_language`, the language the user is reading.
pub async fn translate(
    state: &SharedState,
    text: &str,
    target: Language,
    ui_language: Language,
) -> Result<String, CommandError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CommandError::InvalidInput("Nothing to translate".into()));
    }

    let assistant = backend(state)?;
    match assistant.translate(text, target).await {
        Ok(translated) => Ok(translated),
        Err(AssistantError::NotConfigured) => Ok(disabled_notice(text)),
        Err(e) => {
            warn!(error = %e, target = target.code(), "Translation failed");
            Ok(fallback_text(ui_language).to_string())
        }
    }
}
