//! # campus-client
//!
//! Application core of the campus channels app: the shared [`AppState`],
//! command handlers, the [`view::ViewController`] screen state machine and
//! the assistant / push adapters.  The `campus` binary drives it from a
//! terminal.

pub mod assistant;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod push;
pub mod state;
pub mod view;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use campus_store::{Database, KeyValueStore, MemoryStore, Registry};

use crate::assistant::gemini::GeminiAssistant;
use crate::assistant::{Assistant, DisabledAssistant};
use crate::config::ClientConfig;
use crate::state::{AppState, SharedState};

/// Install the global tracing subscriber.  `RUST_LOG` overrides the default
/// filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("campus_client_lib=debug,campus_store=info,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Assemble the application state from `config`.
///
/// The persisted store falls back to memory when the database cannot be
/// opened, and the assistant to [`DisabledAssistant`] when no API key is set
/// or the HTTP client cannot be built.
pub fn build_state(config: ClientConfig) -> SharedState {
    let opened = match &config.data_dir {
        Some(dir) => Database::open_in_dir(dir),
        None => Database::new(),
    };
    let storage: Box<dyn KeyValueStore> = match opened {
        Ok(db) => {
            info!(path = ?db.path(), "Opened local store");
            Box::new(db)
        }
        Err(e) => {
            warn!(error = %e, "Local store unavailable, session will not persist");
            Box::new(MemoryStore::new())
        }
    };

    let assistant: Arc<dyn Assistant> = match GeminiAssistant::from_config(&config.gemini) {
        Ok(Some(gemini)) => {
            info!(model = %config.gemini.model, "Assistant enabled");
            Arc::new(gemini)
        }
        Ok(None) => {
            info!("GEMINI_API_KEY not set, assistant disabled");
            Arc::new(DisabledAssistant)
        }
        Err(e) => {
            warn!(error = %e, "Assistant client could not be built, assistant disabled");
            Arc::new(DisabledAssistant)
        }
    };

    AppState::new(config, Box::new(Registry::seeded()), storage, assistant).into_shared()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_state_persists_session_in_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..ClientConfig::default()
        };

        let shared = build_state(config.clone());
        {
            let mut guard = state::lock(&shared).unwrap();
            guard.storage.set("probe", "1").unwrap();
        }
        drop(shared);

        let reopened = build_state(config);
        let guard = state::lock(&reopened).unwrap();
        assert_eq!(guard.storage.get("probe").unwrap().as_deref(), Some("1"));
    }
}
