//! Application state shared across all commands.
//!
//! The [`AppState`] struct is the composition root: it owns the registry,
//! the persisted key-value store, the assistant backend and the event
//! channel.  It is wrapped in `Arc<Mutex<>>` so that every command (and the
//! view controller) works against the same instance.  Commands never hold
//! the lock across an `.await`.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;

use campus_store::{KeyValueStore, MemoryStore, Registry, Repository};

use crate::assistant::{Assistant, DisabledAssistant};
use crate::config::ClientConfig;
use crate::error::CommandError;
use crate::events::AppEvent;

/// Capacity of the app event channel.
const EVENT_CAPACITY: usize = 64;

pub type SharedState = Arc<Mutex<AppState>>;

/// Central application state.
pub struct AppState {
    pub config: ClientConfig,

    /// Users, channels and private chats.
    pub repository: Box<dyn Repository>,

    /// Persisted session and settings records.
    pub storage: Box<dyn KeyValueStore>,

    /// Generative-AI backend.
    pub assistant: Arc<dyn Assistant>,

    /// Sender half of the app event channel.
    pub events: broadcast::Sender<AppEvent>,
}

impl AppState {
    pub fn new(
        config: ClientConfig,
        repository: Box<dyn Repository>,
        storage: Box<dyn KeyValueStore>,
        assistant: Arc<dyn Assistant>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            config,
            repository,
            storage,
            assistant,
            events,
        }
    }

    /// Seeded registry, volatile storage and no assistant.
    pub fn in_memory(config: ClientConfig) -> Self {
        Self::new(
            config,
            Box::new(Registry::seeded()),
            Box::new(MemoryStore::new()),
            Arc::new(DisabledAssistant),
        )
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(Mutex::new(self))
    }
}

/// Lock the shared state, mapping poisoning to a command error.
pub fn lock(state: &SharedState) -> Result<MutexGuard<'_, AppState>, CommandError> {
    state.lock().map_err(|e| {
        tracing::error!(error = %e, "Lock poisoned");
        CommandError::StatePoisoned
    })
}

/// Subscribe to app events.
pub fn subscribe_events(state: &SharedState) -> Result<broadcast::Receiver<AppEvent>, CommandError> {
    Ok(lock(state)?.events.subscribe())
}
