//! Command handlers.
//!
//! Each sub-module groups related commands by domain.  Every command takes
//! the [`SharedState`], does its work under a single lock acquisition (so a
//! multi-step mutation is atomic), publishes an [`AppEvent`] for whatever
//! changed and returns the fresh aggregate to the caller.
//!
//! [`AppEvent`]: crate::events::AppEvent

pub mod assistant;
pub mod auth;
pub mod channels;
pub mod chats;
pub mod notifications;
pub mod settings;
pub mod subscription;

use crate::error::CommandError;
use crate::state::{lock, SharedState};

/// Sleep for the configured simulated latency.
pub(crate) async fn simulate_latency(state: &SharedState) -> Result<(), CommandError> {
    let latency = {
        let guard = lock(state)?;
        guard.config.latency
    };
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
    Ok(())
}
