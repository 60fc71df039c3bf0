//! In-memory catalogs of users, channels and private chats.
//!
//! The [`Registry`] is owned by the application's composition root and handed
//! out by reference; nothing in this crate keeps module-level state.  CRUD
//! helpers are split by domain across `users.rs`, `channels.rs` and
//! `chats.rs`.

use crate::models::{Channel, PrivateChat, User};

/// Mutable in-memory catalogs.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub(crate) users: Vec<User>,
    pub(crate) channels: Vec<Channel>,
    pub(crate) chats: Vec<PrivateChat>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from explicit catalogs (e.g. a seed).
    pub fn from_parts(users: Vec<User>, channels: Vec<Channel>, chats: Vec<PrivateChat>) -> Self {
        Self {
            users,
            channels,
            chats,
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn chat_count(&self) -> usize {
        self.chats.len()
    }
}
