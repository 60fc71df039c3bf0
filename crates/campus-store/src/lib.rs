//! # campus-store
//!
//! Data layer for the campus channels application.
//!
//! Two halves live here.  The [`Registry`] holds the mutable catalogs (users,
//! channels, private chats) in process memory behind the [`Repository`]
//! interface.  The [`KeyValueStore`] layer persists the small per-installation
//! records (current session, profile settings) as JSON values under fixed
//! keys, either in a local SQLite file ([`Database`]) or in memory
//! ([`MemoryStore`]).

pub mod channels;
pub mod chats;
pub mod database;
pub mod kv;
pub mod migrations;
pub mod models;
pub mod registry;
pub mod repository;
pub mod seed;
pub mod users;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use kv::{KeyValueStore, MemoryStore};
pub use models::*;
pub use registry::Registry;
pub use repository::Repository;
