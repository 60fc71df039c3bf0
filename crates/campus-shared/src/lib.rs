//! # campus-shared
//!
//! Identifiers, closed enumerations, constants and the static academic
//! directory shared by the store and the client.

pub mod constants;
pub mod directory;
pub mod types;
