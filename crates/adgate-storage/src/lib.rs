//! # adgate-storage
//!
//! SQLite persistence for the session ad-state store. Implements
//! `adgate_core::state::KeyValueStorage` over a single `kv_store` table.

pub mod pragmas;
pub mod sqlite;

pub use sqlite::SqliteStorage;
