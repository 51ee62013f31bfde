//! # Storage Layer
//!
//! Storage is split in two:
//!
//! - [`StorageBackend`]: a bucketed, ordered key-value store where every call
//!   is its own transaction. This is the only part that knows about SQLite.
//! - [`AliasStore`]: alias records and settings on top of any backend. Encoding,
//!   defaults and key naming live here.
//!
//! ## Implementations
//!
//! - [`sqlite_backend::SqliteBackend`]: production storage in `alias.db`
//! - [`mem_backend::MemBackend`]: in-memory storage for testing
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## Storage Format
//!
//! ```text
//! ~/.a-fiend/
//! ├── alias.db      # buckets `a` (aliases) and `s` (settings)
//! └── source.sh     # generated, sourced by the shell profile
//! ```

pub mod alias_store;
pub mod backend;
pub mod mem_backend;
pub mod sqlite_backend;

pub use alias_store::{default_reminder_duration, AliasStore};
pub use backend::StorageBackend;
