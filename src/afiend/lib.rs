//! # a-fiend Architecture
//!
//! a-fiend keeps shell aliases in a small local store and writes a script the
//! shell sources at startup. The script defines every alias and, for aliases
//! added recently, echoes the definition again as a reminder until the
//! configured window (one week by default) has passed.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, prints results, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Regenerates the source file on request                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, generator.rs)                │
//! │  - add, delete, list, source                                │
//! │  - Script rendering, reminder cutoffs                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - AliasStore: records + settings                           │
//! │  - StorageBackend: SqliteBackend (production), MemBackend   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Every store call is its own transaction; the store handle is
//! passed in explicitly, never held globally.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per subcommand
//! - [`generator`]: Source script rendering
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: [`model::AliasRecord`]
//! - [`duration`]: Compact duration strings (`168h0m0s`)
//! - [`config`]: Data directory resolution
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod duration;
pub mod error;
pub mod generator;
pub mod model;
pub mod store;
