//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every a-fiend operation.
//!
//! Saving or deleting an alias does not rewrite the generated script on its
//! own: callers follow up with [`AfiendApi::refresh_source_file`], so a
//! committed change can be reported even when the script cannot be written.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Terminal I/O**: No printing; callers pass a sink when they want a copy
//!   of the script
//!
//! ## Generic Over StorageBackend
//!
//! `AfiendApi<B: StorageBackend>`:
//! - Production: `AfiendApi<SqliteBackend>`
//! - Testing: `AfiendApi<MemBackend>`

use crate::commands;
use crate::config::AfiendPaths;
use crate::error::Result;
use crate::store::sqlite_backend::SqliteBackend;
use crate::store::{AliasStore, StorageBackend};
use chrono::TimeDelta;
use std::io::Write;

pub struct AfiendApi<B: StorageBackend> {
    store: AliasStore<B>,
    paths: AfiendPaths,
}

impl AfiendApi<SqliteBackend> {
    /// Open the on-disk store under `paths`, creating the directory if needed.
    pub fn open(paths: AfiendPaths) -> Result<Self> {
        paths.ensure_root()?;
        let backend = SqliteBackend::open(paths.db_file())?;
        Ok(Self::new(AliasStore::with_backend(backend), paths))
    }
}

impl<B: StorageBackend> AfiendApi<B> {
    pub fn new(store: AliasStore<B>, paths: AfiendPaths) -> Self {
        Self { store, paths }
    }

    /// Save (or overwrite) an alias.
    pub fn add_alias(&mut self, name: &str, command: &str) -> Result<CmdResult> {
        commands::add::run(&mut self.store, name, command)
    }

    /// Remove an alias.
    pub fn delete_alias(&mut self, name: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, name)
    }

    pub fn list_aliases(&mut self) -> Result<CmdResult> {
        commands::list::run(&mut self.store)
    }

    /// Rewrite the source file, copying it to `mirror` when given.
    pub fn source(
        &mut self,
        reminders: Option<TimeDelta>,
        mirror: Option<&mut dyn Write>,
    ) -> Result<CmdResult> {
        commands::source::write_file(&mut self.store, &self.paths.source_file(), reminders, mirror)
    }

    pub fn reminder_duration(&mut self) -> Result<TimeDelta> {
        self.store.reminder_duration()
    }

    pub fn paths(&self) -> &AfiendPaths {
        &self.paths
    }

    pub fn store_mut(&mut self) -> &mut AliasStore<B> {
        &mut self.store
    }

    /// Rewrite the source file with the stored reminder window.
    pub fn refresh_source_file(&mut self) -> Result<()> {
        commands::source::write_file(&mut self.store, &self.paths.source_file(), None, None)?;
        Ok(())
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
