use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{AliasStore, StorageBackend};

/// Every alias in key order.
///
/// Records are collected inside the store transaction; nothing borrowed from
/// it is returned.
pub fn run<B: StorageBackend>(store: &mut AliasStore<B>) -> Result<CmdResult> {
    let aliases = store.list_aliases()?;
    Ok(CmdResult::default().with_listed_aliases(aliases))
}
