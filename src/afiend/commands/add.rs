use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{AliasStore, StorageBackend};

pub fn run<B: StorageBackend>(
    store: &mut AliasStore<B>,
    name: &str,
    command: &str,
) -> Result<CmdResult> {
    let record = store.put_alias(name, command)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Successfully saved the alias {}={:?}",
        name, record.command
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::list;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn stores_the_alias() {
        let mut store = AliasStore::with_backend(MemBackend::new());
        let result = run(&mut store, "foo", "ls -la").unwrap();

        assert_eq!(
            result.messages[0].content,
            "Successfully saved the alias foo=\"ls -la\""
        );

        let listed = list::run(&mut store).unwrap().listed_aliases;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "foo");
        assert_eq!(listed[0].command, "ls -la");
    }

    #[test]
    fn re_adding_overwrites() {
        let mut store = AliasStore::with_backend(MemBackend::new());
        run(&mut store, "foo", "ls").unwrap();
        run(&mut store, "foo", "ls -la").unwrap();

        let listed = list::run(&mut store).unwrap().listed_aliases;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].command, "ls -la");
    }

    #[test]
    fn storage_failure_is_reported() {
        let mut store = AliasStore::with_backend(MemBackend::new());
        store.backend_mut().set_simulate_write_error(true);

        assert!(run(&mut store, "foo", "ls").is_err());
    }
}
