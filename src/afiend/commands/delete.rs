use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{AliasStore, StorageBackend};

/// Remove `name`. Succeeds whether or not the alias existed.
pub fn run<B: StorageBackend>(store: &mut AliasStore<B>, name: &str) -> Result<CmdResult> {
    store.remove_alias(name)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Successfully deleted the alias {:?}",
        name
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add, list};
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn removes_only_the_named_alias() {
        let mut store = AliasStore::with_backend(MemBackend::new());
        add::run(&mut store, "a", "true").unwrap();
        add::run(&mut store, "b", "false").unwrap();

        let result = run(&mut store, "a").unwrap();
        assert_eq!(
            result.messages[0].content,
            "Successfully deleted the alias \"a\""
        );

        let names: Vec<_> = list::run(&mut store)
            .unwrap()
            .listed_aliases
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["b"]);
    }

    #[test]
    fn deleting_unknown_alias_succeeds_and_changes_nothing() {
        let mut store = AliasStore::with_backend(MemBackend::new());
        add::run(&mut store, "keep", "true").unwrap();
        let before = list::run(&mut store).unwrap().listed_aliases;

        run(&mut store, "ghost").unwrap();

        let after = list::run(&mut store).unwrap().listed_aliases;
        assert_eq!(before, after);
    }
}
