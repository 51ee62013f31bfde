use crate::commands::{CmdMessage, CmdResult};
use crate::duration::format_duration;
use crate::error::{AfiendError, Result};
use crate::generator::{self, Tee};
use crate::store::{AliasStore, StorageBackend};
use chrono::{Local, TimeDelta};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Render the source script into `out`.
///
/// `requested` overrides the stored reminder window; when it differs from the
/// stored value it is persisted before rendering.
pub fn run<B: StorageBackend, W: Write>(
    store: &mut AliasStore<B>,
    out: &mut W,
    requested: Option<TimeDelta>,
    regen: bool,
) -> Result<CmdResult> {
    let current = store.reminder_duration()?;
    let reminders = requested.unwrap_or(current);
    let mut result = CmdResult::default().with_reminders(reminders);

    if reminders != current {
        store.set_reminder_duration(reminders)?;
        info!(
            "event=setting_changed key=reminders from={} to={}",
            format_duration(current),
            format_duration(reminders)
        );
        result.add_message(CmdMessage::info(format!(
            "Reminders now shown for {}",
            format_duration(reminders)
        )));
    }

    generator::generate(store, out, reminders, regen, Local::now())?;
    Ok(result)
}

/// Regenerate the script at `path`, optionally copying it to `mirror` as well.
///
/// The mirror receives each chunk before the file does.
pub fn write_file<B: StorageBackend>(
    store: &mut AliasStore<B>,
    path: &Path,
    requested: Option<TimeDelta>,
    mirror: Option<&mut dyn Write>,
) -> Result<CmdResult> {
    let file_error = |source| AfiendError::File {
        path: path.to_path_buf(),
        source,
    };

    let mut file = BufWriter::new(File::create(path).map_err(file_error)?);
    let rendered = match mirror {
        Some(mirror) => {
            let mut tee = Tee::new(mirror, &mut file);
            run(store, &mut tee, requested, false).and_then(|result| {
                tee.flush()?;
                Ok(result)
            })
        }
        None => run(store, &mut file, requested, false),
    };
    // Any write failure while rendering belongs to the script (or its mirror).
    let result = rendered
        .and_then(|result| {
            file.flush()?;
            Ok(result)
        })
        .map_err(|e| match e {
            AfiendError::Io(source) => file_error(source),
            other => other,
        })?;

    info!("event=source_written path={}", path.display());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::store::mem_backend::MemBackend;
    use std::fs;

    fn render(store: &mut AliasStore<MemBackend>, requested: Option<TimeDelta>) -> String {
        let mut out = Vec::new();
        run(store, &mut out, requested, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn uses_stored_duration_by_default() {
        let mut store = AliasStore::with_backend(MemBackend::new());
        let text = render(&mut store, None);

        assert!(text.contains("# Prints reminders for 168h0m0s\n"));
    }

    #[test]
    fn different_override_is_persisted() {
        let mut store = AliasStore::with_backend(MemBackend::new());

        let mut out = Vec::new();
        let result = run(&mut store, &mut out, Some(TimeDelta::hours(24)), false).unwrap();

        assert_eq!(result.reminders, Some(TimeDelta::hours(24)));
        assert_eq!(result.messages.len(), 1);
        assert_eq!(store.reminder_duration().unwrap(), TimeDelta::hours(24));
        assert!(render(&mut store, None).contains("# Prints reminders for 24h0m0s\n"));
    }

    #[test]
    fn matching_override_writes_nothing() {
        let mut store = AliasStore::with_backend(MemBackend::new());
        // A failing write would surface if the setting were touched.
        store.backend_mut().set_simulate_write_error(true);

        let mut out = Vec::new();
        let result = run(&mut store, &mut out, Some(TimeDelta::hours(168)), false).unwrap();
        assert!(result.messages.is_empty());
    }

    #[test]
    fn end_to_end_add_then_render() {
        let mut store = AliasStore::with_backend(MemBackend::new());
        add::run(&mut store, "foo", "ls -la").unwrap();

        let text = render(&mut store, None);
        let lines: Vec<_> = text.lines().collect();
        assert!(lines.contains(&"alias foo='ls -la'"));
        assert!(lines.contains(&"\techo alias foo='ls -la'"));
    }

    #[test]
    fn write_file_creates_script_and_mirrors() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("source.sh");
        let mut store = AliasStore::with_backend(MemBackend::new());
        add::run(&mut store, "gs", "git status").unwrap();

        let mut mirror = Vec::new();
        write_file(&mut store, &path, None, Some(&mut mirror)).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("alias gs='git status'\n"));
        assert_eq!(written.as_bytes(), mirror.as_slice());
    }

    #[test]
    fn write_file_reports_unwritable_path() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("missing-dir").join("source.sh");
        let mut store = AliasStore::with_backend(MemBackend::new());

        let err = write_file(&mut store, &path, None, None).unwrap_err();
        assert!(matches!(err, AfiendError::File { .. }));
    }

    struct ClosedSink;

    impl Write for ClosedSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn write_file_reports_full_device_as_file_error() {
        let mut store = AliasStore::with_backend(MemBackend::new());
        // Enough output to spill past the write buffer mid-render.
        for i in 0..400 {
            let name = format!("alias{:03}", i);
            add::run(&mut store, &name, "echo a fairly long command").unwrap();
        }

        let path = Path::new("/dev/full");
        let err = write_file(&mut store, path, None, None).unwrap_err();
        match err {
            AfiendError::File { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("expected a file error, got {:?}", other),
        }
    }

    #[test]
    fn failing_mirror_is_a_file_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("source.sh");
        let mut store = AliasStore::with_backend(MemBackend::new());
        add::run(&mut store, "gs", "git status").unwrap();

        let mut mirror = ClosedSink;
        let err = write_file(&mut store, &path, None, Some(&mut mirror)).unwrap_err();
        assert!(matches!(err, AfiendError::File { .. }));
    }
}
