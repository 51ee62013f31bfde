//! # Source File Generator
//!
//! Renders the alias store into a shell script meant to be sourced from the
//! user's profile:
//!
//! ```text
//! # This file is automatically generated by a-fiend, do not edit
//! # UPDATED 2024-05-01 09:12:44.120391 +0200
//! # Prints reminders for 168h0m0s
//! AFIEND_T=`date +%s`
//! alias foo='ls -la'
//! if [ 1715152364 -ge $AFIEND_T ]; then
//! 	echo alias foo='ls -la'
//! fi
//! ```
//!
//! `AFIEND_T` is evaluated when the script is sourced, not when it is
//! generated. Each alias carries its reminder cutoff (`Added + window`) as a
//! fixed Unix timestamp, so the echo keeps showing up until the cutoff passes
//! without the file being regenerated.
//!
//! Commands are wrapped in single quotes as-is. A command that itself
//! contains a single quote produces a line the shell cannot parse.

use crate::duration::format_duration;
use crate::error::Result;
use crate::model::AliasRecord;
use crate::store::{AliasStore, StorageBackend};
use chrono::{DateTime, Local, TimeDelta};
use std::io::{self, Write};

pub const TIME_VAR: &str = "AFIEND_T";

/// The `alias NAME='COMMAND'` line shared by `list` and the source file.
pub fn alias_line(name: &str, command: &str) -> String {
    format!("alias {}='{}'", name, command)
}

/// Unix second after which `record` is no longer reminded of.
pub fn reminder_cutoff(record: &AliasRecord, window: TimeDelta) -> i64 {
    match record.added.checked_add_signed(window) {
        Some(cutoff) => cutoff.timestamp(),
        None if window < TimeDelta::zero() => i64::MIN,
        None => i64::MAX,
    }
}

pub fn write_header<W: Write>(
    out: &mut W,
    generated_at: DateTime<Local>,
    reminders: TimeDelta,
) -> io::Result<()> {
    writeln!(out, "# This file is automatically generated by a-fiend, do not edit")?;
    writeln!(out, "# UPDATED {}", generated_at.format("%Y-%m-%d %H:%M:%S%.f %z"))?;
    writeln!(out, "# Prints reminders for {}", format_duration(reminders))?;
    writeln!(out, "{}=`date +%s`", TIME_VAR)
}

pub fn write_alias<W: Write>(
    out: &mut W,
    name: &str,
    record: &AliasRecord,
    reminders: TimeDelta,
) -> io::Result<()> {
    let line = alias_line(name, &record.command);
    writeln!(out, "{}", line)?;
    writeln!(
        out,
        "if [ {} -ge ${} ]; then",
        reminder_cutoff(record, reminders),
        TIME_VAR
    )?;
    writeln!(out, "\techo {}", line)?;
    writeln!(out, "fi")
}

/// Line that re-runs `a-fiend source` in the background when the script is sourced.
pub fn write_regen<W: Write>(out: &mut W, reminders: TimeDelta) -> io::Result<()> {
    writeln!(
        out,
        "(a-fiend source -reminders {} > /dev/null 2>&1 &)",
        format_duration(reminders)
    )
}

/// Write the full script for every alias in `store` to `out`.
///
/// Records are rendered one by one while the store transaction is open. If a
/// record fails to decode, everything before it has already been written.
pub fn generate<B: StorageBackend, W: Write>(
    store: &mut AliasStore<B>,
    out: &mut W,
    reminders: TimeDelta,
    regen: bool,
    generated_at: DateTime<Local>,
) -> Result<()> {
    write_header(out, generated_at, reminders)?;
    store.for_each_alias(|name, record| {
        write_alias(&mut *out, name, record, reminders)?;
        Ok(())
    })?;
    if regen {
        write_regen(out, reminders)?;
    }
    Ok(())
}

/// Writes everything to both sinks, `first` before `second`.
pub struct Tee<A, B> {
    first: A,
    second: B,
}

impl<A: Write, B: Write> Tee<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.first.write_all(buf)?;
        self.second.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.first.flush()?;
        self.second.flush()
    }
}
