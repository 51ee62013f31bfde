//! # Alias Store
//!
//! Record-level access on top of a [`StorageBackend`]. Two buckets are used:
//!
//! - `a`: alias records, keyed by alias name, JSON-encoded [`AliasRecord`]s
//! - `s`: settings, currently only `reminders` (a compact duration string)
//!
//! Every method maps to exactly one backend transaction; there is no state
//! held across calls.

use super::backend::StorageBackend;
use crate::duration::{format_duration, parse_duration};
use crate::error::{AfiendError, Result};
use crate::model::AliasRecord;
use chrono::TimeDelta;
use log::debug;

pub const ALIAS_BUCKET: &[u8] = b"a";
pub const SETTINGS_BUCKET: &[u8] = b"s";
pub const REMINDERS_KEY: &[u8] = b"reminders";

/// One week.
pub fn default_reminder_duration() -> TimeDelta {
    TimeDelta::hours(168)
}

pub struct AliasStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> AliasStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Store `command` under `name`, replacing any previous record entirely.
    pub fn put_alias(&mut self, name: &str, command: &str) -> Result<AliasRecord> {
        let record = AliasRecord::new(name, command);
        self.save_record(&record)?;
        Ok(record)
    }

    /// Store a fully built record under its own name.
    pub fn save_record(&mut self, record: &AliasRecord) -> Result<()> {
        let data = serde_json::to_vec(record).map_err(|source| AfiendError::Encode {
            name: record.name.clone(),
            source,
        })?;
        self.backend.put(ALIAS_BUCKET, record.name.as_bytes(), &data)?;
        debug!("event=alias_put name={:?}", record.name);
        Ok(())
    }

    #[cfg(test)]
    pub fn get_alias(&mut self, name: &str) -> Result<Option<AliasRecord>> {
        match self.backend.get(ALIAS_BUCKET, name.as_bytes())? {
            Some(data) => decode_record(name, &data).map(Some),
            None => Ok(None),
        }
    }

    /// Remove `name`. A name that was never stored is not an error.
    pub fn remove_alias(&mut self, name: &str) -> Result<()> {
        self.backend.delete(ALIAS_BUCKET, name.as_bytes())?;
        debug!("event=alias_delete name={:?}", name);
        Ok(())
    }

    /// Visit every alias in key order inside a single transaction.
    ///
    /// The name passed to `visit` is the store key. Decoding stops at the
    /// first corrupt record; whatever `visit` already did stays done.
    pub fn for_each_alias<F>(&mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(&str, &AliasRecord) -> Result<()>,
    {
        self.backend.scan(ALIAS_BUCKET, &mut |key, value| {
            let name = String::from_utf8_lossy(key).into_owned();
            let mut record = decode_record(&name, value)?;
            record.name = name;
            visit(record.name.as_str(), &record)
        })
    }

    /// Collect every alias in key order.
    pub fn list_aliases(&mut self) -> Result<Vec<AliasRecord>> {
        let mut records = Vec::new();
        self.for_each_alias(|_, record| {
            records.push(record.clone());
            Ok(())
        })?;
        Ok(records)
    }

    /// The stored reminder window, or one week when none is stored.
    pub fn reminder_duration(&mut self) -> Result<TimeDelta> {
        match self.backend.get(SETTINGS_BUCKET, REMINDERS_KEY)? {
            Some(data) if !data.is_empty() => parse_duration(&String::from_utf8_lossy(&data)),
            _ => Ok(default_reminder_duration()),
        }
    }

    pub fn set_reminder_duration(&mut self, duration: TimeDelta) -> Result<()> {
        let value = format_duration(duration);
        self.backend.put(SETTINGS_BUCKET, REMINDERS_KEY, value.as_bytes())?;
        debug!("event=setting_put key=reminders value={}", value);
        Ok(())
    }
}

fn decode_record(name: &str, data: &[u8]) -> Result<AliasRecord> {
    serde_json::from_slice(data).map_err(|source| AfiendError::Decode {
        name: name.to_string(),
        source,
    })
}
