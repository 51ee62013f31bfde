use super::backend::StorageBackend;
use crate::error::{AfiendError, Result};
use std::collections::BTreeMap;

type Bucket = BTreeMap<Vec<u8>, Vec<u8>>;

/// In-memory storage backend for testing.
///
/// Does NOT persist data. `BTreeMap` gives the same byte-wise key order as
/// the SQLite backend.
#[derive(Default)]
pub struct MemBackend {
    buckets: BTreeMap<Vec<u8>, Bucket>,
    simulate_write_error: bool,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Store raw bytes, bypassing record encoding. Used to plant corrupt data.
    pub fn put_raw(&mut self, bucket: &[u8], key: &[u8], value: &[u8]) {
        self.bucket_mut(bucket).insert(key.to_vec(), value.to_vec());
    }

    fn bucket_mut(&mut self, bucket: &[u8]) -> &mut Bucket {
        self.buckets.entry(bucket.to_vec()).or_default()
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error {
            return Err(AfiendError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn put(&mut self, bucket: &[u8], key: &[u8], value: &[u8]) -> Result<()> {
        self.check_writable()?;
        self.put_raw(bucket, key, value);
        Ok(())
    }

    fn get(&mut self, bucket: &[u8], key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.bucket_mut(bucket).get(key).cloned())
    }

    fn delete(&mut self, bucket: &[u8], key: &[u8]) -> Result<()> {
        self.check_writable()?;
        self.bucket_mut(bucket).remove(key);
        Ok(())
    }

    fn scan(
        &mut self,
        bucket: &[u8],
        visit: &mut dyn FnMut(&[u8], &[u8]) -> Result<()>,
    ) -> Result<()> {
        for (key, value) in self.bucket_mut(bucket).iter() {
            visit(key.as_slice(), value.as_slice())?;
        }
        Ok(())
    }

    fn has_bucket(&mut self, bucket: &[u8]) -> Result<bool> {
        Ok(self.buckets.contains_key(bucket))
    }
}
