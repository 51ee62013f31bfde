use crate::error::Result;

/// Raw bucketed key-value storage.
///
/// This trait handles the "how" of storage (SQLite vs memory), while
/// [`AliasStore`](super::AliasStore) handles the "what" (records, settings).
///
/// Every method is one atomic transaction. A bucket that does not exist yet
/// is created inside that transaction, so reading from a fresh store is never
/// an error. Keys within a bucket are ordered byte-wise.
pub trait StorageBackend {
    /// Write `value` under `key`, replacing any previous value.
    fn put(&mut self, bucket: &[u8], key: &[u8], value: &[u8]) -> Result<()>;

    /// Read the value under `key`, `Ok(None)` when absent.
    fn get(&mut self, bucket: &[u8], key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Remove `key`. Removing a missing key succeeds.
    fn delete(&mut self, bucket: &[u8], key: &[u8]) -> Result<()>;

    /// Visit every entry of `bucket` in key order while the transaction is open.
    ///
    /// The first error returned by `visit` stops the scan and is propagated.
    /// Nothing handed to `visit` outlives the call.
    fn scan(
        &mut self,
        bucket: &[u8],
        visit: &mut dyn FnMut(&[u8], &[u8]) -> Result<()>,
    ) -> Result<()>;

    /// Whether `bucket` has been created.
    fn has_bucket(&mut self, bucket: &[u8]) -> Result<bool>;
}
