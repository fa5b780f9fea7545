//! Key/Value Storage
//!
//! The durable-storage seam. Each key names one slot holding a serialized
//! string; callers own the serialization format.

use crate::utils::error::AppResult;

/// Durable string slots addressed by key.
///
/// Writes are synchronous and individually durable; there is no
/// multi-key transaction.
pub trait KeyValueStore: Send + Sync {
    /// Read a slot. `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Create or overwrite a slot.
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a slot. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> AppResult<()>;
}
