use async_trait::async_trait;
use bytes::Bytes;
use shared::Result;
use std::collections::HashMap;
use std::time::Duration;

// Ports are the pluggable extension points: the store connection and the
// value serializer both live behind trait objects so backends can be swapped
// without touching the facade.

/// Port over the underlying key-value store connection.
///
/// One method per store primitive the facade needs; values cross this
/// boundary already encoded. Implementations must be safe for concurrent use,
/// the facade adds no locking of its own.
#[async_trait]
pub trait StoreClient: Send + Sync + 'static {
    // Key lifecycle
    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool>;
    /// Remaining lifetime, `None` when the key has no TTL or does not exist.
    async fn ttl(&self, key: &str) -> Result<Option<Duration>>;
    async fn exists(&self, key: &str) -> Result<bool>;
    /// Batched delete; returns how many of the keys existed.
    async fn delete(&self, keys: &[&str]) -> Result<u64>;

    // Scalar
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;
    async fn set(&self, key: &str, value: Bytes) -> Result<()>;
    /// Atomic add; a missing key starts from zero.
    async fn incr_by(&self, key: &str, delta: i64) -> Result<i64>;
    /// Atomic subtract of `delta` (the store's decrement-by primitive).
    async fn decr_by(&self, key: &str, delta: i64) -> Result<i64>;

    // Hash
    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<Bytes>>;
    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, Bytes>>;
    async fn hash_set(&self, key: &str, field: &str, value: Bytes) -> Result<()>;
    async fn hash_set_all(&self, key: &str, entries: HashMap<String, Bytes>) -> Result<()>;
    async fn hash_delete(&self, key: &str, fields: &[&str]) -> Result<u64>;
    async fn hash_exists(&self, key: &str, field: &str) -> Result<bool>;
    /// Atomic add on a numeric field; a missing field starts from zero.
    async fn hash_incr_by(&self, key: &str, field: &str, delta: f64) -> Result<f64>;

    // Set
    /// Returns how many values were newly added (duplicates collapse).
    async fn set_add(&self, key: &str, values: Vec<Bytes>) -> Result<u64>;
    async fn set_remove(&self, key: &str, values: Vec<Bytes>) -> Result<u64>;
    async fn set_members(&self, key: &str) -> Result<Vec<Bytes>>;
    async fn set_contains(&self, key: &str, value: Bytes) -> Result<bool>;
    async fn set_len(&self, key: &str) -> Result<u64>;

    // List
    /// Appends to the tail; returns the new list length.
    async fn list_push_right(&self, key: &str, values: Vec<Bytes>) -> Result<u64>;
    /// Inclusive range; negative indices count from the tail (-1 = last).
    async fn list_range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Bytes>>;
    async fn list_len(&self, key: &str) -> Result<u64>;
    async fn list_index(&self, key: &str, index: i64) -> Result<Option<Bytes>>;
    /// In-place overwrite; errors when the index is out of range.
    async fn list_set(&self, key: &str, index: i64, value: Bytes) -> Result<()>;
    /// Removes up to `count` occurrences of `value`. Positive count scans
    /// head-to-tail, negative tail-to-head, zero removes all.
    async fn list_remove(&self, key: &str, count: i64, value: Bytes) -> Result<u64>;
    async fn list_pop_right(&self, key: &str) -> Result<Option<Bytes>>;

    // Discovery & messaging
    /// Glob scan over the whole keyspace. Expensive on a large store.
    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>>;
    /// Fire-and-forget publish; returns the number of current subscribers.
    async fn publish(&self, channel: &str, message: Bytes) -> Result<u64>;
}

/// Port for value serialization. Dyn-safe over `serde_json::Value`; the
/// facade handles the typed half of the conversion.
pub trait ValueCodec: Send + Sync + 'static {
    fn encode(&self, value: &serde_json::Value) -> Result<Bytes>;
    fn decode(&self, raw: &[u8]) -> Result<serde_json::Value>;
}
