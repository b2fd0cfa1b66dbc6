use crate::bound::BoundList;
use crate::codec::{JsonCodec, decode_value, encode_value, encode_values};
use crate::ports::{StoreClient, ValueCodec};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// One uniform call surface over a key-value store, grouped by data shape:
/// scalar, hash, set, list, and channel publish.
///
/// Every operation is a single round trip (two for the write-then-expire
/// variants) against the injected [`StoreClient`]. Store failures never reach
/// the caller: each public method delegates to a fallible twin and collapses
/// its error into the documented neutral value (`false`, `None`) plus a log
/// record. A `false`/`None` therefore means "absent or store trouble"; the
/// log tells which. The only errors that do surface are precondition
/// violations on [`increment`](Self::increment) and
/// [`decrement`](Self::decrement), which are caller bugs and are rejected
/// before the store is touched.
///
/// The facade holds no state beyond the two `Arc`s; clones share them, and
/// concurrent use is safe whenever the client is.
#[derive(Clone)]
pub struct KeyValueFacade {
    client: Arc<dyn StoreClient>,
    codec: Arc<dyn ValueCodec>,
}

impl KeyValueFacade {
    pub fn new(client: Arc<dyn StoreClient>, codec: Arc<dyn ValueCodec>) -> Self {
        Self { client, codec }
    }

    /// Facade with the default JSON codec.
    pub fn with_json_codec(client: Arc<dyn StoreClient>) -> Self {
        Self::new(client, Arc::new(JsonCodec))
    }

    /// List operations pre-bound to one key.
    pub fn bound_list(&self, key: impl Into<String>) -> BoundList {
        BoundList::new(self.client.clone(), self.codec.clone(), key.into())
    }

    // === Key lifecycle ===

    /// Sets the key's TTL. `seconds <= 0` is a successful no-op, not an
    /// immediate expiry.
    pub async fn expire(&self, key: &str, seconds: i64) -> bool {
        if seconds <= 0 {
            return true;
        }
        let result = self.client.expire(key, Duration::from_secs(seconds as u64)).await;
        collapse(result, "expire", key).is_some()
    }

    /// Remaining TTL in seconds; 0 means permanent (or absent).
    pub async fn get_expire(&self, key: &str) -> u64 {
        match self.client.ttl(key).await {
            Ok(Some(remaining)) => remaining.as_secs(),
            Ok(None) => 0,
            Err(err) => {
                warn!("get_expire failed for key '{}': {}", key, err);
                0
            }
        }
    }

    /// `false` is also the answer when the store is unreachable.
    pub async fn has_key(&self, key: &str) -> bool {
        collapse(self.client.exists(key).await, "has_key", key)
            .unwrap_or(false)
    }

    /// Deletes one or many keys in a single batched call. An empty slice is a
    /// successful no-op.
    pub async fn delete(&self, keys: &[&str]) -> bool {
        if keys.is_empty() {
            return true;
        }
        collapse(self.client.delete(keys).await, "delete", &keys.join(", ")).is_some()
    }

    // === Scalar ===

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if key.is_empty() {
            return None;
        }
        collapse(self.try_get(key).await, "get", key).flatten()
    }

    pub async fn set<T>(&self, key: &str, value: &T) -> bool
    where
        T: Serialize + ?Sized,
    {
        collapse(self.try_set(key, value).await, "set", key).is_some()
    }

    /// Write plus TTL. `seconds <= 0` means no expiration. The write and the
    /// expire are two sequential store calls, not one atomic unit.
    pub async fn set_with_ttl<T>(&self, key: &str, value: &T, seconds: i64) -> bool
    where
        T: Serialize + ?Sized,
    {
        let result = async {
            self.try_set(key, value).await?;
            self.apply_ttl(key, seconds).await
        }
        .await;
        collapse(result, "set_with_ttl", key).is_some()
    }

    /// Atomic increment. `delta` must be strictly positive; anything else is
    /// rejected before the store is touched. `Ok(None)` means the store call
    /// itself failed (logged).
    pub async fn increment(&self, key: &str, delta: i64) -> Result<Option<i64>> {
        if delta <= 0 {
            return Err(Error::InvalidDelta("increment delta must be greater than zero"));
        }
        Ok(collapse(self.client.incr_by(key, delta).await, "increment", key))
    }

    /// Atomic decrement via the store's decrement-by primitive. `delta` must
    /// be strictly negative and is passed through unchanged, not negated.
    pub async fn decrement(&self, key: &str, delta: i64) -> Result<Option<i64>> {
        if delta >= 0 {
            return Err(Error::InvalidDelta("decrement delta must be less than zero"));
        }
        Ok(collapse(self.client.decr_by(key, delta).await, "decrement", key))
    }

    // === Hash ===

    pub async fn hash_get<T: DeserializeOwned>(&self, key: &str, field: &str) -> Option<T> {
        collapse(self.try_hash_get(key, field).await, "hash_get", key).flatten()
    }

    pub async fn hash_get_all<T: DeserializeOwned>(&self, key: &str) -> Option<HashMap<String, T>> {
        collapse(self.try_hash_get_all(key).await, "hash_get_all", key)
    }

    pub async fn hash_set<T>(&self, key: &str, field: &str, value: &T) -> bool
    where
        T: Serialize + ?Sized,
    {
        collapse(self.try_hash_set(key, field, value).await, "hash_set", key).is_some()
    }

    /// Single-field write plus TTL. The TTL lands on the whole hash key and
    /// replaces any TTL it already had; that is the store's native overwrite
    /// semantics.
    pub async fn hash_set_with_ttl<T>(&self, key: &str, field: &str, value: &T, seconds: i64) -> bool
    where
        T: Serialize + ?Sized,
    {
        let result = async {
            self.try_hash_set(key, field, value).await?;
            self.apply_ttl(key, seconds).await
        }
        .await;
        collapse(result, "hash_set_with_ttl", key).is_some()
    }

    pub async fn hash_set_all<T: Serialize>(&self, key: &str, entries: &HashMap<String, T>) -> bool {
        collapse(self.try_hash_set_all(key, entries).await, "hash_set_all", key).is_some()
    }

    pub async fn hash_set_all_with_ttl<T: Serialize>(
        &self,
        key: &str,
        entries: &HashMap<String, T>,
        seconds: i64,
    ) -> bool {
        let result = async {
            self.try_hash_set_all(key, entries).await?;
            self.apply_ttl(key, seconds).await
        }
        .await;
        collapse(result, "hash_set_all_with_ttl", key).is_some()
    }

    pub async fn hash_delete(&self, key: &str, fields: &[&str]) -> bool {
        collapse(self.client.hash_delete(key, fields).await, "hash_delete", key).is_some()
    }

    pub async fn hash_has_field(&self, key: &str, field: &str) -> bool {
        collapse(self.client.hash_exists(key, field).await, "hash_has_field", key)
            .unwrap_or(false)
    }

    /// Increments a numeric hash field, creating it at zero when missing.
    /// Returns the new value.
    pub async fn hash_increment(&self, key: &str, field: &str, delta: f64) -> Option<f64> {
        collapse(self.client.hash_incr_by(key, field, delta).await, "hash_increment", key)
    }

    /// Same store primitive as [`hash_increment`](Self::hash_increment); the
    /// caller supplies the signed delta they intend, nothing is negated here.
    pub async fn hash_decrement(&self, key: &str, field: &str, delta: f64) -> Option<f64> {
        collapse(self.client.hash_incr_by(key, field, delta).await, "hash_decrement", key)
    }

    // === Set ===

    pub async fn set_members<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        collapse(self.try_set_members(key).await, "set_members", key)
    }

    pub async fn set_contains<T>(&self, key: &str, value: &T) -> bool
    where
        T: Serialize + ?Sized,
    {
        collapse(self.try_set_contains(key, value).await, "set_contains", key)
            .unwrap_or(false)
    }

    pub async fn set_size(&self, key: &str) -> Option<u64> {
        collapse(self.client.set_len(key).await, "set_size", key)
    }

    /// Returns how many values were actually added; the store collapses
    /// duplicates.
    pub async fn set_add<T: Serialize>(&self, key: &str, values: &[T]) -> Option<u64> {
        collapse(self.try_set_add(key, values).await, "set_add", key)
    }

    pub async fn set_add_with_ttl<T: Serialize>(
        &self,
        key: &str,
        values: &[T],
        seconds: i64,
    ) -> Option<u64> {
        let result = async {
            let added = self.try_set_add(key, values).await?;
            self.apply_ttl(key, seconds).await?;
            Ok(added)
        }
        .await;
        collapse(result, "set_add_with_ttl", key)
    }

    /// Returns how many values were removed.
    pub async fn set_remove<T: Serialize>(&self, key: &str, values: &[T]) -> Option<u64> {
        let result = async {
            let encoded = encode_values(self.codec.as_ref(), values)?;
            self.client.set_remove(key, encoded).await
        }
        .await;
        collapse(result, "set_remove", key)
    }

    // === List ===

    /// Inclusive range; `0, -1` is the whole list (-1 = last element).
    pub async fn list_range<T: DeserializeOwned>(
        &self,
        key: &str,
        start: i64,
        end: i64,
    ) -> Option<Vec<T>> {
        collapse(self.try_list_range(key, start, end).await, "list_range", key)
    }

    pub async fn list_size(&self, key: &str) -> Option<u64> {
        collapse(self.client.list_len(key).await, "list_size", key)
    }

    /// Negative indices count from the tail.
    pub async fn list_index<T: DeserializeOwned>(&self, key: &str, index: i64) -> Option<T> {
        collapse(self.try_list_index(key, index).await, "list_index", key).flatten()
    }

    pub async fn list_push_right<T>(&self, key: &str, value: &T) -> bool
    where
        T: Serialize + ?Sized,
    {
        let result = async {
            let encoded = encode_value(self.codec.as_ref(), value)?;
            self.client.list_push_right(key, vec![encoded]).await?;
            Ok(())
        }
        .await;
        collapse(result, "list_push_right", key).is_some()
    }

    pub async fn list_push_right_with_ttl<T>(&self, key: &str, value: &T, seconds: i64) -> bool
    where
        T: Serialize + ?Sized,
    {
        let result = async {
            let encoded = encode_value(self.codec.as_ref(), value)?;
            self.client.list_push_right(key, vec![encoded]).await?;
            self.apply_ttl(key, seconds).await
        }
        .await;
        collapse(result, "list_push_right_with_ttl", key).is_some()
    }

    /// Appends a whole ordered sequence to the tail.
    pub async fn list_push_right_all<T: Serialize>(&self, key: &str, values: &[T]) -> bool {
        collapse(self.try_list_push_all(key, values).await, "list_push_right_all", key).is_some()
    }

    pub async fn list_push_right_all_with_ttl<T: Serialize>(
        &self,
        key: &str,
        values: &[T],
        seconds: i64,
    ) -> bool {
        let result = async {
            self.try_list_push_all(key, values).await?;
            self.apply_ttl(key, seconds).await
        }
        .await;
        collapse(result, "list_push_right_all_with_ttl", key).is_some()
    }

    /// In-place overwrite at `index`; an out-of-range index is a store error
    /// and collapses to `false`.
    pub async fn list_set_at<T>(&self, key: &str, index: i64, value: &T) -> bool
    where
        T: Serialize + ?Sized,
    {
        let result = async {
            let encoded = encode_value(self.codec.as_ref(), value)?;
            self.client.list_set(key, index, encoded).await
        }
        .await;
        collapse(result, "list_set_at", key).is_some()
    }

    /// Removes up to `count` occurrences of `value`. The sign of `count` is
    /// passed straight to the store: positive scans head-to-tail, negative
    /// tail-to-head, zero removes all.
    pub async fn list_remove<T>(&self, key: &str, count: i64, value: &T) -> Option<u64>
    where
        T: Serialize + ?Sized,
    {
        let result = async {
            let encoded = encode_value(self.codec.as_ref(), value)?;
            self.client.list_remove(key, count, encoded).await
        }
        .await;
        collapse(result, "list_remove", key)
    }

    // === Discovery & messaging ===

    /// Glob-style scan over the whole keyspace, unpaginated. Expensive on a
    /// large store; intended for tooling, not hot paths.
    pub async fn keys_matching(&self, pattern: &str) -> Option<Vec<String>> {
        collapse(self.client.scan_keys(pattern).await, "keys_matching", pattern)
    }

    /// Fire-and-forget publish to the channel's current subscribers. Nothing
    /// is persisted and no acknowledgment is collected.
    pub async fn publish<T>(&self, channel: &str, message: &T) -> bool
    where
        T: Serialize + ?Sized,
    {
        let result = async {
            let encoded = encode_value(self.codec.as_ref(), message)?;
            self.client.publish(channel, encoded).await
        }
        .await;
        collapse(result, "publish", channel).is_some()
    }

    // === Fallible twins ===

    async fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.client.get(key).await? {
            Some(raw) => Ok(Some(decode_value(self.codec.as_ref(), &raw)?)),
            None => Ok(None),
        }
    }

    async fn try_set<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let encoded = encode_value(self.codec.as_ref(), value)?;
        self.client.set(key, encoded).await
    }

    async fn try_hash_get<T: DeserializeOwned>(&self, key: &str, field: &str) -> Result<Option<T>> {
        match self.client.hash_get(key, field).await? {
            Some(raw) => Ok(Some(decode_value(self.codec.as_ref(), &raw)?)),
            None => Ok(None),
        }
    }

    async fn try_hash_get_all<T: DeserializeOwned>(&self, key: &str) -> Result<HashMap<String, T>> {
        let raw = self.client.hash_get_all(key).await?;
        let mut entries = HashMap::with_capacity(raw.len());
        for (field, bytes) in raw {
            entries.insert(field, decode_value(self.codec.as_ref(), &bytes)?);
        }
        Ok(entries)
    }

    async fn try_hash_set<T>(&self, key: &str, field: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let encoded = encode_value(self.codec.as_ref(), value)?;
        self.client.hash_set(key, field, encoded).await
    }

    async fn try_hash_set_all<T: Serialize>(
        &self,
        key: &str,
        entries: &HashMap<String, T>,
    ) -> Result<()> {
        let mut encoded = HashMap::with_capacity(entries.len());
        for (field, value) in entries {
            encoded.insert(field.clone(), encode_value(self.codec.as_ref(), value)?);
        }
        self.client.hash_set_all(key, encoded).await
    }

    async fn try_set_members<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let raw = self.client.set_members(key).await?;
        raw.iter()
            .map(|bytes| decode_value(self.codec.as_ref(), bytes))
            .collect()
    }

    async fn try_set_contains<T>(&self, key: &str, value: &T) -> Result<bool>
    where
        T: Serialize + ?Sized,
    {
        let encoded = encode_value(self.codec.as_ref(), value)?;
        self.client.set_contains(key, encoded).await
    }

    async fn try_set_add<T: Serialize>(&self, key: &str, values: &[T]) -> Result<u64> {
        let encoded = encode_values(self.codec.as_ref(), values)?;
        self.client.set_add(key, encoded).await
    }

    async fn try_list_range<T: DeserializeOwned>(
        &self,
        key: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<T>> {
        let raw = self.client.list_range(key, start, end).await?;
        raw.iter()
            .map(|bytes| decode_value(self.codec.as_ref(), bytes))
            .collect()
    }

    async fn try_list_index<T: DeserializeOwned>(&self, key: &str, index: i64) -> Result<Option<T>> {
        match self.client.list_index(key, index).await? {
            Some(raw) => Ok(Some(decode_value(self.codec.as_ref(), &raw)?)),
            None => Ok(None),
        }
    }

    async fn try_list_push_all<T: Serialize>(&self, key: &str, values: &[T]) -> Result<()> {
        let encoded = encode_values(self.codec.as_ref(), values)?;
        self.client.list_push_right(key, encoded).await?;
        Ok(())
    }

    async fn apply_ttl(&self, key: &str, seconds: i64) -> Result<()> {
        if seconds > 0 {
            self.client.expire(key, Duration::from_secs(seconds as u64)).await?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for KeyValueFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyValueFacade").finish_non_exhaustive()
    }
}

/// The single point where the swallow-and-log policy is applied: an `Err`
/// becomes `None` plus a warning naming the operation and key.
pub(crate) fn collapse<T>(result: Result<T>, op: &'static str, key: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("{} failed for key '{}': {}", op, key, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Client whose every call fails after bumping a call counter, so tests
    /// can assert both the neutral return and whether the store was touched.
    #[derive(Default)]
    struct FailingClient {
        calls: AtomicUsize,
    }

    impl FailingClient {
        fn fail<T>(&self) -> Result<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::Store("connection refused".into()))
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StoreClient for FailingClient {
        async fn expire(&self, _: &str, _: Duration) -> Result<bool> {
            self.fail()
        }
        async fn ttl(&self, _: &str) -> Result<Option<Duration>> {
            self.fail()
        }
        async fn exists(&self, _: &str) -> Result<bool> {
            self.fail()
        }
        async fn delete(&self, _: &[&str]) -> Result<u64> {
            self.fail()
        }
        async fn get(&self, _: &str) -> Result<Option<Bytes>> {
            self.fail()
        }
        async fn set(&self, _: &str, _: Bytes) -> Result<()> {
            self.fail()
        }
        async fn incr_by(&self, _: &str, _: i64) -> Result<i64> {
            self.fail()
        }
        async fn decr_by(&self, _: &str, _: i64) -> Result<i64> {
            self.fail()
        }
        async fn hash_get(&self, _: &str, _: &str) -> Result<Option<Bytes>> {
            self.fail()
        }
        async fn hash_get_all(&self, _: &str) -> Result<HashMap<String, Bytes>> {
            self.fail()
        }
        async fn hash_set(&self, _: &str, _: &str, _: Bytes) -> Result<()> {
            self.fail()
        }
        async fn hash_set_all(&self, _: &str, _: HashMap<String, Bytes>) -> Result<()> {
            self.fail()
        }
        async fn hash_delete(&self, _: &str, _: &[&str]) -> Result<u64> {
            self.fail()
        }
        async fn hash_exists(&self, _: &str, _: &str) -> Result<bool> {
            self.fail()
        }
        async fn hash_incr_by(&self, _: &str, _: &str, _: f64) -> Result<f64> {
            self.fail()
        }
        async fn set_add(&self, _: &str, _: Vec<Bytes>) -> Result<u64> {
            self.fail()
        }
        async fn set_remove(&self, _: &str, _: Vec<Bytes>) -> Result<u64> {
            self.fail()
        }
        async fn set_members(&self, _: &str) -> Result<Vec<Bytes>> {
            self.fail()
        }
        async fn set_contains(&self, _: &str, _: Bytes) -> Result<bool> {
            self.fail()
        }
        async fn set_len(&self, _: &str) -> Result<u64> {
            self.fail()
        }
        async fn list_push_right(&self, _: &str, _: Vec<Bytes>) -> Result<u64> {
            self.fail()
        }
        async fn list_range(&self, _: &str, _: i64, _: i64) -> Result<Vec<Bytes>> {
            self.fail()
        }
        async fn list_len(&self, _: &str) -> Result<u64> {
            self.fail()
        }
        async fn list_index(&self, _: &str, _: i64) -> Result<Option<Bytes>> {
            self.fail()
        }
        async fn list_set(&self, _: &str, _: i64, _: Bytes) -> Result<()> {
            self.fail()
        }
        async fn list_remove(&self, _: &str, _: i64, _: Bytes) -> Result<u64> {
            self.fail()
        }
        async fn list_pop_right(&self, _: &str) -> Result<Option<Bytes>> {
            self.fail()
        }
        async fn scan_keys(&self, _: &str) -> Result<Vec<String>> {
            self.fail()
        }
        async fn publish(&self, _: &str, _: Bytes) -> Result<u64> {
            self.fail()
        }
    }

    fn failing_facade() -> (Arc<FailingClient>, KeyValueFacade) {
        let client = Arc::new(FailingClient::default());
        let facade = KeyValueFacade::with_json_codec(client.clone());
        (client, facade)
    }

    #[tokio::test]
    async fn store_failures_collapse_to_neutral_values() {
        let (_, facade) = failing_facade();

        assert!(!facade.set("k", "v").await);
        assert!(!facade.set_with_ttl("k", "v", 60).await);
        assert_eq!(facade.get::<String>("k").await, None);
        assert!(!facade.has_key("k").await);
        assert!(!facade.expire("k", 60).await);
        assert_eq!(facade.get_expire("k").await, 0);
        assert!(!facade.delete(&["k"]).await);

        assert_eq!(facade.hash_get::<String>("h", "f").await, None);
        assert_eq!(facade.hash_get_all::<String>("h").await, None);
        assert!(!facade.hash_set("h", "f", "v").await);
        assert!(!facade.hash_delete("h", &["f"]).await);
        assert!(!facade.hash_has_field("h", "f").await);
        assert_eq!(facade.hash_increment("h", "f", 1.0).await, None);

        assert_eq!(facade.set_members::<String>("s").await, None);
        assert!(!facade.set_contains("s", "v").await);
        assert_eq!(facade.set_size("s").await, None);
        assert_eq!(facade.set_add("s", &["v"]).await, None);
        assert_eq!(facade.set_remove("s", &["v"]).await, None);

        assert_eq!(facade.list_range::<String>("l", 0, -1).await, None);
        assert_eq!(facade.list_size("l").await, None);
        assert_eq!(facade.list_index::<String>("l", -1).await, None);
        assert!(!facade.list_push_right("l", "v").await);
        assert!(!facade.list_set_at("l", 0, "v").await);
        assert_eq!(facade.list_remove("l", 1, "v").await, None);

        assert_eq!(facade.keys_matching("*").await, None);
        assert!(!facade.publish("events", "hello").await);
    }

    #[tokio::test]
    async fn increment_rejects_non_positive_delta_before_the_store() {
        let (client, facade) = failing_facade();

        assert!(matches!(facade.increment("counter", 0).await, Err(Error::InvalidDelta(_))));
        assert!(matches!(facade.increment("counter", -3).await, Err(Error::InvalidDelta(_))));
        assert_eq!(client.call_count(), 0);

        // A valid delta reaches the store; its failure is then swallowed.
        assert_eq!(facade.increment("counter", 2).await.unwrap(), None);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn decrement_rejects_non_negative_delta_before_the_store() {
        let (client, facade) = failing_facade();

        assert!(matches!(facade.decrement("counter", 0).await, Err(Error::InvalidDelta(_))));
        assert!(matches!(facade.decrement("counter", 5).await, Err(Error::InvalidDelta(_))));
        assert_eq!(client.call_count(), 0);

        assert_eq!(facade.decrement("counter", -2).await.unwrap(), None);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn non_positive_ttl_is_a_successful_noop() {
        let (client, facade) = failing_facade();

        assert!(facade.expire("k", 0).await);
        assert!(facade.expire("k", -30).await);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn deleting_nothing_is_a_successful_noop() {
        let (client, facade) = failing_facade();

        assert!(facade.delete(&[]).await);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_key_reads_as_absent_without_a_store_call() {
        let (client, facade) = failing_facade();

        assert_eq!(facade.get::<String>("").await, None);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn policy_push_swallows_store_failures_like_its_siblings() {
        let (_, facade) = failing_facade();
        let feed = facade.bound_list("feed:42");

        assert!(!feed.push_right_with_policy(&policy::UNREAD_MESSAGES, &["msg"]).await);
        assert_eq!(feed.range::<String>(0, -1).await, None);
        assert_eq!(feed.pop_right::<String>().await, None);
    }
}
