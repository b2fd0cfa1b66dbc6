use crate::codec::{decode_value, encode_values};
use crate::facade::collapse;
use crate::policy::ExpirationPolicy;
use crate::ports::{StoreClient, ValueCodec};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// List operations pre-bound to one key, for call sites that work a single
/// queue repeatedly (unread-message feeds and the like). Functionally the
/// same as the per-call list operations on the facade, and under the same
/// swallow-and-log policy.
#[derive(Clone)]
pub struct BoundList {
    client: Arc<dyn StoreClient>,
    codec: Arc<dyn ValueCodec>,
    key: String,
}

impl BoundList {
    pub(crate) fn new(client: Arc<dyn StoreClient>, codec: Arc<dyn ValueCodec>, key: String) -> Self {
        Self { client, codec, key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Appends `values` to the tail, then unconditionally applies the
    /// policy's lifetime to the key. Push and expire are two sequential
    /// store calls.
    pub async fn push_right_with_policy<T: Serialize>(
        &self,
        policy: &ExpirationPolicy,
        values: &[T],
    ) -> bool {
        let result = async {
            let encoded = encode_values(self.codec.as_ref(), values)?;
            self.client.list_push_right(&self.key, encoded).await?;
            self.client.expire(&self.key, policy.ttl()).await?;
            Ok(())
        }
        .await;
        collapse(result, "push_right_with_policy", &self.key).is_some()
    }

    /// Inclusive range; `0, -1` is the whole list.
    pub async fn range<T: DeserializeOwned>(&self, start: i64, end: i64) -> Option<Vec<T>> {
        let result = async {
            let raw = self.client.list_range(&self.key, start, end).await?;
            raw.iter()
                .map(|bytes| decode_value(self.codec.as_ref(), bytes))
                .collect()
        }
        .await;
        collapse(result, "range", &self.key)
    }

    /// Pops and returns the tail element, or `None` when the list is empty
    /// (or the store failed; the log tells which).
    pub async fn pop_right<T: DeserializeOwned>(&self) -> Option<T> {
        let result = async {
            match self.client.list_pop_right(&self.key).await? {
                Some(raw) => Ok(Some(decode_value(self.codec.as_ref(), &raw)?)),
                None => Ok(None),
            }
        }
        .await;
        collapse(result, "pop_right", &self.key).flatten()
    }
}

impl std::fmt::Debug for BoundList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundList").field("key", &self.key).finish_non_exhaustive()
    }
}
