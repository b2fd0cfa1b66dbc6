//! In-process [`StoreClient`] adapter.
//!
//! Backs the dev server and the behavioral test suite with the same
//! semantics the facade expects from the real store: per-key kinds, lazy TTL
//! expiry, tail indexing, and fire-and-forget channel publish. A remote-store
//! adapter plugs in behind the same trait.

pub mod glob;

use async_trait::async_trait;
use bytes::Bytes;
use cinder::StoreClient;
use crate::glob::glob_match;
use dashmap::DashMap;
use shared::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::Instant;

const CHANNEL_CAPACITY: usize = 64;

/// Shared in-memory key-value store. Cloneable handles are not needed; wrap
/// it in an `Arc` and hand it to the facade.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, StoredEntry>,
    channels: DashMap<String, broadcast::Sender<Bytes>>,
}

struct StoredEntry {
    kind: Kind,
    expires_at: Option<Instant>,
}

enum Kind {
    Scalar(Bytes),
    Hash(HashMap<String, Bytes>),
    Set(HashSet<Bytes>),
    List(Vec<Bytes>),
}

impl StoredEntry {
    fn new(kind: Kind) -> Self {
        Self { kind, expires_at: None }
    }

    fn expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

impl Kind {
    fn name(&self) -> &'static str {
        match self {
            Kind::Scalar(_) => "string",
            Kind::Hash(_) => "hash",
            Kind::Set(_) => "set",
            Kind::List(_) => "list",
        }
    }

    // Collections vanish with their last member, as the store does natively.
    fn is_drained(&self) -> bool {
        match self {
            Kind::Scalar(_) => false,
            Kind::Hash(map) => map.is_empty(),
            Kind::Set(set) => set.is_empty(),
            Kind::List(items) => items.is_empty(),
        }
    }
}

fn wrong_kind(key: &str, kind: &Kind) -> Error {
    Error::WrongKind { key: key.to_string(), kind: kind.name() }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to a channel; messages published while the receiver is
    /// live are delivered in order. Ephemeral only, nothing is replayed.
    pub fn subscribe(&self, channel: &str) -> broadcast::Receiver<Bytes> {
        self.channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Drops the key if its deadline has passed. Called before every access;
    /// the guard is released before removal to keep the shard lock sane.
    fn purge(&self, key: &str) {
        let expired = self.entries.get(key).is_some_and(|e| e.expired());
        if expired {
            self.entries.remove_if(key, |_, e| e.expired());
        }
    }

    fn drop_if_drained(&self, key: &str) {
        self.entries.remove_if(key, |_, e| e.kind.is_drained());
    }

    fn adjust_scalar(&self, key: &str, apply: impl FnOnce(i64) -> Option<i64>) -> Result<i64> {
        self.purge(key);
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| StoredEntry::new(Kind::Scalar(Bytes::from_static(b"0"))));
        match &mut entry.kind {
            Kind::Scalar(raw) => {
                let current: i64 = std::str::from_utf8(raw)
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| Error::NotNumeric { key: key.to_string() })?;
                let next = apply(current)
                    .ok_or_else(|| Error::Store(format!("counter overflow at '{key}'")))?;
                *raw = Bytes::from(next.to_string());
                Ok(next)
            }
            other => Err(wrong_kind(key, other)),
        }
    }
}

#[async_trait]
impl StoreClient for MemoryStore {
    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        self.purge(key);
        match self.entries.get_mut(key) {
            Some(mut entry) => {
                entry.expires_at = Some(Instant::now() + ttl);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>> {
        self.purge(key);
        Ok(self
            .entries
            .get(key)
            .and_then(|e| e.expires_at)
            .map(|at| at.duration_since(Instant::now())))
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        self.purge(key);
        Ok(self.entries.contains_key(key))
    }

    async fn delete(&self, keys: &[&str]) -> Result<u64> {
        let mut removed = 0;
        for key in keys {
            if self.entries.remove(*key).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        self.purge(key);
        match self.entries.get(key) {
            None => Ok(None),
            Some(entry) => match &entry.kind {
                Kind::Scalar(raw) => Ok(Some(raw.clone())),
                other => Err(wrong_kind(key, other)),
            },
        }
    }

    async fn set(&self, key: &str, value: Bytes) -> Result<()> {
        // A plain write replaces the entry wholesale, TTL included.
        self.entries.insert(key.to_string(), StoredEntry::new(Kind::Scalar(value)));
        Ok(())
    }

    async fn incr_by(&self, key: &str, delta: i64) -> Result<i64> {
        self.adjust_scalar(key, |current| current.checked_add(delta))
    }

    async fn decr_by(&self, key: &str, delta: i64) -> Result<i64> {
        self.adjust_scalar(key, |current| current.checked_sub(delta))
    }

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<Bytes>> {
        self.purge(key);
        match self.entries.get(key) {
            None => Ok(None),
            Some(entry) => match &entry.kind {
                Kind::Hash(map) => Ok(map.get(field).cloned()),
                other => Err(wrong_kind(key, other)),
            },
        }
    }

    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, Bytes>> {
        self.purge(key);
        match self.entries.get(key) {
            None => Ok(HashMap::new()),
            Some(entry) => match &entry.kind {
                Kind::Hash(map) => Ok(map.clone()),
                other => Err(wrong_kind(key, other)),
            },
        }
    }

    async fn hash_set(&self, key: &str, field: &str, value: Bytes) -> Result<()> {
        self.purge(key);
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| StoredEntry::new(Kind::Hash(HashMap::new())));
        match &mut entry.kind {
            Kind::Hash(map) => {
                map.insert(field.to_string(), value);
                Ok(())
            }
            other => Err(wrong_kind(key, other)),
        }
    }

    async fn hash_set_all(&self, key: &str, entries: HashMap<String, Bytes>) -> Result<()> {
        self.purge(key);
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| StoredEntry::new(Kind::Hash(HashMap::new())));
        match &mut entry.kind {
            Kind::Hash(map) => {
                map.extend(entries);
                Ok(())
            }
            other => Err(wrong_kind(key, other)),
        }
    }

    async fn hash_delete(&self, key: &str, fields: &[&str]) -> Result<u64> {
        self.purge(key);
        let removed = match self.entries.get_mut(key) {
            None => return Ok(0),
            Some(mut entry) => match &mut entry.kind {
                Kind::Hash(map) => {
                    fields.iter().filter(|f| map.remove(**f).is_some()).count() as u64
                }
                other => return Err(wrong_kind(key, other)),
            },
        };
        self.drop_if_drained(key);
        Ok(removed)
    }

    async fn hash_exists(&self, key: &str, field: &str) -> Result<bool> {
        self.purge(key);
        match self.entries.get(key) {
            None => Ok(false),
            Some(entry) => match &entry.kind {
                Kind::Hash(map) => Ok(map.contains_key(field)),
                other => Err(wrong_kind(key, other)),
            },
        }
    }

    async fn hash_incr_by(&self, key: &str, field: &str, delta: f64) -> Result<f64> {
        self.purge(key);
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| StoredEntry::new(Kind::Hash(HashMap::new())));
        match &mut entry.kind {
            Kind::Hash(map) => {
                let current = match map.get(field) {
                    None => 0.0,
                    Some(raw) => std::str::from_utf8(raw)
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .ok_or_else(|| Error::NotNumeric { key: key.to_string() })?,
                };
                let next = current + delta;
                map.insert(field.to_string(), Bytes::from(next.to_string()));
                Ok(next)
            }
            other => Err(wrong_kind(key, other)),
        }
    }

    async fn set_add(&self, key: &str, values: Vec<Bytes>) -> Result<u64> {
        self.purge(key);
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| StoredEntry::new(Kind::Set(HashSet::new())));
        match &mut entry.kind {
            Kind::Set(set) => Ok(values.into_iter().filter(|v| set.insert(v.clone())).count() as u64),
            other => Err(wrong_kind(key, other)),
        }
    }

    async fn set_remove(&self, key: &str, values: Vec<Bytes>) -> Result<u64> {
        self.purge(key);
        let removed = match self.entries.get_mut(key) {
            None => return Ok(0),
            Some(mut entry) => match &mut entry.kind {
                Kind::Set(set) => values.iter().filter(|v| set.remove(*v)).count() as u64,
                other => return Err(wrong_kind(key, other)),
            },
        };
        self.drop_if_drained(key);
        Ok(removed)
    }

    async fn set_members(&self, key: &str) -> Result<Vec<Bytes>> {
        self.purge(key);
        match self.entries.get(key) {
            None => Ok(Vec::new()),
            Some(entry) => match &entry.kind {
                Kind::Set(set) => Ok(set.iter().cloned().collect()),
                other => Err(wrong_kind(key, other)),
            },
        }
    }

    async fn set_contains(&self, key: &str, value: Bytes) -> Result<bool> {
        self.purge(key);
        match self.entries.get(key) {
            None => Ok(false),
            Some(entry) => match &entry.kind {
                Kind::Set(set) => Ok(set.contains(&value)),
                other => Err(wrong_kind(key, other)),
            },
        }
    }

    async fn set_len(&self, key: &str) -> Result<u64> {
        self.purge(key);
        match self.entries.get(key) {
            None => Ok(0),
            Some(entry) => match &entry.kind {
                Kind::Set(set) => Ok(set.len() as u64),
                other => Err(wrong_kind(key, other)),
            },
        }
    }

    async fn list_push_right(&self, key: &str, values: Vec<Bytes>) -> Result<u64> {
        self.purge(key);
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| StoredEntry::new(Kind::List(Vec::new())));
        match &mut entry.kind {
            Kind::List(items) => {
                items.extend(values);
                Ok(items.len() as u64)
            }
            other => Err(wrong_kind(key, other)),
        }
    }

    async fn list_range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Bytes>> {
        self.purge(key);
        match self.entries.get(key) {
            None => Ok(Vec::new()),
            Some(entry) => match &entry.kind {
                Kind::List(items) => Ok(match clamp_range(items.len(), start, stop) {
                    Some((from, to)) => items[from..=to].to_vec(),
                    None => Vec::new(),
                }),
                other => Err(wrong_kind(key, other)),
            },
        }
    }

    async fn list_len(&self, key: &str) -> Result<u64> {
        self.purge(key);
        match self.entries.get(key) {
            None => Ok(0),
            Some(entry) => match &entry.kind {
                Kind::List(items) => Ok(items.len() as u64),
                other => Err(wrong_kind(key, other)),
            },
        }
    }

    async fn list_index(&self, key: &str, index: i64) -> Result<Option<Bytes>> {
        self.purge(key);
        match self.entries.get(key) {
            None => Ok(None),
            Some(entry) => match &entry.kind {
                Kind::List(items) => {
                    Ok(resolve_index(items.len(), index).map(|i| items[i].clone()))
                }
                other => Err(wrong_kind(key, other)),
            },
        }
    }

    async fn list_set(&self, key: &str, index: i64, value: Bytes) -> Result<()> {
        self.purge(key);
        match self.entries.get_mut(key) {
            None => Err(Error::IndexOutOfRange { key: key.to_string(), index }),
            Some(mut entry) => match &mut entry.kind {
                Kind::List(items) => match resolve_index(items.len(), index) {
                    Some(i) => {
                        items[i] = value;
                        Ok(())
                    }
                    None => Err(Error::IndexOutOfRange { key: key.to_string(), index }),
                },
                other => Err(wrong_kind(key, other)),
            },
        }
    }

    async fn list_remove(&self, key: &str, count: i64, value: Bytes) -> Result<u64> {
        self.purge(key);
        let removed = match self.entries.get_mut(key) {
            None => return Ok(0),
            Some(mut entry) => match &mut entry.kind {
                Kind::List(items) => remove_occurrences(items, count, &value),
                other => return Err(wrong_kind(key, other)),
            },
        };
        self.drop_if_drained(key);
        Ok(removed)
    }

    async fn list_pop_right(&self, key: &str) -> Result<Option<Bytes>> {
        self.purge(key);
        let popped = match self.entries.get_mut(key) {
            None => return Ok(None),
            Some(mut entry) => match &mut entry.kind {
                Kind::List(items) => items.pop(),
                other => return Err(wrong_kind(key, other)),
            },
        };
        self.drop_if_drained(key);
        Ok(popped)
    }

    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>> {
        let mut matches = Vec::new();
        let mut stale = Vec::new();
        for entry in self.entries.iter() {
            if entry.expired() {
                stale.push(entry.key().clone());
            } else if glob_match(pattern, entry.key()) {
                matches.push(entry.key().clone());
            }
        }
        for key in stale {
            self.entries.remove_if(&key, |_, e| e.expired());
        }
        Ok(matches)
    }

    async fn publish(&self, channel: &str, message: Bytes) -> Result<u64> {
        match self.channels.get(channel) {
            // send only errors when nobody is listening
            Some(tx) => Ok(tx.send(message).map(|n| n as u64).unwrap_or(0)),
            None => Ok(0),
        }
    }
}

/// Inclusive list range with tail indexing, clamped to the list bounds.
/// `None` means the range selects nothing.
fn clamp_range(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let len = len as i64;
    let from = if start < 0 { (len + start).max(0) } else { start };
    let to = if stop < 0 { len + stop } else { stop.min(len - 1) };
    if from > to || from >= len || to < 0 {
        return None;
    }
    Some((from as usize, to as usize))
}

fn resolve_index(len: usize, index: i64) -> Option<usize> {
    let len = len as i64;
    let resolved = if index < 0 { len + index } else { index };
    (0..len).contains(&resolved).then_some(resolved as usize)
}

/// LREM-style removal: positive `count` scans head-to-tail removing up to
/// `count` occurrences, negative scans tail-to-head, zero removes all.
fn remove_occurrences(items: &mut Vec<Bytes>, count: i64, value: &Bytes) -> u64 {
    let limit = if count == 0 { usize::MAX } else { count.unsigned_abs() as usize };
    let mut removed = 0usize;
    if count >= 0 {
        items.retain(|item| {
            if removed < limit && item == value {
                removed += 1;
                false
            } else {
                true
            }
        });
    } else {
        let mut keep = vec![true; items.len()];
        for i in (0..items.len()).rev() {
            if removed < limit && items[i] == value {
                keep[i] = false;
                removed += 1;
            }
        }
        let mut flags = keep.into_iter();
        items.retain(|_| flags.next().unwrap());
    }
    removed as u64
}
