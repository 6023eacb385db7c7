//! Memoization of pipeline stages keyed by request fingerprint
//!
//! Each [`Memo`] is created with a [`CachePolicy`] that fixes its lifetime
//! rules for as long as the process runs: at most `max_entries` values are
//! kept (oldest insertion evicted first) and, when `ttl_secs` is set, a value
//! older than the TTL is treated as missing and recomputed.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
  #[serde(default = "default_max_entries")]
  pub max_entries: usize,
  #[serde(default)]
  pub ttl_secs: Option<u64>,
}

fn default_max_entries() -> usize {
  64
}

impl Default for CachePolicy {
  fn default() -> Self {
    Self { max_entries: default_max_entries(), ttl_secs: None }
  }
}

impl CachePolicy {
  fn ttl(&self) -> Option<Duration> {
    self.ttl_secs.map(Duration::from_secs)
  }
}

struct Entry<V> {
  value: V,
  inserted: Instant,
}

struct Inner<V> {
  entries: HashMap<String, Entry<V>>,
  order: VecDeque<String>,
}

pub struct Memo<V> {
  name: &'static str,
  policy: CachePolicy,
  inner: Mutex<Inner<V>>,
}

impl<V: Clone> Memo<V> {
  pub fn new(name: &'static str, policy: CachePolicy) -> Self {
    tracing::debug!(cache = name, max_entries = policy.max_entries, ttl_secs = ?policy.ttl_secs, "cache policy");
    Self { name, policy, inner: Mutex::new(Inner { entries: HashMap::new(), order: VecDeque::new() }) }
  }

  pub fn get(&self, key: &str) -> Option<V> {
    let mut inner = self.lock();
    let expired = match inner.entries.get(key) {
      Some(entry) => self.is_expired(entry),
      None => return None,
    };

    if expired {
      inner.entries.remove(key);
      inner.order.retain(|k| k != key);
      tracing::debug!(cache = self.name, key, "expired");
      return None;
    }

    tracing::debug!(cache = self.name, key, "hit");
    inner.entries.get(key).map(|entry| entry.value.clone())
  }

  pub fn insert(&self, key: impl Into<String>, value: V) {
    let key = key.into();
    let mut inner = self.lock();

    if inner.entries.contains_key(&key) {
      inner.order.retain(|k| k != &key);
    }

    while inner.entries.len() >= self.policy.max_entries.max(1) && !inner.entries.contains_key(&key) {
      let Some(oldest) = inner.order.pop_front() else { break };
      inner.entries.remove(&oldest);
      tracing::debug!(cache = self.name, key = %oldest, "evicted");
    }

    inner.order.push_back(key.clone());
    inner.entries.insert(key, Entry { value, inserted: Instant::now() });
  }

  pub fn len(&self) -> usize {
    self.lock().entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn is_expired(&self, entry: &Entry<V>) -> bool {
    self.policy.ttl().map(|ttl| entry.inserted.elapsed() >= ttl).unwrap_or(false)
  }

  fn lock(&self) -> MutexGuard<'_, Inner<V>> {
    self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

/// Canonical SHA-256 fingerprint of an ordered list of inputs
pub fn fingerprint<S: AsRef<str>>(parts: &[S]) -> String {
  let mut hasher = Sha256::new();
  for part in parts {
    hasher.update(part.as_ref().as_bytes());
    hasher.update([0x1f]);
  }
  hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn policy(max_entries: usize, ttl_secs: Option<u64>) -> CachePolicy {
    CachePolicy { max_entries, ttl_secs }
  }

  #[test]
  fn test_get_returns_inserted_value() {
    let memo = Memo::new("test", CachePolicy::default());
    memo.insert("pancakes", 3);
    assert_eq!(memo.get("pancakes"), Some(3));
    assert_eq!(memo.get("waffles"), None);
  }

  #[test]
  fn test_oldest_entry_is_evicted_at_capacity() {
    let memo = Memo::new("test", policy(2, None));
    memo.insert("a", 1);
    memo.insert("b", 2);
    memo.insert("c", 3);

    assert_eq!(memo.len(), 2);
    assert_eq!(memo.get("a"), None);
    assert_eq!(memo.get("b"), Some(2));
    assert_eq!(memo.get("c"), Some(3));
  }

  #[test]
  fn test_reinsert_replaces_without_eviction() {
    let memo = Memo::new("test", policy(2, None));
    memo.insert("a", 1);
    memo.insert("b", 2);
    memo.insert("a", 10);

    assert_eq!(memo.len(), 2);
    assert_eq!(memo.get("a"), Some(10));
    assert_eq!(memo.get("b"), Some(2));
  }

  #[test]
  fn test_zero_ttl_expires_immediately() {
    let memo = Memo::new("test", policy(4, Some(0)));
    memo.insert("a", 1);
    assert_eq!(memo.get("a"), None);
    assert!(memo.is_empty());
  }

  #[test]
  fn test_fingerprint_is_order_sensitive_and_unambiguous() {
    let ab = fingerprint(&["a", "b"]);
    assert_eq!(ab, fingerprint(&["a", "b"]));
    assert_ne!(ab, fingerprint(&["b", "a"]));
    assert_ne!(fingerprint(&["ab"]), fingerprint(&["a", "b"]));
    assert_eq!(ab.len(), 64);
    assert!(ab.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
  }

  #[test]
  fn test_fingerprint_of_nothing_is_sha256_of_empty() {
    let empty: [&str; 0] = [];
    assert_eq!(fingerprint(&empty), "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
  }
}
