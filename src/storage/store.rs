//! KV Store Module
//!
//! Storage engine combining a HashMap of elements with a recency list, both
//! guarded by a single mutex.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tokio::time::Instant;
use tracing::error;

use crate::error::{KvError, Result};
use crate::storage::{Element, RecencyList, StorageStats};

// == KV Store ==
/// Thread-safe key-value storage with write-recency ordering.
///
/// Every public operation holds the lock for its whole duration, so a key is
/// in the map if and only if it has exactly one node in the recency list at
/// every point another caller can observe. A violation of that rule panics
/// while the lock is held; the lock is then poisoned and every later call
/// returns [`KvError::Internal`].
#[derive(Debug, Default)]
pub struct KvStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    elements: HashMap<String, Element>,
    order: RecencyList,
    stats: StorageStats,
}

impl KvStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Stores `value` under `key`.
    ///
    /// An existing key gets its value and timestamp refreshed and becomes the
    /// most recently written entry, which renews its lifetime.
    pub fn set(&self, key: &str, value: impl Into<String>) -> Result<()> {
        validate_key(key)?;
        let value = value.into();

        let mut inner = self.lock()?;
        inner.set(key, value, Instant::now());
        Ok(())
    }

    // == Get ==
    /// Returns the value stored under `key`. Does not touch the ordering.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;

        let mut inner = self.lock()?;
        let value = inner.elements.get(key).map(|element| element.value.clone());
        match value {
            Some(_) => inner.stats.record_hit(),
            None => inner.stats.record_miss(),
        }
        Ok(value)
    }

    // == Delete ==
    /// Removes `key` and returns whether it was present.
    pub fn delete(&self, key: &str) -> Result<bool> {
        validate_key(key)?;

        let mut inner = self.lock()?;
        let existed = inner.purge(key);
        if existed {
            inner.stats.record_delete();
        }
        Ok(existed)
    }

    // == Oldest Element Time ==
    /// Returns the write time of the least recently written entry.
    pub fn oldest_element_time(&self) -> Result<Option<Instant>> {
        let inner = self.lock()?;
        Ok(inner.front().map(|(_, element)| element.timestamp))
    }

    // == Delete Front If Older ==
    /// Removes the least recently written entry if it was written strictly
    /// before `cutoff`.
    ///
    /// Only the front entry is ever inspected.
    pub fn delete_front_if_older(&self, cutoff: Instant) -> Result<bool> {
        let mut inner = self.lock()?;

        let expired_key = match inner.front() {
            Some((key, element)) if element.timestamp < cutoff => key.to_owned(),
            _ => return Ok(false),
        };

        inner.purge(&expired_key);
        inner.stats.record_eviction();
        Ok(true)
    }

    // == Contains Key ==
    pub fn contains_key(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.lock()?.elements.contains_key(key))
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.elements.len())
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.elements.is_empty())
    }

    // == Stats ==
    /// Returns a snapshot of the operation counters.
    pub fn stats(&self) -> Result<StorageStats> {
        let inner = self.lock()?;
        let mut stats = inner.stats.clone();
        stats.total_entries = inner.elements.len();
        Ok(stats)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| {
            KvError::Internal(
                "storage is unusable after an earlier invariant violation".to_string(),
            )
        })
    }
}

impl Inner {
    fn set(&mut self, key: &str, value: String, now: Instant) {
        match self.elements.get_mut(key) {
            Some(element) => {
                if self.order.key(element.slot) != Some(key) {
                    invariant_violation(format!(
                        "key {key:?} points at a recency slot that holds {:?}",
                        self.order.key(element.slot)
                    ));
                }
                self.order.move_to_back(element.slot);
                element.renew(value, now);
            }
            None => {
                let slot = self.order.push_back(key.to_owned());
                self.elements
                    .insert(key.to_owned(), Element::new(value, now, slot));
            }
        }
        self.stats.record_set();
    }

    /// Removes `key` from both the map and the recency list.
    fn purge(&mut self, key: &str) -> bool {
        let Some(element) = self.elements.remove(key) else {
            return false;
        };
        match self.order.remove(element.slot) {
            Some(removed) if removed == key => true,
            other => invariant_violation(format!(
                "key {key:?} points at a recency slot that holds {other:?}"
            )),
        }
    }

    fn front(&self) -> Option<(&str, &Element)> {
        let (_, key) = self.order.front()?;
        match self.elements.get(key) {
            Some(element) => Some((key, element)),
            None => invariant_violation(format!(
                "key {key:?} is in the recency list but not in the map"
            )),
        }
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(KvError::InvalidRequest("Key cannot be empty".to_string()));
    }
    Ok(())
}

#[cold]
fn invariant_violation(detail: String) -> ! {
    error!(%detail, "storage invariant violated");
    panic!("storage invariant violated: {detail}");
}

#[cfg(test)]
impl KvStore {
    /// Checks map/list agreement and timestamp ordering.
    pub(crate) fn assert_consistent(&self) {
        let inner = self.inner.lock().unwrap();
        assert_eq!(inner.elements.len(), inner.order.len());

        let mut previous: Option<Instant> = None;
        for key in inner.order.iter() {
            let element = inner
                .elements
                .get(key)
                .unwrap_or_else(|| panic!("listed key {key:?} missing from map"));
            assert_eq!(inner.order.key(element.slot), Some(key));
            if let Some(previous) = previous {
                assert!(previous <= element.timestamp, "list out of write order");
            }
            previous = Some(element.timestamp);
        }
    }
}
