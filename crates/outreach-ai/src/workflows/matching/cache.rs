use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Capacity-bounded cache with per-entry TTL.
///
/// Replaces the ad-hoc global maps collaborator lookups used to keep:
/// hint sources get one of these injected instead of memoizing on their
/// own. Expired entries are dropped on read; at capacity the oldest entry
/// is evicted.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    capacity: usize,
    ttl: Duration,
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
}

#[derive(Debug)]
struct CacheEntry<V> {
    stored_at: Instant,
    value: V,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);

        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                value,
            },
        );
    }

    /// Fetch-through helper for hint sources.
    pub fn get_or_insert_with(&self, key: &K, produce: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(key) {
            return value;
        }
        let value = produce();
        self.insert(key.clone(), value.clone());
        value
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.lock().expect("cache mutex poisoned");
        entries
            .values()
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
