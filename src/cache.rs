//! Size-bounded key/value store used for each offline cache partition.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    pub content_type: String,
    pub stored_at_ms: i64,
}

impl CacheEntry {
    pub fn new(data: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            data,
            content_type: content_type.into(),
            stored_at_ms: now_ms(),
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len() + self.content_type.len() + 2 * std::mem::size_of::<i64>()
    }
}

/// FIFO-evicting cache with a byte budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleCache {
    entries: HashMap<String, CacheEntry>,
    order: VecDeque<String>,
    max_size_bytes: usize,
    current_size_bytes: usize,
}

impl SimpleCache {
    pub fn new(max_size_mb: u32) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_size_bytes: (max_size_mb as usize) * 1024 * 1024,
            current_size_bytes: 0,
        }
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    pub fn put(&mut self, key: String, entry: CacheEntry) {
        self.remove(&key);

        let entry_size = entry.size_bytes();
        if entry_size > self.max_size_bytes {
            return;
        }

        while self.current_size_bytes + entry_size > self.max_size_bytes {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            if let Some(evicted) = self.entries.remove(&oldest) {
                self.current_size_bytes =
                    self.current_size_bytes.saturating_sub(evicted.size_bytes());
            }
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, entry);
        self.current_size_bytes += entry_size;
    }

    fn remove(&mut self, key: &str) -> bool {
        let Some(entry) = self.entries.remove(key) else {
            return false;
        };
        self.order.retain(|existing| existing != key);
        self.current_size_bytes = self.current_size_bytes.saturating_sub(entry.size_bytes());
        true
    }

    /// Entries from the most recently stored back to the oldest.
    pub fn newest_first(&self) -> impl Iterator<Item = (&str, &CacheEntry)> {
        self.order
            .iter()
            .rev()
            .filter_map(|key| self.entries.get(key).map(|entry| (key.as_str(), entry)))
    }

    /// An empty cache with the same byte budget.
    pub fn empty_like(&self) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_size_bytes: self.max_size_bytes,
            current_size_bytes: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.entries.len(),
            total_size_bytes: self.current_size_bytes,
            max_size_bytes: self.max_size_bytes,
        }
    }
}

impl Default for SimpleCache {
    fn default() -> Self {
        Self::new(32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CacheStats {
    pub entry_count: usize,
    pub total_size_bytes: usize,
    pub max_size_bytes: usize,
}

pub(crate) fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(len: usize) -> CacheEntry {
        CacheEntry::new(vec![7u8; len], "application/json")
    }

    #[test]
    fn evicts_oldest_entry_when_over_budget() {
        let mut cache = SimpleCache::new(1);
        let half = 600 * 1024;
        cache.put("first".to_string(), entry(half));
        cache.put("second".to_string(), entry(half));

        assert!(cache.get("first").is_none());
        assert!(cache.get("second").is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn replacing_a_key_keeps_size_accounting_consistent() {
        let mut cache = SimpleCache::new(1);
        cache.put("k".to_string(), entry(100));
        cache.put("k".to_string(), entry(300));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().total_size_bytes, entry(300).size_bytes());
    }

    #[test]
    fn oversized_entry_is_not_stored() {
        let mut cache = SimpleCache::new(1);
        cache.put("small".to_string(), entry(10));
        cache.put("huge".to_string(), entry(2 * 1024 * 1024));
        assert!(cache.get("huge").is_none());
        assert!(cache.get("small").is_some());
    }

    #[test]
    fn entries_survive_a_json_round_trip() {
        let mut cache = SimpleCache::new(1);
        cache.put("k".to_string(), CacheEntry::new(vec![0, 255, 10], "image/png"));
        let json = serde_json::to_string(&cache).unwrap();
        let restored: SimpleCache = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.get("k").unwrap().data, vec![0, 255, 10]);
    }
}
