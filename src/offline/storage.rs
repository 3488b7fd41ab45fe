//! Snapshot persistence for the offline partitions.

use super::routing::{CACHE_DYNAMIC, CACHE_IMAGES, CACHE_STATIC};
use crate::cache::{CacheEntry, SimpleCache};
use std::collections::HashMap;

pub type Snapshot = HashMap<String, SimpleCache>;

/// Rough serialized size of one entry: the key is written twice (map and
/// eviction order), the body as base64, plus JSON framing.
fn encoded_size(key: &str, entry: &CacheEntry) -> usize {
    key.len() * 2 + entry.content_type.len() + entry.data.len().div_ceil(3) * 4 + 64
}

/// Copy of `snapshot` that serializes to about `budget_bytes` or less.
/// Partitions are filled static, dynamic, then images, keeping the newest
/// entries of each. Partitions with any other name are left out.
pub fn fit_to_budget(snapshot: &Snapshot, budget_bytes: usize) -> Snapshot {
    let mut remaining = budget_bytes;
    let mut fitted = Snapshot::new();
    for name in [CACHE_STATIC, CACHE_DYNAMIC, CACHE_IMAGES] {
        let Some(partition) = snapshot.get(name) else {
            continue;
        };
        let mut kept = Vec::new();
        for (key, entry) in partition.newest_first() {
            let size = encoded_size(key, entry);
            if size > remaining {
                break;
            }
            remaining -= size;
            kept.push((key, entry));
        }
        let mut copy = partition.empty_like();
        for (key, entry) in kept.into_iter().rev() {
            copy.put(key.to_string(), entry.clone());
        }
        fitted.insert(name.to_string(), copy);
    }
    fitted
}

#[cfg(target_arch = "wasm32")]
mod wasm_impl {
    use super::{fit_to_budget, Snapshot};
    use gloo_storage::{LocalStorage, Storage};
    use tracing::warn;

    const SNAPSHOT_KEY: &str = "cauzify.offline_cache";
    /// Kept well under the usual 5 MB local storage quota, which the
    /// credentials and settings share.
    const SNAPSHOT_BUDGET_BYTES: usize = 3 * 1024 * 1024;

    pub fn load_snapshot() -> Option<Snapshot> {
        LocalStorage::get::<Snapshot>(SNAPSHOT_KEY).ok()
    }

    pub fn save_snapshot(snapshot: &Snapshot) {
        let fitted = fit_to_budget(snapshot, SNAPSHOT_BUDGET_BYTES);
        let Err(err) = LocalStorage::set(SNAPSHOT_KEY, &fitted) else {
            return;
        };
        warn!("offline cache snapshot too large, retrying smaller: {err}");
        let smaller = fit_to_budget(snapshot, SNAPSHOT_BUDGET_BYTES / 4);
        if let Err(err) = LocalStorage::set(SNAPSHOT_KEY, &smaller) {
            warn!("offline cache snapshot not saved: {err}");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native_impl {
    use super::{fit_to_budget, Snapshot};
    use std::fs;
    use std::path::PathBuf;

    const SNAPSHOT_BUDGET_BYTES: usize = 64 * 1024 * 1024;

    fn snapshot_path() -> Option<PathBuf> {
        let dir = dirs::cache_dir()?.join("cauzify");
        fs::create_dir_all(&dir).ok()?;
        Some(dir.join("offline_cache.json"))
    }

    pub fn load_snapshot() -> Option<Snapshot> {
        let data = fs::read_to_string(snapshot_path()?).ok()?;
        serde_json::from_str(&data).ok()
    }

    pub fn save_snapshot(snapshot: &Snapshot) {
        let Some(path) = snapshot_path() else {
            return;
        };
        let fitted = fit_to_budget(snapshot, SNAPSHOT_BUDGET_BYTES);
        match serde_json::to_string(&fitted) {
            Ok(data) => {
                if let Err(err) = fs::write(&path, data) {
                    tracing::warn!(path = %path.display(), "offline cache snapshot not saved: {err}");
                }
            }
            Err(err) => tracing::warn!("offline cache snapshot not encoded: {err}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native_impl::{load_snapshot, save_snapshot};
#[cfg(target_arch = "wasm32")]
pub use wasm_impl::{load_snapshot, save_snapshot};

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(len: usize) -> CacheEntry {
        CacheEntry::new(vec![1u8; len], "image/jpeg")
    }

    fn partition(keys: &[&str], len: usize) -> SimpleCache {
        let mut cache = SimpleCache::new(4);
        for key in keys {
            cache.put(key.to_string(), entry(len));
        }
        cache
    }

    #[test]
    fn everything_fits_under_a_large_budget() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(CACHE_IMAGES.to_string(), partition(&["a", "b"], 100));
        let fitted = fit_to_budget(&snapshot, 1024 * 1024);
        assert_eq!(fitted[CACHE_IMAGES].len(), 2);
    }

    #[test]
    fn newest_images_survive_a_tight_budget() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(CACHE_IMAGES.to_string(), partition(&["old", "mid", "new"], 3000));
        let one = encoded_size("new", &entry(3000));

        let fitted = fit_to_budget(&snapshot, one * 2 + 10);
        let images = &fitted[CACHE_IMAGES];
        assert_eq!(images.len(), 2);
        assert!(images.get("old").is_none());
        assert!(images.get("mid").is_some());
        assert!(images.get("new").is_some());
        let order: Vec<&str> = images.newest_first().map(|(key, _)| key).collect();
        assert_eq!(order, ["new", "mid"]);
    }

    #[test]
    fn static_and_api_entries_win_over_images() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(CACHE_STATIC.to_string(), partition(&["/index.html"], 500));
        snapshot.insert(CACHE_DYNAMIC.to_string(), partition(&["getArtists"], 500));
        snapshot.insert(CACHE_IMAGES.to_string(), partition(&["cover"], 500));
        let budget = encoded_size("/index.html", &entry(500)) + encoded_size("getArtists", &entry(500));

        let fitted = fit_to_budget(&snapshot, budget);
        assert_eq!(fitted[CACHE_STATIC].len(), 1);
        assert_eq!(fitted[CACHE_DYNAMIC].len(), 1);
        assert!(fitted[CACHE_IMAGES].is_empty());
    }

    #[test]
    fn stale_partitions_are_not_written() {
        let mut snapshot = Snapshot::new();
        snapshot.insert("cauzify-images-v0".to_string(), partition(&["a"], 10));
        assert!(fit_to_budget(&snapshot, 1024).is_empty());
    }
}
