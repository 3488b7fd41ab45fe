//! Offline response cache sitting in front of the network.
//!
//! Requests are routed by URL shape into one of three named partitions and
//! served either cache-first (static assets, cover art) or network-first
//! (API calls and everything else). The partitions are persisted as one
//! snapshot so browsing keeps working after a reload without a connection.

mod messages;
mod routing;
mod scrobble_sync;
mod storage;
mod transport;

pub use messages::{ControlMessage, MessageOutcome};
pub use routing::{
    cache_key, route, CachePartition, Route, Strategy, CACHE_DYNAMIC, CACHE_IMAGES, CACHE_STATIC,
};
pub use scrobble_sync::{shared_outbox, PendingScrobble, ScrobbleOutbox};
pub use transport::CachingTransport;

use crate::api::transport::{HttpResponse, Transport};
use crate::cache::{now_ms, CacheEntry, CacheStats, SimpleCache};
use crate::error::{ApiError, Result};
use futures_util::future::join_all;
use once_cell::sync::Lazy;
use reqwest::{Method, Url};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Assets precached on install, relative to the app origin.
pub const STATIC_ASSETS: [&str; 4] = [
    "/",
    "/index.html",
    "/assets/styling/app.css",
    "/assets/manifest.json",
];

/// Minimum gap between two snapshot writes caused by ordinary stores.
/// Install, activate and clear always write straight away.
pub const PERSIST_INTERVAL_MS: u64 = 5_000;

static SHARED: Lazy<Arc<OfflineCache>> =
    Lazy::new(|| Arc::new(OfflineCache::new(OfflineConfig::default())));

/// The process-wide cache every default client routes through.
pub fn shared() -> Arc<OfflineCache> {
    SHARED.clone()
}

#[derive(Debug, Clone, PartialEq)]
pub struct OfflineConfig {
    pub static_assets: Vec<String>,
    pub static_size_mb: u32,
    pub dynamic_size_mb: u32,
    pub images_size_mb: u32,
    pub persist: bool,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            static_assets: STATIC_ASSETS.iter().map(|asset| asset.to_string()).collect(),
            static_size_mb: 4,
            dynamic_size_mb: 8,
            images_size_mb: 16,
            persist: true,
        }
    }
}

impl OfflineConfig {
    fn size_for(&self, partition: CachePartition) -> u32 {
        match partition {
            CachePartition::Static => self.static_size_mb,
            CachePartition::Dynamic => self.dynamic_size_mb,
            CachePartition::Images => self.images_size_mb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    /// Installed and waiting to take over.
    Installed,
    Active,
}

struct Inner {
    partitions: HashMap<String, SimpleCache>,
    static_urls: Vec<String>,
    state: WorkerState,
    enabled: bool,
    /// Stores not yet written to the snapshot.
    dirty: bool,
    last_persist_ms: i64,
}

pub struct OfflineCache {
    config: OfflineConfig,
    inner: Mutex<Inner>,
}

impl OfflineCache {
    pub fn new(config: OfflineConfig) -> Self {
        let partitions = if config.persist {
            storage::load_snapshot().unwrap_or_default()
        } else {
            HashMap::new()
        };
        Self {
            config,
            inner: Mutex::new(Inner {
                partitions,
                static_urls: Vec::new(),
                state: WorkerState::Idle,
                enabled: true,
                dirty: false,
                last_persist_ms: 0,
            }),
        }
    }

    /// A non-persistent cache, used by tests and previews.
    pub fn in_memory() -> Self {
        Self::new(OfflineConfig {
            persist: false,
            ..OfflineConfig::default()
        })
    }

    /// Builds a cache pre-seeded with partitions, e.g. from an older version.
    pub fn with_partitions(config: OfflineConfig, partitions: HashMap<String, SimpleCache>) -> Self {
        let cache = Self::new(config);
        cache.lock().partitions.extend(partitions);
        cache
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(&self, inner: &mut Inner) {
        if self.config.persist {
            storage::save_snapshot(&inner.partitions);
        }
        inner.dirty = false;
        inner.last_persist_ms = now_ms();
    }

    fn persist_throttled(&self, inner: &mut Inner) {
        inner.dirty = true;
        if now_ms() - inner.last_persist_ms >= PERSIST_INTERVAL_MS as i64 {
            self.persist(inner);
        }
    }

    /// Writes stores held back by the persist throttle.
    pub fn flush(&self) {
        let mut inner = self.lock();
        if inner.dirty {
            self.persist(&mut inner);
        }
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.lock().dirty
    }

    pub fn state(&self) -> WorkerState {
        self.lock().state
    }

    /// Disabling turns every route into a network passthrough; stored entries are kept.
    pub fn set_enabled(&self, enabled: bool) {
        self.lock().enabled = enabled;
    }

    /// Route for a request, or `None` when it should bypass the cache.
    pub fn route(&self, method: &Method, url: &str) -> Option<Route> {
        let inner = self.lock();
        if !inner.enabled {
            return None;
        }
        routing::route(method, url, &inner.static_urls)
    }

    pub fn lookup(&self, partition: CachePartition, url: &str) -> Option<HttpResponse> {
        let key = cache_key(url);
        let inner = self.lock();
        let entry = inner.partitions.get(partition.name())?.get(&key)?;
        Some(HttpResponse {
            status: 200,
            content_type: entry.content_type.clone(),
            body: entry.data.clone(),
            from_cache: true,
        })
    }

    pub fn store(&self, partition: CachePartition, url: &str, response: &HttpResponse) {
        let mut inner = self.lock();
        self.put(&mut inner, partition, url, response);
        self.persist_throttled(&mut inner);
    }

    fn put(&self, inner: &mut Inner, partition: CachePartition, url: &str, response: &HttpResponse) {
        let size_mb = self.config.size_for(partition);
        inner
            .partitions
            .entry(partition.name().to_string())
            .or_insert_with(|| SimpleCache::new(size_mb))
            .put(
                cache_key(url),
                CacheEntry::new(response.body.clone(), response.content_type.clone()),
            );
    }

    /// Fetches every static asset and stores them all, or none of them when
    /// any fetch fails. A successful install activates immediately.
    pub async fn install<T>(&self, transport: &T, base: &str) -> Result<usize>
    where
        T: Transport + ?Sized,
    {
        self.install_assets(transport, base, &self.config.static_assets)
            .await
    }

    /// Like [`install`](Self::install) with an explicit asset list, for
    /// bundles whose asset paths are only known at runtime.
    ///
    /// Only requests made through a [`CachingTransport`] read the static
    /// partition. A browser loading the page fetches its assets directly and
    /// never consults it.
    pub async fn install_assets<T>(&self, transport: &T, base: &str, assets: &[String]) -> Result<usize>
    where
        T: Transport + ?Sized,
    {
        let base = Url::parse(base).map_err(|e| ApiError::InvalidServer(e.to_string()))?;
        let urls = assets
            .iter()
            .map(|asset| {
                base.join(asset)
                    .map(|url| url.to_string())
                    .map_err(|e| ApiError::InvalidServer(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        info!(count = urls.len(), "caching static assets");
        let responses = join_all(urls.iter().map(|url| transport.get(url))).await;

        let mut fetched = Vec::with_capacity(urls.len());
        for (url, response) in urls.iter().zip(responses) {
            let response = response?;
            if !response.is_ok() {
                warn!(%url, status = response.status, "static asset install failed");
                return Err(ApiError::Http(response.status));
            }
            fetched.push((url.clone(), response));
        }

        {
            let size_mb = self.config.size_for(CachePartition::Static);
            let mut inner = self.lock();
            let partition = inner
                .partitions
                .entry(CACHE_STATIC.to_string())
                .or_insert_with(|| SimpleCache::new(size_mb));
            for (url, response) in &fetched {
                partition.put(
                    cache_key(url),
                    CacheEntry::new(response.body.clone(), response.content_type.clone()),
                );
            }
            inner.static_urls = urls;
            inner.state = WorkerState::Installed;
            self.persist(&mut inner);
        }

        self.skip_waiting();
        Ok(fetched.len())
    }

    /// Deletes every partition that is not one of the current three.
    pub fn activate(&self) -> Vec<String> {
        let mut inner = self.lock();
        let stale: Vec<String> = inner
            .partitions
            .keys()
            .filter(|name| !CachePartition::is_current(name))
            .cloned()
            .collect();
        for name in &stale {
            info!(cache = %name, "deleting old cache");
            inner.partitions.remove(name);
        }
        inner.state = WorkerState::Active;
        self.persist(&mut inner);
        stale
    }

    /// Promotes an installed cache; no-op in any other state.
    pub fn skip_waiting(&self) -> Option<Vec<String>> {
        if self.state() != WorkerState::Installed {
            return None;
        }
        Some(self.activate())
    }

    pub fn handle_message(&self, message: ControlMessage) -> MessageOutcome {
        debug!(?message, "offline cache control message");
        match message {
            ControlMessage::SkipWaiting => match self.skip_waiting() {
                Some(deleted) => MessageOutcome::Activated(deleted),
                None => MessageOutcome::NoChange,
            },
            ControlMessage::ClearCache => MessageOutcome::Cleared(self.clear_all()),
        }
    }

    /// Deletes every partition. Returns how many were deleted.
    pub fn clear_all(&self) -> usize {
        let mut inner = self.lock();
        let count = inner.partitions.len();
        inner.partitions.clear();
        self.persist(&mut inner);
        count
    }

    pub fn partition_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().partitions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Total number of cached responses across all partitions.
    pub fn item_count(&self) -> usize {
        self.lock().partitions.values().map(SimpleCache::len).sum()
    }

    pub fn stats(&self, partition: CachePartition) -> CacheStats {
        self.lock()
            .partitions
            .get(partition.name())
            .map(SimpleCache::stats)
            .unwrap_or_default()
    }

    /// Caches a batch of URLs into one partition, ignoring failures, and
    /// writes the snapshot once. Returns how many were stored; always 0 while
    /// the cache is disabled.
    pub async fn prefetch<T>(&self, transport: &T, partition: CachePartition, urls: &[String]) -> usize
    where
        T: Transport + ?Sized,
    {
        if !self.lock().enabled {
            return 0;
        }
        let responses = join_all(urls.iter().map(|url| transport.get(url))).await;
        let mut inner = self.lock();
        let mut stored = 0;
        for (url, response) in urls.iter().zip(responses) {
            match response {
                Ok(response) if response.is_ok() => {
                    self.put(&mut inner, partition, url, &response);
                    stored += 1;
                }
                Ok(response) => debug!(%url, status = response.status, "prefetch skipped"),
                Err(err) => debug!(%url, "prefetch failed: {err}"),
            }
        }
        if stored > 0 {
            self.persist(&mut inner);
        }
        stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(body: &str) -> HttpResponse {
        HttpResponse::new(200, "application/json", body.as_bytes().to_vec())
    }

    #[test]
    fn lookup_ignores_rotating_auth_params() {
        let cache = OfflineCache::in_memory();
        cache.store(
            CachePartition::Dynamic,
            "https://m.example.com/rest/getAlbum?u=a&t=1&s=x&id=9",
            &ok("{}"),
        );
        let hit = cache
            .lookup(
                CachePartition::Dynamic,
                "https://m.example.com/rest/getAlbum?u=a&t=2&s=y&id=9",
            )
            .expect("cached");
        assert!(hit.from_cache);
        assert_eq!(hit.body, b"{}");
    }

    #[test]
    fn partitions_are_isolated() {
        let cache = OfflineCache::in_memory();
        cache.store(CachePartition::Images, "https://m.example.com/rest/getCoverArt?id=1", &ok("img"));
        assert!(cache
            .lookup(CachePartition::Dynamic, "https://m.example.com/rest/getCoverArt?id=1")
            .is_none());
    }

    #[test]
    fn activate_removes_only_stale_partitions() {
        let mut seeded = HashMap::new();
        seeded.insert("cauzify-static-v0".to_string(), SimpleCache::new(1));
        seeded.insert(CACHE_IMAGES.to_string(), SimpleCache::new(1));
        let cache = OfflineCache::with_partitions(
            OfflineConfig {
                persist: false,
                ..OfflineConfig::default()
            },
            seeded,
        );

        let deleted = cache.activate();
        assert_eq!(deleted, vec!["cauzify-static-v0".to_string()]);
        assert_eq!(cache.partition_names(), vec![CACHE_IMAGES.to_string()]);
        assert_eq!(cache.state(), WorkerState::Active);
    }

    #[test]
    fn skip_waiting_without_install_changes_nothing() {
        let cache = OfflineCache::in_memory();
        assert_eq!(
            cache.handle_message(ControlMessage::SkipWaiting),
            MessageOutcome::NoChange
        );
        assert_eq!(cache.state(), WorkerState::Idle);
    }

    #[test]
    fn clear_cache_message_empties_everything() {
        let cache = OfflineCache::in_memory();
        cache.store(CachePartition::Dynamic, "https://m.example.com/rest/ping", &ok("{}"));
        cache.store(CachePartition::Images, "https://m.example.com/rest/getCoverArt?id=1", &ok("i"));
        assert_eq!(cache.item_count(), 2);

        assert_eq!(
            cache.handle_message(ControlMessage::ClearCache),
            MessageOutcome::Cleared(2)
        );
        assert_eq!(cache.item_count(), 0);
    }

    #[test]
    fn stores_inside_the_interval_wait_for_a_flush() {
        let cache = OfflineCache::in_memory();
        cache.store(CachePartition::Dynamic, "https://m.example.com/rest/getArtists", &ok("{}"));
        assert!(!cache.has_unsaved_changes());

        cache.store(CachePartition::Dynamic, "https://m.example.com/rest/getAlbum?id=1", &ok("{}"));
        assert!(cache.has_unsaved_changes());

        cache.flush();
        assert!(!cache.has_unsaved_changes());
    }

    #[test]
    fn disabled_cache_routes_nothing() {
        let cache = OfflineCache::in_memory();
        cache.set_enabled(false);
        assert!(cache
            .route(&Method::GET, "https://m.example.com/rest/ping")
            .is_none());
    }
}
