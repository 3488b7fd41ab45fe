use super::{CachePartition, OfflineCache, Strategy};
use crate::api::transport::{HttpResponse, Transport};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, warn};

/// Routes every GET through the offline cache before (or after) the network.
pub struct CachingTransport<T> {
    inner: T,
    cache: Arc<OfflineCache>,
}

impl<T: Transport> CachingTransport<T> {
    pub fn new(inner: T, cache: Arc<OfflineCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<OfflineCache> {
        &self.cache
    }

    async fn cache_first(&self, url: &str, partition: CachePartition) -> Result<HttpResponse> {
        if let Some(cached) = self.cache.lookup(partition, url) {
            debug!(%url, "serving from cache");
            return Ok(cached);
        }

        match self.inner.get(url).await {
            Ok(response) => {
                if response.is_ok() {
                    self.cache.store(partition, url, &response);
                }
                Ok(response)
            }
            Err(err) => {
                warn!(%url, "fetch failed: {err}");
                Ok(HttpResponse::offline())
            }
        }
    }

    async fn network_first(&self, url: &str, partition: CachePartition) -> Result<HttpResponse> {
        match self.inner.get(url).await {
            Ok(response) => {
                if response.is_ok() {
                    self.cache.store(partition, url, &response);
                }
                Ok(response)
            }
            Err(err) => {
                debug!(%url, "network failed, trying cache");
                self.cache.lookup(partition, url).ok_or(err)
            }
        }
    }
}

#[async_trait(?Send)]
impl<T: Transport> Transport for CachingTransport<T> {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let Some(route) = self.cache.route(&Method::GET, url) else {
            return self.inner.get(url).await;
        };

        match route.strategy {
            Strategy::CacheFirst => self.cache_first(url, route.partition).await,
            Strategy::NetworkFirst => self.network_first(url, route.partition).await,
        }
    }
}
