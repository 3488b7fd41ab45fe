//! HTTP plumbing under the Subsonic client.
//!
//! Everything the client fetches goes through a [`Transport`]; the default
//! stack is the offline cache wrapped around [`HttpTransport`].

use crate::error::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// A fully buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
    #[serde(default)]
    pub from_cache: bool,
}

impl HttpResponse {
    pub fn new(status: u16, content_type: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body,
            from_cache: false,
        }
    }

    /// Synthetic response served when a cache-first lookup misses and the
    /// network is unreachable.
    pub fn offline() -> Self {
        Self::new(503, "text/plain", b"Offline".to_vec())
    }

    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Plain network transport backed by `reqwest`.
#[derive(Clone, Default)]
pub struct HttpTransport;

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = HTTP_CLIENT.get(url).send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse::new(status, content_type, body))
    }
}
