//! Client for the Subsonic REST API (Navidrome and compatible servers).

mod favorites_and_scrobble;
mod library_browsing;
mod response_models;

pub use response_models::*;

use crate::api::models::ServerConfig;
use crate::api::transport::{HttpResponse, HttpTransport, Transport};
use crate::error::{ApiError, Result};
use crate::offline::{self, CachingTransport};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub const CLIENT_NAME: &str = "Cauzify-mobile";
pub const API_VERSION: &str = "1.16.1";
pub const DEFAULT_COVER_SIZE: u32 = 300;

/// Album list orderings understood by `getAlbumList2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumListType {
    Newest,
    Frequent,
    AlphabeticalByName,
}

impl AlbumListType {
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Frequent => "frequent",
            Self::AlphabeticalByName => "alphabeticalByName",
        }
    }
}

#[derive(Clone)]
pub struct SubsonicClient {
    pub server: ServerConfig,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for SubsonicClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubsonicClient")
            .field("url", &self.server.url)
            .field("username", &self.server.username)
            .finish_non_exhaustive()
    }
}

impl PartialEq for SubsonicClient {
    fn eq(&self, other: &Self) -> bool {
        self.server == other.server
    }
}

/// Eight random base-36 characters.
pub fn generate_salt() -> String {
    let mut bytes = [0u8; 8];
    getrandom::getrandom(&mut bytes).unwrap_or_default();

    bytes
        .iter()
        .map(|b| {
            let idx = (*b as usize) % 36;
            if idx < 10 {
                (b'0' + idx as u8) as char
            } else {
                (b'a' + (idx - 10) as u8) as char
            }
        })
        .collect()
}

/// `md5(password + salt)` as lowercase hex.
pub fn token_for(password: &str, salt: &str) -> String {
    format!("{:x}", md5::compute(format!("{password}{salt}").as_bytes()))
}

impl SubsonicClient {
    /// Client routed through the shared offline cache.
    pub fn new(server: ServerConfig) -> Self {
        let transport = CachingTransport::new(HttpTransport, offline::shared());
        Self::with_transport(server, Arc::new(transport))
    }

    pub fn with_transport(server: ServerConfig, transport: Arc<dyn Transport>) -> Self {
        Self { server, transport }
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        self.transport.clone()
    }

    /// Auth query with a fresh salt. Binary endpoints (stream, cover art)
    /// omit the `f=json` format flag.
    fn auth_query(&self, json: bool) -> String {
        let salt = generate_salt();
        let token = token_for(&self.server.password, &salt);
        let mut query = format!(
            "u={}&t={}&s={}&v={}&c={}",
            urlencoding::encode(&self.server.username),
            token,
            salt,
            API_VERSION,
            CLIENT_NAME
        );
        if json {
            query.push_str("&f=json");
        }
        query
    }

    fn url_with_auth(&self, method: &str, params: &[(&str, &str)], json: bool) -> String {
        let mut url = format!(
            "{}/rest/{}?{}",
            self.server.url,
            method,
            self.auth_query(json)
        );
        for (key, value) in params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    pub fn build_url(&self, method: &str, params: &[(&str, &str)]) -> String {
        self.url_with_auth(method, params, true)
    }

    /// Cover art URL, or `None` when the item has no artwork.
    pub fn cover_art_url(&self, cover_art_id: &str, size: u32) -> Option<String> {
        let id = cover_art_id.trim();
        if id.is_empty() {
            return None;
        }
        let size = size.to_string();
        Some(self.url_with_auth("getCoverArt", &[("id", id), ("size", &size)], false))
    }

    pub fn stream_url(&self, song_id: &str) -> String {
        self.url_with_auth("stream", &[("id", song_id)], false)
    }

    /// Fetches cover art through the cache and returns it as a `data:` URL.
    pub async fn cover_art_data_url(&self, cover_art_id: &str, size: u32) -> Option<String> {
        let url = self.cover_art_url(cover_art_id, size)?;
        let response = self.transport.get(&url).await.ok()?;
        if !response.is_ok() || response.body.is_empty() {
            return None;
        }
        Some(format!(
            "data:{};base64,{}",
            response.content_type,
            STANDARD.encode(&response.body)
        ))
    }

    /// Performs a JSON API call and unwraps the envelope.
    async fn call(&self, method: &str, params: &[(&str, &str)]) -> Result<SubsonicResponseInner> {
        let url = self.build_url(method, params);
        debug!(method, "subsonic request");
        let response = self.transport.get(&url).await?;
        parse_envelope(&response)
    }
}

/// Validates the HTTP status and the `subsonic-response.status` field.
pub fn parse_envelope(response: &HttpResponse) -> Result<SubsonicResponseInner> {
    if !response.is_ok() {
        return Err(ApiError::Http(response.status));
    }

    let envelope: SubsonicResponse = serde_json::from_slice(&response.body)?;
    let inner = envelope.subsonic_response;
    if inner.status != "ok" {
        let (code, message) = inner
            .error
            .map(|e| (e.code, e.message))
            .unwrap_or((0, None));
        return Err(ApiError::Subsonic {
            code,
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "API error".to_string()),
        });
    }
    Ok(inner)
}
