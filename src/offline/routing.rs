//! Strategy selection by URL shape.

use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};

pub const CACHE_STATIC: &str = "cauzify-static-v1";
pub const CACHE_DYNAMIC: &str = "cauzify-dynamic-v1";
pub const CACHE_IMAGES: &str = "cauzify-images-v1";

/// Query parameters that change on every request and must not split cache
/// entries. The username `u` stays in the key so accounts never share entries.
const ROTATING_AUTH_PARAMS: [&str; 3] = ["t", "s", "p"];

/// Endpoints whose answer must come from the server: writes, and the
/// credential check behind login.
const BYPASS_ENDPOINTS: [&str; 4] = ["/rest/ping", "/rest/scrobble", "/rest/star", "/rest/unstar"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CachePartition {
    Static,
    Dynamic,
    Images,
}

impl CachePartition {
    pub const ALL: [CachePartition; 3] = [Self::Static, Self::Dynamic, Self::Images];

    pub fn name(self) -> &'static str {
        match self {
            Self::Static => CACHE_STATIC,
            Self::Dynamic => CACHE_DYNAMIC,
            Self::Images => CACHE_IMAGES,
        }
    }

    pub fn is_current(name: &str) -> bool {
        Self::ALL.iter().any(|partition| partition.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    CacheFirst,
    NetworkFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub strategy: Strategy,
    pub partition: CachePartition,
}

impl Route {
    const fn new(strategy: Strategy, partition: CachePartition) -> Self {
        Self {
            strategy,
            partition,
        }
    }
}

/// Picks the fetch policy for a request. `None` means the request bypasses
/// the cache entirely.
pub fn route(method: &Method, url: &str, static_assets: &[String]) -> Option<Route> {
    if *method != Method::GET {
        return None;
    }

    let without_fragment = url.split('#').next().unwrap_or(url);
    if static_assets.iter().any(|asset| asset == without_fragment) {
        return Some(Route::new(Strategy::CacheFirst, CachePartition::Static));
    }

    let path = Url::parse(url)
        .map(|parsed| parsed.path().to_string())
        .unwrap_or_else(|_| without_fragment.to_string());

    if BYPASS_ENDPOINTS
        .iter()
        .any(|endpoint| path.ends_with(endpoint) || path.ends_with(&format!("{endpoint}.view")))
    {
        return None;
    }

    if path.contains("getCoverArt") {
        return Some(Route::new(Strategy::CacheFirst, CachePartition::Images));
    }

    // API calls and everything else.
    Some(Route::new(Strategy::NetworkFirst, CachePartition::Dynamic))
}

/// Cache key for a request URL: token, salt and password parameters and the
/// fragment removed, everything else kept in order.
pub fn cache_key(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    parsed.set_fragment(None);

    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !ROTATING_AUTH_PARAMS.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(kept);
    }

    parsed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets() -> Vec<String> {
        vec![
            "https://app.example.com/".to_string(),
            "https://app.example.com/index.html".to_string(),
        ]
    }

    #[test]
    fn non_get_requests_bypass_the_cache() {
        assert_eq!(
            route(&Method::POST, "https://music.example.com/rest/ping", &assets()),
            None
        );
    }

    #[test]
    fn static_assets_are_cache_first() {
        let picked = route(&Method::GET, "https://app.example.com/index.html", &assets());
        assert_eq!(
            picked,
            Some(Route::new(Strategy::CacheFirst, CachePartition::Static))
        );
    }

    #[test]
    fn app_root_does_not_capture_other_same_origin_urls() {
        let picked = route(&Method::GET, "https://app.example.com/rest/getArtists", &assets());
        assert_eq!(
            picked,
            Some(Route::new(Strategy::NetworkFirst, CachePartition::Dynamic))
        );
    }

    #[test]
    fn cover_art_is_cache_first_in_images() {
        let picked = route(
            &Method::GET,
            "https://music.example.com/rest/getCoverArt?id=al-1&size=300",
            &assets(),
        );
        assert_eq!(
            picked,
            Some(Route::new(Strategy::CacheFirst, CachePartition::Images))
        );
    }

    #[test]
    fn api_and_unknown_urls_are_network_first() {
        for url in [
            "https://music.example.com/rest/getAlbum?id=1",
            "https://fonts.example.com/font.woff2",
        ] {
            assert_eq!(
                route(&Method::GET, url, &assets()),
                Some(Route::new(Strategy::NetworkFirst, CachePartition::Dynamic))
            );
        }
    }

    #[test]
    fn writes_and_ping_bypass_the_cache() {
        for url in [
            "https://music.example.com/rest/ping?u=al&t=x&s=y",
            "https://music.example.com/rest/ping.view",
            "https://music.example.com/rest/scrobble?id=1&submission=true",
            "https://music.example.com/rest/star?id=1",
            "https://music.example.com/rest/unstar.view?id=1",
        ] {
            assert_eq!(route(&Method::GET, url, &assets()), None, "{url}");
        }
    }

    #[test]
    fn cache_key_drops_rotating_auth_params() {
        let a = cache_key("https://m.example.com/rest/getAlbum?u=al&t=aaa&s=111&v=1.16.1&id=7");
        let b = cache_key("https://m.example.com/rest/getAlbum?u=al&t=bbb&s=222&v=1.16.1&id=7");
        assert_eq!(a, b);
        assert_eq!(a, "https://m.example.com/rest/getAlbum?u=al&v=1.16.1&id=7");
    }

    #[test]
    fn cache_key_keeps_users_apart() {
        assert_ne!(
            cache_key("https://m.example.com/rest/getAlbum?u=alice&t=a&s=1&id=7"),
            cache_key("https://m.example.com/rest/getAlbum?u=mallory&t=b&s=2&id=7")
        );
    }

    #[test]
    fn cache_key_without_remaining_query_has_no_question_mark() {
        assert_eq!(
            cache_key("https://m.example.com/rest/getArtists?t=b&s=c#frag"),
            "https://m.example.com/rest/getArtists"
        );
    }

    #[test]
    fn only_the_three_named_partitions_are_current() {
        assert!(CachePartition::is_current("cauzify-images-v1"));
        assert!(!CachePartition::is_current("cauzify-images-v0"));
    }
}
