//! Debounced search-as-you-type.

use crate::api::models::SearchResult;
use crate::api::SubsonicClient;
use crate::utils::sleep_ms;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::warn;

pub const SEARCH_DEBOUNCE_MS: u64 = 400;
pub const SEARCH_SONG_COUNT: u32 = 20;
pub const SEARCH_ALBUM_COUNT: u32 = 10;
pub const SEARCH_ARTIST_COUNT: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query was blank; nothing to show.
    Cleared,
    Results(SearchResult),
    NoResults,
    /// "Search failed" with the error text underneath.
    Failed(String),
}

/// Ticket counter shared by every keystroke. Only the newest ticket may
/// publish results.
#[derive(Debug, Clone, Default)]
pub struct SearchGeneration(Arc<AtomicU64>);

impl SearchGeneration {
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

pub fn outcome_for(result: crate::error::Result<SearchResult>) -> SearchOutcome {
    match result {
        Ok(found) if found.is_empty() => SearchOutcome::NoResults,
        Ok(found) => SearchOutcome::Results(found),
        Err(err) => {
            warn!("search failed: {err}");
            SearchOutcome::Failed(err.to_string())
        }
    }
}

/// Runs one keystroke's search. Returns `None` when a newer keystroke
/// superseded this one, before or after the request.
pub async fn debounced_search(
    client: &SubsonicClient,
    generation: &SearchGeneration,
    query: &str,
    debounce_ms: u64,
) -> Option<SearchOutcome> {
    let ticket = generation.bump();
    let query = query.trim();
    if query.is_empty() {
        return Some(SearchOutcome::Cleared);
    }

    sleep_ms(debounce_ms).await;
    if !generation.is_current(ticket) {
        return None;
    }

    let result = client
        .search(
            query,
            SEARCH_SONG_COUNT,
            SEARCH_ALBUM_COUNT,
            SEARCH_ARTIST_COUNT,
        )
        .await;
    if !generation.is_current(ticket) {
        return None;
    }
    Some(outcome_for(result))
}
