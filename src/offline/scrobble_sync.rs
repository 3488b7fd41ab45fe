//! Finished-track scrobbles that could not reach the server, replayed once
//! connectivity returns.

use crate::api::SubsonicClient;
use crate::cache::now_ms;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::{info, warn};

static OUTBOX: Lazy<ScrobbleOutbox> = Lazy::new(ScrobbleOutbox::default);

pub fn shared_outbox() -> &'static ScrobbleOutbox {
    &OUTBOX
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingScrobble {
    pub song_id: String,
    pub queued_at_ms: i64,
}

#[derive(Default)]
pub struct ScrobbleOutbox {
    pending: Mutex<Vec<PendingScrobble>>,
}

impl ScrobbleOutbox {
    pub fn enqueue(&self, song_id: impl Into<String>) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.push(PendingScrobble {
            song_id: song_id.into(),
            queued_at_ms: now_ms(),
        });
    }

    pub fn len(&self) -> usize {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Submits every queued scrobble. Entries that fail on the network again
    /// stay queued; entries the server rejects are dropped. Returns the
    /// number delivered.
    pub async fn sync(&self, client: &SubsonicClient) -> usize {
        let batch: Vec<PendingScrobble> = {
            let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *pending)
        };
        if batch.is_empty() {
            return 0;
        }

        info!(count = batch.len(), "syncing scrobbles");
        let mut delivered = 0;
        let mut retry = Vec::new();
        for entry in batch {
            match client.scrobble(&entry.song_id, true).await {
                Ok(()) => delivered += 1,
                Err(err) if err.is_network() => retry.push(entry),
                Err(err) => warn!(song_id = %entry.song_id, "scrobble dropped: {err}"),
            }
        }

        if !retry.is_empty() {
            let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            retry.append(&mut pending);
            *pending = retry;
        }
        delivered
    }
}
