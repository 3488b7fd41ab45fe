//! Play queue and playback state, independent of any audio backend.

mod queue;
mod state;

pub use queue::{PlayQueue, PreviousAction, RESTART_THRESHOLD_SECS};
pub use state::{EndedAction, EndedOutcome, FavoriteChange, PlayerState, ERROR_SKIP_DELAY_MS};

use crate::api::{models::Song, SubsonicClient};
use crate::error::{ApiError, Result};
use crate::offline::{shared_outbox, ScrobbleOutbox};
use tracing::{debug, warn};

/// Songs of one album, ready to load into the queue.
pub async fn album_queue(client: &SubsonicClient, album_id: &str) -> Result<Vec<Song>> {
    let songs = client.get_album_songs(album_id).await?;
    if songs.is_empty() {
        return Err(ApiError::EmptyAlbum);
    }
    Ok(songs)
}

/// Reports a started track. Failures are only logged.
pub async fn report_now_playing(client: &SubsonicClient, song_id: &str) {
    if let Err(err) = client.scrobble(song_id, false).await {
        debug!(song_id, "now-playing scrobble failed: {err}");
    }
}

/// Reports a finished track; network failures go to the shared outbox.
pub async fn report_finished(client: &SubsonicClient, song_id: &str) {
    report_finished_to(client, song_id, shared_outbox()).await;
}

/// Reports a finished track, queueing it in `outbox` when the network is
/// down. Rejections by the server are only logged.
pub async fn report_finished_to(client: &SubsonicClient, song_id: &str, outbox: &ScrobbleOutbox) {
    match client.scrobble(song_id, true).await {
        Ok(()) => {}
        Err(err) if err.is_network() => {
            debug!(song_id, "queueing scrobble for later");
            outbox.enqueue(song_id);
        }
        Err(err) => warn!(song_id, "scrobble failed: {err}"),
    }
}

/// Applies a favorite flip on the server.
pub async fn sync_favorite(client: &SubsonicClient, change: &FavoriteChange) -> Result<()> {
    match change {
        FavoriteChange::Starred(id) => client.star(id).await,
        FavoriteChange::Unstarred(id) => client.unstar(id).await,
    }
}
