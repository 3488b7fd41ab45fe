//! Data loading for the Home, Songs, Albums and Artists tabs.

use crate::api::models::{Album, Artist, Song};
use crate::api::transport::Transport;
use crate::api::{AlbumListType, SubsonicClient, DEFAULT_COVER_SIZE};
use crate::diagnostics::{log_perf, perf_start};
use crate::error::Result;
use crate::offline::{CachePartition, OfflineCache};
use futures_util::future::join_all;
use tracing::debug;

pub const HOME_RECENT_ALBUMS: u32 = 12;
pub const HOME_FREQUENT_ALBUMS: u32 = 8;
const HOME_PICK_ALBUMS: usize = 5;
const HOME_SONGS_PER_ALBUM: usize = 2;
pub const HOME_QUICK_PICKS: usize = 15;
pub const SONGS_SOURCE_ALBUMS: u32 = 30;
const SONGS_FETCHED_ALBUMS: usize = 8;
pub const ALBUMS_PAGE: u32 = 50;
/// Artists shown in the horizontal row above the full list.
pub const ARTIST_ROW: usize = 15;
/// Cover art fetched into the images partition after the home load.
pub const COVER_PREFETCH_LIMIT: usize = 20;

/// Which tabs already hold data. Reset on refresh and disconnect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadedFlags {
    pub home: bool,
    pub songs: bool,
    pub albums: bool,
    pub artists: bool,
}

impl LoadedFlags {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeData {
    pub recent_albums: Vec<Album>,
    pub quick_picks: Vec<Song>,
}

/// Fetches several albums concurrently; failed albums contribute no songs.
async fn songs_of(client: &SubsonicClient, albums: &[Album]) -> Vec<Vec<Song>> {
    join_all(albums.iter().map(|album| client.get_album_songs(&album.id)))
        .await
        .into_iter()
        .zip(albums)
        .map(|(result, album)| {
            result.unwrap_or_else(|err| {
                debug!(album_id = %album.id, "album skipped: {err}");
                Vec::new()
            })
        })
        .collect()
}

/// Recently added albums plus quick picks drawn from the most played ones.
pub async fn load_home(client: &SubsonicClient) -> Result<HomeData> {
    let started = perf_start();
    let quick_picks = async {
        let frequent = client
            .get_album_list(AlbumListType::Frequent, HOME_FREQUENT_ALBUMS)
            .await?;
        let picked: Vec<Album> = frequent.into_iter().take(HOME_PICK_ALBUMS).collect();
        let songs: Vec<Song> = songs_of(client, &picked)
            .await
            .into_iter()
            .flat_map(|songs| songs.into_iter().take(HOME_SONGS_PER_ALBUM))
            .take(HOME_QUICK_PICKS)
            .collect();
        Result::Ok(songs)
    };
    let (recent_albums, quick_picks) = futures_util::future::join(
        client.get_album_list(AlbumListType::Newest, HOME_RECENT_ALBUMS),
        quick_picks,
    )
    .await;

    let home = HomeData {
        recent_albums: recent_albums?,
        quick_picks: quick_picks?,
    };
    log_perf(
        "library.load_home",
        started,
        &format!(
            "albums={} picks={}",
            home.recent_albums.len(),
            home.quick_picks.len()
        ),
    );
    Ok(home)
}

/// Songs from the newest albums, in album order.
pub async fn load_songs(client: &SubsonicClient) -> Result<Vec<Song>> {
    let started = perf_start();
    let albums = client
        .get_album_list(AlbumListType::Newest, SONGS_SOURCE_ALBUMS)
        .await?;
    let albums: Vec<Album> = albums.into_iter().take(SONGS_FETCHED_ALBUMS).collect();
    let songs: Vec<Song> = songs_of(client, &albums).await.into_iter().flatten().collect();
    log_perf("library.load_songs", started, &format!("songs={}", songs.len()));
    Ok(songs)
}

pub async fn load_albums(client: &SubsonicClient) -> Result<Vec<Album>> {
    client
        .get_album_list(AlbumListType::AlphabeticalByName, ALBUMS_PAGE)
        .await
}

pub async fn load_artists(client: &SubsonicClient) -> Result<Vec<Artist>> {
    client.get_artists().await
}

/// Stores cover art for up to [`COVER_PREFETCH_LIMIT`] albums in the images
/// partition. Albums without artwork are skipped.
pub async fn cache_album_art<T>(
    cache: &OfflineCache,
    transport: &T,
    client: &SubsonicClient,
    albums: &[Album],
) -> usize
where
    T: Transport + ?Sized,
{
    let urls: Vec<String> = albums
        .iter()
        .filter_map(|album| album.cover_art.as_deref())
        .filter_map(|id| client.cover_art_url(id, DEFAULT_COVER_SIZE))
        .take(COVER_PREFETCH_LIMIT)
        .collect();
    if urls.is_empty() {
        return 0;
    }
    cache.prefetch(transport, CachePartition::Images, &urls).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_every_flag() {
        let mut flags = LoadedFlags {
            home: true,
            songs: true,
            albums: false,
            artists: true,
        };
        flags.reset();
        assert_eq!(flags, LoadedFlags::default());
    }
}
