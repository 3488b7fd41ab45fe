// Read-oriented browsing APIs: connectivity, album lists, albums, artists and search.
use super::{AlbumListType, SubsonicClient};
use crate::api::models::{Album, Artist, SearchResult, Song};
use crate::error::Result;

impl SubsonicClient {
    pub async fn ping(&self) -> Result<()> {
        self.call("ping", &[]).await.map(|_| ())
    }

    pub async fn get_album_list(&self, list_type: AlbumListType, size: u32) -> Result<Vec<Album>> {
        let size = size.to_string();
        let response = self
            .call(
                "getAlbumList2",
                &[("type", list_type.as_query_value()), ("size", &size)],
            )
            .await?;

        Ok(response
            .album_list
            .and_then(|list| list.album)
            .unwrap_or_default())
    }

    pub async fn get_album(&self, album_id: &str) -> Result<(Album, Vec<Song>)> {
        let response = self.call("getAlbum", &[("id", album_id)]).await?;
        match response.album {
            Some(album) => Ok((album.album, album.song.unwrap_or_default())),
            None => Ok((
                Album {
                    id: album_id.to_string(),
                    ..Album::default()
                },
                Vec::new(),
            )),
        }
    }

    /// Songs of one album; an album without a track list yields an empty vec.
    pub async fn get_album_songs(&self, album_id: &str) -> Result<Vec<Song>> {
        self.get_album(album_id).await.map(|(_, songs)| songs)
    }

    /// All artists, flattened across the alphabetical index buckets.
    pub async fn get_artists(&self) -> Result<Vec<Artist>> {
        let response = self.call("getArtists", &[]).await?;
        Ok(response
            .artists
            .and_then(|artists| artists.index)
            .unwrap_or_default()
            .into_iter()
            .flat_map(|index| index.artist.unwrap_or_default())
            .collect())
    }

    pub async fn search(
        &self,
        query: &str,
        song_count: u32,
        album_count: u32,
        artist_count: u32,
    ) -> Result<SearchResult> {
        let song_count = song_count.to_string();
        let album_count = album_count.to_string();
        let artist_count = artist_count.to_string();
        let response = self
            .call(
                "search3",
                &[
                    ("query", query),
                    ("songCount", &song_count),
                    ("albumCount", &album_count),
                    ("artistCount", &artist_count),
                ],
            )
            .await?;

        let found = response.search_result3.unwrap_or_default();
        Ok(SearchResult {
            artists: found.artist.unwrap_or_default(),
            albums: found.album.unwrap_or_default(),
            songs: found.song.unwrap_or_default(),
        })
    }
}
