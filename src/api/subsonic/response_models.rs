// Subsonic response envelope types.
use crate::api::models::{Album, Artist, Song};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SubsonicResponse {
    #[serde(rename = "subsonic-response")]
    pub subsonic_response: SubsonicResponseInner,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubsonicResponseInner {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    pub error: Option<SubsonicError>,
    pub artists: Option<ArtistsContainer>,
    #[serde(alias = "albumList2", alias = "albumList")]
    pub album_list: Option<AlbumList>,
    pub album: Option<AlbumWithSongs>,
    #[serde(alias = "searchResult3")]
    pub search_result3: Option<SearchResult3>,
}

#[derive(Debug, Deserialize)]
pub struct SubsonicError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ArtistsContainer {
    pub index: Option<Vec<ArtistIndex>>,
}

#[derive(Debug, Deserialize)]
pub struct ArtistIndex {
    #[allow(dead_code)]
    #[serde(default)]
    pub name: String,
    pub artist: Option<Vec<Artist>>,
}

#[derive(Debug, Deserialize)]
pub struct AlbumList {
    pub album: Option<Vec<Album>>,
}

#[derive(Debug, Deserialize)]
pub struct AlbumWithSongs {
    #[serde(flatten)]
    pub album: Album,
    pub song: Option<Vec<Song>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResult3 {
    pub artist: Option<Vec<Artist>>,
    pub album: Option<Vec<Album>>,
    pub song: Option<Vec<Song>>,
}
