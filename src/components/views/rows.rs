use crate::api::models::{format_duration, Album, Artist, Song};
use crate::components::{CachedImage, Icon, Playback, PlayerSignal};
use crate::utils::pluralize;
use dioxus::prelude::*;

/// Tapping a song queues the whole list from that song.
#[component]
pub fn SongList(songs: Vec<Song>) -> Element {
    let playback = Playback::from_context();
    let player = use_context::<PlayerSignal>().0;
    let current_id = player().current_song().map(|song| song.id.clone());

    if songs.is_empty() {
        return rsx! {
            EmptyState { icon: "🎵", title: "No songs found".to_string() }
        };
    }

    rsx! {
        div { class: "song-list",
            for (idx, song) in songs.iter().cloned().enumerate() {
                SongRow {
                    key: "{song.id}-{idx}",
                    song: song.clone(),
                    playing: current_id.as_deref() == Some(song.id.as_str()),
                    onclick: {
                        let playback = playback.clone();
                        let songs = songs.clone();
                        move |_| playback.play_queue(songs.clone(), idx)
                    },
                }
            }
        }
    }
}

#[component]
pub fn SongRow(song: Song, playing: bool, onclick: EventHandler<MouseEvent>) -> Element {
    let meta = match song.album.as_deref().filter(|album| !album.is_empty()) {
        Some(album) => format!("{} · {album}", song.artist_label()),
        None => song.artist_label().to_string(),
    };

    rsx! {
        div {
            class: if playing { "song-item playing" } else { "song-item" },
            onclick: move |evt| onclick.call(evt),
            CachedImage {
                cover_art: song.cover_art.clone(),
                alt: song.title.clone(),
                class: "song-thumb".to_string(),
                size: 100,
            }
            div { class: "song-info",
                div { class: "song-name", "{song.title}" }
                div { class: "song-meta", "{meta}" }
            }
            div { class: "song-dur", "{format_duration(song.duration)}" }
        }
    }
}

#[component]
pub fn AlbumCard(album: Album) -> Element {
    let playback = Playback::from_context();
    let artist = if album.artist.is_empty() { "—".to_string() } else { album.artist.clone() };

    rsx! {
        div {
            class: "album-card",
            onclick: {
                let id = album.id.clone();
                let name = album.name.clone();
                move |_| playback.play_album(id.clone(), name.clone())
            },
            div { class: "album-art",
                CachedImage {
                    cover_art: album.cover_art.clone(),
                    alt: album.name.clone(),
                    class: "album-cover".to_string(),
                    placeholder: "💿".to_string(),
                }
                div { class: "album-play-overlay",
                    Icon { name: "play".to_string(), class: "w-6 h-6".to_string() }
                }
            }
            div { class: "album-name", "{album.name}" }
            div { class: "album-artist", "{artist}" }
        }
    }
}

#[component]
pub fn ArtistRow(artist: Artist) -> Element {
    let albums = pluralize(artist.album_count as usize, "album");

    rsx! {
        div { class: "song-item",
            div { class: "song-thumb artist-avatar", "🎤" }
            div { class: "song-info",
                div { class: "song-name", "{artist.name}" }
                div { class: "song-meta", "{albums}" }
            }
            Icon { name: "chevron-right".to_string(), class: "w-4 h-4 text-dim".to_string() }
        }
    }
}

#[component]
pub fn EmptyState(
    icon: &'static str,
    title: String,
    #[props(default)] subtitle: String,
) -> Element {
    rsx! {
        div { class: "empty-state",
            div { class: "empty-state-icon", "{icon}" }
            div { class: "empty-state-title", "{title}" }
            if !subtitle.is_empty() {
                div { class: "empty-state-sub", "{subtitle}" }
            }
        }
    }
}

#[component]
pub fn LoadingSpinner(label: &'static str) -> Element {
    rsx! {
        div { class: "loading-spinner",
            div { class: "spinner" }
            div { class: "loading-text", "{label}" }
        }
    }
}
