mod controls;
mod queue_sheet;

pub use controls::{SeekBar, TransportControls, VolumeSlider};
pub use queue_sheet::QueueSheet;

use crate::components::{
    CachedImage, FullPlayerSignal, Icon, Playback, PlayerSignal, QueueOpenSignal,
};
use dioxus::prelude::*;

/// Compact bar above the bottom navigation. Hidden until something plays.
#[component]
pub fn PlayerBar() -> Element {
    let playback = Playback::from_context();
    let player = use_context::<PlayerSignal>().0;
    let mut full_open = use_context::<FullPlayerSignal>().0;
    let state = player();
    let Some(song) = state.current_song().cloned() else {
        return rsx! {};
    };
    let progress = state.progress_percent();

    rsx! {
        div { class: "player-bar",
            div { class: "pbar-progress", style: "width: {progress}%" }
            div { class: "pbar-body", onclick: move |_| full_open.set(true),
                CachedImage {
                    cover_art: song.cover_art.clone(),
                    alt: "Album art".to_string(),
                    class: "pbar-thumb".to_string(),
                    size: 100,
                }
                div { class: "song-info",
                    div { class: "song-name", "{song.title}" }
                    div { class: "song-meta", "{song.artist_label()}" }
                }
            }
            button {
                class: "ctrl-btn play",
                aria_label: if state.playing { "Pause" } else { "Play" },
                onclick: {
                    let playback = playback.clone();
                    move |evt: MouseEvent| {
                        evt.stop_propagation();
                        playback.toggle_play();
                    }
                },
                Icon {
                    name: if state.playing { "pause".to_string() } else { "play".to_string() },
                    class: "w-5 h-5".to_string(),
                }
            }
            button {
                class: "ctrl-btn",
                aria_label: "Next",
                onclick: move |evt: MouseEvent| {
                    evt.stop_propagation();
                    playback.next();
                },
                Icon { name: "next".to_string(), class: "w-5 h-5".to_string() }
            }
        }
    }
}

#[component]
pub fn FullPlayer() -> Element {
    let playback = Playback::from_context();
    let player = use_context::<PlayerSignal>().0;
    let mut full_open = use_context::<FullPlayerSignal>().0;
    let mut queue_open = use_context::<QueueOpenSignal>().0;
    if !full_open() {
        return rsx! {};
    }
    let state = player();
    let Some(song) = state.current_song().cloned() else {
        return rsx! {};
    };
    let favorite = state.is_favorite(&song.id);

    rsx! {
        div { class: "player-screen open",
            header { class: "player-header",
                button {
                    class: "ctrl-btn",
                    aria_label: "Close player",
                    onclick: move |_| full_open.set(false),
                    Icon { name: "chevron-down".to_string(), class: "w-6 h-6".to_string() }
                }
                span { class: "player-header-title", "Now playing" }
                button {
                    class: "ctrl-btn",
                    aria_label: "Open queue",
                    onclick: move |_| queue_open.set(true),
                    Icon { name: "queue".to_string(), class: "w-5 h-5".to_string() }
                }
            }
            CachedImage {
                cover_art: song.cover_art.clone(),
                alt: "Album art".to_string(),
                class: "pfull-art".to_string(),
                placeholder: "💿".to_string(),
                size: 600,
            }
            div { class: "pfull-meta",
                div { class: "song-info",
                    div { class: "pfull-title", "{song.title}" }
                    div { class: "pfull-artist", "{song.artist_label()}" }
                }
                button {
                    class: if favorite { "ctrl-btn fav active" } else { "ctrl-btn fav" },
                    aria_label: "Favorite",
                    onclick: move |_| playback.toggle_favorite(),
                    Icon {
                        name: if favorite { "heart-filled".to_string() } else { "heart".to_string() },
                        class: "w-6 h-6".to_string(),
                    }
                }
            }
            SeekBar {}
            TransportControls { large: true }
            VolumeSlider {}
        }
    }
}
