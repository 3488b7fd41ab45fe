use super::{ArtistRow, EmptyState, LoadingSpinner, SongList};
use crate::components::{ClientSignal, Icon, Playback};
use crate::search::{debounced_search, SearchGeneration, SearchOutcome, SEARCH_DEBOUNCE_MS};
use dioxus::prelude::*;

#[derive(Clone, PartialEq)]
enum ResultsPane {
    Empty,
    Searching,
    Done(SearchOutcome),
}

fn artist_or_dash(artist: &str) -> &str {
    if artist.trim().is_empty() {
        "—"
    } else {
        artist
    }
}

#[component]
pub fn SearchView() -> Element {
    let client = use_context::<ClientSignal>().0;
    let playback = Playback::from_context();
    let generation = use_hook(SearchGeneration::default);
    let mut query = use_signal(String::new);
    let mut pane = use_signal(|| ResultsPane::Empty);

    let on_input = move |evt: FormEvent| {
        let text = evt.value();
        query.set(text.clone());
        let Some(client) = client.peek().clone() else {
            return;
        };
        if !text.trim().is_empty() {
            pane.set(ResultsPane::Searching);
        }
        let generation = generation.clone();
        spawn(async move {
            if let Some(outcome) =
                debounced_search(&client, &generation, &text, SEARCH_DEBOUNCE_MS).await
            {
                pane.set(match outcome {
                    SearchOutcome::Cleared => ResultsPane::Empty,
                    other => ResultsPane::Done(other),
                });
            }
        });
    };

    rsx! {
        div { class: "page",
            div { class: "search-box",
                Icon { name: "search".to_string(), class: "search-icon".to_string() }
                input {
                    class: "search-input",
                    r#type: "search",
                    placeholder: "Songs, albums, artists",
                    value: "{query}",
                    oninput: on_input,
                }
            }
            match pane() {
                ResultsPane::Empty => rsx! {},
                ResultsPane::Searching => rsx! {
                    LoadingSpinner { label: "Searching…" }
                },
                ResultsPane::Done(SearchOutcome::Results(found)) => rsx! {
                    if !found.artists.is_empty() {
                        h2 { class: "section-title", "Artists" }
                        div { class: "song-list",
                            for artist in found.artists {
                                ArtistRow { key: "{artist.id}", artist }
                            }
                        }
                    }
                    if !found.albums.is_empty() {
                        h2 { class: "section-title", "Albums" }
                        div { class: "song-list",
                            for album in found.albums {
                                div {
                                    key: "{album.id}",
                                    class: "song-item",
                                    onclick: {
                                        let playback = playback.clone();
                                        let id = album.id.clone();
                                        let name = album.name.clone();
                                        move |_| playback.play_album(id.clone(), name.clone())
                                    },
                                    div { class: "song-thumb", "💿" }
                                    div { class: "song-info",
                                        div { class: "song-name", "{album.name}" }
                                        div { class: "song-meta", "{artist_or_dash(&album.artist)}" }
                                    }
                                    Icon { name: "play".to_string(), class: "w-4 h-4 text-dim".to_string() }
                                }
                            }
                        }
                    }
                    if !found.songs.is_empty() {
                        h2 { class: "section-title", "Songs" }
                        SongList { songs: found.songs }
                    }
                },
                ResultsPane::Done(SearchOutcome::Failed(message)) => rsx! {
                    EmptyState { icon: "⚠️", title: "Search failed".to_string(), subtitle: message }
                },
                ResultsPane::Done(_) => rsx! {
                    EmptyState {
                        icon: "🔍",
                        title: "No results".to_string(),
                        subtitle: "Try a different search".to_string(),
                    }
                },
            }
        }
    }
}
