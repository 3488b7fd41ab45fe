use super::{ArtistRow, EmptyState, LibraryData, Loadable, LoadFailed, LoadingSpinner};
use crate::components::ClientSignal;
use crate::library::{load_artists, ARTIST_ROW};
use crate::utils::initial;
use dioxus::prelude::*;

#[component]
pub fn ArtistsView() -> Element {
    let client = use_context::<ClientSignal>().0;
    let library = use_context::<LibraryData>();
    let mut flags = library.flags;
    let mut artists = library.artists;

    use_effect(move || {
        if flags().artists {
            return;
        }
        let Some(client) = client() else {
            return;
        };
        flags.write().artists = true;
        artists.set(Loadable::Loading);
        spawn(async move {
            artists.set(match load_artists(&client).await {
                Ok(list) => Loadable::Ready(list),
                Err(err) => Loadable::Failed(err.to_string()),
            });
        });
    });

    rsx! {
        div { class: "page",
            match artists() {
                Loadable::Ready(list) if list.is_empty() => rsx! {
                    EmptyState { icon: "🎤", title: "No artists found".to_string() }
                },
                Loadable::Ready(list) => rsx! {
                    div { class: "artists-row",
                        for artist in list.iter().take(ARTIST_ROW).cloned() {
                            div { key: "chip-{artist.id}", class: "artist-chip",
                                div { class: "artist-avatar", "{initial(&artist.name)}" }
                                div { class: "artist-chip-name", "{artist.name}" }
                            }
                        }
                    }
                    h2 { class: "section-title", "All artists" }
                    div { class: "song-list",
                        for artist in list {
                            ArtistRow { key: "{artist.id}", artist }
                        }
                    }
                },
                Loadable::Failed(message) => rsx! {
                    LoadFailed { message }
                },
                _ => rsx! {
                    LoadingSpinner { label: "Loading artists…" }
                },
            }
        }
    }
}
