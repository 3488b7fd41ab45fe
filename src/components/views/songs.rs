use super::{LibraryData, Loadable, LoadFailed, LoadingSpinner, SongList};
use crate::components::ClientSignal;
use crate::library::load_songs;
use dioxus::prelude::*;

#[component]
pub fn SongsView() -> Element {
    let client = use_context::<ClientSignal>().0;
    let library = use_context::<LibraryData>();
    let mut flags = library.flags;
    let mut songs = library.songs;

    use_effect(move || {
        if flags().songs {
            return;
        }
        let Some(client) = client() else {
            return;
        };
        flags.write().songs = true;
        songs.set(Loadable::Loading);
        spawn(async move {
            songs.set(match load_songs(&client).await {
                Ok(list) => Loadable::Ready(list),
                Err(err) => Loadable::Failed(err.to_string()),
            });
        });
    });

    rsx! {
        div { class: "page",
            h2 { class: "section-title", "Songs" }
            match songs() {
                Loadable::Ready(list) => rsx! {
                    SongList { songs: list }
                },
                Loadable::Failed(message) => rsx! {
                    LoadFailed { message }
                },
                _ => rsx! {
                    LoadingSpinner { label: "Loading songs…" }
                },
            }
        }
    }
}
