use super::{AlbumCard, EmptyState, LibraryData, Loadable, LoadFailed, LoadingSpinner};
use crate::components::ClientSignal;
use crate::library::load_albums;
use dioxus::prelude::*;

#[component]
pub fn AlbumsView() -> Element {
    let client = use_context::<ClientSignal>().0;
    let library = use_context::<LibraryData>();
    let mut flags = library.flags;
    let mut albums = library.albums;

    use_effect(move || {
        if flags().albums {
            return;
        }
        let Some(client) = client() else {
            return;
        };
        flags.write().albums = true;
        albums.set(Loadable::Loading);
        spawn(async move {
            albums.set(match load_albums(&client).await {
                Ok(list) => Loadable::Ready(list),
                Err(err) => Loadable::Failed(err.to_string()),
            });
        });
    });

    rsx! {
        div { class: "page",
            h2 { class: "section-title", "Albums" }
            match albums() {
                Loadable::Ready(list) if list.is_empty() => rsx! {
                    EmptyState { icon: "💿", title: "No albums found".to_string() }
                },
                Loadable::Ready(list) => rsx! {
                    div { class: "albums-grid",
                        for album in list {
                            AlbumCard { key: "{album.id}", album }
                        }
                    }
                },
                Loadable::Failed(message) => rsx! {
                    LoadFailed { message }
                },
                _ => rsx! {
                    LoadingSpinner { label: "Loading albums…" }
                },
            }
        }
    }
}
