use super::{AlbumCard, LibraryData, Loadable, LoadFailed, LoadingSpinner, SongList};
use crate::api::transport::HttpTransport;
use crate::components::ClientSignal;
use crate::library::{cache_album_art, load_home};
use crate::offline;
use dioxus::prelude::*;

#[component]
pub fn HomeView() -> Element {
    let client = use_context::<ClientSignal>().0;
    let library = use_context::<LibraryData>();
    let mut flags = library.flags;
    let mut home = library.home;

    use_effect(move || {
        if flags().home {
            return;
        }
        let Some(client) = client() else {
            return;
        };
        flags.write().home = true;
        home.set(Loadable::Loading);
        spawn(async move {
            match load_home(&client).await {
                Ok(data) => {
                    let albums = data.recent_albums.clone();
                    home.set(Loadable::Ready(data));
                    cache_album_art(&offline::shared(), &HttpTransport, &client, &albums).await;
                }
                Err(err) => {
                    tracing::error!("home load failed: {err}");
                    home.set(Loadable::Failed(err.to_string()));
                }
            }
        });
    });

    rsx! {
        div { class: "page",
            match home() {
                Loadable::Ready(data) => rsx! {
                    section {
                        h2 { class: "section-title", "Recently added" }
                        div { class: "album-row",
                            for album in data.recent_albums {
                                AlbumCard { key: "{album.id}", album }
                            }
                        }
                    }
                    section {
                        h2 { class: "section-title", "Quick picks" }
                        SongList { songs: data.quick_picks }
                    }
                },
                Loadable::Failed(message) => rsx! {
                    LoadFailed { message }
                },
                _ => rsx! {
                    LoadingSpinner { label: "Loading your library…" }
                },
            }
        }
    }
}
