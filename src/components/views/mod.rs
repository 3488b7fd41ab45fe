mod albums;
mod artists;
mod home;
mod rows;
mod search;
mod songs;

pub use albums::AlbumsView;
pub use artists::ArtistsView;
pub use home::HomeView;
pub use rows::*;
pub use search::SearchView;
pub use songs::SongsView;

use crate::api::models::{Album, Artist, Song};
use crate::library::{HomeData, LoadedFlags};
use dioxus::prelude::*;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loadable<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

/// Tab data kept across tab switches.
#[derive(Clone, Copy)]
pub struct LibraryData {
    pub flags: Signal<LoadedFlags>,
    pub home: Signal<Loadable<HomeData>>,
    pub songs: Signal<Loadable<Vec<Song>>>,
    pub albums: Signal<Loadable<Vec<Album>>>,
    pub artists: Signal<Loadable<Vec<Artist>>>,
}

impl LibraryData {
    pub fn new() -> Self {
        Self {
            flags: Signal::new(LoadedFlags::default()),
            home: Signal::new(Loadable::Idle),
            songs: Signal::new(Loadable::Idle),
            albums: Signal::new(Loadable::Idle),
            artists: Signal::new(Loadable::Idle),
        }
    }

    /// Drops the loaded flags so each tab refetches when next shown.
    pub fn invalidate(&self) {
        let mut flags = self.flags;
        flags.write().reset();
    }

    pub fn clear(&self) {
        self.invalidate();
        let (mut home, mut songs, mut albums, mut artists) =
            (self.home, self.songs, self.albums, self.artists);
        home.set(Loadable::Idle);
        songs.set(Loadable::Idle);
        albums.set(Loadable::Idle);
        artists.set(Loadable::Idle);
    }
}

#[component]
pub fn LoadFailed(message: String) -> Element {
    rsx! {
        EmptyState { icon: "⚠️", title: "Load failed".to_string(), subtitle: message }
    }
}
