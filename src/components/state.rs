use crate::api::models::Song;
use crate::api::SubsonicClient;
use crate::db::{save_settings, AppSettings};
use crate::notify::{Toast, ToastSlot, TOAST_DURATION_MS};
use crate::player::{
    album_queue, report_finished, report_now_playing, sync_favorite, EndedAction, FavoriteChange,
    PlayerState, PreviousAction, ERROR_SKIP_DELAY_MS,
};
use crate::utils::sleep_ms;
use dioxus::prelude::*;
use tracing::warn;

/// The connected client, `None` while the login screen is shown.
#[derive(Clone, Copy)]
pub struct ClientSignal(pub Signal<Option<SubsonicClient>>);

#[derive(Clone, Copy)]
pub struct PlayerSignal(pub Signal<PlayerState>);

/// Position (seconds) the audio element should jump to.
#[derive(Clone, Copy)]
pub struct SeekRequestSignal(pub Signal<Option<f64>>);

/// Whether the full-screen player is open.
#[derive(Clone, Copy)]
pub struct FullPlayerSignal(pub Signal<bool>);

#[derive(Clone, Copy)]
pub struct QueueOpenSignal(pub Signal<bool>);

#[derive(Clone, Copy)]
pub struct SettingsOpenSignal(pub Signal<bool>);

#[derive(Clone, Copy)]
pub struct OnlineSignal(pub Signal<bool>);

#[derive(Clone)]
pub struct Toaster {
    current: Signal<Option<Toast>>,
    slot: ToastSlot,
}

impl Toaster {
    pub fn new(current: Signal<Option<Toast>>) -> Self {
        Self {
            current,
            slot: ToastSlot::default(),
        }
    }

    pub fn current(&self) -> Option<Toast> {
        (self.current)()
    }

    pub fn show(&self, message: impl Into<String>) {
        let toast = self.slot.show(message);
        let id = toast.id;
        let mut current = self.current;
        current.set(Some(toast));

        let slot = self.slot.clone();
        spawn(async move {
            sleep_ms(TOAST_DURATION_MS).await;
            if slot.should_hide(id) {
                current.set(None);
            }
        });
    }
}

/// Playback actions shared by every view. Mutates the player state, then
/// reports to the server in the background.
#[derive(Clone)]
pub struct Playback {
    player: Signal<PlayerState>,
    client: Signal<Option<SubsonicClient>>,
    seek: Signal<Option<f64>>,
    settings: Signal<AppSettings>,
    toaster: Toaster,
}

impl Playback {
    pub fn from_context() -> Self {
        Self {
            player: use_context::<PlayerSignal>().0,
            client: use_context::<ClientSignal>().0,
            seek: use_context::<SeekRequestSignal>().0,
            settings: use_context::<Signal<AppSettings>>(),
            toaster: use_context::<Toaster>(),
        }
    }

    fn client(&self) -> Option<SubsonicClient> {
        self.client.peek().clone()
    }

    fn started(&self, song: Option<Song>) {
        let (Some(song), Some(client)) = (song, self.client()) else {
            return;
        };
        spawn(async move {
            report_now_playing(&client, &song.id).await;
        });
    }

    pub fn play_queue(&self, songs: Vec<Song>, start: usize) {
        let mut player = self.player;
        let song = player
            .write()
            .load_queue(songs, start, &mut rand::thread_rng());
        self.started(song);
    }

    pub fn play_album(&self, album_id: String, name: String) {
        let Some(client) = self.client() else {
            return;
        };
        self.toaster.show(format!("▶ Loading {name}…"));
        let playback = self.clone();
        spawn(async move {
            match album_queue(&client, &album_id).await {
                Ok(songs) => playback.play_queue(songs, 0),
                Err(crate::error::ApiError::EmptyAlbum) => {
                    playback.toaster.show("No songs in album")
                }
                Err(err) => playback.toaster.show(format!("⚠ {err}")),
            }
        });
    }

    pub fn toggle_play(&self) {
        let mut player = self.player;
        player.write().toggle_play();
    }

    pub fn next(&self) {
        let mut player = self.player;
        let song = player.write().next(&mut rand::thread_rng());
        self.started(song);
    }

    pub fn previous(&self) {
        let mut player = self.player;
        let position = player.peek().progress;
        let (action, song) = player.write().previous(position);
        match action {
            PreviousAction::Restart => self.seek.clone().set(Some(0.0)),
            PreviousAction::Moved => self.started(song),
            PreviousAction::Empty => {}
        }
    }

    pub fn jump(&self, idx: usize) {
        let mut player = self.player;
        let song = player.write().jump(idx);
        self.started(song);
    }

    pub fn toggle_shuffle(&self) {
        let mut player = self.player;
        let shuffle = player.write().toggle_shuffle();
        self.persist(|settings| settings.shuffle_enabled = shuffle);
        self.toaster
            .show(if shuffle { "🔀 Shuffle on" } else { "🔀 Shuffle off" });
    }

    pub fn cycle_repeat(&self) {
        let mut player = self.player;
        let repeat = player.write().cycle_repeat();
        self.persist(|settings| settings.repeat_mode = repeat);
        let icon = if repeat == crate::db::RepeatMode::One { "🔂" } else { "🔁" };
        self.toaster.show(format!("{icon} {}", repeat.label()));
    }

    pub fn set_volume(&self, ratio: f64) {
        let mut player = self.player;
        let volume = player.write().set_volume(ratio);
        self.persist(|settings| settings.volume = volume);
    }

    pub fn seek_ratio(&self, ratio: f64) {
        let mut player = self.player;
        let duration = player.peek().duration;
        let position = player.write().seek_ratio(ratio, duration);
        self.seek.clone().set(Some(position));
    }

    pub fn toggle_favorite(&self) {
        let mut player = self.player;
        let Some(change) = player.write().toggle_favorite() else {
            return;
        };
        self.toaster.show(match change {
            FavoriteChange::Starred(_) => "❤️ Added to favorites",
            FavoriteChange::Unstarred(_) => "💔 Removed from favorites",
        });
        let Some(client) = self.client() else {
            return;
        };
        let toaster = self.toaster.clone();
        spawn(async move {
            if let Err(err) = sync_favorite(&client, &change).await {
                warn!("favorite not saved: {err}");
                player.write().revert_favorite(&change);
                toaster.show("⚠ Failed to update favorite");
            }
        });
    }

    /// Called from the audio element's `ended` event.
    pub fn track_ended(&self) {
        let mut player = self.player;
        let outcome = player.write().on_ended(&mut rand::thread_rng());
        match outcome.action {
            EndedAction::Replay => self.seek.clone().set(Some(0.0)),
            EndedAction::Advance(song) => self.started(Some(song)),
            EndedAction::Idle => {}
        }
        if let (Some(finished), Some(client)) = (outcome.finished, self.client()) {
            spawn(async move {
                report_finished(&client, &finished).await;
            });
        }
    }

    /// Called from the audio element's `error` event: skip after a pause,
    /// unless a track was started in the meantime.
    pub fn playback_failed(&self) {
        let mut player = self.player;
        let Some(ticket) = player.write().playback_failed() else {
            return;
        };
        self.toaster.show("⚠ Stream error, trying next");
        let playback = self.clone();
        spawn(async move {
            sleep_ms(ERROR_SKIP_DELAY_MS).await;
            let song = player
                .write()
                .skip_failed(ticket, &mut rand::thread_rng());
            playback.started(song);
        });
    }

    fn persist(&self, update: impl FnOnce(&mut AppSettings)) {
        let mut settings = self.settings;
        update(&mut settings.write());
        let saved = save_settings(&settings.peek());
        if let Err(err) = saved {
            warn!("settings not saved: {err}");
        }
    }
}
