use super::queue::{PlayQueue, PreviousAction};
use crate::api::models::Song;
use crate::db::{AppSettings, RepeatMode};
use rand::Rng;
use std::collections::HashSet;

/// Delay before a track that failed to play is skipped.
pub const ERROR_SKIP_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteChange {
    Starred(String),
    Unstarred(String),
}

/// What the audio element should do once a track finishes.
#[derive(Debug, Clone, PartialEq)]
pub enum EndedAction {
    /// Seek to zero and play the same song again.
    Replay,
    /// Load and play this song.
    Advance(Song),
    Idle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EndedOutcome {
    pub action: EndedAction,
    /// The song that just finished; scrobbled as a submission.
    pub finished: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub queue: PlayQueue,
    pub playing: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub volume: f64,
    /// Seconds into the current track.
    pub progress: f64,
    pub duration: f64,
    pub favorites: HashSet<String>,
    /// Ids whose server-side star has already been folded into `favorites`.
    /// Later local toggles win over the flag on the queued song.
    starred_seen: HashSet<String>,
    /// Bumped every time a track (re)starts from the top, so the same song
    /// selected twice still reloads.
    pub loads: u64,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            queue: PlayQueue::new(),
            playing: false,
            shuffle: false,
            repeat: RepeatMode::Off,
            volume: 0.8,
            progress: 0.0,
            duration: 0.0,
            favorites: HashSet::new(),
            starred_seen: HashSet::new(),
            loads: 0,
        }
    }
}

impl PlayerState {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            shuffle: settings.shuffle_enabled,
            repeat: settings.repeat_mode,
            volume: settings.volume.clamp(0.0, 1.0),
            ..Self::default()
        }
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.queue.current()
    }

    fn started(&mut self) -> Option<Song> {
        let song = self.queue.current().cloned()?;
        if song.starred.is_some() && self.starred_seen.insert(song.id.clone()) {
            self.favorites.insert(song.id.clone());
        }
        self.progress = 0.0;
        self.duration = f64::from(song.duration);
        self.playing = true;
        self.loads += 1;
        Some(song)
    }

    pub fn load_queue<R: Rng + ?Sized>(
        &mut self,
        songs: Vec<Song>,
        start: usize,
        rng: &mut R,
    ) -> Option<Song> {
        self.queue.load(songs, start, self.shuffle, rng)?;
        self.started()
    }

    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Song> {
        self.queue.next(self.shuffle, rng)?;
        self.started()
    }

    /// Returns the song to load, or `None` when the current track should just
    /// restart (or nothing is queued).
    pub fn previous(&mut self, position_secs: f64) -> (PreviousAction, Option<Song>) {
        match self.queue.previous(position_secs) {
            PreviousAction::Moved => (PreviousAction::Moved, self.started()),
            PreviousAction::Restart => {
                self.progress = 0.0;
                (PreviousAction::Restart, None)
            }
            PreviousAction::Empty => (PreviousAction::Empty, None),
        }
    }

    pub fn jump(&mut self, idx: usize) -> Option<Song> {
        self.queue.jump(idx)?;
        self.started()
    }

    pub fn toggle_play(&mut self) -> bool {
        if self.queue.current().is_some() {
            self.playing = !self.playing;
        }
        self.playing
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.shuffle
    }

    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.next();
        self.repeat
    }

    pub fn is_favorite(&self, song_id: &str) -> bool {
        self.favorites.contains(song_id)
    }

    pub fn toggle_favorite(&mut self) -> Option<FavoriteChange> {
        let id = self.queue.current()?.id.clone();
        self.starred_seen.insert(id.clone());
        if self.favorites.remove(&id) {
            Some(FavoriteChange::Unstarred(id))
        } else {
            self.favorites.insert(id.clone());
            Some(FavoriteChange::Starred(id))
        }
    }

    /// Undoes a favorite flip whose server call failed.
    pub fn revert_favorite(&mut self, change: &FavoriteChange) {
        match change {
            FavoriteChange::Starred(id) => {
                self.favorites.remove(id);
            }
            FavoriteChange::Unstarred(id) => {
                self.favorites.insert(id.clone());
            }
        }
    }

    pub fn set_volume(&mut self, ratio: f64) -> f64 {
        self.volume = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            self.volume
        };
        self.volume
    }

    /// Position in seconds for a click at `ratio` across the progress bar.
    pub fn seek_ratio(&mut self, ratio: f64, duration: f64) -> f64 {
        let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        self.progress = ratio * duration;
        self.progress
    }

    pub fn update_progress(&mut self, position: f64, duration: f64) {
        if position.is_finite() {
            self.progress = position.max(0.0);
        }
        if duration.is_finite() && duration > 0.0 {
            self.duration = duration;
        }
    }

    /// Percentage for the progress bar, 0 when the duration is unknown.
    pub fn progress_percent(&self) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.progress / self.duration * 100.0).clamp(0.0, 100.0)
    }

    /// Song id to report as "now playing".
    pub fn on_track_started(&self) -> Option<String> {
        self.queue.current().map(|song| song.id.clone())
    }

    /// Marks the current track as failed. Returns the ticket to hand to
    /// [`skip_failed`](Self::skip_failed) after [`ERROR_SKIP_DELAY_MS`].
    pub fn playback_failed(&mut self) -> Option<u64> {
        self.queue.current()?;
        self.playing = false;
        Some(self.loads)
    }

    /// Skips past a failed track, unless another track (or the same one
    /// again) was started since the failure.
    pub fn skip_failed<R: Rng + ?Sized>(&mut self, ticket: u64, rng: &mut R) -> Option<Song> {
        if ticket != self.loads {
            return None;
        }
        self.next(rng)
    }

    pub fn on_ended<R: Rng + ?Sized>(&mut self, rng: &mut R) -> EndedOutcome {
        let finished = self.queue.current().map(|song| song.id.clone());
        let action = if finished.is_none() {
            self.playing = false;
            EndedAction::Idle
        } else if self.repeat == RepeatMode::One {
            self.progress = 0.0;
            EndedAction::Replay
        } else {
            match self.next(rng) {
                Some(song) => EndedAction::Advance(song),
                None => EndedAction::Idle,
            }
        };
        EndedOutcome { action, finished }
    }

    pub fn stop(&mut self) {
        self.queue.clear();
        self.playing = false;
        self.progress = 0.0;
        self.duration = 0.0;
    }
}
