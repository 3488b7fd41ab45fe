use crate::api::models::Song;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Within this many seconds of the start, "previous" moves to the prior
/// track; past it, the current track restarts.
pub const RESTART_THRESHOLD_SECS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviousAction {
    /// Seek the current track back to zero.
    Restart,
    /// The index moved; play the new current song.
    Moved,
    /// Nothing queued.
    Empty,
}

/// Ordered play queue. The index is `None` only while the queue is empty and
/// every move wraps with modulo arithmetic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayQueue {
    songs: Vec<Song>,
    index: Option<usize>,
}

impl PlayQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the queue. Empty input is ignored. With shuffle on the start
    /// position is random.
    pub fn load<R: Rng + ?Sized>(
        &mut self,
        songs: Vec<Song>,
        start: usize,
        shuffle: bool,
        rng: &mut R,
    ) -> Option<&Song> {
        if songs.is_empty() {
            return None;
        }
        let len = songs.len();
        self.songs = songs;
        self.index = Some(if shuffle {
            rng.gen_range(0..len)
        } else {
            start.min(len - 1)
        });
        self.current()
    }

    pub fn next<R: Rng + ?Sized>(&mut self, shuffle: bool, rng: &mut R) -> Option<&Song> {
        let len = self.songs.len();
        if len == 0 {
            return None;
        }
        let next = if shuffle {
            rng.gen_range(0..len)
        } else {
            self.index.map(|i| (i + 1) % len).unwrap_or(0)
        };
        self.index = Some(next);
        self.current()
    }

    pub fn previous(&mut self, position_secs: f64) -> PreviousAction {
        let len = self.songs.len();
        if len == 0 {
            return PreviousAction::Empty;
        }
        if position_secs > RESTART_THRESHOLD_SECS {
            return PreviousAction::Restart;
        }
        let current = self.index.unwrap_or(0);
        self.index = Some((current + len - 1) % len);
        PreviousAction::Moved
    }

    /// Moves to `idx` when it is in range.
    pub fn jump(&mut self, idx: usize) -> Option<&Song> {
        if idx >= self.songs.len() {
            return None;
        }
        self.index = Some(idx);
        self.current()
    }

    pub fn current(&self) -> Option<&Song> {
        self.index.and_then(|i| self.songs.get(i))
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn total_duration(&self) -> u32 {
        self.songs.iter().map(|song| song.duration).sum()
    }

    pub fn clear(&mut self) {
        self.songs.clear();
        self.index = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn songs(n: usize) -> Vec<Song> {
        (0..n)
            .map(|i| Song {
                id: format!("s{i}"),
                title: format!("Song {i}"),
                duration: 60,
                ..Song::default()
            })
            .collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn load_ignores_empty_input() {
        let mut queue = PlayQueue::new();
        queue.load(songs(2), 1, false, &mut rng());
        assert!(queue.load(Vec::new(), 0, false, &mut rng()).is_none());
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.index(), Some(1));
    }

    #[test]
    fn load_clamps_start_into_range() {
        let mut queue = PlayQueue::new();
        let current = queue.load(songs(3), 10, false, &mut rng()).cloned();
        assert_eq!(current.map(|s| s.id), Some("s2".to_string()));
    }

    #[test]
    fn shuffled_load_starts_somewhere_in_range() {
        let mut rng = rng();
        for _ in 0..50 {
            let mut queue = PlayQueue::new();
            queue.load(songs(4), 0, true, &mut rng);
            assert!(queue.index().unwrap() < 4);
        }
    }

    #[test]
    fn next_wraps_to_the_start() {
        let mut queue = PlayQueue::new();
        queue.load(songs(3), 2, false, &mut rng());
        assert_eq!(queue.next(false, &mut rng()).unwrap().id, "s0");
        assert_eq!(queue.next(false, &mut rng()).unwrap().id, "s1");
    }

    #[test]
    fn previous_wraps_to_the_end() {
        let mut queue = PlayQueue::new();
        queue.load(songs(3), 0, false, &mut rng());
        assert_eq!(queue.previous(0.5), PreviousAction::Moved);
        assert_eq!(queue.current().unwrap().id, "s2");
    }

    #[test]
    fn previous_past_threshold_restarts() {
        let mut queue = PlayQueue::new();
        queue.load(songs(3), 1, false, &mut rng());
        assert_eq!(queue.previous(3.5), PreviousAction::Restart);
        assert_eq!(queue.index(), Some(1));
        assert_eq!(queue.previous(3.0), PreviousAction::Moved);
        assert_eq!(queue.index(), Some(0));
    }

    #[test]
    fn navigation_on_empty_queue_is_a_no_op() {
        let mut queue = PlayQueue::new();
        assert!(queue.next(false, &mut rng()).is_none());
        assert_eq!(queue.previous(0.0), PreviousAction::Empty);
        assert!(queue.jump(0).is_none());
        assert_eq!(queue.index(), None);
    }

    #[test]
    fn jump_rejects_out_of_range_indices() {
        let mut queue = PlayQueue::new();
        queue.load(songs(2), 0, false, &mut rng());
        assert!(queue.jump(5).is_none());
        assert_eq!(queue.index(), Some(0));
        assert_eq!(queue.jump(1).unwrap().id, "s1");
    }

    #[test]
    fn total_duration_sums_tracks() {
        let mut queue = PlayQueue::new();
        queue.load(songs(3), 0, false, &mut rng());
        assert_eq!(queue.total_duration(), 180);
    }
}
