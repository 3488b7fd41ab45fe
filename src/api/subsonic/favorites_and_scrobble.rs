// Write-side calls: favorites and play reporting.
use super::SubsonicClient;
use crate::error::Result;

impl SubsonicClient {
    pub async fn star(&self, song_id: &str) -> Result<()> {
        self.call("star", &[("id", song_id)]).await.map(|_| ())
    }

    pub async fn unstar(&self, song_id: &str) -> Result<()> {
        self.call("unstar", &[("id", song_id)]).await.map(|_| ())
    }

    /// `submission = false` reports "now playing", `true` a finished play.
    pub async fn scrobble(&self, song_id: &str, submission: bool) -> Result<()> {
        let submission = if submission { "true" } else { "false" };
        self.call("scrobble", &[("id", song_id), ("submission", submission)])
            .await
            .map(|_| ())
    }
}
