use crate::error::StorageError;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "cauzify.app_settings";
#[cfg(target_arch = "wasm32")]
const SESSION_KEY: &str = "cauzify.session";

#[cfg(not(target_arch = "wasm32"))]
const SETTINGS_ROW: &str = "app_settings";
#[cfg(not(target_arch = "wasm32"))]
const SESSION_ROW: &str = "session";

/// Repeat mode for playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RepeatMode {
    #[default]
    Off,
    All,
    One,
}

impl RepeatMode {
    /// Off → All → One → Off.
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "Repeat off",
            Self::All => "Repeat all",
            Self::One => "Repeat one",
        }
    }
}

/// App settings stored next to the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub volume: f64,
    #[serde(default)]
    pub shuffle_enabled: bool,
    #[serde(default)]
    pub repeat_mode: RepeatMode,
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
}

fn default_cache_enabled() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            volume: 0.8,
            shuffle_enabled: false,
            repeat_mode: RepeatMode::Off,
            cache_enabled: default_cache_enabled(),
        }
    }
}

/// Credentials kept for auto-login. The password is stored because every
/// request re-derives its token from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StoredSession {
    pub server: String,
    pub username: String,
    pub password: String,
    pub session_token: String,
}

impl StoredSession {
    /// Auto-login needs all four values.
    pub fn is_complete(&self) -> bool {
        [
            &self.server,
            &self.username,
            &self.password,
            &self.session_token,
        ]
        .iter()
        .all(|value| !value.trim().is_empty())
    }
}

/// Key/value store backing native persistence.
#[cfg(not(target_arch = "wasm32"))]
pub struct Database {
    conn: rusqlite::Connection,
}

#[cfg(not(target_arch = "wasm32"))]
impl Database {
    pub fn open(path: &std::path::Path) -> Result<Self, StorageError> {
        Self::initialize(rusqlite::Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::initialize(rusqlite::Connection::open_in_memory()?)
    }

    /// The database in the platform data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        let dir = dirs::data_dir()
            .ok_or_else(|| StorageError::Unavailable("no data directory".to_string()))?
            .join("cauzify");
        std::fs::create_dir_all(&dir).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Self::open(&dir.join("cauzify.db"))
    }

    fn initialize(conn: rusqlite::Connection) -> Result<Self, StorageError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self { conn })
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        use rusqlite::OptionalExtension;

        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                [key],
                |row: &rusqlite::Row| row.get(0),
            )
            .optional()?;
        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            [key, json.as_str()],
        )?;
        Ok(())
    }

    pub fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        self.set_json(SETTINGS_ROW, settings)
    }

    pub fn load_settings(&self) -> Result<AppSettings, StorageError> {
        Ok(self.get_json(SETTINGS_ROW)?.unwrap_or_default())
    }

    pub fn save_session(&self, session: &StoredSession) -> Result<(), StorageError> {
        self.set_json(SESSION_ROW, session)
    }

    pub fn load_session(&self) -> Result<Option<StoredSession>, StorageError> {
        self.get_json(SESSION_ROW)
    }

    /// Forgets everything, settings included.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.conn.execute("DELETE FROM settings", [])?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_settings(settings: &AppSettings) -> Result<(), StorageError> {
    Database::open_default()?.save_settings(settings)
}

#[cfg(target_arch = "wasm32")]
pub fn save_settings(settings: &AppSettings) -> Result<(), StorageError> {
    LocalStorage::set(SETTINGS_KEY, settings).map_err(|e| StorageError::Unavailable(e.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_settings() -> AppSettings {
    match Database::open_default().and_then(|db| db.load_settings()) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("settings not loaded: {err}");
            AppSettings::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn load_settings() -> AppSettings {
    LocalStorage::get(SETTINGS_KEY).unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_session(session: &StoredSession) -> Result<(), StorageError> {
    Database::open_default()?.save_session(session)
}

#[cfg(target_arch = "wasm32")]
pub fn save_session(session: &StoredSession) -> Result<(), StorageError> {
    LocalStorage::set(SESSION_KEY, session).map_err(|e| StorageError::Unavailable(e.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_session() -> Option<StoredSession> {
    match Database::open_default().and_then(|db| db.load_session()) {
        Ok(session) => session,
        Err(err) => {
            tracing::warn!("session not loaded: {err}");
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn load_session() -> Option<StoredSession> {
    LocalStorage::get(SESSION_KEY).ok()
}

/// Clears every persisted value, like a storage wipe on disconnect.
#[cfg(not(target_arch = "wasm32"))]
pub fn clear_all() -> Result<(), StorageError> {
    Database::open_default()?.clear()
}

#[cfg(target_arch = "wasm32")]
pub fn clear_all() -> Result<(), StorageError> {
    LocalStorage::clear();
    Ok(())
}
