//! Login, auto-login and disconnect.

use crate::api::models::ServerConfig;
use crate::api::transport::Transport;
use crate::api::SubsonicClient;
use crate::cache::now_ms;
use crate::db::{self, StoredSession};
use crate::error::{ApiError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;
use tracing::{info, warn};

/// Trims, drops one trailing slash and defaults the scheme to `http://`.
pub fn normalize_server_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

/// `base64("{user}:{millis}")`, stored as proof of a past successful login.
pub fn session_token(username: &str, millis: i64) -> String {
    STANDARD.encode(format!("{username}:{millis}"))
}

/// Message shown under the login form.
pub fn login_error_message(err: &ApiError) -> String {
    match err {
        ApiError::MissingFields => err.to_string(),
        other => format!("Connection failed: {other}"),
    }
}

fn server_config(server: &str, username: &str, password: &str) -> Result<ServerConfig> {
    if server.trim().is_empty() || username.trim().is_empty() || password.is_empty() {
        return Err(ApiError::MissingFields);
    }
    let url = normalize_server_url(server);
    reqwest::Url::parse(&url).map_err(|e| ApiError::InvalidServer(e.to_string()))?;
    Ok(ServerConfig::new(url, username.trim().to_string(), password.to_string()))
}

/// Validates the form and pings the server through `transport`.
pub async fn connect_with_transport(
    server: &str,
    username: &str,
    password: &str,
    transport: Arc<dyn Transport>,
) -> Result<SubsonicClient> {
    let config = server_config(server, username, password)?;
    let client = SubsonicClient::with_transport(config, transport);
    client.ping().await?;
    Ok(client)
}

/// Validates the form and pings the server through the offline cache.
pub async fn connect(server: &str, username: &str, password: &str) -> Result<SubsonicClient> {
    let config = server_config(server, username, password)?;
    let client = SubsonicClient::new(config);
    client.ping().await?;
    Ok(client)
}

/// What gets persisted after a successful login.
pub fn stored_session(client: &SubsonicClient) -> StoredSession {
    StoredSession {
        server: client.server.url.clone(),
        username: client.server.username.clone(),
        password: client.server.password.clone(),
        session_token: session_token(&client.server.username, now_ms()),
    }
}

/// Connects and persists the credentials. A storage failure does not fail
/// the login; the session just will not survive a reload.
pub async fn login(server: &str, username: &str, password: &str) -> Result<SubsonicClient> {
    let client = connect(server, username, password).await?;
    if let Err(err) = db::save_session(&stored_session(&client)) {
        warn!("session not persisted: {err}");
    }
    info!(server = %client.server.host(), "connected");
    Ok(client)
}

/// Rebuilds a client from stored credentials, or `None` when they are
/// incomplete or the server rejects them.
pub async fn restore_from(stored: &StoredSession) -> Option<SubsonicClient> {
    if !stored.is_complete() {
        return None;
    }
    match connect(&stored.server, &stored.username, &stored.password).await {
        Ok(client) => Some(client),
        Err(err) => {
            warn!("auto-login failed: {err}");
            None
        }
    }
}

pub async fn restore() -> Option<SubsonicClient> {
    let stored = db::load_session()?;
    restore_from(&stored).await
}

/// Forgets the stored session.
pub fn disconnect() {
    if let Err(err) = db::clear_all() {
        warn!("stored session not cleared: {err}");
    }
    info!("disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_urls_are_normalized() {
        assert_eq!(normalize_server_url(" music.local:4533/ "), "http://music.local:4533");
        assert_eq!(normalize_server_url("https://music.example.com"), "https://music.example.com");
        assert_eq!(normalize_server_url("http://host//"), "http://host/");
    }

    #[test]
    fn session_token_encodes_user_and_time() {
        let token = session_token("alice", 1_700_000_000_000);
        let decoded = String::from_utf8(STANDARD.decode(token).unwrap()).unwrap();
        assert_eq!(decoded, "alice:1700000000000");
    }

    #[test]
    fn empty_fields_are_rejected_before_any_request() {
        assert_eq!(server_config("", "alice", "pw").unwrap_err(), ApiError::MissingFields);
        assert_eq!(server_config("host", " ", "pw").unwrap_err(), ApiError::MissingFields);
        assert_eq!(server_config("host", "alice", "").unwrap_err(), ApiError::MissingFields);
    }

    #[test]
    fn login_errors_are_prefixed() {
        assert_eq!(
            login_error_message(&ApiError::MissingFields),
            "Please fill in all fields"
        );
        let err = ApiError::Subsonic {
            code: 40,
            message: "Wrong username or password".to_string(),
        };
        assert_eq!(
            login_error_message(&err),
            "Connection failed: Wrong username or password"
        );
    }
}
