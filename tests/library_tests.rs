//! Tab loaders, login and search against a mock Navidrome server.

use cauzify::api::models::ServerConfig;
use cauzify::api::transport::HttpTransport;
use cauzify::api::SubsonicClient;
use cauzify::error::ApiError;
use cauzify::library::{load_albums, load_home, load_songs};
use cauzify::search::{debounced_search, SearchGeneration, SearchOutcome};
use cauzify::session::{connect_with_transport, login_error_message};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SubsonicClient {
    SubsonicClient::with_transport(
        ServerConfig::new(server.uri(), "alice".to_string(), "sesame".to_string()),
        Arc::new(HttpTransport),
    )
}

fn ok(extra: Value) -> ResponseTemplate {
    let mut inner = json!({ "status": "ok", "version": "1.16.1" });
    if let (Some(inner), Some(extra)) = (inner.as_object_mut(), extra.as_object()) {
        inner.extend(extra.clone());
    }
    ResponseTemplate::new(200).set_body_json(json!({ "subsonic-response": inner }))
}

fn album_list(ids: &[String]) -> ResponseTemplate {
    let albums: Vec<Value> = ids
        .iter()
        .map(|id| json!({ "id": id, "name": format!("Album {id}"), "artist": "Various", "coverArt": id }))
        .collect();
    ok(json!({ "albumList2": { "album": albums } }))
}

fn album_with_songs(id: &str, count: usize) -> ResponseTemplate {
    let songs: Vec<Value> = (1..=count)
        .map(|n| json!({ "id": format!("{id}-s{n}"), "title": format!("Track {n}"), "duration": 180 }))
        .collect();
    ok(json!({ "album": { "id": id, "name": format!("Album {id}"), "song": songs } }))
}

fn ids(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("{prefix}{n}")).collect()
}

async fn mount_album(server: &MockServer, id: &str, count: usize) {
    Mock::given(path("/rest/getAlbum"))
        .and(query_param("id", id))
        .respond_with(album_with_songs(id, count))
        .mount(server)
        .await;
}

mod loaders {
    use super::*;

    #[tokio::test]
    async fn home_takes_two_songs_from_five_frequent_albums() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/getAlbumList2"))
            .and(query_param("type", "newest"))
            .and(query_param("size", "12"))
            .respond_with(album_list(&ids("new", 12)))
            .mount(&server)
            .await;
        Mock::given(path("/rest/getAlbumList2"))
            .and(query_param("type", "frequent"))
            .and(query_param("size", "8"))
            .respond_with(album_list(&ids("f", 8)))
            .mount(&server)
            .await;
        for id in ["f1", "f2", "f4", "f5"] {
            mount_album(&server, id, 3).await;
        }
        // f3 fails and contributes nothing; f6..f8 are never requested.
        Mock::given(path("/rest/getAlbum"))
            .and(query_param("id", "f3"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(path("/rest/getAlbum"))
            .and(query_param("id", "f6"))
            .respond_with(album_with_songs("f6", 3))
            .expect(0)
            .mount(&server)
            .await;

        let home = load_home(&client_for(&server)).await.expect("home");
        assert_eq!(home.recent_albums.len(), 12);
        let picks: Vec<&str> = home.quick_picks.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            picks,
            ["f1-s1", "f1-s2", "f2-s1", "f2-s2", "f4-s1", "f4-s2", "f5-s1", "f5-s2"]
        );
    }

    #[tokio::test]
    async fn home_fails_when_the_album_list_fails() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/getAlbumList2"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = load_home(&client_for(&server)).await.unwrap_err();
        assert_eq!(err, ApiError::Http(503));
    }

    #[tokio::test]
    async fn songs_come_from_the_first_eight_newest_albums_in_order() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/getAlbumList2"))
            .and(query_param("type", "newest"))
            .and(query_param("size", "30"))
            .respond_with(album_list(&ids("n", 10)))
            .mount(&server)
            .await;
        for n in 1..=8 {
            if n != 5 {
                mount_album(&server, &format!("n{n}"), 1).await;
            }
        }
        Mock::given(path("/rest/getAlbum"))
            .and(query_param("id", "n5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "subsonic-response": { "status": "failed", "error": { "code": 70, "message": "Album not found" } }
            })))
            .mount(&server)
            .await;
        Mock::given(path("/rest/getAlbum"))
            .and(query_param("id", "n9"))
            .respond_with(album_with_songs("n9", 1))
            .expect(0)
            .mount(&server)
            .await;

        let songs = load_songs(&client_for(&server)).await.expect("songs");
        let order: Vec<&str> = songs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            order,
            ["n1-s1", "n2-s1", "n3-s1", "n4-s1", "n6-s1", "n7-s1", "n8-s1"]
        );
    }

    #[tokio::test]
    async fn albums_tab_is_alphabetical() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/getAlbumList2"))
            .and(query_param("type", "alphabeticalByName"))
            .and(query_param("size", "50"))
            .respond_with(album_list(&ids("a", 3)))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(load_albums(&client_for(&server)).await.expect("albums").len(), 3);
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn empty_fields_never_reach_the_network() {
        let err = connect_with_transport("", "alice", "sesame", Arc::new(HttpTransport))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::MissingFields);
        assert_eq!(login_error_message(&err), "Please fill in all fields");
    }

    #[tokio::test]
    async fn rejected_credentials_read_as_connection_failed() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "subsonic-response": {
                    "status": "failed",
                    "error": { "code": 40, "message": "Wrong username or password" }
                }
            })))
            .mount(&server)
            .await;

        let err = connect_with_transport(&server.uri(), "alice", "nope", Arc::new(HttpTransport))
            .await
            .unwrap_err();
        assert_eq!(
            login_error_message(&err),
            "Connection failed: Wrong username or password"
        );
    }

    #[tokio::test]
    async fn trailing_slash_is_dropped_from_the_server_url() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/ping"))
            .and(query_param("u", "alice"))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let raw = format!("  {}/ ", server.uri());
        let client = connect_with_transport(&raw, " alice ", "sesame", Arc::new(HttpTransport))
            .await
            .expect("connected");
        assert_eq!(client.server.url, server.uri());
        assert_eq!(client.server.username, "alice");
    }
}

mod search {
    use super::*;

    #[tokio::test]
    async fn only_the_latest_keystroke_publishes() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/search3"))
            .and(query_param("query", "boards"))
            .respond_with(ok(json!({
                "searchResult3": { "artist": [{ "id": "ar-1", "name": "Boards of Canada" }] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let generation = SearchGeneration::default();
        let (stale, latest) = tokio::join!(
            debounced_search(&client, &generation, "boa", 50),
            async {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                debounced_search(&client, &generation, "boards", 50).await
            }
        );

        assert_eq!(stale, None);
        match latest {
            Some(SearchOutcome::Results(found)) => {
                assert_eq!(found.artists[0].name, "Boards of Canada")
            }
            other => panic!("expected results, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn blank_query_clears_without_a_request() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/search3"))
            .respond_with(ok(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let outcome = debounced_search(&client_for(&server), &SearchGeneration::default(), "   ", 0).await;
        assert_eq!(outcome, Some(SearchOutcome::Cleared));
    }

    #[tokio::test]
    async fn empty_results_and_failures_are_reported() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/search3"))
            .and(query_param("query", "zzzz"))
            .respond_with(ok(json!({ "searchResult3": {} })))
            .mount(&server)
            .await;
        Mock::given(path("/rest/search3"))
            .and(query_param("query", "boom"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let generation = SearchGeneration::default();
        assert_eq!(
            debounced_search(&client, &generation, "zzzz", 0).await,
            Some(SearchOutcome::NoResults)
        );
        assert_eq!(
            debounced_search(&client, &generation, "boom", 0).await,
            Some(SearchOutcome::Failed("HTTP 500".to_string()))
        );
    }
}
