//! Subsonic client behavior against a mock server.

use cauzify::api::models::ServerConfig;
use cauzify::api::transport::HttpTransport;
use cauzify::api::{AlbumListType, SubsonicClient};
use cauzify::error::ApiError;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SubsonicClient {
    SubsonicClient::with_transport(
        ServerConfig::new(server.uri(), "alice".to_string(), "sesame".to_string()),
        Arc::new(HttpTransport),
    )
}

fn ok(body: Value) -> ResponseTemplate {
    let mut inner = json!({ "status": "ok", "version": "1.16.1" });
    if let (Some(inner), Some(extra)) = (inner.as_object_mut(), body.as_object()) {
        inner.extend(extra.clone());
    }
    ResponseTemplate::new(200).set_body_json(json!({ "subsonic-response": inner }))
}

fn failed(code: i32, message: Option<&str>) -> ResponseTemplate {
    let mut error = json!({ "code": code });
    if let Some(message) = message {
        error["message"] = json!(message);
    }
    ResponseTemplate::new(200).set_body_json(json!({
        "subsonic-response": { "status": "failed", "version": "1.16.1", "error": error }
    }))
}

mod envelope {
    use super::*;

    #[tokio::test]
    async fn ping_sends_token_auth_and_json_format() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/ping"))
            .and(query_param("u", "alice"))
            .and(query_param("v", "1.16.1"))
            .and(query_param("c", "Cauzify-mobile"))
            .and(query_param("f", "json"))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).ping().await.expect("ping");
    }

    #[tokio::test]
    async fn failed_status_surfaces_the_server_message() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/ping"))
            .respond_with(failed(40, Some("Wrong username or password")))
            .mount(&server)
            .await;

        let err = client_for(&server).ping().await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Subsonic {
                code: 40,
                message: "Wrong username or password".to_string()
            }
        );
    }

    #[tokio::test]
    async fn failed_status_without_message_reads_api_error() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/ping"))
            .respond_with(failed(0, None))
            .mount(&server)
            .await;

        let err = client_for(&server).ping().await.unwrap_err();
        assert_eq!(err.to_string(), "API error");
    }

    #[tokio::test]
    async fn http_errors_and_garbage_bodies_are_distinguished() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/ping"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(path("/rest/getArtists"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.ping().await.unwrap_err(), ApiError::Http(500));
        assert!(matches!(
            client.get_artists().await.unwrap_err(),
            ApiError::Parse(_)
        ));
    }
}

mod browsing {
    use super::*;

    #[tokio::test]
    async fn artists_are_flattened_across_index_buckets() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/getArtists"))
            .respond_with(ok(json!({
                "artists": {
                    "index": [
                        { "name": "A", "artist": [
                            { "id": "ar-1", "name": "Air", "albumCount": 4 },
                            { "id": "ar-2", "name": "Aphex Twin", "albumCount": 9 }
                        ]},
                        { "name": "B", "artist": [
                            { "id": "ar-3", "name": "Boards of Canada", "albumCount": 5 }
                        ]},
                        { "name": "C" }
                    ]
                }
            })))
            .mount(&server)
            .await;

        let artists = client_for(&server).get_artists().await.expect("artists");
        let names: Vec<&str> = artists.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Air", "Aphex Twin", "Boards of Canada"]);
        assert_eq!(artists[1].album_count, 9);
    }

    #[tokio::test]
    async fn album_list_passes_type_and_size() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/getAlbumList2"))
            .and(query_param("type", "alphabeticalByName"))
            .and(query_param("size", "50"))
            .respond_with(ok(json!({
                "albumList2": { "album": [
                    { "id": "al-1", "name": "Dummy", "artist": "Portishead", "coverArt": "al-1" }
                ]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let albums = client_for(&server)
            .get_album_list(AlbumListType::AlphabeticalByName, 50)
            .await
            .expect("albums");
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].cover_art.as_deref(), Some("al-1"));
    }

    #[tokio::test]
    async fn empty_album_list_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/getAlbumList2"))
            .respond_with(ok(json!({ "albumList2": {} })))
            .mount(&server)
            .await;

        let albums = client_for(&server)
            .get_album_list(AlbumListType::Newest, 12)
            .await
            .expect("albums");
        assert!(albums.is_empty());
    }

    #[tokio::test]
    async fn search_maps_all_three_result_kinds() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/search3"))
            .and(query_param("query", "radio head"))
            .and(query_param("songCount", "20"))
            .and(query_param("albumCount", "10"))
            .and(query_param("artistCount", "5"))
            .respond_with(ok(json!({
                "searchResult3": {
                    "artist": [{ "id": "ar-1", "name": "Radiohead" }],
                    "album": [{ "id": "al-1", "name": "OK Computer", "artist": "Radiohead" }],
                    "song": [{ "id": "so-1", "title": "Airbag", "artist": "Radiohead", "duration": 284 }]
                }
            })))
            .mount(&server)
            .await;

        let found = client_for(&server)
            .search("radio head", 20, 10, 5)
            .await
            .expect("search");
        assert_eq!(found.artists[0].name, "Radiohead");
        assert_eq!(found.albums[0].name, "OK Computer");
        assert_eq!(found.songs[0].duration, 284);
    }
}

mod media {
    use super::*;

    #[tokio::test]
    async fn cover_art_becomes_a_data_url() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/getCoverArt"))
            .and(query_param("id", "al-1"))
            .and(query_param("size", "300"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![1u8, 2, 3], "image/jpeg"))
            .mount(&server)
            .await;

        let url = client_for(&server)
            .cover_art_data_url("al-1", 300)
            .await
            .expect("data url");
        assert_eq!(url, "data:image/jpeg;base64,AQID");
    }

    #[tokio::test]
    async fn missing_cover_art_yields_none() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/getCoverArt"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.cover_art_data_url("al-404", 300).await, None);
        assert_eq!(client.cover_art_data_url("  ", 300).await, None);
    }

    #[tokio::test]
    async fn scrobble_and_star_hit_their_endpoints() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/scrobble"))
            .and(query_param("id", "so-1"))
            .and(query_param("submission", "true"))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(path("/rest/star"))
            .and(query_param("id", "so-1"))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(path("/rest/unstar"))
            .and(query_param("id", "so-1"))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.scrobble("so-1", true).await.expect("scrobble");
        client.star("so-1").await.expect("star");
        client.unstar("so-1").await.expect("unstar");
    }
}
