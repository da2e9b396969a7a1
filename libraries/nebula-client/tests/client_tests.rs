//! Tests for the Nebula service client.
//!
//! These tests use mock servers to verify request shapes and response
//! handling without a real backend.

use nebula_client::{ClientConfig, ClientError, NebulaClient};
use nebula_core::{AutoplayService, LikeService, StreamService, Track, TrackId};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> NebulaClient {
    NebulaClient::new(ClientConfig::new(server.uri())).expect("valid mock server url")
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_empty_url_rejected() {
        let result = NebulaClient::new(ClientConfig::new(""));
        match result.unwrap_err() {
            ClientError::InvalidUrl(msg) => assert!(msg.contains("empty")),
            other => panic!("Expected InvalidUrl error, got {other:?}"),
        }
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        let result = NebulaClient::new(ClientConfig::new("example.com"));
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_trailing_slashes_removed() {
        let client = NebulaClient::new(ClientConfig::new("http://localhost:8000///")).unwrap();
        assert_eq!(client.url(), "http://localhost:8000");
    }
}

// =============================================================================
// Stream Tests
// =============================================================================

mod streams {
    use super::*;

    #[tokio::test]
    async fn test_stream_url_resolved() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stream"))
            .and(query_param("url", "https://www.youtube.com/watch?v=abc"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "url": "https://cdn.example/abc.m4a" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let url = client
            .resolve_stream(&TrackId::new("abc"))
            .await
            .expect("request succeeds");

        assert_eq!(url.as_deref(), Some("https://cdn.example/abc.m4a"));
    }

    #[tokio::test]
    async fn test_stream_not_found_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stream"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "error": "Stream not found" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let url = client
            .streams()
            .get_stream_url(&TrackId::new("missing"))
            .await
            .expect("request succeeds");

        assert!(url.is_none());
    }

    #[tokio::test]
    async fn test_empty_stream_url_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stream"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "url": "" })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let url = client
            .streams()
            .get_stream_url(&TrackId::new("abc"))
            .await
            .unwrap();

        assert!(url.is_none());
    }

    #[tokio::test]
    async fn test_server_error_surfaces_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stream"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.streams().get_stream_url(&TrackId::new("abc")).await;

        match result {
            Err(ClientError::ServerError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("Expected ServerError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_id_rejected_without_request() {
        let server = MockServer::start().await;
        // No mocks mounted: any request would 404
        let client = client_for(&server);

        let result = client.streams().get_stream_url(&TrackId::default()).await;
        assert!(matches!(result, Err(ClientError::MissingTrackId)));
    }
}

// =============================================================================
// Like Tests
// =============================================================================

mod likes {
    use super::*;

    #[tokio::test]
    async fn test_toggle_sends_metadata() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/like"))
            .and(query_param("videoId", "abc"))
            .and(query_param("title", "Song & Dance"))
            .and(query_param("artist", "Band"))
            .and(query_param("thumbnail", "https://img/abc.jpg"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "liked": true, "message": "Song liked" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let track = Track::new("abc", "Song & Dance", "Band").with_thumbnail("https://img/abc.jpg");

        let liked = client.toggle_like(&track).await.expect("toggle succeeds");
        assert!(liked);
    }

    #[tokio::test]
    async fn test_list_liked() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/liked/all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "liked": [
                    { "videoId": "a", "title": "A", "artist": "X", "thumbnail": "" },
                    { "videoId": "b", "title": "B", "artist": "Y", "thumbnail": "" }
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let liked = client.liked_tracks().await.unwrap();

        let ids: Vec<&str> = liked.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        // Port 9 (discard) is closed on test machines
        let client = NebulaClient::new(ClientConfig::new("http://127.0.0.1:9")).unwrap();
        let result = client.likes().get_all().await;

        assert!(matches!(
            result,
            Err(ClientError::ServerUnreachable(_) | ClientError::Request(_))
        ));
    }
}

// =============================================================================
// Catalog Tests
// =============================================================================

mod catalog {
    use super::*;

    #[tokio::test]
    async fn test_search_flags_results() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "daft punk"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "videoId": "a", "title": "One More Time", "artist": "Daft Punk", "thumbnail": "" },
                { "videoId": null, "title": "Broken", "artist": null, "thumbnail": "" }
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let results = client.catalog().search("daft punk").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id.as_str(), "a");
        assert!(results[0].from_search);
    }

    #[tokio::test]
    async fn test_up_next() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/autoplay/upnext"))
            .and(query_param("videoId", "seed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "upnext": [
                    { "videoId": "r1", "title": "R1", "artist": "X", "thumbnail": "" },
                    { "videoId": "r2", "title": "R2", "artist": "Y", "thumbnail": "" }
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let recs = client.recommendations(&TrackId::new("seed")).await.unwrap();

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].id.as_str(), "r1");
        assert!(!recs[0].from_search);
    }

    #[tokio::test]
    async fn test_up_next_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/autoplay/upnext"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "upnext": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let recs = client.catalog().get_up_next(&TrackId::new("seed")).await.unwrap();
        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn test_track_info() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/track_info"))
            .and(query_param("video_id", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "videoId": "abc",
                "title": "Song",
                "artist": "Band",
                "duration": 215,
                "thumbnail": "https://img/abc.jpg"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let info = client.catalog().get_track_info(&TrackId::new("abc")).await.unwrap();

        assert_eq!(info.title, "Song");
        assert_eq!(info.duration, 215);

        let track: Track = info.into();
        assert_eq!(track.thumbnail_url, "https://img/abc.jpg");
    }
}
