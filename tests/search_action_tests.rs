use photo_search_agent::dispatch::{Dispatcher, FunctionKey};
use photo_search_agent::logic::search_logic::{search_photos, ActionResponse, SearchRequest};
use photo_search_agent::secrets::{MemorySecretStore, ACCESS_KEY_SECRET};
use photo_search_agent::unsplash::UnsplashClient;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn configured_store() -> MemorySecretStore {
    MemorySecretStore::with_secret(ACCESS_KEY_SECRET, "test_key")
}

fn client_for(server: &MockServer) -> UnsplashClient {
    UnsplashClient::new(format!("{}/search/photos", server.uri())).unwrap()
}

async fn mount_response(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/search/photos"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[cfg(test)]
mod search_action_tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_results_is_success_with_zero_total() {
        let server = MockServer::start().await;
        mount_response(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"total": 0, "total_pages": 0, "results": []})),
        )
        .await;

        let response =
            search_photos(&configured_store(), &client_for(&server), &SearchRequest::new("qwzx")).await;
        match response {
            ActionResponse::Success { total, results, message } => {
                assert_eq!(total, 0);
                assert!(results.is_empty());
                assert!(message.contains("Try different search terms"));
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let response = search_photos(
            &MemorySecretStore::new(),
            &client_for(&server),
            &SearchRequest::new("dogs"),
        )
        .await;

        match response {
            ActionResponse::Failure { error } => assert!(error.contains("administrator")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_query_is_rejected() {
        let server = MockServer::start().await;
        let response =
            search_photos(&configured_store(), &client_for(&server), &SearchRequest::new("   ")).await;

        assert_eq!(response, ActionResponse::failure("Search query is required"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remote_401_is_invalid_key() {
        let server = MockServer::start().await;
        mount_response(&server, ResponseTemplate::new(401).set_body_string("unauthorized")).await;

        let response =
            search_photos(&configured_store(), &client_for(&server), &SearchRequest::new("cat")).await;
        match response {
            ActionResponse::Failure { error } => {
                assert!(error.contains("Invalid Unsplash access key"));
                assert!(!error.contains("unauthorized"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_remote_500_message_contains_status() {
        let server = MockServer::start().await;
        mount_response(
            &server,
            ResponseTemplate::new(500).set_body_string("internal stack trace here"),
        )
        .await;

        let response =
            search_photos(&configured_store(), &client_for(&server), &SearchRequest::new("cat")).await;
        match response {
            ActionResponse::Failure { error } => {
                assert!(error.contains("500"));
                assert!(!error.contains("stack trace"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_generic_failure() {
        let server = MockServer::start().await;
        mount_response(&server, ResponseTemplate::new(200).set_body_string("{\"total\": ")).await;

        let response =
            search_photos(&configured_store(), &client_for(&server), &SearchRequest::new("cat")).await;
        assert_eq!(
            response,
            ActionResponse::failure("Failed to search photos. Please try again later.")
        );
    }

    #[tokio::test]
    async fn test_missing_descriptions_become_untitled() {
        let server = MockServer::start().await;
        mount_response(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({
                "total": 88,
                "total_pages": 9,
                "results": [{
                    "id": "nodesc",
                    "description": null,
                    "alt_description": null,
                    "urls": {"regular": "https://images.example.com/r", "thumb": "https://images.example.com/t"},
                    "user": {"name": "Sam", "links": {"html": "https://unsplash.com/@sam"}},
                    "links": {"download_location": "https://api.unsplash.com/photos/nodesc/download"}
                }]
            })),
        )
        .await;

        let response =
            search_photos(&configured_store(), &client_for(&server), &SearchRequest::new("fog")).await;
        match response {
            ActionResponse::Success { total, results, message } => {
                assert_eq!(total, 88);
                assert_eq!(results[0].description, "Untitled");
                assert_eq!(results[0].photographer, "Sam");
                assert!(message.contains("fog"));
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dispatcher_round_trip_over_http() {
        let server = MockServer::start().await;
        mount_response(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"total": 0, "results": []})),
        )
        .await;

        let dispatcher = Dispatcher::new(
            Arc::new(MemorySecretStore::new()),
            Arc::new(client_for(&server)),
        );

        let before = dispatcher
            .invoke(FunctionKey::SearchPhotos, json!({"query": "cat"}))
            .await
            .unwrap();
        assert_eq!(before["status"], "error");

        let saved = dispatcher
            .invoke(FunctionKey::SaveAccessKey, json!({"accessKey": "  "}))
            .await
            .unwrap();
        assert_eq!(saved["success"], false);

        let saved = dispatcher
            .invoke(FunctionKey::SaveAccessKey, json!({"accessKey": "real_key"}))
            .await
            .unwrap();
        assert_eq!(saved, json!({"success": true}));

        let after = dispatcher
            .invoke(
                FunctionKey::SearchPhotos,
                json!({"query": "cat", "orientation": "portrait"}),
            )
            .await
            .unwrap();
        assert_eq!(after["status"], "success");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let pairs: Vec<(String, String)> = requests[0].url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("client_id".to_string(), "real_key".to_string())));
        assert!(pairs.contains(&("orientation".to_string(), "portrait".to_string())));
        assert!(!pairs.iter().any(|(name, _)| name == "color"));
    }
}
