//! Shared test helpers for sift_client tests.

#![allow(dead_code)]

use serde_json::{Value, json};
use sift_client::{ClientConfig, PeopleClient};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-key";

/// Create a client pointed at the mock server.
pub fn client_for(server: &MockServer) -> PeopleClient {
    PeopleClient::from_config(&ClientConfig::new(server.uri(), API_KEY))
        .expect("Failed to create client")
}

/// Mount a GET endpoint that checks the auth header and answers with JSON.
pub async fn mount_json(server: &MockServer, endpoint: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(header("Authorization", format!("App {}", API_KEY).as_str()))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount one page of a paged endpoint.
pub async fn mount_page(server: &MockServer, endpoint: &str, page: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(query_param("page", page.to_string().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// The usual People API error body.
pub fn service_exception(message_id: &str, text: &str) -> Value {
    json!({
        "requestError": {
            "serviceException": {"messageId": message_id, "text": text}
        }
    })
}
