//! Mock club backend for testing
//!
//! Wraps a wiremock server mounted under `/api/` and builds settings and
//! clients pointed at it.

use std::time::Duration;
use serde_json::Value;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};
use ClubPortal::{ResourceClient, ServiceFactory, Settings};

/// Mock club REST backend
pub struct BackendMockServer {
    pub server: MockServer,
}

impl BackendMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Absolute mock path for an API resource path such as `events/`
    pub fn api_path(resource: &str) -> String {
        format!("/api/{}", resource.trim_start_matches('/'))
    }

    /// Settings pointing at the mock with a short timeout
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        settings.api.base_url = self.server.uri();
        settings.api.timeout_seconds = 2;
        settings
    }

    pub fn client(&self) -> ResourceClient {
        ResourceClient::new(&self.settings()).expect("client should build")
    }

    pub fn services(&self) -> ServiceFactory {
        let settings = self.settings();
        let client = ResourceClient::new(&settings).expect("client should build");
        ServiceFactory::new(client, &settings).expect("services should build")
    }

    /// Respond to `METHOD /api/{resource}` with a JSON body
    pub async fn mock_json(&self, verb: &str, resource: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(Self::api_path(resource)))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Respond to `GET /api/auth/profile/` with `body`, expecting exactly `times` calls
    pub async fn mock_profile(&self, body: Value, times: u64) {
        Mock::given(method("GET"))
            .and(path(Self::api_path("auth/profile/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Respond to `GET /api/auth/profile/` with an error status
    pub async fn mock_profile_status(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path(Self::api_path("auth/profile/")))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(serde_json::json!({"detail": "Authentication credentials were not provided."})),
            )
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Answer the profile request only after `delay`
    pub async fn mock_profile_delayed(&self, body: Value, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(Self::api_path("auth/profile/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
