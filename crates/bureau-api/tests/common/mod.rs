#![allow(dead_code)]

use std::sync::Arc;

use bureau_api::{ApiClient, CountingRedirect, MemoryTokenStore, TokenPair};
use serde_json::{json, Value};
use wiremock::{Match, MockServer, Request};

/// Servidor mock + cliente apontando para `{server}/api`
pub struct Harness {
    pub server: MockServer,
    pub store: Arc<MemoryTokenStore>,
    pub redirect: Arc<CountingRedirect>,
    pub client: ApiClient,
}

impl Harness {
    pub async fn new(pair: Option<TokenPair>) -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(match pair {
            Some(pair) => MemoryTokenStore::with_pair(pair),
            None => MemoryTokenStore::new(),
        });
        let redirect = Arc::new(CountingRedirect::new());

        let client = ApiClient::builder(format!("{}/api", server.uri()))
            .token_store(store.clone())
            .login_redirect(redirect.clone())
            .build()
            .expect("client");

        Self {
            server,
            store,
            redirect,
            client,
        }
    }

    pub async fn logged_in(access: &str, refresh: &str) -> Self {
        Self::new(Some(TokenPair::new(access, refresh))).await
    }

    pub fn stored(&self) -> Option<TokenPair> {
        use bureau_api::TokenStore;
        self.store.load().expect("store")
    }
}

/// Casa apenas requisições sem header `Authorization`
pub struct NoAuthorization;

impl Match for NoAuthorization {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

pub fn person_json(name: &str) -> Value {
    json!({
        "id": "0b6f7c1a-2d3e-4f50-8a9b-0c1d2e3f4a5b",
        "case_id": "ID-4821",
        "name": name,
        "age": "34",
        "contact": null,
        "priority": "normal",
        "photo_url": null,
        "registered_at": "2024-05-02T08:00:00"
    })
}

pub fn detection_json(status: &str) -> Value {
    json!({
        "id": "9a8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d",
        "person_name": "Jane Roe",
        "case_id": "ID-4821",
        "location": "Gate 3",
        "camera_id": "CAM-07",
        "timestamp": "2024-05-02T09:30:00",
        "snapshot_url": null,
        "confidence": 0.2,
        "sms_sent": false,
        "status": status
    })
}

pub fn user_json(username: &str, role: &str) -> Value {
    json!({
        "id": "6f1c2b1e-8a34-4d7e-9a61-1d2f3e4a5b6c",
        "username": username,
        "role": role,
        "clearance_level": 2,
        "created_at": "2024-03-01T10:15:30.123456"
    })
}

pub fn token_json(access: &str, refresh: &str) -> Value {
    json!({
        "access_token": access,
        "refresh_token": refresh,
        "token_type": "bearer"
    })
}
