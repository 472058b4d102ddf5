#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use rust_decimal_macros::dec;
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;

use zorgmatch_backend::{
    config::{Config, StoreBackend},
    models::{
        provider_profile::ProviderReview,
        user::{NewUser, Role},
    },
    routes,
    store::{memory::MemoryStore, Store},
    utils::crypto::hash_password,
    AppState,
};

pub const PASSWORD: &str = "geheim-wachtwoord";

pub struct TestApp {
    pub app: Router,
    pub store: Arc<MemoryStore>,
    pub config: Config,
}

pub fn test_config() -> Config {
    let uploads = std::env::temp_dir().join(format!("zorgmatch-test-{}", Uuid::new_v4()));
    Config {
        server_address: "127.0.0.1:0".into(),
        database_url: None,
        store_backend: StoreBackend::Memory,
        jwt_secret: "test_secret_key".into(),
        jwt_ttl_hours: 1,
        api_rps: 10_000,
        uploads_dir: uploads.to_string_lossy().into_owned(),
        commission_percentage: dec!(10),
        log_json: false,
    }
}

pub fn spawn_app() -> TestApp {
    let config = test_config();
    let store = Arc::new(MemoryStore::seeded());
    let dyn_store: Arc<dyn Store> = store.clone();
    let state = AppState::new(config.clone(), dyn_store);
    TestApp {
        app: routes::router(state),
        store,
        config,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<JsonValue>,
    ) -> (StatusCode, JsonValue) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let req = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.dispatch(req).await
    }

    pub async fn dispatch(&self, req: Request<Body>) -> (StatusCode, JsonValue) {
        let resp = self.app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let json = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, JsonValue) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: JsonValue) -> (StatusCode, JsonValue) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: JsonValue) -> (StatusCode, JsonValue) {
        self.send(Method::PATCH, uri, Some(token), Some(body)).await
    }

    pub async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn signup(&self, email: &str, role: &str, city: &str) -> Uuid {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/signup",
                None,
                Some(json!({
                    "email": email,
                    "password": PASSWORD,
                    "name": format!("Test {}", role.to_lowercase()),
                    "role": role,
                    "city": city,
                    "care_types": ["persoonlijke_verzorging"],
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
        body["id"].as_str().unwrap().parse().unwrap()
    }

    /// Seeker account plus session token.
    pub async fn seeker(&self, email: &str) -> (Uuid, String) {
        let id = self.signup(email, "ZORGVRAGER", "Amsterdam").await;
        (id, self.login(email).await)
    }

    /// Provider account that has not been reviewed yet.
    pub async fn pending_provider(&self, email: &str) -> (Uuid, String) {
        let id = self.signup(email, "ZORGVERLENER", "Amsterdam").await;
        (id, self.login(email).await)
    }

    /// Provider account approved directly in the store.
    pub async fn approved_provider(&self, email: &str, city: &str) -> (Uuid, String) {
        let id = self.signup(email, "ZORGVERLENER", city).await;
        self.store
            .review_provider_profile(
                id,
                &ProviderReview::Approve {
                    reviewer: Uuid::new_v4(),
                    at: Utc::now(),
                },
            )
            .await
            .unwrap();
        (id, self.login(email).await)
    }

    /// Back-office accounts cannot sign up, so they are inserted directly.
    pub async fn admin(&self, email: &str) -> (Uuid, String) {
        let user = self
            .store
            .insert_user(NewUser {
                email: email.to_string(),
                password_hash: hash_password(PASSWORD).unwrap(),
                role: Role::Beheer,
                name: "Beheerder".into(),
                phone: None,
                address: None,
                city: None,
                lat: None,
                lng: None,
            })
            .await
            .unwrap();
        (user.id, self.login(email).await)
    }

    pub async fn create_request(&self, token: &str, care_type: &str, city: &str) -> JsonValue {
        let (status, body) = self
            .post(
                "/api/zorgvragen",
                token,
                json!({
                    "care_type": care_type,
                    "description": "Hulp bij wassen en aankleden in de ochtend",
                    "city": city,
                    "hours_per_week": 6,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create request failed: {body}");
        body
    }

    pub async fn respond(&self, token: &str, care_request_id: &str) -> (StatusCode, JsonValue) {
        self.post(
            "/api/matches",
            token,
            json!({ "zorgvraag_id": care_request_id, "reactie_tekst": "Ik help graag" }),
        )
        .await
    }

    pub async fn act(&self, token: &str, match_id: &str, action: &str) -> (StatusCode, JsonValue) {
        self.patch(
            "/api/matches",
            token,
            json!({ "match_id": match_id, "actie": action }),
        )
        .await
    }
}

pub fn decimal(value: &JsonValue) -> rust_decimal::Decimal {
    match value {
        JsonValue::String(s) => s.parse().unwrap(),
        other => other.to_string().parse().unwrap(),
    }
}
