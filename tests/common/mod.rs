//! Shared harness for HTTP integration tests.
//!
//! Builds the real router over in-memory persistence, the real JWT service
//! and a token-bucket limiter. Password hashing and the workflow trigger are
//! replaced with fast local fakes.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use subtrack::adapters::auth::{JwtSessionValidator, JwtTokenService};
use subtrack::adapters::http::{app_router, AppState, ShieldSettings};
use subtrack::adapters::memory::InMemoryStore;
use subtrack::adapters::rate_limiter::InMemoryRateLimiter;
use subtrack::domain::foundation::{DomainError, SubscriptionId};
use subtrack::ports::{PasswordHasher, ReminderScheduler, WorkflowError, WorkflowRunId};

pub const ADMIN_KEY: &str = "test-admin-key";
pub const PASSWORD: &str = "secret123";

/// Reversible stand-in for Argon2 so tests stay fast.
pub struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("plain:{password}"))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("plain:{password}"))
    }
}

/// Records triggered subscription ids; optionally fails every trigger.
#[derive(Default)]
pub struct RecordingScheduler {
    pub triggered: Mutex<Vec<SubscriptionId>>,
    pub fail: bool,
}

#[async_trait]
impl ReminderScheduler for RecordingScheduler {
    async fn trigger_reminder(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<WorkflowRunId, WorkflowError> {
        if self.fail {
            return Err(WorkflowError::Transport("connection refused".to_string()));
        }
        self.triggered.lock().unwrap().push(*subscription_id);
        Ok(WorkflowRunId::new(format!("wfr_{subscription_id}")))
    }
}

/// Shield switches and scheduler behaviour; everything off by default.
#[derive(Default)]
pub struct Options {
    pub rate_limit: bool,
    pub block_bots: bool,
    pub failing_scheduler: bool,
    /// Key buckets on the socket address only.
    pub ignore_forwarded: bool,
}

pub struct TestApp {
    router: Router,
    pub store: InMemoryStore,
    pub scheduler: Arc<RecordingScheduler>,
}

pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        let store = InMemoryStore::new();
        let scheduler = Arc::new(RecordingScheduler {
            fail: options.failing_scheduler,
            ..Default::default()
        });
        let jwt = Arc::new(JwtTokenService::new(
            &SecretString::new("integration-test-secret".to_string()),
            3600,
        ));

        let state = AppState {
            users: Arc::new(store.clone()),
            subscriptions: Arc::new(store.clone()),
            uow: Arc::new(store.clone()),
            hasher: Arc::new(PlainHasher),
            sessions: Arc::new(JwtSessionValidator::new(jwt.clone(), Arc::new(store.clone()))),
            tokens: jwt,
            scheduler: scheduler.clone(),
            rate_limiter: Arc::new(InMemoryRateLimiter::with_defaults()),
            admin_key: SecretString::new(ADMIN_KEY.to_string()),
            secure_cookies: false,
            shield: ShieldSettings {
                rate_limit: options.rate_limit,
                trust_forwarded: !options.ignore_forwarded,
                block_bots: options.block_bots,
            },
        };

        Self {
            router: app_router(state),
            store,
            scheduler,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        Response {
            status,
            headers,
            body,
        }
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        self.send(build_request(method, uri, token, body)).await
    }

    pub async fn get(&self, uri: &str, token: &str) -> Response {
        self.call(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Response {
        self.call(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> Response {
        self.call(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Response {
        self.call(Method::DELETE, uri, Some(token), None).await
    }

    /// Signs up a user and returns `(token, user_id)`.
    pub async fn sign_up(&self, name: &str, email: &str) -> (String, String) {
        let response = self
            .post(
                "/api/v1/auth/sign-up",
                None,
                json!({"name": name, "email": email, "password": PASSWORD}),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        session_of(&response)
    }

    /// Creates an admin and signs in, returning `(token, user_id)`.
    pub async fn admin(&self, email: &str) -> (String, String) {
        let created = self
            .post(
                "/api/v1/auth/create-admin",
                None,
                json!({"name": "Admin", "email": email, "password": PASSWORD, "secretKey": ADMIN_KEY}),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);

        let signed_in = self
            .post(
                "/api/v1/auth/sign-in",
                None,
                json!({"email": email, "password": PASSWORD}),
            )
            .await;
        assert_eq!(signed_in.status, StatusCode::OK, "{}", signed_in.body);
        session_of(&signed_in)
    }

    /// Creates a subscription renewing in `days` and returns its id.
    pub async fn subscription_renewing_in(&self, token: &str, name: &str, days: i64) -> String {
        let now = chrono::Utc::now();
        let response = self
            .post(
                "/api/v1/subscriptions",
                Some(token),
                json!({
                    "name": name,
                    "price": 9.99,
                    "currency": "EUR",
                    "frequency": "monthly",
                    "category": "entertainment",
                    "paymentMethod": "Visa",
                    "startDate": (now - chrono::Duration::days(20)).to_rfc3339(),
                    "renewalDate": (now + chrono::Duration::days(days) + chrono::Duration::hours(1)).to_rfc3339(),
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"]["subscription"]["id"]
            .as_str()
            .unwrap()
            .to_string()
    }
}

pub fn build_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::USER_AGENT, "Mozilla/5.0 (integration tests)");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn session_of(response: &Response) -> (String, String) {
    let data = &response.body["data"];
    (
        data["token"].as_str().unwrap().to_string(),
        data["user"]["id"].as_str().unwrap().to_string(),
    )
}

pub fn subscription_body() -> Value {
    json!({
        "name": "Netflix Premium",
        "price": 15.99,
        "currency": "USD",
        "frequency": "monthly",
        "category": "entertainment",
        "paymentMethod": "Credit Card",
        "startDate": (chrono::Utc::now() - chrono::Duration::days(3)).to_rfc3339(),
    })
}
