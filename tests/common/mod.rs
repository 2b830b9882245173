use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use collegehub::clock::ManualClock;
use collegehub::config::Config;
use collegehub::email::ResetNotifier;
use collegehub::seed::seed_colleges;
use collegehub::store::Stores;

/// Captures reset links instead of mailing them.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_url(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, url)| url.clone())
    }

    pub fn last_token(&self) -> Option<String> {
        self.last_url()
            .and_then(|url| url.split("token=").nth(1).map(str::to_string))
    }
}

#[async_trait]
impl ResetNotifier for RecordingNotifier {
    async fn send_password_reset(&self, to_email: &str, reset_url: &str) -> Result<(), String> {
        self.sent
            .lock()
            .unwrap()
            .push((to_email.to_string(), reset_url.to_string()));
        Ok(())
    }
}

/// A running test server backed by the in-memory store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub notifier: Arc<RecordingNotifier>,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn register(&self, email: &str, password: &str, name: &str) -> (Value, StatusCode) {
        self.post_json(
            "/api/v1/auth/register",
            &json!({ "email": email, "password": password, "name": name }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> (Value, StatusCode) {
        self.post_json(
            "/api/v1/auth/login",
            &json!({ "email": email, "password": password }),
        )
        .await
    }

    pub async fn forgot_password(&self, email: &str) -> (Value, StatusCode) {
        self.post_json("/api/v1/auth/forgot-password", &json!({ "email": email }))
            .await
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> (Value, StatusCode) {
        self.post_json(
            "/api/v1/auth/reset-password",
            &json!({ "token": token, "newPassword": new_password }),
        )
        .await
    }

    /// Register a standard user, panicking on failure.
    pub async fn bootstrap(&self) -> Value {
        let (body, status) = self.register("ada@test.com", "password123", "Ada").await;
        assert_eq!(status, StatusCode::CREATED, "bootstrap register failed: {body}");
        body
    }

    /// First seeded college, by name order.
    pub async fn first_college(&self) -> Value {
        let (body, status) = self.get("/api/v1/colleges").await;
        assert_eq!(status, StatusCode::OK);
        body[0].clone()
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Spawn a test app on a random port with a freshly seeded in-memory store.
pub async fn spawn_app() -> TestApp {
    let stores = Stores::memory();
    seed_colleges(stores.colleges.as_ref())
        .await
        .expect("Failed to seed colleges");

    let config = Config {
        database_url: None,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        base_url: "http://college.test".to_string(),
        max_body_size: 1_048_576,
        reset_token_ttl_minutes: 60,
        log_level: "warn".to_string(),
        smtp: None,
    };

    let notifier = Arc::new(RecordingNotifier::default());
    let clock = Arc::new(ManualClock::new(Utc::now()));

    let (app, _state) =
        collegehub::build_app_with(stores, config, notifier.clone(), clock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        notifier,
        clock,
    }
}
