// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::Router;
use kinfit::config::Config;
use kinfit::models::{Profile, User};
use kinfit::routes::create_router;
use kinfit::services::{ApiClient, Navigator};
use kinfit::session::SessionStore;
use kinfit::AppState;
use std::sync::{Arc, Mutex};

/// Serve `app` on an ephemeral local port; returns the API base URL.
#[allow(dead_code)]
pub async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api")
}

/// Navigator that remembers every navigation request.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingNavigator {
    pub visits: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits.lock().unwrap().push(path.to_string());
    }
}

#[allow(dead_code)]
impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

/// Client against `base_url` with an in-memory session.
#[allow(dead_code)]
pub fn test_client(base_url: &str) -> (ApiClient, Arc<SessionStore>, Arc<RecordingNavigator>) {
    let config = Config {
        api_base_url: base_url.to_string(),
        request_timeout_secs: 5,
        ..Config::default()
    };
    let session = Arc::new(SessionStore::in_memory());
    let navigator = Arc::new(RecordingNavigator::default());

    let client = ApiClient::new(&config, session.clone())
        .expect("Failed to build client")
        .with_navigator(navigator.clone());

    (client, session, navigator)
}

/// Edge router with default guard configuration.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    let config = Config {
        static_dir: std::env::temp_dir().join("kinfit-missing-bundle"),
        ..Config::default()
    };
    let state = Arc::new(AppState::new(config));
    (create_router(state.clone()), state)
}

#[allow(dead_code)]
pub fn test_user() -> User {
    User {
        id: "u1".to_string(),
        phone_number: "9876543210".to_string(),
        country_code: "+91".to_string(),
        name: "Asha".to_string(),
        email: Some("asha@example.com".to_string()),
        age: Some(34),
        gender: None,
        city: None,
        subscription_status: Some("free".to_string()),
    }
}

#[allow(dead_code)]
pub fn test_profile(id: &str) -> Profile {
    Profile {
        id: id.to_string(),
        name: format!("Member {id}"),
        relationship: "self".to_string(),
        age: Some(30),
        gender: None,
        level: 1,
        lifestyle: None,
        stats: Default::default(),
    }
}
