//! Common test utilities and fixtures for integration tests.
//!
//! Sessions are held in memory, so these tests need no external services.

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;
use serde_json::Value;

use typing_drill_backend::{router, AppState, DEFAULT_SESSION_IDLE_MINUTES};

/// Test context holding the application state and router.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Create a new test context with the default session limit.
    pub fn new() -> Self {
        Self::with_max_sessions(100)
    }

    /// Create a new test context allowing at most `max_sessions` sessions.
    pub fn with_max_sessions(max_sessions: usize) -> Self {
        let state = AppState::new(
            max_sessions,
            chrono::Duration::minutes(DEFAULT_SESSION_IDLE_MINUTES),
        );
        let app = router(state.clone());
        Self { state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Build a test server over the router.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to build test server")
    }
}

/// Start a session over the sample cards and return its id.
pub async fn start_sample_session(server: &TestServer) -> String {
    let response = server
        .post("/api/sessions")
        .json(&fixtures::start_session_request(fixtures::sample_cards(), None, None))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = response.json();
    body["session_id"]
        .as_str()
        .expect("session_id missing")
        .to_string()
}
