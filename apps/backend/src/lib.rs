pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::services::sessions::SessionStore;

const DEFAULT_MAX_SESSIONS: usize = 1000;
pub const DEFAULT_SESSION_IDLE_MINUTES: i64 = 60;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(max_sessions: usize, idle_timeout: chrono::Duration) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(max_sessions, idle_timeout)),
        }
    }
}

/// Server settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_sessions: usize,
    pub session_idle_minutes: i64,
}

impl ServerConfig {
    /// Read HOST, PORT, MAX_SESSIONS and SESSION_IDLE_MINUTES, falling back to defaults
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = match lookup("PORT") {
            Some(p) => p
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid PORT {:?}: {}", p, e))?,
            None => 3000,
        };
        let max_sessions: usize = match lookup("MAX_SESSIONS") {
            Some(n) => n
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid MAX_SESSIONS {:?}: {}", n, e))?,
            None => DEFAULT_MAX_SESSIONS,
        };
        let session_idle_minutes: i64 = match lookup("SESSION_IDLE_MINUTES") {
            Some(m) => m
                .parse()
                .ok()
                .filter(|m: &i64| *m > 0)
                .ok_or_else(|| anyhow::anyhow!("invalid SESSION_IDLE_MINUTES {:?}", m))?,
            None => DEFAULT_SESSION_IDLE_MINUTES,
        };

        Ok(Self {
            host,
            port,
            max_sessions,
            session_idle_minutes,
        })
    }

    pub fn idle_timeout(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_idle_minutes)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/sessions", post(routes::sessions::start))
        .route(
            "/api/sessions/:id",
            get(routes::sessions::get).delete(routes::sessions::discard),
        )
        .route("/api/sessions/:id/input", put(routes::sessions::update_input))
        .route("/api/sessions/:id/check", post(routes::sessions::check))
        .route("/api/sessions/:id/advance", post(routes::sessions::advance))
        .route("/api/sessions/:id/finish", post(routes::sessions::finish))
        .route("/api/sessions/:id/retake", post(routes::sessions::retake))
        .route("/api/sessions/:id/review", post(routes::sessions::review))
        .route("/api/sessions/:id/score", get(routes::sessions::score))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let state = AppState::new(config.max_sessions, config.idle_timeout());

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr();
    tracing::info!(
        "Starting server on {} (max {} sessions, {} min idle timeout)",
        addr,
        config.max_sessions,
        config.session_idle_minutes
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
