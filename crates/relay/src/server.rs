use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub relay: String,
    pub connected: bool,
    /// Unix timestamp (seconds) of the last processed frame, 0 before the
    /// first one
    pub last_frame_epoch_secs: u64,
}

/// Shared state for health endpoints
#[derive(Clone)]
pub struct ServerState {
    pub relay_name: String,
    pub connected: Arc<AtomicBool>,
    pub last_frame_epoch_secs: Arc<AtomicU64>,
}

impl ServerState {
    pub fn new(
        relay_name: impl Into<String>,
        connected: Arc<AtomicBool>,
        last_frame_epoch_secs: Arc<AtomicU64>,
    ) -> Self {
        Self {
            relay_name: relay_name.into(),
            connected,
            last_frame_epoch_secs,
        }
    }
}

/// Health endpoint - always returns 200 if server is running
async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        relay: state.relay_name.clone(),
        connected: state.connected.load(Ordering::SeqCst),
        last_frame_epoch_secs: state.last_frame_epoch_secs.load(Ordering::SeqCst),
    })
}

/// Ready endpoint - returns 200 only when connected
async fn ready(State(state): State<ServerState>) -> (StatusCode, Json<HealthResponse>) {
    let connected = state.connected.load(Ordering::SeqCst);
    let status_code = if connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if connected { "ready" } else { "not_ready" }.to_string(),
            relay: state.relay_name.clone(),
            connected,
            last_frame_epoch_secs: state.last_frame_epoch_secs.load(Ordering::SeqCst),
        }),
    )
}

/// Create the health server router
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
}

/// Run the health server
pub async fn run_server(addr: SocketAddr, state: ServerState) -> std::io::Result<()> {
    let app = create_router(state);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state(connected: bool, last_frame: u64) -> ServerState {
        ServerState {
            relay_name: "test-relay".to_string(),
            connected: Arc::new(AtomicBool::new(connected)),
            last_frame_epoch_secs: Arc::new(AtomicU64::new(last_frame)),
        }
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let state = create_test_state(true, 0);
        let app = create_router(state);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_reports_last_frame_time() {
        let state = create_test_state(true, 1756100000);
        let app = create_router(state);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["last_frame_epoch_secs"], 1756100000u64);
        assert_eq!(json["relay"], "test-relay");
    }

    #[tokio::test]
    async fn test_ready_when_connected() {
        let state = create_test_state(true, 0);
        let app = create_router(state);

        let response = app
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_when_disconnected() {
        let state = create_test_state(false, 0);
        let app = create_router(state);

        let response = app
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
