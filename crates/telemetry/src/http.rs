// Path: crates/telemetry/src/http.rs
use axum::{
    body::Bytes,
    error_handling::HandleErrorLayer,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderName, StatusCode},
    routing::get,
    Json, Router,
};
use parking_lot::RwLock;
use prometheus::{Encoder, TextEncoder};
use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};
use tower::{BoxError, ServiceBuilder};
use tower_http::trace::TraceLayer;
use vigil_types::app::MonitorStatus;

/// The status document shared between the publisher (single writer) and the HTTP surface.
pub type SharedStatus = Arc<RwLock<MonitorStatus>>;

/// Creates an empty status document.
pub fn new_shared_status() -> SharedStatus {
    Arc::new(RwLock::new(MonitorStatus::default()))
}

async fn metrics_handler() -> ([(HeaderName, String); 1], Bytes) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buf = Vec::with_capacity(1 << 16);
    if let Err(e) = encoder.encode(&metric_families, &mut buf) {
        tracing::error!(error=%e, "Failed to encode prometheus metrics");
    }
    (
        [(CONTENT_TYPE, encoder.format_type().to_string())],
        buf.into(),
    )
}

async fn healthz_handler() -> &'static str {
    "OK"
}

async fn readyz_handler(State(status): State<SharedStatus>) -> (StatusCode, &'static str) {
    if status.read().is_ready() {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "no verdict published yet")
    }
}

async fn status_handler(State(status): State<SharedStatus>) -> Json<MonitorStatus> {
    let snapshot = status.read().clone();
    Json(snapshot)
}

async fn handle_service_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unhandled internal error: {}", err),
        )
    }
}

/// Builds the telemetry router over `status`.
pub fn router(status: SharedStatus) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/healthz", get(healthz_handler))
        .route("/readyz", get(readyz_handler))
        .route("/status", get(status_handler))
        .with_state(status)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_service_error))
                .layer(TraceLayer::new_for_http())
                .load_shed()
                .concurrency_limit(8)
                .timeout(Duration::from_secs(2)),
        )
}

/// Serves the telemetry router until `shutdown` resolves.
pub async fn run_server<F>(addr: SocketAddr, status: SharedStatus, shutdown: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(target: "telemetry", error = %e, "Failed to bind telemetry http server");
            return;
        }
    };
    match listener.local_addr() {
        Ok(local) => tracing::info!(target: "telemetry", addr = %local, "listening"),
        Err(e) => tracing::warn!(target: "telemetry", error = %e, "listening on unknown address"),
    }

    let graceful = axum::serve(listener, router(status).into_make_service())
        .with_graceful_shutdown(async move {
            shutdown.await;
            tracing::info!(target: "telemetry", "shutting down gracefully");
        });

    if let Err(e) = graceful.await {
        tracing::error!(target: "telemetry", error = %e, "server error");
    }
}
