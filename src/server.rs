use crate::config::CONFIG;
use crate::registry::Registry;
use crate::report::Report;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use log::{debug, error, info, warn};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Server is already running")]
    AlreadyRunning,
    #[error("Failed to bind to {0}: {1}")]
    Bind(String, #[source] std::io::Error),
}

pub struct Server {
    registry: Arc<Registry>,
    is_running: bool,
    handle: Option<JoinHandle<()>>,
}

impl Server {
    pub fn new(registry: Arc<Registry>) -> Self {
        Server {
            registry,
            is_running: false,
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub async fn start(&mut self) -> Result<(), ServerError> {
        if self.is_running {
            warn!("Server is already running.");
            return Err(ServerError::AlreadyRunning);
        }

        let app = router(Arc::clone(&self.registry));

        let addr = format!("{}:{}", CONFIG.server.address, CONFIG.server.port);
        debug!("Connecting to {}", addr);
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            error!("Failed to bind to {}: {}", addr, e);
            ServerError::Bind(addr.clone(), e)
        })?;
        self.is_running = true;
        self.handle = Some(tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("Server error: {}", e);
            }
        }));
        info!("Server started.");
        Ok(())
    }

    pub async fn stop(&mut self) {
        if !self.is_running {
            return;
        }

        self.is_running = false;
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        info!("Server stopped.");
    }
}

/// Builds the HTTP routes serving the health report of the given registry.
pub fn router(registry: Arc<Registry>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/info", get(info_handler))
        .with_state(registry)
        .layer(TraceLayer::new_for_http())
}

/// Runs a checkup. Responds with 503 if any check is unhealthy.
async fn health_handler(State(registry): State<Arc<Registry>>) -> (StatusCode, Json<Report>) {
    let report = registry.checkup().await;
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}

async fn info_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::from_fn;
    use crate::error::ProbeFailure;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_without_checks() {
        let (status, json) = get_json(router(Arc::new(Registry::new())), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_health_with_unhealthy_check() {
        let registry = Arc::new(Registry::new());
        registry
            .add_check("healthy check", from_fn(|| async { Ok(()) }))
            .unwrap();
        registry
            .add_check(
                "unhealthy check",
                from_fn(|| async { Err(ProbeFailure::new("unhealthy by nature")) }),
            )
            .unwrap();

        let (status, json) = get_json(router(registry), "/health").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            json,
            serde_json::json!([
                {"name": "healthy check", "is_healthy": true},
                {"name": "unhealthy check", "is_healthy": false, "reason": "unhealthy by nature"},
            ])
        );
    }

    #[tokio::test]
    async fn test_info() {
        let (status, json) = get_json(router(Arc::new(Registry::new())), "/info").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "healthcheckup");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }
}
