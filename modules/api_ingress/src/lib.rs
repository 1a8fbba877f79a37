use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use axum::{middleware::from_fn, routing::get, Router};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

/// Standard API error response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// HTTP status code
    pub code: u16,
    /// RFC3339 timestamp when the error occurred
    pub timestamp: String,
    /// Optional request ID for tracking
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            timestamp: chrono::Utc::now().to_rfc3339(),
            request_id: None,
        }
    }

    pub fn with_request_id(
        error: impl Into<String>,
        code: u16,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            error: error.into(),
            code,
            timestamp: chrono::Utc::now().to_rfc3339(),
            request_id: Some(request_id.into()),
        }
    }
}

/// HTTP host: wraps module routes with the shared middleware stack and serves them.
pub struct ApiIngress {
    config: ApiIngressConfig,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Merge `routes` with `/health` and the JSON 404 fallback, then apply layers.
    ///
    /// Layers added later wrap the earlier ones, so the effective order from
    /// outermost to innermost is:
    /// SetRequestId -> PropagateRequestId -> Trace -> push_req_id_to_extensions
    /// -> Timeout -> CORS -> BodyLimit
    pub fn build_router(&self, routes: Router) -> Router {
        tracing::debug!("Building router");
        let mut router = routes
            .route("/health", get(web::health_check))
            .fallback(web::not_found);

        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        if self.config.timeout_sec > 0 {
            router = router.layer(TimeoutLayer::new(Duration::from_secs(
                self.config.timeout_sec,
            )));
        }

        let x_request_id = request_id::header();

        // request_id into extensions and the current span (needs the trace span)
        router = router.layer(from_fn(request_id::push_req_id_to_extensions));
        router = router.layer(request_id::create_trace_layer());

        // echo the id back on the response
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));

        // generate x-request-id when the client did not send one
        router = router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        router
    }

    /// Bind, serve until `cancel` fires, then drain in-flight requests.
    pub async fn serve(&self, router: Router, cancel: CancellationToken) -> Result<()> {
        let addr: SocketAddr = self.config.bind_addr.parse().map_err(|e| {
            anyhow::anyhow!("Invalid bind address '{}': {}", self.config.bind_addr, e)
        })?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server bound on {}", addr);

        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
