//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, body limit, metrics)
//! - Serve public assets from the configured directory
//! - Stop accepting connections when the lifecycle broadcasts shutdown

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};

use crate::catalog::CatalogClient;
use crate::config::AppConfig;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::observability::metrics;
use crate::store::RecordStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub catalog: Arc<CatalogClient>,
    base_url: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, catalog: CatalogClient, base_url: &str) -> Self {
        Self {
            store,
            catalog: Arc::new(catalog),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    /// Base URL echoed into views.
    pub fn base_url(&self) -> String {
        self.base_url.to_string()
    }

    /// Absolute URL for a route path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// HTTP server for the record front end.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and state.
    pub fn new(config: &AppConfig, state: AppState) -> Self {
        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/", get(handlers::index))
            .route("/add", get(handlers::add_form))
            .route("/processAdd", post(handlers::process_add))
            .route("/retrieve", get(handlers::retrieve_form))
            .route("/processRetrieve", post(handlers::process_retrieve))
            .route("/api", get(handlers::lookup_form))
            .route("/processApi", post(handlers::process_lookup))
            .route("/processAPI", post(handlers::process_lookup))
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state);

        if let Some(dir) = &config.http.static_dir {
            router = router.fallback_service(ServeDir::new(dir));
        }

        router.layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(RequestBodyLimitLayer::new(config.http.max_body_bytes)),
        )
    }

    /// The router, for driving the server without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server until the shutdown broadcast fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server no longer accepting connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    metrics::record_request(route, response.status().as_u16(), start);
    response
}
