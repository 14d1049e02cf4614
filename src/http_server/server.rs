//! # HTTP Server
//!
//! Main HTTP server combining the API routers with static frontend
//! serving.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::store::JsonStore;

use super::config::HttpServerConfig;
use super::marker_routes::{marker_routes, MarkersState};
use super::post_routes::{post_routes, PostsState};

/// HTTP server for the geopost API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new(posts: JsonStore, processed: JsonStore, static_dir: &Path) -> Self {
        Self::with_config(HttpServerConfig::default(), posts, processed, static_dir)
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(
        config: HttpServerConfig,
        posts: JsonStore,
        processed: JsonStore,
        static_dir: &Path,
    ) -> Self {
        let router = Self::build_router(&config, posts, processed, static_dir);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(
        config: &HttpServerConfig,
        posts: JsonStore,
        processed: JsonStore,
        static_dir: &Path,
    ) -> Router {
        let posts_state = Arc::new(PostsState::new(posts));
        let markers_state = Arc::new(MarkersState::new(processed));

        // Configure CORS from config
        let cors = if config.cors_origins.is_empty() {
            // No origins configured: cross-origin requests are permitted
            // from anywhere
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            // API routes under /api
            .nest("/api", post_routes(posts_state).merge(marker_routes(markers_state)))
            // Everything else is a static frontend asset
            .fallback_service(ServeDir::new(static_dir))
            // Apply CORS middleware
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .expect("Invalid socket address");

        println!("Starting geopost HTTP server on {}", addr);
        println!("API endpoints:");
        println!("  - POST /api/posts - Submit an event report");
        println!("  - GET  /api/posts - Raw posts store (debug)");
        println!("  - GET  /api/processed - Processed markers");
        println!("Static frontend served for all other paths");

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
