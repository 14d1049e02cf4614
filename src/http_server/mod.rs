//! # geopost HTTP Server Module
//!
//! Axum-based API server combining the ingestion and read endpoints with
//! static frontend serving.
//!
//! # Endpoints
//!
//! - `POST /api/posts` - submit an event report
//! - `GET /api/posts` - raw posts store (debug/inspection)
//! - `GET /api/processed` - processed markers, with `Last-Modified`
//! - any other path - static frontend assets

pub mod config;
pub mod marker_routes;
pub mod post_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
