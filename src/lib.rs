//! geopost - a minimal ingestion and reporting API for geotagged event reports
//!
//! Clients submit geotagged event reports over HTTP. An external processor
//! consumes the posts store and rewrites the processed-markers store on its
//! own schedule; this service exposes both over a small JSON API.

pub mod cli;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod store;
