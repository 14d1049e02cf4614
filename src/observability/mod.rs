//! Observability subsystem for geopost
//!
//! Structured logging only:
//! - One log line = one event
//! - Deterministic field ordering
//! - Synchronous, no buffering
//! - Warnings and errors go to stderr
//!
//! Logging failure must never fail the request being logged.

mod logger;

pub use logger::{Logger, Severity};
