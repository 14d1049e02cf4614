//! Storage Layer for geopost
//!
//! Two append/read JSON document stores on disk: the posts store and the
//! processed-markers store. Each is a single human-readable file holding a
//! pretty-printed JSON array, initialized to `[]` when missing.
//!
//! The files are the integration surface with the external marker
//! processor: it reads the posts store and fully rewrites the processed
//! store on its own schedule. No locking or signaling protocol is placed
//! around that handoff, and every read goes back to disk so out-of-band
//! writes are visible on the next request.

mod errors;
mod json_store;

pub use errors::{StoreError, StoreResult};
pub use json_store::{JsonStore, ReadOutcome};

/// Posts store file name (consumed by the external processor)
pub const POSTS_FILE_NAME: &str = "posts_to_process.json";

/// Processed-markers store file name (owned by the external processor)
pub const PROCESSED_FILE_NAME: &str = "processed_markers.json";
