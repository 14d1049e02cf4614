//! JSON-array document store
//!
//! A `JsonStore` wraps one backing file. Appends are read-modify-write of
//! the full array; reads always go back to disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::observability::Logger;

use super::errors::{StoreError, StoreResult};

/// Outcome of reading a store
///
/// Distinguishes an empty or absent store from an unreadable one so
/// callers can choose their own fallback. The HTTP read endpoints degrade
/// both failure cases to an empty sequence.
#[derive(Debug)]
pub enum ReadOutcome {
    /// The file existed and parsed as a JSON array
    Loaded(Vec<Value>),
    /// The backing file does not exist
    Missing,
    /// The file exists but could not be read or parsed
    Unreadable(StoreError),
}

impl ReadOutcome {
    /// The documents if loaded, an empty sequence otherwise
    pub fn into_documents(self) -> Vec<Value> {
        match self {
            ReadOutcome::Loaded(docs) => docs,
            ReadOutcome::Missing | ReadOutcome::Unreadable(_) => Vec::new(),
        }
    }
}

/// A JSON-array document store backed by a single file
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a handle over the given backing file
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store name for logging (the file stem)
    pub fn name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("store")
    }

    /// Create the backing file as an empty array if it does not exist.
    ///
    /// Creates parent directories as needed. Idempotent: an existing file
    /// is left untouched.
    pub fn init(&self) -> StoreResult<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        self.write_documents(&[])
    }

    /// Read the full store in insertion order
    pub fn read(&self) -> ReadOutcome {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return ReadOutcome::Missing,
            Err(e) => return ReadOutcome::Unreadable(StoreError::Io(e.to_string())),
        };

        match serde_json::from_str::<Vec<Value>>(&content) {
            Ok(docs) => ReadOutcome::Loaded(docs),
            Err(e) => ReadOutcome::Unreadable(StoreError::Malformed(e.to_string())),
        }
    }

    /// Read the full store, degrading to an empty sequence when the file
    /// is missing or unreadable.
    ///
    /// The unreadable case is logged at WARN and swallowed: the read
    /// endpoints stay available even over a corrupted store.
    pub fn read_or_empty(&self) -> Vec<Value> {
        match self.read() {
            ReadOutcome::Loaded(docs) => docs,
            ReadOutcome::Missing => Vec::new(),
            ReadOutcome::Unreadable(e) => {
                let detail = e.to_string();
                Logger::warn("STORE_UNREADABLE", &[("detail", &detail), ("store", self.name())]);
                Vec::new()
            }
        }
    }

    /// Append one document and return the new store length.
    ///
    /// Read-modify-write of the whole array with no locking: two
    /// concurrent appends may interleave and one write may be lost (last
    /// writer wins). An unreadable store falls back to empty before the
    /// push, same as the read path.
    pub fn append(&self, doc: Value) -> StoreResult<usize> {
        let mut docs = self.read_or_empty();
        docs.push(doc);
        self.write_documents(&docs)?;
        Ok(docs.len())
    }

    /// Last-modified time of the backing file, if obtainable
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        let mtime = fs::metadata(&self.path).ok()?.modified().ok()?;
        Some(DateTime::<Utc>::from(mtime))
    }

    fn write_documents(&self, docs: &[Value]) -> StoreResult<()> {
        // Pretty-printed 2-space JSON, the format the external processor reads
        let mut content =
            serde_json::to_string_pretty(docs).map_err(|e| StoreError::Serialize(e.to_string()))?;
        content.push('\n');
        fs::write(&self.path, content).map_err(|e| StoreError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> JsonStore {
        JsonStore::open(temp.path().join("data").join("events.json"))
    }

    #[test]
    fn test_init_creates_empty_array() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        store.init().unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.trim(), "[]");
    }

    #[test]
    fn test_init_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        store.init().unwrap();
        store.append(json!({"event": "flood"})).unwrap();
        store.init().unwrap();

        assert_eq!(store.read_or_empty().len(), 1);
    }

    #[test]
    fn test_append_returns_new_length() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.init().unwrap();

        assert_eq!(store.append(json!({"n": 1})).unwrap(), 1);
        assert_eq!(store.append(json!({"n": 2})).unwrap(), 2);
        assert_eq!(store.append(json!({"n": 3})).unwrap(), 3);
    }

    #[test]
    fn test_read_preserves_insertion_order() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.init().unwrap();

        store.append(json!({"n": 1})).unwrap();
        store.append(json!({"n": 2})).unwrap();

        let docs = match store.read() {
            ReadOutcome::Loaded(docs) => docs,
            other => panic!("expected Loaded, got {:?}", other),
        };
        assert_eq!(docs[0]["n"], 1);
        assert_eq!(docs[1]["n"], 2);
    }

    #[test]
    fn test_read_missing_store() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        assert!(matches!(store.read(), ReadOutcome::Missing));
        assert!(store.read_or_empty().is_empty());
    }

    #[test]
    fn test_read_corrupt_store_degrades_to_empty() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.init().unwrap();
        fs::write(store.path(), "not json at all").unwrap();

        assert!(matches!(store.read(), ReadOutcome::Unreadable(_)));
        assert!(store.read_or_empty().is_empty());
    }

    #[test]
    fn test_append_over_corrupt_store_starts_fresh() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.init().unwrap();
        fs::write(store.path(), "{ broken").unwrap();

        let count = store.append(json!({"event": "fire"})).unwrap();

        assert_eq!(count, 1);
        assert_eq!(store.read_or_empty().len(), 1);
    }

    #[test]
    fn test_written_file_is_pretty_printed() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.init().unwrap();
        store.append(json!({"event": "flood"})).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("[\n  {"), "expected 2-space indentation: {}", content);
    }

    #[test]
    fn test_modified_tracks_backing_file() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        assert!(store.modified().is_none());
        store.init().unwrap();
        assert!(store.modified().is_some());
    }

    #[test]
    fn test_store_name_is_file_stem() {
        let temp = TempDir::new().unwrap();
        let store = JsonStore::open(temp.path().join("posts_to_process.json"));
        assert_eq!(store.name(), "posts_to_process");
    }
}
