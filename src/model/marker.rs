//! Processed display markers
//!
//! The processed store is produced by an external pipeline and its
//! documents use inconsistent field naming across sources. This system
//! never validates or rewrites them: a marker is an opaque JSON document
//! passed through as-is, with accessors that probe an ordered list of
//! known aliases per logical field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field aliases tried in order, first match wins
const LAT_ALIASES: &[&str] = &["lat", "latitude"];
const LNG_ALIASES: &[&str] = &["lng", "lon", "longitude"];
const EVENT_ALIASES: &[&str] = &["event"];
const URGENCY_ALIASES: &[&str] = &["urgency", "severity"];
const SOURCE_ALIASES: &[&str] = &["source"];

/// A display-ready marker produced by the external processor
///
/// Serializes transparently: whatever document was in the store is what
/// goes over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessedMarker(Value);

impl ProcessedMarker {
    /// Latitude, if the document carries one under a known alias
    pub fn lat(&self) -> Option<f64> {
        self.number_field(LAT_ALIASES)
    }

    /// Longitude, if the document carries one under a known alias
    pub fn lng(&self) -> Option<f64> {
        self.number_field(LNG_ALIASES)
    }

    /// Event description, if present
    pub fn event(&self) -> Option<&str> {
        self.string_field(EVENT_ALIASES)
    }

    /// Urgency or severity label, if present
    pub fn urgency(&self) -> Option<&str> {
        self.string_field(URGENCY_ALIASES)
    }

    /// Originating source, if present
    pub fn source(&self) -> Option<&str> {
        self.string_field(SOURCE_ALIASES)
    }

    /// Whether the marker is displayable (has both coordinates)
    pub fn has_position(&self) -> bool {
        self.lat().is_some() && self.lng().is_some()
    }

    /// The underlying document
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn number_field(&self, aliases: &[&str]) -> Option<f64> {
        aliases.iter().find_map(|key| self.0.get(key).and_then(Value::as_f64))
    }

    fn string_field(&self, aliases: &[&str]) -> Option<&str> {
        aliases.iter().find_map(|key| self.0.get(key).and_then(Value::as_str))
    }
}

impl From<Value> for ProcessedMarker {
    fn from(doc: Value) -> Self {
        Self(doc)
    }
}
