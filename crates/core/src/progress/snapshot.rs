//! Persisted progress document.
//!
//! Decoding merges the stored document over fresh defaults one field at a
//! time, so a document written by an older build (missing fields) or damaged
//! in part still yields a complete `Progress`. Decoding never fails; what had
//! to be recovered is reported in a [`DecodeReport`] for the caller to log.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::progress::entity::Progress;

/// Serde adapter writing timestamps as `2024-06-06T06:30:00.000Z` and
/// reading any RFC 3339 timestamp.
pub(crate) mod iso8601 {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    use crate::time::to_iso8601;

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_iso8601(*at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}

/// What decoding had to repair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Set when the whole document was unusable and defaults were used.
    pub discarded: Option<String>,
    /// Keys present in the document whose values could not be read.
    pub reset_fields: Vec<&'static str>,
    /// Repeated entries dropped from set-like fields.
    pub duplicates_dropped: usize,
}

impl DecodeReport {
    /// True when the document was read as stored.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.discarded.is_none() && self.reset_fields.is_empty() && self.duplicates_dropped == 0
    }
}

/// Serialize progress into its persisted JSON form.
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn encode(progress: &Progress) -> Result<String, serde_json::Error> {
    serde_json::to_string(progress)
}

/// Read a persisted document, falling back to `defaults` wherever it is
/// missing or unreadable. Unknown keys are ignored.
#[must_use]
pub fn decode(raw: &str, defaults: Progress) -> (Progress, DecodeReport) {
    let mut report = DecodeReport::default();

    let mut fields = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(fields)) => fields,
        Ok(other) => {
            report.discarded = Some(format!("expected a JSON object, found {}", kind_of(&other)));
            return (defaults, report);
        }
        Err(err) => {
            report.discarded = Some(err.to_string());
            return (defaults, report);
        }
    };

    let mut progress = defaults;
    let r = &mut report;
    merge(&mut fields, "modulesCompleted", &mut progress.modules_completed, r);
    merge(&mut fields, "cardsRead", &mut progress.cards_read, r);
    merge(&mut fields, "quizAttempts", &mut progress.quiz_attempts, r);
    merge(&mut fields, "flashcardProgress", &mut progress.flashcard_progress, r);
    merge(&mut fields, "currentPath", &mut progress.current_path, r);
    merge_timestamp(&mut fields, "lastVisited", &mut progress.last_visited, r);
    merge(&mut fields, "bookmarks", &mut progress.bookmarks, r);
    merge(&mut fields, "frenchPerspectiveEnabled", &mut progress.french_perspective_enabled, r);

    report.duplicates_dropped = progress.dedup();
    (progress, report)
}

fn merge<T: DeserializeOwned>(
    fields: &mut Map<String, Value>,
    key: &'static str,
    slot: &mut T,
    report: &mut DecodeReport,
) {
    let Some(value) = fields.remove(key) else {
        return;
    };
    match serde_json::from_value(value) {
        Ok(parsed) => *slot = parsed,
        Err(_) => report.reset_fields.push(key),
    }
}

fn merge_timestamp(
    fields: &mut Map<String, Value>,
    key: &'static str,
    slot: &mut DateTime<Utc>,
    report: &mut DecodeReport,
) {
    let Some(value) = fields.remove(key) else {
        return;
    };
    let parsed = value
        .as_str()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok());
    match parsed {
        Some(ts) => *slot = ts.with_timezone(&Utc),
        None => report.reset_fields.push(key),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
