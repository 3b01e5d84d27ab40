//! Note records as they appear in export batches and the durable log.
//!
//! A record is an arbitrary JSON object owned by the upstream scraper; this
//! crate only inspects and manages the one `synced` field. Everything else
//! passes through untouched, including non-ASCII text, which `serde_json`
//! leaves unescaped so content round-trips byte-for-byte.

use serde_json::{Map, Value};
use thiserror::Error;

/// The one field this crate manages on every record.
pub const SYNCED_FIELD: &str = "synced";

/// Errors from parsing one line as a record.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The line is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The line is valid JSON but not an object (e.g. a bare number or array).
    #[error("line is valid JSON but not an object")]
    NotAnObject,
}

/// A single note record: an opaque JSON object plus the managed `synced` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Parses one line of JSON as a record.
    ///
    /// Only a JSON object qualifies; scalars and arrays are rejected even
    /// though they are syntactically valid JSON.
    pub fn parse(line: &str) -> Result<Record, ParseError> {
        match serde_json::from_str::<Value>(line)? {
            Value::Object(map) => Ok(Record(map)),
            _ => Err(ParseError::NotAnObject),
        }
    }

    /// Whether this record has been picked up by the downstream synchronizer.
    ///
    /// Only an explicit `"synced": true` counts. Absent, `false`, or a
    /// non-boolean value all mean the record is still pending.
    pub fn is_synced(&self) -> bool {
        matches!(self.0.get(SYNCED_FIELD), Some(Value::Bool(true)))
    }

    /// Forces `synced: false`, overwriting whatever the source batch carried.
    pub fn mark_unsynced(&mut self) {
        self.0.insert(SYNCED_FIELD.to_string(), Value::Bool(false));
    }

    /// Serializes the record as a single log line (no trailing newline).
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }

    /// Looks up a field by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_object_succeeds() {
        let record = Record::parse(r#"{"id": "a", "title": "hello"}"#).unwrap();
        assert_eq!(record.get("id"), Some(&Value::String("a".into())));
    }

    #[test]
    fn parse_invalid_json_fails() {
        assert!(matches!(Record::parse("not-json"), Err(ParseError::Json(_))));
    }

    #[test]
    fn parse_non_object_json_fails() {
        assert!(matches!(Record::parse("42"), Err(ParseError::NotAnObject)));
        assert!(matches!(Record::parse(r#"["a"]"#), Err(ParseError::NotAnObject)));
        assert!(matches!(Record::parse(r#""a""#), Err(ParseError::NotAnObject)));
    }

    #[test]
    fn mark_unsynced_overwrites_true() {
        let mut record = Record::parse(r#"{"id": "a", "synced": true}"#).unwrap();
        assert!(record.is_synced());

        record.mark_unsynced();
        assert!(!record.is_synced());
        assert_eq!(record.get(SYNCED_FIELD), Some(&Value::Bool(false)));
    }

    #[test]
    fn only_explicit_true_counts_as_synced() {
        assert!(Record::parse(r#"{"synced": true}"#).unwrap().is_synced());

        assert!(!Record::parse(r#"{"synced": false}"#).unwrap().is_synced());
        assert!(!Record::parse(r#"{"id": "a"}"#).unwrap().is_synced());
        assert!(!Record::parse(r#"{"synced": "true"}"#).unwrap().is_synced());
        assert!(!Record::parse(r#"{"synced": 1}"#).unwrap().is_synced());
        assert!(!Record::parse(r#"{"synced": null}"#).unwrap().is_synced());
    }

    #[test]
    fn non_ascii_content_round_trips_unescaped() {
        let line = r#"{"title":"小红书笔记 🎉","synced":false}"#;
        let record = Record::parse(line).unwrap();
        let out = record.to_line().unwrap();

        // serde_json emits UTF-8 directly rather than \u escapes.
        assert!(out.contains("小红书笔记"));
        assert!(out.contains("🎉"));
        assert_eq!(Record::parse(&out).unwrap(), record);
    }
}
