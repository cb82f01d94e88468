//! Response parsing
//!
//! Turns JSON payloads into session-bound entities. Listing payloads hold
//! their records under an entity-named key next to pagination metadata; the
//! metadata keys are skipped and every remaining collection is taken.

use crate::error::{Error, Result};
use crate::models::ApiObject;
use crate::session::Session;
use crate::types::JsonValue;

/// Top-level keys that carry metadata rather than records
pub const RESERVED_KEYS: [&str; 6] = [
    "meta",
    "traceId",
    "aggregations",
    "total",
    "lastMessageId",
    "nextPage",
];

/// Converts JSON into entities
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectParser;

impl ObjectParser {
    /// Parse one JSON object and bind it to the session
    pub fn parse_single<T: ApiObject>(value: JsonValue, session: &Session) -> Result<T> {
        if !value.is_object() {
            return Err(Error::invalid_argument(format!(
                "Cannot parse {} from a non-object JSON value",
                T::ENTITY
            )));
        }
        let mut object: T = serde_json::from_value(value)?;
        object.bind_session(session.clone());
        Ok(object)
    }

    /// Record values of a listing body, in response order
    ///
    /// Arrays contribute their elements, any other value contributes itself.
    pub fn collect_records(body: &JsonValue) -> Result<Vec<JsonValue>> {
        let map = body
            .as_object()
            .ok_or_else(|| Error::invalid_argument("Response body is not a JSON object"))?;

        let mut records = Vec::new();
        for (key, value) in map {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            match value {
                JsonValue::Array(items) => records.extend(items.iter().cloned()),
                other => records.push(other.clone()),
            }
        }
        Ok(records)
    }

    /// Parse every record of a listing body
    pub fn parse_multiple<T: ApiObject>(body: &JsonValue, session: &Session) -> Result<Vec<T>> {
        Self::parse_records(Self::collect_records(body)?, session)
    }

    /// Parse already-collected records
    pub fn parse_records<T: ApiObject>(
        records: Vec<JsonValue>,
        session: &Session,
    ) -> Result<Vec<T>> {
        records
            .into_iter()
            .map(|record| Self::parse_single(record, session))
            .collect()
    }
}
