//! Record formatting
//!
//! A record is a JSON object holding four reserved keys (`level`, `time`,
//! `message`, `callers`) plus the snapshot's fields. Fields never replace a
//! reserved key: a field named `message` is dropped from the record.

use super::fields::Fields;
use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use serde_json::{Map, Value};

pub const LEVEL_KEY: &str = "level";
pub const TIME_KEY: &str = "time";
pub const MESSAGE_KEY: &str = "message";
pub const CALLERS_KEY: &str = "callers";

/// Keys the formatter always writes itself
pub const RESERVED_KEYS: [&str; 4] = [LEVEL_KEY, TIME_KEY, MESSAGE_KEY, CALLERS_KEY];

/// A formatted record, keys sorted
pub type Record = Map<String, Value>;

/// Build the record for one logging call
pub fn format_record(
    level: LogLevel,
    message: &str,
    callers: &[String],
    fields: Option<&Fields>,
    time: DateTime<Local>,
) -> Record {
    let mut record = Map::new();
    record.insert(LEVEL_KEY.to_string(), Value::String(level.to_str().to_string()));
    record.insert(TIME_KEY.to_string(), Value::from(unix_nanos(&time)));
    record.insert(MESSAGE_KEY.to_string(), Value::String(message.to_string()));
    record.insert(
        CALLERS_KEY.to_string(),
        Value::Array(callers.iter().cloned().map(Value::String).collect()),
    );

    if let Some(fields) = fields {
        for (key, value) in fields {
            if !record.contains_key(key) {
                record.insert(key.clone(), value.to_json_value());
            }
        }
    }

    record
}

/// Encode a record as a single JSON line
///
/// Encoding is best-effort; a failure yields an empty string.
pub fn encode(record: &Record) -> String {
    serde_json::to_string(record).unwrap_or_default()
}

fn unix_nanos(time: &DateTime<Local>) -> i64 {
    // Outside roughly 1677..2262 nanoseconds overflow i64; fall back to
    // microsecond precision there.
    time.timestamp_nanos_opt()
        .unwrap_or_else(|| time.timestamp_micros().saturating_mul(1_000))
}
