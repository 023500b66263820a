//! Record timestamps
//!
//! Records carry a `DateTime<Utc>` truncated to microseconds and are written
//! to disk as fractional Unix seconds (e.g. `1751889600.123456`). The same
//! textual form feeds the signature engine, so a record loaded back from disk
//! re-signs to the value it was stored with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Drop sub-microsecond precision from a point in time
pub fn truncate_to_micros(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_micros(ts.timestamp_micros()).unwrap_or(ts)
}

/// Fractional Unix seconds for a timestamp
pub fn to_epoch_seconds(ts: &DateTime<Utc>) -> f64 {
    ts.timestamp_micros() as f64 / 1_000_000.0
}

/// Inverse of [`to_epoch_seconds`], rounding to the nearest microsecond
pub fn from_epoch_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    DateTime::from_timestamp_micros((secs * 1_000_000.0).round() as i64)
}

/// Serde adapter: `DateTime<Utc>` <-> fractional Unix seconds
pub mod epoch_seconds {
    use super::*;

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(to_epoch_seconds(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        from_epoch_seconds(secs)
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {}", secs)))
    }
}
