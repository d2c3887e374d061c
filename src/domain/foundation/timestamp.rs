//! UTC timestamps.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A point in time, always UTC. Serialized as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wraps a value read back from storage.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn now_falls_between_surrounding_clock_reads() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(*ts.as_datetime() >= before && *ts.as_datetime() <= after);
    }

    #[test]
    fn displays_as_rfc3339_in_utc() {
        let dt = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap();

        assert_eq!(Timestamp::from_datetime(dt).to_string(), "2025-03-01T12:30:00.000Z");
    }

    #[test]
    fn serializes_as_plain_string() {
        let dt = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap();
        let json = serde_json::to_string(&Timestamp::from_datetime(dt)).unwrap();

        assert_eq!(json, "\"2025-03-01T12:30:00Z\"");
    }
}
