use chrono::{DateTime, Utc};
use serde::Serialize;

/// One row of the CSV log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub air_quality: i64,
}
