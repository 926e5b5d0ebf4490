use std::num::ParseIntError;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::csv_log::CsvLog;
use crate::measurement::Measurement;
use crate::response::{FetchResponse, FieldError};

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("malformed token {token:?}: {reason}")]
    MalformedToken { token: String, reason: String },
    #[error("device clock {0} is out of range")]
    ClockOutOfRange(i64),
    #[error("timestamp out of range: origin {origin} + offset {offset}")]
    TimestampOutOfRange { origin: i64, offset: i64 },
    #[error("failed to write CSV log: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub offset: i64,
    pub value: i64,
}

impl FromStr for Reading {
    type Err = ConvertError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: String| ConvertError::MalformedToken {
            token: token.to_string(),
            reason,
        };

        let fields: Vec<&str> = token.split(':').collect();
        let [offset, value] = fields.as_slice() else {
            return Err(malformed(format!(
                "expected 2 fields separated by ':', got {}",
                fields.len()
            )));
        };

        let parse = |field: &str| -> Result<i64, ConvertError> {
            field
                .trim()
                .parse()
                .map_err(|e: ParseIntError| malformed(format!("{field:?}: {e}")))
        };

        Ok(Reading {
            offset: parse(*offset)?,
            value: parse(*value)?,
        })
    }
}

pub fn is_sentinel(token: &str) -> bool {
    token.is_empty()
}

/// Tokens of `data` before the first empty one.
pub fn tokens(data: &str) -> impl Iterator<Item = &str> {
    data.split(',').take_while(|token| !is_sentinel(token))
}

/// Appends the readings of `response` to the CSV log at `path`.
///
/// `Ok(false)` leaves the file untouched: no response, a device error or a missing key.
pub fn convert(response: Option<&FetchResponse>, path: &Path) -> Result<bool, ConvertError> {
    convert_at(response, path, Utc::now())
}

pub fn convert_at(
    response: Option<&FetchResponse>,
    path: &Path,
    now: DateTime<Utc>,
) -> Result<bool, ConvertError> {
    let Some(response) = response else {
        return Ok(false);
    };
    let Some((current_local_time, data)) = response.payload()? else {
        log::warn!("Response carries no usable readings");
        return Ok(false);
    };

    let origin = now
        .timestamp()
        .checked_sub(current_local_time)
        .ok_or(ConvertError::ClockOutOfRange(current_local_time))?;

    let mut csv_log = CsvLog::open(path)?;
    // Rows written before a bad token stay in the file.
    let rows = match (append_readings(&mut csv_log, origin, data), csv_log.flush()) {
        (Ok(rows), flushed) => {
            flushed?;
            rows
        }
        (Err(e), flushed) => {
            if let Err(flush_err) = flushed {
                log::error!("Failed to flush {}: {flush_err}", path.display());
            }
            return Err(e);
        }
    };

    log::info!("Appended {rows} rows to {}", path.display());
    Ok(true)
}

fn append_readings(csv_log: &mut CsvLog, origin: i64, data: &str) -> Result<usize, ConvertError> {
    let mut rows = 0;
    for token in tokens(data) {
        let reading: Reading = token.parse()?;
        csv_log.append(&Measurement {
            timestamp: timestamp(origin, reading.offset)?,
            air_quality: reading.value,
        })?;
        rows += 1;
    }
    Ok(rows)
}

fn timestamp(origin: i64, offset: i64) -> Result<DateTime<Utc>, ConvertError> {
    origin
        .checked_add(offset)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or(ConvertError::TimestampOutOfRange { origin, offset })
}
