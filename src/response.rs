use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("field {field:?} has an unexpected value: {value}")]
    Invalid { field: &'static str, value: Value },
}

/// Body of `/api/fetchAndCleanCache`, kept as the device sent it.
///
/// A healthy device sends `currentLocalTime` and `data`; a failing one sends `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FetchResponse(Value);

impl From<Value> for FetchResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl FetchResponse {
    /// True when an `error` key is present, whatever its value.
    pub fn has_error(&self) -> bool {
        self.0.get("error").is_some()
    }

    /// Device clock and encoded readings.
    ///
    /// `Ok(None)` when the device reported an error or a key is missing. A key holding
    /// something other than an integer clock or a string of readings is an error.
    pub fn payload(&self) -> Result<Option<(i64, &str)>, FieldError> {
        if self.has_error() {
            return Ok(None);
        }
        let (Some(clock), Some(data)) = (self.0.get("currentLocalTime"), self.0.get("data"))
        else {
            return Ok(None);
        };

        let clock = device_clock(clock).ok_or_else(|| FieldError::Invalid {
            field: "currentLocalTime",
            value: clock.clone(),
        })?;
        let data = data.as_str().ok_or_else(|| FieldError::Invalid {
            field: "data",
            value: data.clone(),
        })?;
        Ok(Some((clock, data)))
    }
}

// Firmwares disagree on the clock's type: integer, float or numeric string.
fn device_clock(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
