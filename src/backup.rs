use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::response::FetchResponse;

/// Dumps the raw response to `path` so it can be recovered by hand, replacing any previous dump.
pub fn write(response: &FetchResponse, path: &Path) -> Result<(), anyhow::Error> {
    let dump = serde_json::to_string_pretty(response).context("Failed to serialize response")?;
    fs::write(path, dump)
        .with_context(|| format!("Failed to write backup file {}", path.display()))?;
    log::info!("Raw response saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn test_write_dumps_raw_response() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("backup.dat");
        let body = r#"{"currentLocalTime": 100, "data": "abc,5:16", "battery": 87}"#;
        let response: FetchResponse = serde_json::from_str(body).unwrap();

        write(&response, &path).unwrap();

        let dumped: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(dumped, serde_json::from_str::<Value>(body).unwrap());
    }

    #[test]
    fn test_write_replaces_previous_backup() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("backup.dat");
        fs::write(&path, "old dump that is much longer than the new one").unwrap();
        let response: FetchResponse = serde_json::from_str(r#"{"data": "x"}"#).unwrap();

        write(&response, &path).unwrap();

        assert!(!fs::read_to_string(&path).unwrap().contains("old dump"));
    }

    #[test]
    fn test_write_reports_missing_directory() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("missing").join("backup.dat");
        let response: FetchResponse = serde_json::from_str(r#"{"data": "x"}"#).unwrap();

        let err = write(&response, &path).unwrap_err();
        assert!(err.to_string().starts_with("Failed to write backup file"));
    }
}
