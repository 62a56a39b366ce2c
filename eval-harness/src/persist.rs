use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One persisted line of the run log: question and predicted answer.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EvalRecord {
    pub q: String,
    pub r: String,
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to write run log {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize run log")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

pub fn log_file_name(hop: i64, method: &str) -> String {
    format!("manual-scores-hop-{hop}-{method}.json")
}

/// Appends the whole run as one pretty-printed JSON array. Append, not merge:
/// repeated runs accumulate arrays in the same file, readers must expect
/// concatenated documents.
pub fn append_run_log(
    dir: &Path,
    hop: i64,
    method: &str,
    records: &[EvalRecord],
) -> Result<PathBuf, PersistError> {
    let path = dir.join(log_file_name(hop, method));
    let payload =
        serde_json::to_string_pretty(records).map_err(|e| PersistError::Serialize { source: e })?;
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| PersistError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
    file.write_all(payload.as_bytes())
        .map_err(|e| PersistError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
    Ok(path)
}
