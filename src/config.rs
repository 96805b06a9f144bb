//! Explicit configuration of a result collection.
//!
//! Values are passed to constructors; nothing in the library reads process-wide state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ResultError};

pub const DEFAULT_RESULT_SIZE: usize = 1000;
pub const DEFAULT_SUMMARY_TOP: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResultConfig {
    /// Number of top-scoring networks to keep, `0` to keep every scored network.
    pub size: usize,
    /// Where a finished collection is persisted when no explicit path is given.
    pub filename: PathBuf,
    /// Number of best networks described by a summary.
    pub summary_top: usize,
}

impl Default for ResultConfig {
    fn default() -> Self {
        ResultConfig {
            size: DEFAULT_RESULT_SIZE,
            filename: PathBuf::from("result.json"),
            summary_top: DEFAULT_SUMMARY_TOP,
        }
    }
}

impl ResultConfig {
    /// Reads a JSON configuration file. Missing fields take their default value.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => ResultError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ResultError::Io(err),
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| ResultError::InvalidConfig(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResultConfig::default();
        assert_eq!(config.size, 1000);
        assert_eq!(config.filename, PathBuf::from("result.json"));
        assert_eq!(config.summary_top, 10);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = ResultConfig::from_json(r#"{ "size": 0 }"#).unwrap();
        assert_eq!(config.size, 0);
        assert_eq!(config.summary_top, DEFAULT_SUMMARY_TOP);
    }

    #[test]
    fn test_unknown_or_mistyped_fields_are_rejected() {
        assert!(matches!(
            ResultConfig::from_json(r#"{ "sise": 3 }"#),
            Err(ResultError::InvalidConfig(_))
        ));
        assert!(matches!(
            ResultConfig::from_json(r#"{ "size": -1 }"#),
            Err(ResultError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = ResultConfig::from_path("/nonexistent/netresult/config.json").unwrap_err();
        assert!(matches!(err, ResultError::NotFound { .. }));
    }

    #[test]
    fn test_reads_file() {
        let path = std::env::temp_dir().join(format!("netresult-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "size": 25, "filename": "out.json" }"#).unwrap();
        let config = ResultConfig::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.size, 25);
        assert_eq!(config.filename, PathBuf::from("out.json"));
    }
}
