//! Query settings
//!
//! Stored as a plain JSON file. Every field has a default, so a partial
//! (or missing) file is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{SpecError, SpecResult};
use crate::query::{DEFAULT_KEYWORDS, DEFAULT_NOT_FOUND_HINT};

/// Spec fetched when no source is given
pub const DEFAULT_SOURCE: &str = "https://api.uzapi.com.br/docs/swagger.json";

/// Settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Spec URL or file path
    pub source: String,
    /// Keywords for listings
    pub keywords: Vec<String>,
    /// Network read timeout in seconds
    pub timeout_secs: u64,
    /// Substring selecting the paths shown when an operation is missing
    pub not_found_hint: String,
    /// Operation described when no path is given
    pub detail_path: String,
    pub detail_method: String,
    /// Default file for `--output` on listings
    pub listing_output: PathBuf,
    /// Default file for `--output` on detail reports
    pub detail_output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            timeout_secs: 30,
            not_found_hint: DEFAULT_NOT_FOUND_HINT.to_string(),
            detail_path: "/{username}/{version}/{phone_number_id}/messages".to_string(),
            detail_method: "post".to_string(),
            listing_output: PathBuf::from("endpoints_log.txt"),
            detail_output: PathBuf::from("uzapi_details.txt"),
        }
    }
}

impl Settings {
    /// Default settings file location
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "swagger-query")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// tried and defaults are used when nothing is there.
    pub fn load(explicit: Option<&Path>) -> SpecResult<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from_file(&path),
                _ => {
                    debug!("No settings file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn load_from_file(path: &Path) -> SpecResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SpecError::Config(format!("{}: {}", path.display(), e)))?;
        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| SpecError::Config(format!("{}: {}", path.display(), e)))?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.source, DEFAULT_SOURCE);
        assert_eq!(
            settings.keywords,
            vec!["send", "message", "status", "connection", "check"]
        );
        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.listing_output, PathBuf::from("endpoints_log.txt"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"source": "specs/local.json", "keywords": ["webhook"], "timeoutSecs": 5}"#,
        )
        .unwrap();

        let settings = Settings::load(Some(path.as_path())).unwrap();
        assert_eq!(settings.source, "specs/local.json");
        assert_eq!(settings.keywords, vec!["webhook"]);
        assert_eq!(settings.timeout_secs, 5);
        assert_eq!(settings.not_found_hint, "message");
        assert_eq!(settings.detail_method, "post");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = Settings::load(Some(temp_dir.path().join("absent.json").as_path())).unwrap_err();
        assert!(matches!(err, SpecError::Config(_)));
    }

    #[test]
    fn test_invalid_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Settings::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, SpecError::Config(_)));
    }

    #[test]
    fn test_settings_round_trip() {
        let settings = Settings {
            keywords: vec!["send".to_string()],
            ..Settings::default()
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        assert!(json.contains("\"notFoundHint\""));
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
