//! Runtime configuration: command-line defaults plus LSP initialization options.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::detect::Detector;
use crate::error::Result;
use crate::hover::DEFAULT_DOCS_BASE_URL;
use crate::table::CompatTable;

/// Default quiet window before a changed document is re-scanned.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub debounce: Duration,
    /// Replacement table; the bundled one is used when `None`
    pub table_path: Option<PathBuf>,
    pub docs_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            table_path: None,
            docs_base_url: DEFAULT_DOCS_BASE_URL.to_string(),
        }
    }
}

/// `initializationOptions` accepted from the client.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitializationOptions {
    pub table_path: Option<PathBuf>,
    pub docs_base_url: Option<String>,
}

impl Config {
    /// Overlay client-supplied options. Invalid options are logged and ignored.
    pub fn apply_initialization_options(&mut self, value: Option<serde_json::Value>) {
        let Some(value) = value else {
            return;
        };

        match serde_json::from_value::<InitializationOptions>(value) {
            Ok(options) => {
                if let Some(path) = options.table_path {
                    self.table_path = Some(path);
                }
                if let Some(url) = options.docs_base_url {
                    self.docs_base_url = url;
                }
            }
            Err(e) => warn!("Ignoring invalid initialization options: {}", e),
        }
    }

    /// Load the configured table, or the bundled one.
    pub fn load_table(&self) -> Result<Arc<CompatTable>> {
        match &self.table_path {
            Some(path) => {
                let table = CompatTable::from_path(path)?;
                info!(
                    "Loaded compatibility table from {} ({} features)",
                    path.display(),
                    table.len()
                );
                Ok(Arc::new(table))
            }
            None => Ok(CompatTable::bundled()),
        }
    }

    /// Build a detector, falling back to the bundled table if loading fails.
    pub fn load_detector(&self) -> Detector {
        match self.load_table() {
            Ok(table) => Detector::new(table),
            Err(e) => {
                error!("Failed to load compatibility table: {}. Using bundled table.", e);
                Detector::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.debounce, Duration::from_millis(1000));
        assert_eq!(config.table_path, None);
        assert_eq!(config.docs_base_url, DEFAULT_DOCS_BASE_URL);
    }

    #[test]
    fn test_apply_initialization_options() {
        let mut config = Config::default();
        config.apply_initialization_options(Some(json!({
            "tablePath": "/tmp/table.json",
            "docsBaseUrl": "https://docs.example.test/",
            "somethingElse": true
        })));
        assert_eq!(config.table_path, Some(PathBuf::from("/tmp/table.json")));
        assert_eq!(config.docs_base_url, "https://docs.example.test/");
    }

    #[test]
    fn test_invalid_initialization_options_are_ignored() {
        let mut config = Config::default();
        config.apply_initialization_options(Some(json!({ "tablePath": 42 })));
        assert_eq!(config, Config::default());

        config.apply_initialization_options(None);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_detector_falls_back_to_bundled() {
        let config = Config {
            table_path: Some(PathBuf::from("/definitely/not/here.json")),
            ..Config::default()
        };
        assert!(config.load_table().is_err());

        let detector = config.load_detector();
        assert!(detector.table().contains(Domain::Css, "display: grid"));
    }

    #[test]
    fn test_load_custom_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        std::fs::write(
            &path,
            r#"{ "html": [ { "id": "popover", "baseline": true, "mdn": "p" } ] }"#,
        )
        .unwrap();

        let config = Config {
            table_path: Some(path),
            ..Config::default()
        };
        let detector = config.load_detector();
        assert!(detector.lookup(Domain::Html, "popover").unwrap().is_baseline);
        assert!(detector.table().features(Domain::Css).is_empty());
    }
}
