// src/config.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::utils::AppError;

/// Settings shared by the fetcher, archive reader, batch parser and exporters.
///
/// Loaded from a JSON file whose root holds a `"config"` object. Every field
/// has a default so a partial file is enough.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub fights_href: String,
    pub profiles_href: String,
    pub ratings_href: String,

    pub fights_store: PathBuf,
    pub profiles_store: PathBuf,
    pub ratings_store: PathBuf,

    pub csv_folder: PathBuf,
    pub fights_csv_prefix: String,
    pub profiles_csv_prefix: String,
    pub fightsnips_csv_prefix: String,
    pub ratings_csv_prefix: String,

    pub user_agent: String,
    pub request_delay_ms: u64,

    /// Stop a batch after this many documents.
    pub max_documents: Option<usize>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://boxrec.com".to_string(),
            fights_href: "/en/event/".to_string(),
            profiles_href: "/en/proboxer/".to_string(),
            ratings_href: "/en/ratings?offset=".to_string(),
            fights_store: PathBuf::from("./archive/fights"),
            profiles_store: PathBuf::from("./archive/profiles"),
            ratings_store: PathBuf::from("./archive/ratings"),
            csv_folder: PathBuf::from("./output"),
            fights_csv_prefix: "boxrec-fights".to_string(),
            profiles_csv_prefix: "boxrec-profiles".to_string(),
            fightsnips_csv_prefix: "boxrec-fightsnips".to_string(),
            ratings_csv_prefix: "boxrec-ratings".to_string(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) boxrec_extractor/0.1".to_string(),
            request_delay_ms: 1500,
            max_documents: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    config: ScrapeConfig,
}

impl ScrapeConfig {
    /// Reads the JSON config file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let file: ConfigFile = serde_json::from_str(&raw).map_err(|e| {
            AppError::Config(format!("Invalid config file '{}': {}", path.display(), e))
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(file.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "config": { "fights_store": "/tmp/fights", "max_documents": 10 } }"#,
        )
        .unwrap();

        let config = ScrapeConfig::from_file(&path).unwrap();
        assert_eq!(config.fights_store, PathBuf::from("/tmp/fights"));
        assert_eq!(config.max_documents, Some(10));
        assert_eq!(config.profiles_href, "/en/proboxer/");
        assert_eq!(config.request_delay_ms, 1500);
    }

    #[test]
    fn missing_config_object_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "fights_store": "/tmp/fights" }"#).unwrap();

        match ScrapeConfig::from_file(&path) {
            Err(AppError::Config(msg)) => assert!(msg.contains("config.json")),
            other => panic!("expected config error, got {:?}", other.map(|_| ())),
        }
    }
}
