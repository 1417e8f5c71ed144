//! Configuration loader for Parley.
//!
//! Reads an optional TOML file and deserializes it into [`AppConfig`]. A
//! missing file means defaults; a file that cannot be read or parsed is
//! reported to the caller, which decides how to fall back.

use std::path::{Path, PathBuf};

use parley_types::config::AppConfig;
use thiserror::Error;

use crate::sqlite::pool::default_database_url;

/// A config file that exists but could not be used.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to read or parse, returns the error.
/// - Otherwise returns the parsed config.
pub async fn load_config(path: &Path) -> Result<AppConfig, ConfigLoadError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigLoadError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    toml::from_str::<AppConfig>(&content).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the database URL: explicit setting first, then the data-dir default.
pub fn resolve_database_url(config: &AppConfig) -> String {
    config
        .storage
        .database_url
        .clone()
        .unwrap_or_else(default_database_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("parley.toml")).await.unwrap();
        assert_eq!(config.server.port, 9000);
        assert!(config.storage.database_url.is_none());
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("parley.toml");
        tokio::fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 8080
request_timeout_secs = 10

[storage]
database_url = "sqlite:///var/lib/parley/parley.db"
max_read_connections = 4

[logging]
json = true
"#,
        )
        .await
        .unwrap();

        let config = load_config(&path).await.unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout_secs, 10);
        assert_eq!(config.storage.max_read_connections, 4);
        assert!(config.logging.json);
        assert_eq!(
            resolve_database_url(&config),
            "sqlite:///var/lib/parley/parley.db"
        );
    }

    #[tokio::test]
    async fn load_config_malformed_toml_reports_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("parley.toml");
        tokio::fs::write(&path, "this is not [valid toml").await.unwrap();

        let err = load_config(&path).await.unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse { .. }));
        let message = err.to_string();
        assert!(message.starts_with("failed to parse "), "{message}");
        assert!(message.contains("parley.toml"), "{message}");
    }

    #[tokio::test]
    async fn load_config_wrong_field_type_reports_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("parley.toml");
        tokio::fs::write(&path, "[server]\nport = \"nine thousand\"\n")
            .await
            .unwrap();

        assert!(matches!(
            load_config(&path).await,
            Err(ConfigLoadError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn load_config_unreadable_path_reports_read_error() {
        let tmp = TempDir::new().unwrap();

        // A directory exists but cannot be read as a file.
        let err = load_config(tmp.path()).await.unwrap_err();
        assert!(matches!(err, ConfigLoadError::Read { .. }));
    }

    #[test]
    fn resolve_database_url_falls_back_to_data_dir() {
        let url = resolve_database_url(&AppConfig::default());
        assert!(url.ends_with("parley.db"));
    }
}
