//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! server and storage sections. Every section defaults sensibly so a
//! completely empty `{}` file is valid. Environment variables are layered on
//! top via [`Config::apply_env`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Override settings from process environment variables.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Override settings from an arbitrary variable lookup.
    ///
    /// Recognized keys: `PORT`, `FRONT_URL`, `DB_PATH`, `IMAGE_DIR`,
    /// `STORE_BACKEND`. Unparseable values are logged and ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(e) => tracing::warn!("Ignoring invalid PORT '{port}': {e}"),
            }
        }
        if let Some(url) = lookup("FRONT_URL") {
            self.server.front_url = url;
        }
        if let Some(path) = lookup("DB_PATH") {
            self.storage.db_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("IMAGE_DIR") {
            self.storage.image_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup("STORE_BACKEND") {
            match backend.parse() {
                Ok(b) => self.storage.backend = b,
                Err(e) => tracing::warn!("Ignoring STORE_BACKEND: {e}"),
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }
        if self.server.front_url.is_empty() {
            warnings.push("server.front_url is empty; cross-origin requests will be refused".into());
        }
        if self.server.max_upload_bytes == 0 {
            warnings.push("server.max_upload_bytes is 0; every upload will be rejected".into());
        }
        if self.storage.backend == StoreBackend::Memory {
            warnings.push("storage.backend is 'memory'; items are lost on restart".into());
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin allowed by the CORS policy (the web front-end).
    pub front_url: String,
    /// Request body limit applied to uploads.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 9000,
            front_url: "http://localhost:3000".into(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Which item store backend to build at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}' (valid: sqlite, memory)")),
        }
    }
}

/// Persistence settings for items and images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StoreBackend,
    pub db_path: PathBuf,
    pub image_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            db_path: PathBuf::from("./db/mercari.sqlite3"),
            image_dir: PathBuf::from("./images"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_is_valid() {
        let cfg = Config::default();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.front_url, "http://localhost:3000");
        assert_eq!(cfg.storage.backend, StoreBackend::Sqlite);
        assert_eq!(cfg.storage.image_dir, PathBuf::from("./images"));
    }

    #[test]
    fn default_config_no_warnings() {
        let warnings = Config::default().validate();
        assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
    }

    #[test]
    fn memory_backend_warns() {
        let mut cfg = Config::default();
        cfg.storage.backend = StoreBackend::Memory;
        assert!(cfg.validate().iter().any(|w| w.contains("memory")));
    }

    #[test]
    fn parse_json_config() {
        let json = r#"{"server": {"port": 8080}, "storage": {"backend": "memory"}}"#;
        let cfg = Config::from_json(json).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.storage.backend, StoreBackend::Memory);
    }

    #[test]
    fn parse_invalid_json_is_validation_error() {
        let err = Config::from_json("{not json").unwrap_err();
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn load_or_default_with_missing_file() {
        let cfg = Config::load_or_default(Some(Path::new("/nonexistent/catalog.json")));
        assert_eq!(cfg.server.port, 9000);
    }

    #[test]
    fn env_overrides_apply() {
        let vars: HashMap<&str, &str> = [
            ("PORT", "9100"),
            ("FRONT_URL", "http://example.test"),
            ("IMAGE_DIR", "/srv/images"),
            ("STORE_BACKEND", "Memory"),
        ]
        .into_iter()
        .collect();

        let mut cfg = Config::default();
        cfg.apply_env_from(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.front_url, "http://example.test");
        assert_eq!(cfg.storage.image_dir, PathBuf::from("/srv/images"));
        assert_eq!(cfg.storage.backend, StoreBackend::Memory);
        assert_eq!(cfg.storage.db_path, PathBuf::from("./db/mercari.sqlite3"));
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let mut cfg = Config::default();
        cfg.apply_env_from(|k| match k {
            "PORT" => Some("not-a-port".into()),
            "STORE_BACKEND" => Some("postgres".into()),
            _ => None,
        });
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.storage.backend, StoreBackend::Sqlite);
    }
}
