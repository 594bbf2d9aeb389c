use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Server configuration, loaded from a TOML file.
///
/// ```toml
/// [storage]
/// data_dir = "/var/lib/brokerdesk"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the database file.
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
        }
    }
}

impl ServerConfig {
    /// Resolve a context name or path to a config file path.
    ///
    /// A bare name maps to `/etc/brokerdesk/<name>.toml`; anything
    /// containing `/` or `.` is used as a path directly.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/brokerdesk/{name_or_path}.toml"))
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Path of the fixed database file inside the data directory.
    pub fn db_path(&self) -> PathBuf {
        Path::new(&self.storage.data_dir).join("brokerdesk.sqlite")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_bare_name() {
        assert_eq!(
            ServerConfig::resolve_path("prod"),
            PathBuf::from("/etc/brokerdesk/prod.toml")
        );
    }

    #[test]
    fn resolve_explicit_path() {
        assert_eq!(
            ServerConfig::resolve_path("./local.toml"),
            PathBuf::from("./local.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("/tmp/x.toml"),
            PathBuf::from("/tmp/x.toml")
        );
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.storage.data_dir, "./data");
        assert_eq!(config.db_path(), PathBuf::from("./data/brokerdesk.sqlite"));
    }

    #[test]
    fn parse_toml() {
        let config: ServerConfig =
            toml::from_str("[storage]\ndata_dir = \"/var/lib/brokerdesk\"\n").unwrap();
        assert_eq!(config.storage.data_dir, "/var/lib/brokerdesk");
        assert_eq!(
            config.db_path(),
            PathBuf::from("/var/lib/brokerdesk/brokerdesk.sqlite")
        );
    }
}
