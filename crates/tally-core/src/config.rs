//! Optional user configuration
//!
//! Read from `<data_local_dir>/tally/config.toml` unless another path is
//! given. Every key is optional:
//!
//! ```toml
//! database = "/home/me/finance/tally.db"
//! top_n = 10
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::analysis::DEFAULT_TOP_N;
use crate::error::{Error, Result};

/// Settings loaded from the config file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ledger database file
    pub database: Option<PathBuf>,
    /// Rows shown by top-expense reports
    pub top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config.toml"))
}

/// Default database location, falling back to the working directory
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("tally").join("tally.db"))
        .unwrap_or_else(|| PathBuf::from("tally.db"))
}

impl Config {
    /// Load configuration
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and a missing file just means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) if !p.exists() => {
                return Err(Error::Config(format!(
                    "config file not found: {}",
                    p.display()
                )))
            }
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path)?;
        debug!("Loaded config from {}", path.display());
        Self::parse(&content)
    }

    /// Parse config from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Config(format!("invalid config TOML: {}", e)))?;

        if config.top_n == 0 {
            return Err(Error::Config("top_n must be at least 1".to_string()));
        }

        Ok(config)
    }

    /// Pick the database file: explicit override, then config, then default
    pub fn database_path(&self, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .or_else(|| self.database.clone())
            .unwrap_or_else(default_database_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.top_n, 5);
    }

    #[test]
    fn test_parse_values() {
        let config = Config::parse("database = \"/tmp/ledger.db\"\ntop_n = 10\n").unwrap();
        assert_eq!(config.database, Some(PathBuf::from("/tmp/ledger.db")));
        assert_eq!(config.top_n, 10);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            Config::parse("top_n = \"many\""),
            Err(Error::Config(_))
        ));
        assert!(matches!(Config::parse("top_n = 0"), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Config::load(Some(Path::new("/definitely/not/here/config.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "top_n = 3\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.top_n, 3);
    }

    #[test]
    fn test_database_path_precedence() {
        let config = Config {
            database: Some(PathBuf::from("from-config.db")),
            ..Config::default()
        };
        assert_eq!(
            config.database_path(Some(Path::new("flag.db"))),
            PathBuf::from("flag.db")
        );
        assert_eq!(config.database_path(None), PathBuf::from("from-config.db"));
        assert_eq!(
            Config::default().database_path(None),
            default_database_path()
        );
    }
}
