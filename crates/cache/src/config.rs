//! Spread cache configuration with precedence tracking
use crate::errors::{CacheError, RecoveryHint, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the cache root
pub const ENV_CACHE_DIR: &str = "TONEARM_CACHE_DIR";
/// Environment variable overriding the directory mode (octal, e.g. `0755`)
pub const ENV_CACHE_MODE: &str = "TONEARM_CACHE_MODE";

/// Default permission bits for the cache root and shard directories
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Settings needed to open a spread cache store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadFsConfig {
    /// Cache root owning the whole sharded tree
    pub root: PathBuf,
    /// Permission bits for created directories
    #[serde(
        default = "default_dir_mode",
        serialize_with = "serialize_mode",
        deserialize_with = "deserialize_mode"
    )]
    pub dir_mode: u32,
    /// Where the effective values came from
    #[serde(skip, default)]
    pub source: ConfigSource,
}

fn default_dir_mode() -> u32 {
    DEFAULT_DIR_MODE
}

impl Default for SpreadFsConfig {
    fn default() -> Self {
        use tonearm_utils::xdg::XdgPaths;
        Self {
            root: XdgPaths::cache_dir().join("spread"),
            dir_mode: DEFAULT_DIR_MODE,
            source: ConfigSource::Default,
        }
    }
}

/// Source of configuration for debugging and precedence tracking
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default configuration
    #[default]
    Default,
    /// Configuration file
    ConfigFile(PathBuf),
    /// Environment variable
    EnvironmentVariable(String),
    /// Command line argument
    CommandLine,
}

impl SpreadFsConfig {
    /// Load a JSON configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                return Err(CacheError::Io {
                    path: path.to_path_buf(),
                    operation: "read cache configuration",
                    source: e,
                    recovery_hint: RecoveryHint::CheckPermissions {
                        path: path.to_path_buf(),
                    },
                })
            }
        };

        let mut config: Self = match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                return Err(CacheError::Configuration {
                    message: format!("invalid configuration in '{}': {e}", path.display()),
                    recovery_hint: RecoveryHint::UpdateConfiguration,
                })
            }
        };
        config.source = ConfigSource::ConfigFile(path.to_path_buf());
        Ok(config)
    }

    /// Apply `TONEARM_CACHE_DIR` / `TONEARM_CACHE_MODE` on top of `self`
    pub fn apply_env(mut self) -> Result<Self> {
        if let Ok(dir) = std::env::var(ENV_CACHE_DIR) {
            if !dir.is_empty() {
                self.root = PathBuf::from(dir);
                self.source = ConfigSource::EnvironmentVariable(ENV_CACHE_DIR.to_string());
            }
        }

        if let Ok(mode) = std::env::var(ENV_CACHE_MODE) {
            if !mode.is_empty() {
                self.dir_mode = parse_mode(&mode)?;
                self.source = ConfigSource::EnvironmentVariable(ENV_CACHE_MODE.to_string());
            }
        }

        Ok(self)
    }
}

/// Parse an octal permission string such as `755`, `0755` or `0o755`
pub fn parse_mode(value: &str) -> Result<u32> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0o")
        .or_else(|| trimmed.strip_prefix("0O"))
        .unwrap_or(trimmed);

    match u32::from_str_radix(digits, 8) {
        Ok(mode) if mode <= 0o7777 => Ok(mode),
        Ok(mode) => Err(CacheError::Configuration {
            message: format!("permission mode {mode:o} is out of range"),
            recovery_hint: RecoveryHint::UpdateConfiguration,
        }),
        Err(e) => Err(CacheError::Configuration {
            message: format!("invalid permission mode '{value}': {e}"),
            recovery_hint: RecoveryHint::UpdateConfiguration,
        }),
    }
}

fn serialize_mode<S: serde::Serializer>(
    mode: &u32,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{mode:04o}"))
}

fn deserialize_mode<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawMode {
        Text(String),
        Number(u64),
    }

    // Numbers are read with their digits as octal, so `755` means `0o755`
    let text = match RawMode::deserialize(deserializer)? {
        RawMode::Text(text) => text,
        RawMode::Number(digits) => digits.to_string(),
    };
    parse_mode(&text).map_err(serde::de::Error::custom)
}

/// Builder for creating spread cache configurations
pub struct SpreadFsConfigBuilder {
    config: SpreadFsConfig,
}

impl SpreadFsConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: SpreadFsConfig::default(),
        }
    }

    /// Start from a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self {
            config: SpreadFsConfig::from_file(path)?,
        })
    }

    /// Apply environment overrides
    pub fn with_env(mut self) -> Result<Self> {
        self.config = self.config.apply_env()?;
        Ok(self)
    }

    /// Set cache root from the command line
    pub fn with_root(mut self, root: PathBuf) -> Self {
        self.config.root = root;
        self.config.source = ConfigSource::CommandLine;
        self
    }

    /// Set directory mode from the command line
    pub fn with_dir_mode(mut self, mode: u32) -> Self {
        self.config.dir_mode = mode;
        self.config.source = ConfigSource::CommandLine;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SpreadFsConfig> {
        if self.config.root.as_os_str().is_empty() {
            return Err(CacheError::Configuration {
                message: "cache root must not be empty".to_string(),
                recovery_hint: RecoveryHint::UpdateConfiguration,
            });
        }
        Ok(self.config)
    }
}

impl Default for SpreadFsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_parse_mode_variants() {
        assert_eq!(parse_mode("755").unwrap(), 0o755);
        assert_eq!(parse_mode("0755").unwrap(), 0o755);
        assert_eq!(parse_mode("0o700").unwrap(), 0o700);
        assert!(parse_mode("0999").is_err());
        assert!(parse_mode("77777").is_err());
        assert!(parse_mode("rwx").is_err());
    }

    #[test]
    fn test_from_file_reads_octal_string() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");
        std::fs::write(&path, r#"{ "root": "/var/cache/tonearm", "dir_mode": "0700" }"#).unwrap();

        let config = SpreadFsConfig::from_file(&path).unwrap();
        assert_eq!(config.root, PathBuf::from("/var/cache/tonearm"));
        assert_eq!(config.dir_mode, 0o700);
        assert_eq!(config.source, ConfigSource::ConfigFile(path));
    }

    #[test]
    fn test_from_file_reads_numeric_mode_as_octal() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");
        std::fs::write(&path, r#"{ "root": "/srv/cache", "dir_mode": 755 }"#).unwrap();

        let config = SpreadFsConfig::from_file(&path).unwrap();
        assert_eq!(config.dir_mode, 0o755);
    }

    #[test]
    fn test_from_file_rejects_invalid_numeric_mode() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");

        for mode in ["999999", "77777", "789"] {
            let json = format!(r#"{{ "root": "/srv/cache", "dir_mode": {mode} }}"#);
            std::fs::write(&path, json).unwrap();

            match SpreadFsConfig::from_file(&path) {
                Err(CacheError::Configuration { .. }) => {}
                other => panic!("expected configuration error for {mode}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_from_file_defaults_mode() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");
        std::fs::write(&path, r#"{ "root": "/srv/cache" }"#).unwrap();

        let config = SpreadFsConfig::from_file(&path).unwrap();
        assert_eq!(config.dir_mode, DEFAULT_DIR_MODE);
    }

    #[test]
    fn test_from_file_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");
        std::fs::write(&path, "not json").unwrap();

        match SpreadFsConfig::from_file(&path) {
            Err(CacheError::Configuration { .. }) => {}
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn test_env_overrides_file_values() {
        std::env::set_var(ENV_CACHE_DIR, "/tmp/tonearm-env");
        std::env::set_var(ENV_CACHE_MODE, "0700");

        let config = SpreadFsConfig::default().apply_env();

        std::env::remove_var(ENV_CACHE_DIR);
        std::env::remove_var(ENV_CACHE_MODE);

        let config = config.unwrap();
        assert_eq!(config.root, PathBuf::from("/tmp/tonearm-env"));
        assert_eq!(config.dir_mode, 0o700);
        assert!(matches!(config.source, ConfigSource::EnvironmentVariable(_)));
    }

    #[test]
    #[serial]
    fn test_builder_command_line_wins() {
        std::env::set_var(ENV_CACHE_DIR, "/tmp/tonearm-env");
        let config = SpreadFsConfigBuilder::new()
            .with_env()
            .map(|b| b.with_root(PathBuf::from("/tmp/tonearm-cli")).build());
        std::env::remove_var(ENV_CACHE_DIR);

        let config = config.unwrap().unwrap();
        assert_eq!(config.root, PathBuf::from("/tmp/tonearm-cli"));
        assert_eq!(config.source, ConfigSource::CommandLine);
    }

    #[test]
    fn test_builder_rejects_empty_root() {
        assert!(SpreadFsConfigBuilder::new()
            .with_root(PathBuf::new())
            .build()
            .is_err());
    }
}
