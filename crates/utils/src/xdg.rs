use std::env;
use std::path::PathBuf;

/// Application directory name below each XDG base directory
pub const APP_DIR: &str = "tonearm";

/// XDG Base Directory paths for tonearm
pub struct XdgPaths;

impl XdgPaths {
    /// Get XDG_CONFIG_HOME/tonearm or fallback
    pub fn config_dir() -> PathBuf {
        env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".config"))
                    .unwrap_or_else(|| PathBuf::from(".config"))
            })
            .join(APP_DIR)
    }

    /// Get XDG_CACHE_HOME/tonearm or fallback
    pub fn cache_dir() -> PathBuf {
        env::var("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".cache"))
                    .unwrap_or_else(|| PathBuf::from(".cache"))
            })
            .join(APP_DIR)
    }

    /// Default location of the cache configuration file
    pub fn cache_config_file() -> PathBuf {
        Self::config_dir().join("cache.json")
    }
}
