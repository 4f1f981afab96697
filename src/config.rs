//! Startup configuration.
//!
//! Built once in `main` from environment variables and handed to the app shell,
//! which owns it for the rest of the session. The emergency panel's settings form
//! is the only writer after startup.

use std::fmt;
use std::path::PathBuf;

pub const APP_NAME: &str = "HealthMoniTree";

pub const MAP_API_KEY_ENV: &str = "HEALTHMONITREE_MAP_API_KEY";
pub const DOWNLOAD_DIR_ENV: &str = "HEALTHMONITREE_DOWNLOAD_DIR";
pub const LOG_MODE_ENV: &str = "HEALTHMONITREE_LOG_MODE";
pub const LOG_FILE_ENV: &str = "HEALTHMONITREE_LOG_FILE";

/// Map widget settings.
#[derive(Clone, PartialEq)]
pub struct MapConfig {
    access_token: Option<String>,
    /// (longitude, latitude)
    pub center: (f64, f64),
    pub zoom: f64,
    pub style: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            center: (-74.5, 40.0),
            zoom: 9.0,
            style: "streets-v12".to_string(),
        }
    }
}

impl MapConfig {
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Store a credential. Blank input is ignored.
    ///
    /// # Returns
    /// Whether the credential was stored.
    pub fn set_access_token(&mut self, token: &str) -> bool {
        let token = token.trim();
        if token.is_empty() {
            return false;
        }
        self.access_token = Some(token.to_string());
        true
    }

    /// The map initializes only when a credential is present.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.access_token.is_some()
    }
}

// Never print the credential.
impl fmt::Debug for MapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapConfig")
            .field("access_token", &self.access_token.as_ref().map(|_| "<set>"))
            .field("center", &self.center)
            .field("zoom", &self.zoom)
            .field("style", &self.style)
            .finish()
    }
}

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub mode: LogMode,
    pub file: PathBuf,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub map: MapConfig,
    pub download_dir: PathBuf,
    pub log: LogConfig,
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("healthmonitree").join("healthmonitree.log"))
        .unwrap_or_else(|| PathBuf::from("healthmonitree.log"))
}

impl AppConfig {
    /// Read configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut map = MapConfig::default();
        if let Some(token) = non_empty(MAP_API_KEY_ENV) {
            map.set_access_token(&token);
        }

        Self {
            map,
            download_dir: non_empty(DOWNLOAD_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(default_download_dir),
            log: LogConfig {
                mode: non_empty(LOG_MODE_ENV)
                    .map(|m| LogMode::parse(&m))
                    .unwrap_or(LogMode::Auto),
                file: non_empty(LOG_FILE_ENV)
                    .map(PathBuf::from)
                    .unwrap_or_else(default_log_file),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert!(!config.map.is_enabled());
        assert_eq!(config.map.center, (-74.5, 40.0));
        assert_eq!(config.log.mode, LogMode::Auto);
    }

    #[test]
    fn test_reads_variables() {
        let config = AppConfig::from_lookup(lookup(&[
            (MAP_API_KEY_ENV, "pk.test"),
            (DOWNLOAD_DIR_ENV, "/tmp/dl"),
            (LOG_MODE_ENV, "STDOUT"),
            (LOG_FILE_ENV, "/tmp/app.log"),
        ]));
        assert_eq!(config.map.access_token(), Some("pk.test"));
        assert_eq!(config.download_dir, PathBuf::from("/tmp/dl"));
        assert_eq!(config.log.mode, LogMode::Stdout);
        assert_eq!(config.log.file, PathBuf::from("/tmp/app.log"));
    }

    #[test]
    fn test_blank_map_key_leaves_map_disabled() {
        let config = AppConfig::from_lookup(lookup(&[(MAP_API_KEY_ENV, "   ")]));
        assert!(!config.map.is_enabled());

        let mut map = MapConfig::default();
        assert!(!map.set_access_token(""));
        assert!(map.set_access_token(" key "));
        assert_eq!(map.access_token(), Some("key"));
    }

    #[test]
    fn test_debug_hides_token() {
        let mut map = MapConfig::default();
        map.set_access_token("pk.very-secret");
        let debug = format!("{map:?}");
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("<set>"));
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}
