use std::{collections::HashMap, path::PathBuf, str::FromStr};

use log::LevelFilter;
use thiserror::Error;

pub const DEFAULT_FLIGHTS_PATH: &str = "data/flights.csv";
pub const DEFAULT_LOG_DIR: &str = "logs";

pub const MAPBOX_TOKEN_VAR: &str = "MAPBOX_ACCESS_TOKEN";
pub const LOG_DIR_VAR: &str = "FLIGHT_ARCS_LOG_DIR";
pub const LOG_LEVEL_VAR: &str = "FLIGHT_ARCS_LOG";
pub const LOG_CONSOLE_VAR: &str = "FLIGHT_ARCS_LOG_CONSOLE";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Usage: animation_launcher [flights.csv] [assets_dir]")]
    Usage,
    #[error("Invalid log level {0:?}, expected one of off, error, warn, info, debug, trace")]
    InvalidLogLevel(String),
}

/// Everything the launcher needs to open a playback session.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchConfig {
    pub flights_path: PathBuf,
    pub assets_dir: PathBuf,
    pub mapbox_token: Option<String>,
    pub log_dir: PathBuf,
    pub log_level: LevelFilter,
    /// Print informational lines to the console too, not only warnings.
    pub log_to_console: bool,
}

impl LaunchConfig {
    /// Builds the configuration from the command line arguments (program name
    /// first), the contents of a `.env` file and a lookup into the process
    /// environment. Process variables win over `.env` entries.
    pub fn from_sources<F>(args: &[String], dotenv: Option<&str>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if args.len() > 3 {
            return Err(ConfigError::Usage);
        }

        let file_vars = dotenv.map(parse_dotenv).unwrap_or_default();
        let lookup = |key: &str| {
            env(key)
                .or_else(|| file_vars.get(key).cloned())
                .filter(|value| !value.trim().is_empty())
        };

        let flights_path = args
            .get(1)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FLIGHTS_PATH));
        let assets_dir = args
            .get(2)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(level) => LevelFilter::from_str(level.trim())
                .map_err(|_| ConfigError::InvalidLogLevel(level.clone()))?,
            None => LevelFilter::Info,
        };

        let log_to_console = lookup(LOG_CONSOLE_VAR)
            .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            flights_path,
            assets_dir,
            mapbox_token: lookup(MAPBOX_TOKEN_VAR),
            log_dir: lookup(LOG_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
            log_level,
            log_to_console,
        })
    }
}

/// Parses `KEY=VALUE` lines. Blank lines and `#` comments are skipped and
/// surrounding quotes are stripped from values.
pub fn parse_dotenv(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            Some((key.trim().to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = LaunchConfig::from_sources(&args(&["animation_launcher"]), None, no_env).unwrap();

        assert_eq!(config.flights_path, PathBuf::from(DEFAULT_FLIGHTS_PATH));
        assert_eq!(config.assets_dir, PathBuf::from("."));
        assert_eq!(config.mapbox_token, None);
        assert_eq!(config.log_dir, PathBuf::from(DEFAULT_LOG_DIR));
        assert_eq!(config.log_level, LevelFilter::Info);
        assert!(!config.log_to_console);
    }

    #[test]
    fn test_positional_arguments() {
        let config = LaunchConfig::from_sources(
            &args(&["animation_launcher", "trips.csv", "/srv/assets"]),
            None,
            no_env,
        )
        .unwrap();

        assert_eq!(config.flights_path, PathBuf::from("trips.csv"));
        assert_eq!(config.assets_dir, PathBuf::from("/srv/assets"));
    }

    #[test]
    fn test_too_many_arguments() {
        let result = LaunchConfig::from_sources(&args(&["a", "b", "c", "d"]), None, no_env);
        assert_eq!(result, Err(ConfigError::Usage));
    }

    #[test]
    fn test_dotenv_values_and_process_override() {
        let dotenv = "# tiles\nMAPBOX_ACCESS_TOKEN=\"pk.file\"\nFLIGHT_ARCS_LOG=debug\n\nexport FLIGHT_ARCS_LOG_DIR='/var/log/arcs'\n";
        let env = |key: &str| (key == MAPBOX_TOKEN_VAR).then(|| "pk.process".to_string());

        let config = LaunchConfig::from_sources(&args(&["animation_launcher"]), Some(dotenv), env).unwrap();

        assert_eq!(config.mapbox_token.as_deref(), Some("pk.process"));
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_dir, PathBuf::from("/var/log/arcs"));
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let config =
            LaunchConfig::from_sources(&args(&["animation_launcher"]), Some("MAPBOX_ACCESS_TOKEN=\n"), no_env)
                .unwrap();
        assert_eq!(config.mapbox_token, None);
    }

    #[test]
    fn test_invalid_log_level() {
        let result = LaunchConfig::from_sources(
            &args(&["animation_launcher"]),
            Some("FLIGHT_ARCS_LOG=loud"),
            no_env,
        );
        assert_eq!(result, Err(ConfigError::InvalidLogLevel("loud".to_string())));
    }
}
