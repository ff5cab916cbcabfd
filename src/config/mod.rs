//! Configuration module for hwviz.
//!
//! Settings come from environment variables (a `.env` file is loaded by the
//! binaries before this runs), organized by concern: data file location and
//! desktop window.

mod data_config;
mod ui_config;

pub use data_config::DataEnvConfig;
pub use ui_config::UiEnvConfig;

use crate::infrastructure::FilePerfDataSource;
use anyhow::{Context, Result};
use std::env;

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub data: DataEnvConfig,
    pub ui: UiEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data = DataEnvConfig::from_lookup(&lookup);
        let ui = UiEnvConfig::from_lookup(&lookup).context("Failed to load UI config")?;
        Ok(Self { data, ui })
    }

    /// The performance-data source these settings point at.
    pub fn perf_data_source(&self) -> FilePerfDataSource {
        self.data.source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_explicit_path_wins() {
        let config =
            Config::from_lookup(lookup(&[("HWVIZ_PERFDATA_PATH", "/data/perf.txt")])).unwrap();
        let source = config.perf_data_source();
        assert_eq!(source.path(), Some(std::path::Path::new("/data/perf.txt")));
    }

    #[test]
    fn test_data_settings_ignore_invalid_window_size() {
        let env = lookup(&[
            ("HWVIZ_WINDOW_WIDTH", "0"),
            ("HWVIZ_PERFDATA_PATH", "/data/perf.txt"),
        ]);
        let data = DataEnvConfig::from_lookup(&env);
        assert_eq!(
            data.source().path(),
            Some(std::path::Path::new("/data/perf.txt"))
        );
        assert!(Config::from_lookup(env).is_err());
    }

    #[test]
    fn test_invalid_window_size_is_rejected() {
        let result = Config::from_lookup(lookup(&[("HWVIZ_WINDOW_WIDTH", "0")]));
        assert!(result.is_err());
    }
}
