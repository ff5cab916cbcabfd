//! Desktop window settings.

use anyhow::{Result, bail};

#[derive(Debug, Clone, PartialEq)]
pub struct UiEnvConfig {
    pub window_width: f32,
    pub window_height: f32,
    /// Lines kept in the log panel before the oldest are dropped.
    pub log_capacity: usize,
    pub show_logs: bool,
}

impl Default for UiEnvConfig {
    fn default() -> Self {
        Self {
            window_width: 1600.0,
            window_height: 1000.0,
            log_capacity: 500,
            show_logs: true,
        }
    }
}

impl UiEnvConfig {
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let window_width = lookup("HWVIZ_WINDOW_WIDTH")
            .and_then(|v| v.parse::<f32>().ok())
            .unwrap_or(defaults.window_width);
        let window_height = lookup("HWVIZ_WINDOW_HEIGHT")
            .and_then(|v| v.parse::<f32>().ok())
            .unwrap_or(defaults.window_height);
        let log_capacity = lookup("HWVIZ_LOG_CAPACITY")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.log_capacity);
        let show_logs = lookup("HWVIZ_SHOW_LOGS")
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(defaults.show_logs);

        if !(window_width > 0.0 && window_height > 0.0) {
            bail!(
                "Invalid window size {}x{}: both dimensions must be positive",
                window_width,
                window_height
            );
        }

        Ok(Self {
            window_width,
            window_height,
            log_capacity,
            show_logs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_values_use_defaults() {
        let config = UiEnvConfig::from_lookup(&|key: &str| match key {
            "HWVIZ_LOG_CAPACITY" => Some("lots".to_string()),
            "HWVIZ_SHOW_LOGS" => Some("false".to_string()),
            "HWVIZ_WINDOW_WIDTH" => Some("1280".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.log_capacity, 500);
        assert!(!config.show_logs);
        assert_eq!(config.window_width, 1280.0);
        assert_eq!(config.window_height, 1000.0);
    }

    #[test]
    fn test_negative_height_is_an_error() {
        let result = UiEnvConfig::from_lookup(&|key: &str| {
            (key == "HWVIZ_WINDOW_HEIGHT").then(|| "-5".to_string())
        });
        assert!(result.is_err());
    }
}
