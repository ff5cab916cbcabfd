use crate::domain::catalog::{IgnoredLine, Metrics};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// What `InfoStore::describe` found for a module name.
///
/// `Display` renders the plain-text report shown in the info panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModuleReport {
    /// The catalog has metrics for the module.
    Performance {
        name: String,
        category: Option<String>,
        metrics: Metrics,
    },
    /// No metrics, but a fixed description exists.
    Static { name: String, text: String },
    Unknown { name: String },
}

impl ModuleReport {
    pub fn name(&self) -> &str {
        match self {
            ModuleReport::Performance { name, .. }
            | ModuleReport::Static { name, .. }
            | ModuleReport::Unknown { name } => name,
        }
    }

    pub fn has_metrics(&self) -> bool {
        matches!(self, ModuleReport::Performance { .. })
    }
}

impl fmt::Display for ModuleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleReport::Performance {
                name,
                category,
                metrics,
            } => {
                write!(f, "===== {} Performance Data =====\n\n", name)?;
                if let Some(category) = category {
                    write!(f, "{}\n\n", category)?;
                }
                for (key, value) in metrics {
                    writeln!(f, "{}: {}", key, value)?;
                }
                Ok(())
            }
            ModuleReport::Static { text, .. } => f.write_str(text),
            ModuleReport::Unknown { name } => write!(f, "Unknown module: {}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum LoadStatus {
    Loaded,
    /// A read error cut the file short; the catalog holds what came before.
    Partial(String),
    /// The file could not be located or opened; the catalog is empty.
    Unavailable(String),
}

/// Outcome of loading the performance-data file, for logs and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub location: String,
    pub status: LoadStatus,
    pub modules: usize,
    pub metrics: usize,
    pub lines_read: usize,
    pub ignored: Vec<IgnoredLine>,
    pub loaded_at: DateTime<Utc>,
}

impl LoadSummary {
    pub fn is_available(&self) -> bool {
        !matches!(self.status, LoadStatus::Unavailable(_))
    }

    pub fn ignored_lines(&self) -> usize {
        self.ignored.len()
    }
}
