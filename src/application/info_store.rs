use super::report::{LoadStatus, LoadSummary, ModuleReport};
use crate::domain::catalog::{IgnoreReason, PerformanceCatalog, parse_reader};
use crate::domain::descriptions::DescriptionTable;
use crate::domain::ports::PerfDataSource;
use crate::domain::topology::ModuleId;
use chrono::Utc;
use tracing::{debug, info, warn};

/// Owns the performance catalog and answers "describe module X".
///
/// Loading never fails from the caller's point of view: an unreadable file
/// leaves the catalog empty and every lookup falls back to the static
/// description tables.
#[derive(Debug, Clone)]
pub struct InfoStore {
    catalog: PerformanceCatalog,
    descriptions: DescriptionTable,
    summary: LoadSummary,
}

impl InfoStore {
    /// Loads the catalog from `source` with the standard description tables.
    pub fn load(source: &dyn PerfDataSource) -> Self {
        Self::load_with(source, DescriptionTable::standard())
    }

    pub fn load_with(source: &dyn PerfDataSource, descriptions: DescriptionTable) -> Self {
        let location = source.location();
        debug!("Loading performance data from {}", location);

        let mut reader = match source.open() {
            Ok(reader) => reader,
            Err(e) => {
                warn!("Performance data unavailable, using static descriptions: {}", e);
                let summary = LoadSummary {
                    location,
                    status: LoadStatus::Unavailable(e.to_string()),
                    modules: 0,
                    metrics: 0,
                    lines_read: 0,
                    ignored: Vec::new(),
                    loaded_at: Utc::now(),
                };
                return Self {
                    catalog: PerformanceCatalog::new(),
                    descriptions,
                    summary,
                };
            }
        };

        let outcome = parse_reader(&mut reader);
        // Release the file before doing anything else
        drop(reader);

        for ignored in &outcome.ignored {
            match ignored.reason {
                IgnoreReason::NoOpenModule => debug!(
                    "{}:{}: key/value outside of a [module] section, ignored",
                    location, ignored.line_no
                ),
                IgnoreReason::NotKeyValue => debug!(
                    "{}:{}: not a key = value line, ignored",
                    location, ignored.line_no
                ),
            }
        }

        let status = match outcome.interrupted {
            Some(reason) => {
                warn!(
                    "Reading {} stopped after line {}: {}",
                    location, outcome.lines_read, reason
                );
                LoadStatus::Partial(reason)
            }
            None => LoadStatus::Loaded,
        };

        let catalog = outcome.catalog;
        info!(
            "Loaded {} metrics for {} modules from {}",
            catalog.metric_count(),
            catalog.module_count(),
            location
        );

        let summary = LoadSummary {
            location,
            status,
            modules: catalog.module_count(),
            metrics: catalog.metric_count(),
            lines_read: outcome.lines_read,
            ignored: outcome.ignored,
            loaded_at: Utc::now(),
        };

        Self {
            catalog,
            descriptions,
            summary,
        }
    }

    /// Builds a store around an already-parsed catalog.
    pub fn from_catalog(catalog: PerformanceCatalog, descriptions: DescriptionTable) -> Self {
        let summary = LoadSummary {
            location: "<memory>".to_string(),
            status: LoadStatus::Loaded,
            modules: catalog.module_count(),
            metrics: catalog.metric_count(),
            lines_read: 0,
            ignored: Vec::new(),
            loaded_at: Utc::now(),
        };
        Self {
            catalog,
            descriptions,
            summary,
        }
    }

    /// Composes the report for `name`: catalog metrics first, then the
    /// static description, then "unknown module".
    pub fn describe(&self, name: &str) -> ModuleReport {
        if let Some(metrics) = self.catalog.metrics(name) {
            return ModuleReport::Performance {
                name: name.to_string(),
                category: self.descriptions.category(name).map(str::to_string),
                metrics: metrics.clone(),
            };
        }

        match self.descriptions.static_description(name) {
            Some(text) => ModuleReport::Static {
                name: name.to_string(),
                text: text.to_string(),
            },
            None => ModuleReport::Unknown {
                name: name.to_string(),
            },
        }
    }

    pub fn describe_module(&self, id: ModuleId) -> ModuleReport {
        self.describe(&id.name())
    }

    /// Plain-text form of `describe`.
    pub fn describe_text(&self, name: &str) -> String {
        self.describe(name).to_string()
    }

    pub fn has_data(&self, name: &str) -> bool {
        self.catalog.contains(name)
    }

    pub fn module_names(&self) -> Vec<&str> {
        self.catalog.module_names().collect()
    }

    pub fn catalog(&self) -> &PerformanceCatalog {
        &self.catalog
    }

    pub fn summary(&self) -> &LoadSummary {
        &self.summary
    }
}
