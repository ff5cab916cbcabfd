use indexmap::IndexMap;
use serde::Serialize;

/// Metric key → value for one module, in first-insertion order.
pub type Metrics = IndexMap<String, String>;

/// Module name → metrics, loaded once from the performance-data file.
///
/// Both levels keep insertion order. Re-inserting an existing key replaces
/// the value but keeps the key's original position, so a report lists
/// metrics the way the file first introduced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PerformanceCatalog {
    modules: IndexMap<String, Metrics>,
}

impl PerformanceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one metric, creating the module entry on first use.
    ///
    /// Only the parser writes; the catalog is handed out read-only afterwards.
    pub(crate) fn insert(&mut self, module: &str, key: String, value: String) {
        self.modules
            .entry(module.to_string())
            .or_default()
            .insert(key, value);
    }

    pub fn metrics(&self, module: &str) -> Option<&Metrics> {
        self.modules.get(module)
    }

    pub fn contains(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn metric_count(&self) -> usize {
        self.modules.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
