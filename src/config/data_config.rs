//! Performance-data location settings.

use crate::infrastructure::FilePerfDataSource;
use crate::infrastructure::perf_data_source::{DEFAULT_DATA_FILE, DEFAULT_DATA_SUBDIR};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEnvConfig {
    /// Explicit file path; bypasses derivation from the executable location.
    pub perfdata_path: Option<PathBuf>,
    pub data_subdir: String,
    pub data_file: String,
}

impl Default for DataEnvConfig {
    fn default() -> Self {
        Self {
            perfdata_path: None,
            data_subdir: DEFAULT_DATA_SUBDIR.to_string(),
            data_file: DEFAULT_DATA_FILE.to_string(),
        }
    }
}

impl DataEnvConfig {
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            perfdata_path: non_empty("HWVIZ_PERFDATA_PATH").map(PathBuf::from),
            data_subdir: non_empty("HWVIZ_DATA_SUBDIR")
                .unwrap_or_else(|| DEFAULT_DATA_SUBDIR.to_string()),
            data_file: non_empty("HWVIZ_DATA_FILE")
                .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string()),
        }
    }

    pub fn source(&self) -> FilePerfDataSource {
        match &self.perfdata_path {
            Some(path) => FilePerfDataSource::new(path.clone()),
            None => FilePerfDataSource::beside_executable(&self.data_subdir, &self.data_file),
        }
    }
}
