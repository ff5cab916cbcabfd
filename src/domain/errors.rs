use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating or reading the performance-data file.
///
/// These never reach the end user: the info store logs them and falls back
/// to static module descriptions.
#[derive(Debug, Error)]
pub enum PerfDataError {
    #[error("Performance data location unavailable: {reason}")]
    LocationUnavailable { reason: String },

    #[error("Cannot open performance data file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to module identifiers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleIdError {
    #[error("Unknown module: {name}")]
    Unknown { name: String },
}
