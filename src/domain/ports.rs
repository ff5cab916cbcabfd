use crate::domain::errors::PerfDataError;
use std::io::BufRead;

/// Where the performance-data text comes from.
///
/// The file-backed implementation lives in `infrastructure::perf_data_source`;
/// tests use the in-memory one.
pub trait PerfDataSource {
    /// Human-readable location, used in log lines and load summaries.
    fn location(&self) -> String;

    /// Opens the data for line-by-line reading. The returned reader owns the
    /// underlying handle, which is released when the reader is dropped.
    fn open(&self) -> Result<Box<dyn BufRead + '_>, PerfDataError>;
}
