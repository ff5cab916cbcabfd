mod parser;
mod performance_catalog;

pub use parser::{IgnoreReason, IgnoredLine, ParseOutcome, parse_reader, parse_str};
pub use performance_catalog::{Metrics, PerformanceCatalog};
