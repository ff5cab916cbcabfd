pub mod logging;
pub mod perf_data_source;

pub use perf_data_source::{FilePerfDataSource, InMemoryPerfData};
