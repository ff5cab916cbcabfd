// Module lookup and report composition
pub mod info_store;

// Report and load-summary types
pub mod report;

pub use info_store::InfoStore;
pub use report::{LoadStatus, LoadSummary, ModuleReport};
