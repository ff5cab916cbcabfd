// Performance catalog and its text format
pub mod catalog;

// Category rules and static module descriptions
pub mod descriptions;

// Domain-specific error types
pub mod errors;

// Port interfaces
pub mod ports;

// Fixed hardware topology (module identifiers and diagram layout)
pub mod topology;
