//! Retention engine
//! Splits a collection of dated items into the ones to keep and the ones to delete

pub mod catalog;
pub mod retention;

pub use catalog::DatedCatalog;
pub use retention::{compute_delete, compute_keep, Decision, RetentionEngine};
