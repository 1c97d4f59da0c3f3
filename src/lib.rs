//! weeder - remove unneeded historical files
//!
//! Implements a retention policy for dated items such that more copies of
//! recent items are kept and fewer as they get older: for instance one file
//! a day for two weeks, one a week until three months, one every four weeks
//! until a year, then one a year forever.
//!
//! The library only classifies; deleting anything is up to the caller.
//!
//! ```
//! use chrono::NaiveDate;
//! use weeder::{DatedCatalog, Policy, RetentionEngine};
//!
//! let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
//! let files: Vec<(String, NaiveDate)> = start
//!     .iter_days()
//!     .take(30)
//!     .map(|d| (format!("backup-{}.tar", d), d))
//!     .collect();
//! let catalog = DatedCatalog::from_pairs(files).unwrap();
//!
//! let reference = NaiveDate::from_ymd_opt(2020, 1, 30).unwrap();
//! let engine = RetentionEngine::new(Policy::default(), reference);
//! let decision = engine.decide(&catalog);
//! assert_eq!(decision.keep.len() + decision.delete.len(), 30);
//! ```

pub mod errors;
pub mod policy;
pub mod dates;
pub mod engine;
pub mod simulation;

// Re-export commonly used types
pub use dates::{DateExtractor, PatternExtractor, DEFAULT_NAME_PATTERN};
pub use engine::{compute_delete, compute_keep, DatedCatalog, Decision, RetentionEngine};
pub use errors::{Result, WeederError};
pub use policy::{Policy, PolicyTier, DEFAULT_POLICY};

// Command-line surface
pub mod cli;
pub mod telemetry;
pub mod execution;
