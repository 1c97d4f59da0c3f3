//! Date extraction from item identifiers
//!
//! The retention engine never looks at names itself: callers hand it a
//! [`DateExtractor`] that turns an identifier into a calendar date.

pub mod extractor;

pub use extractor::{DateExtractor, PatternExtractor, DEFAULT_NAME_PATTERN};
