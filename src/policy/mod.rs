//! Retention policy definition
//! Tiers of (age, spacing) pairs that decide how densely each age band is sampled

pub mod schedule;
pub mod tier;

pub use schedule::Policy;
pub use tier::{PolicyTier, DEFAULT_POLICY};
