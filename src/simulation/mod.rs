//! Day by day pruning simulation
//!
//! Models a job that produces one dated item per day and prunes the
//! collection right after, so the survivors show what the policy retains
//! in steady state.

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::engine::RetentionEngine;
use crate::errors::{Result, WeederError};
use crate::policy::Policy;

/// Survivors of a simulation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationOutcome {
    /// Date of the newest item, also the last reference date
    pub last_day: NaiveDate,

    /// Surviving dates, ascending
    pub survivors: Vec<NaiveDate>,
}

impl SimulationOutcome {
    /// Survivors aged at least `min_age` and less than `max_age` days
    pub fn age_band(&self, min_age: i64, max_age: i64) -> Vec<NaiveDate> {
        self.survivors
            .iter()
            .copied()
            .filter(|d| {
                let age = (self.last_day - *d).num_days();
                min_age <= age && age < max_age
            })
            .collect()
    }
}

/// Daily produce-and-prune loop
#[derive(Debug, Clone)]
pub struct Simulation {
    policy: Policy,
    start: NaiveDate,
}

impl Simulation {
    pub fn new(policy: Policy, start: NaiveDate) -> Self {
        Self { policy, start }
    }

    /// Simulate `days` consecutive days
    pub fn run(&self, days: u32) -> Result<SimulationOutcome> {
        let mut survivors: Vec<NaiveDate> = Vec::new();
        let mut last_day = self.start;

        for offset in 0..days {
            let today = self
                .start
                .checked_add_days(Days::new(u64::from(offset)))
                .ok_or_else(|| {
                    WeederError::DateOutOfRange(format!("{} + {} days", self.start, offset))
                })?;

            survivors.push(today);
            let engine = RetentionEngine::new(self.policy.clone(), today);
            survivors = engine.dates_to_keep(survivors);
            last_day = today;
        }

        debug!(
            "simulated {} days from {}: {} survivors",
            days,
            self.start,
            survivors.len()
        );
        Ok(SimulationOutcome {
            last_day,
            survivors,
        })
    }
}
