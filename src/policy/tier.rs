//! A single retention tier

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, WeederError};

/// Keep weekly after 2 weeks, monthly after 12 weeks, yearly after 52 weeks
pub const DEFAULT_POLICY: [PolicyTier; 3] = [
    PolicyTier { age_days: 14, spacing_days: 7 },
    PolicyTier { age_days: 84, spacing_days: 28 },
    PolicyTier { age_days: 364, spacing_days: 364 },
];

/// Of every item older than `age_days`, keep at least one every `spacing_days`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyTier {
    /// Items at least this old fall into the tier's band
    pub age_days: u32,

    /// Minimum gap between consecutive kept items of the band
    pub spacing_days: u32,
}

impl PolicyTier {
    /// Create a tier, rejecting a zero spacing
    pub fn new(age_days: u32, spacing_days: u32) -> Result<Self> {
        let tier = Self { age_days, spacing_days };
        tier.validate()?;
        Ok(tier)
    }

    /// Check the tier can be applied
    pub fn validate(&self) -> Result<()> {
        if self.spacing_days == 0 {
            return Err(WeederError::InvalidPolicy(format!(
                "spacing must be greater than 0 in policy: {}",
                self
            )));
        }
        Ok(())
    }

    /// Newest date belonging to the band, `None` if it precedes the calendar
    pub fn threshold_date(&self, reference: NaiveDate) -> Option<NaiveDate> {
        reference.checked_sub_days(Days::new(u64::from(self.age_days)))
    }
}

impl fmt::Display for PolicyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.age_days, self.spacing_days)
    }
}

impl FromStr for PolicyTier {
    type Err = WeederError;

    /// Parse an `AGE:DIST` pair
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || WeederError::InvalidPolicy(format!("not a valid policy: {}", s));

        let (age, spacing) = s.split_once(':').ok_or_else(invalid)?;
        let age = age.trim().parse::<u32>().map_err(|_| invalid())?;
        let spacing = spacing.trim().parse::<u32>().map_err(|_| invalid())?;

        Self::new(age, spacing)
    }
}
