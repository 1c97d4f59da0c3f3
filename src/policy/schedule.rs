//! Ordered set of retention tiers

use std::fmt;

use tracing::warn;

use super::tier::{PolicyTier, DEFAULT_POLICY};
use crate::errors::Result;

/// Retention policy: tiers sorted by decreasing age threshold
///
/// Dates younger than the smallest threshold are always kept. Dates older
/// than the largest threshold are thinned with that tier's spacing forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    tiers: Vec<PolicyTier>,
}

impl Policy {
    /// Build a policy from tiers given in any order
    ///
    /// An empty list yields [`DEFAULT_POLICY`]. When several tiers share an
    /// age threshold the first one given wins and the others are dropped.
    pub fn new<I>(tiers: I) -> Result<Self>
    where
        I: IntoIterator<Item = PolicyTier>,
    {
        let mut resolved: Vec<PolicyTier> = Vec::new();
        for tier in tiers {
            tier.validate()?;
            let existing = resolved.iter().find(|t| t.age_days == tier.age_days).copied();
            match existing {
                Some(existing) if existing == tier => {}
                Some(existing) => {
                    warn!(
                        "policy {} ignored: age {} already covered by {}",
                        tier, tier.age_days, existing
                    );
                }
                None => resolved.push(tier),
            }
        }

        if resolved.is_empty() {
            return Ok(Self::default());
        }

        resolved.sort_by(|a, b| b.age_days.cmp(&a.age_days));
        Ok(Self { tiers: resolved })
    }

    /// Tiers, oldest threshold first
    pub fn tiers(&self) -> &[PolicyTier] {
        &self.tiers
    }

    /// Age below which everything is kept
    pub fn youngest_age(&self) -> u32 {
        self.tiers.last().map(|t| t.age_days).unwrap_or(0)
    }
}

impl Default for Policy {
    fn default() -> Self {
        let mut tiers = DEFAULT_POLICY.to_vec();
        tiers.sort_by(|a, b| b.age_days.cmp(&a.age_days));
        Self { tiers }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tiers = self.tiers.iter().rev();
        if let Some(first) = tiers.next() {
            write!(f, "{}", first)?;
        }
        for tier in tiers {
            write!(f, " {}", tier)?;
        }
        Ok(())
    }
}
