//! Date banding with greedy forward sampling

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDate;
use tracing::{debug, trace};

use super::catalog::DatedCatalog;
use crate::policy::Policy;

/// Identifiers split into keepers and goners, in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decision {
    pub keep: Vec<String>,
    pub delete: Vec<String>,
}

/// Applies a [`Policy`] relative to a reference date
///
/// Tiers are walked oldest threshold first. Each tier claims the oldest
/// dates still unassigned that are at least `age_days` old, and keeps the
/// first of them plus every date at least `spacing_days` after the last
/// kept one. Dates no tier claims are kept.
#[derive(Debug, Clone)]
pub struct RetentionEngine {
    policy: Policy,
    reference_date: NaiveDate,
}

impl RetentionEngine {
    pub fn new(policy: Policy, reference_date: NaiveDate) -> Self {
        Self {
            policy,
            reference_date,
        }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Dates surviving the policy, ascending and without repetitions
    pub fn dates_to_keep<I>(&self, dates: I) -> Vec<NaiveDate>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        // Newest first, so the oldest unassigned date is always at the end
        let mut pool: Vec<NaiveDate> = dates.into_iter().collect();
        pool.sort_unstable_by(|a, b| b.cmp(a));
        pool.dedup();

        let mut kept = Vec::with_capacity(pool.len());

        for tier in self.policy.tiers() {
            let Some(threshold) = tier.threshold_date(self.reference_date) else {
                debug!("tier {} reaches before the calendar, skipped", tier);
                continue;
            };
            debug!("threshold: {}, distance: {}", threshold, tier.spacing_days);

            let mut band = Vec::new();
            while let Some(&oldest) = pool.last() {
                if oldest > threshold {
                    break;
                }
                band.push(oldest);
                pool.pop();
            }

            let (Some(first), Some(last)) = (band.first(), band.last()) else {
                continue;
            };
            debug!("dates between: {} and {}", first, last);

            let spacing = i64::from(tier.spacing_days);
            let mut last_kept: Option<NaiveDate> = None;
            for date in band {
                let keep = match last_kept {
                    None => true,
                    Some(prev) => (date - prev).num_days() >= spacing,
                };
                if keep {
                    trace!("will keep: {}", date);
                    kept.push(date);
                    last_kept = Some(date);
                } else {
                    trace!("will discard: {}", date);
                }
            }
        }

        // Too recent for any tier
        kept.extend(pool.into_iter().rev());
        kept
    }

    /// Identifiers to keep, in catalog order
    pub fn keep(&self, catalog: &DatedCatalog) -> Vec<String> {
        self.decide(catalog).keep
    }

    /// Identifiers to delete, in catalog order
    pub fn delete(&self, catalog: &DatedCatalog) -> Vec<String> {
        self.decide(catalog).delete
    }

    /// Split the catalog in keepers and goners
    ///
    /// Unmatched identifiers are in neither list.
    pub fn decide(&self, catalog: &DatedCatalog) -> Decision {
        let keepers: HashSet<NaiveDate> =
            self.dates_to_keep(catalog.dates()).into_iter().collect();

        let mut decision = Decision::default();
        for (identifier, date) in catalog.entries() {
            if keepers.contains(&date) {
                decision.keep.push(identifier.to_string());
            } else {
                decision.delete.push(identifier.to_string());
            }
        }
        debug!(
            "{} files to keep, {} to delete, {} unmatched",
            decision.keep.len(),
            decision.delete.len(),
            catalog.unmatched().len()
        );
        decision
    }
}

/// Identifiers surviving `policy` at `reference_date`
pub fn compute_keep<I>(
    items: &BTreeMap<NaiveDate, I>,
    reference_date: NaiveDate,
    policy: &Policy,
) -> BTreeSet<I>
where
    I: Clone + Ord,
{
    let engine = RetentionEngine::new(policy.clone(), reference_date);
    engine
        .dates_to_keep(items.keys().copied())
        .iter()
        .filter_map(|date| items.get(date).cloned())
        .collect()
}

/// Identifiers `policy` discards at `reference_date`
pub fn compute_delete<I>(
    items: &BTreeMap<NaiveDate, I>,
    reference_date: NaiveDate,
    policy: &Policy,
) -> BTreeSet<I>
where
    I: Clone + Ord,
{
    let keep: BTreeSet<NaiveDate> = RetentionEngine::new(policy.clone(), reference_date)
        .dates_to_keep(items.keys().copied())
        .into_iter()
        .collect();
    items
        .iter()
        .filter(|(date, _)| !keep.contains(date))
        .map(|(_, id)| id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyTier;
    use chrono::Days;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn days_before(reference: NaiveDate, n: u64) -> NaiveDate {
        reference.checked_sub_days(Days::new(n)).unwrap()
    }

    fn single_tier(age: u32, spacing: u32) -> Policy {
        Policy::new(vec![PolicyTier::new(age, spacing).unwrap()]).unwrap()
    }

    #[test]
    fn test_empty_input() {
        let engine = RetentionEngine::new(Policy::default(), date(2020, 1, 1));
        assert!(engine.dates_to_keep(Vec::new()).is_empty());
        assert_eq!(engine.decide(&DatedCatalog::new()), Decision::default());
    }

    #[test]
    fn test_recent_dates_all_kept() {
        let reference = date(2020, 6, 1);
        let engine = RetentionEngine::new(Policy::default(), reference);
        let dates: Vec<NaiveDate> = (0..14).map(|n| days_before(reference, n)).collect();

        let kept = engine.dates_to_keep(dates.clone());
        assert_eq!(kept.len(), 14);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let reference = date(2020, 6, 1);
        let engine = RetentionEngine::new(single_tier(10, 5), reference);

        // Aged exactly 10 joins the band and is thinned out
        let dates = vec![
            days_before(reference, 12),
            days_before(reference, 10),
            days_before(reference, 9),
        ];
        let kept = engine.dates_to_keep(dates);
        assert_eq!(
            kept,
            vec![days_before(reference, 12), days_before(reference, 9)]
        );
    }

    #[test]
    fn test_spacing_is_inclusive() {
        let reference = date(2020, 6, 1);
        let engine = RetentionEngine::new(single_tier(0, 7), reference);
        let dates = vec![
            days_before(reference, 20),
            days_before(reference, 13),
            days_before(reference, 7),
        ];

        // 20 -> 13 is exactly 7 days, 13 -> 7 only 6
        let kept = engine.dates_to_keep(dates);
        assert_eq!(
            kept,
            vec![days_before(reference, 20), days_before(reference, 13)]
        );
    }

    #[test]
    fn test_spacing_anchored_to_band_start() {
        let reference = date(2020, 6, 1);
        let engine = RetentionEngine::new(single_tier(0, 3), reference);
        let dates: Vec<NaiveDate> = (0..10).map(|n| days_before(reference, n)).collect();

        let kept = engine.dates_to_keep(dates);
        let expected: Vec<NaiveDate> = [9, 6, 3, 0]
            .iter()
            .map(|&n| days_before(reference, n))
            .collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn test_bands_restart_spacing() {
        let reference = date(2020, 6, 1);
        let policy = Policy::new(vec![
            PolicyTier::new(10, 4).unwrap(),
            PolicyTier::new(20, 100).unwrap(),
        ])
        .unwrap();
        let engine = RetentionEngine::new(policy, reference);
        let dates: Vec<NaiveDate> = (0..30).map(|n| days_before(reference, n)).collect();

        let kept = engine.dates_to_keep(dates);
        let mut expected: Vec<NaiveDate> = vec![days_before(reference, 29)];
        // Band [10, 20) starts over at age 19
        expected.extend([19, 15, 11].iter().map(|&n| days_before(reference, n)));
        expected.extend((0..10).rev().map(|n| days_before(reference, n)));
        assert_eq!(kept, expected);
    }

    #[test]
    fn test_unsorted_and_repeated_input() {
        let reference = date(2020, 6, 1);
        let engine = RetentionEngine::new(single_tier(0, 2), reference);
        let dates = vec![
            days_before(reference, 1),
            days_before(reference, 4),
            days_before(reference, 1),
            days_before(reference, 3),
            days_before(reference, 2),
        ];

        let kept = engine.dates_to_keep(dates);
        assert_eq!(
            kept,
            vec![days_before(reference, 4), days_before(reference, 2)]
        );
    }

    #[test]
    fn test_future_dates_kept() {
        let reference = date(2020, 6, 1);
        let engine = RetentionEngine::new(single_tier(0, 30), reference);
        let dates = vec![date(2020, 6, 2), date(2020, 6, 3)];
        assert_eq!(engine.dates_to_keep(dates.clone()), dates);
    }

    #[test]
    fn test_decide_catalog_order() {
        let reference = date(2020, 6, 1);
        let engine = RetentionEngine::new(single_tier(0, 7), reference);
        let catalog = DatedCatalog::from_pairs(vec![
            ("c", days_before(reference, 1)),
            ("a", days_before(reference, 10)),
            ("b", days_before(reference, 5)),
        ])
        .unwrap();

        let decision = engine.decide(&catalog);
        assert_eq!(decision.keep, vec!["c".to_string(), "a".to_string()]);
        assert_eq!(decision.delete, vec!["b".to_string()]);
        assert_eq!(engine.keep(&catalog), decision.keep);
        assert_eq!(engine.delete(&catalog), decision.delete);
    }

    #[test]
    fn test_compute_keep_and_delete() {
        let reference = date(2020, 6, 1);
        let policy = single_tier(0, 7);
        let items: BTreeMap<NaiveDate, u32> = (0..15u32)
            .map(|n| (days_before(reference, u64::from(n)), n))
            .collect();

        let keep = compute_keep(&items, reference, &policy);
        let delete = compute_delete(&items, reference, &policy);

        assert_eq!(keep, [14, 7, 0].into_iter().collect::<BTreeSet<u32>>());
        assert_eq!(keep.len() + delete.len(), items.len());
        assert!(keep.is_disjoint(&delete));
    }
}
