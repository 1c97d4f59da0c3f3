//! Date to identifier mapping for one run

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::warn;

use crate::dates::DateExtractor;
use crate::errors::{Result, WeederError};

/// Identifiers with their dates, at most one identifier per date
///
/// Identifiers keep the order they were given in, so that decisions can be
/// reported back in the caller's order.
#[derive(Debug, Clone, Default)]
pub struct DatedCatalog {
    entries: Vec<(String, NaiveDate)>,
    by_date: BTreeMap<NaiveDate, String>,
    unmatched: Vec<String>,
}

impl DatedCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Date every identifier with `extractor`
    ///
    /// Identifiers without a date are recorded as unmatched and left out.
    pub fn build<I, S, E>(identifiers: I, extractor: &E) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        E: DateExtractor + ?Sized,
    {
        let mut catalog = Self::new();
        for identifier in identifiers {
            let identifier = identifier.into();
            match extractor.extract(&identifier)? {
                Some(date) => catalog.insert(identifier, date)?,
                None => {
                    warn!("file doesn't match format: {}", identifier);
                    if !catalog.unmatched.contains(&identifier) {
                        catalog.unmatched.push(identifier);
                    }
                }
            }
        }
        Ok(catalog)
    }

    /// Catalog from already dated identifiers
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, NaiveDate)>,
        S: Into<String>,
    {
        let mut catalog = Self::new();
        for (identifier, date) in pairs {
            catalog.insert(identifier.into(), date)?;
        }
        Ok(catalog)
    }

    /// Add a dated identifier
    ///
    /// Adding the same identifier with the same date again is a no-op; a
    /// different identifier on a date already taken is an error.
    pub fn insert(&mut self, identifier: String, date: NaiveDate) -> Result<()> {
        if let Some(existing) = self.by_date.get(&date) {
            if *existing == identifier {
                return Ok(());
            }
            return Err(WeederError::DuplicateDate {
                date,
                first: existing.clone(),
                second: identifier,
            });
        }

        self.by_date.insert(date, identifier.clone());
        self.entries.push((identifier, date));
        Ok(())
    }

    /// Date to identifier mapping
    pub fn dates_map(&self) -> &BTreeMap<NaiveDate, String> {
        &self.by_date
    }

    /// All distinct dates, ascending
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_date.keys().copied()
    }

    /// Dated identifiers in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&str, NaiveDate)> + '_ {
        self.entries.iter().map(|(id, date)| (id.as_str(), *date))
    }

    /// Identifiers the extractor couldn't date
    pub fn unmatched(&self) -> &[String] {
        &self.unmatched
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
