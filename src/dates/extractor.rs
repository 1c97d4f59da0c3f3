//! Date extractor strategies

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::errors::{Result, WeederError};

/// Year, month and day anywhere in the name, e.g. `backup-2020-03-01.tar`
pub const DEFAULT_NAME_PATTERN: &str = r"(\d{4})-(\d{2})-(\d{2})";

/// Strategy mapping an identifier to the date it represents
pub trait DateExtractor {
    /// `Ok(None)` if the identifier carries no date
    fn extract(&self, identifier: &str) -> Result<Option<NaiveDate>>;
}

impl<F> DateExtractor for F
where
    F: Fn(&str) -> Option<NaiveDate>,
{
    fn extract(&self, identifier: &str) -> Result<Option<NaiveDate>> {
        Ok(self(identifier))
    }
}

/// Regex with exactly three capture groups: year, month, day
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    regex: Regex,
}

impl PatternExtractor {
    /// Compile a pattern, checking it captures three values
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            WeederError::InvalidPattern(format!("'{}': {}", pattern, e))
        })?;

        // captures_len() counts the implicit whole-match group
        let groups = regex.captures_len() - 1;
        if groups != 3 {
            return Err(WeederError::InvalidPattern(format!(
                "'{}': expected 3 capture groups (year, month, day), found {}",
                pattern, groups
            )));
        }

        Ok(Self { regex })
    }

    /// Pattern source
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl DateExtractor for PatternExtractor {
    fn extract(&self, identifier: &str) -> Result<Option<NaiveDate>> {
        let Some(caps) = self.regex.captures(identifier) else {
            return Ok(None);
        };

        let invalid = || WeederError::InvalidDate(identifier.to_string());
        let field = |i: usize| caps.get(i).map(|m| m.as_str()).ok_or_else(invalid);

        let year = field(1)?.parse::<i32>().map_err(|_| invalid())?;
        let month = field(2)?.parse::<u32>().map_err(|_| invalid())?;
        let day = field(3)?.parse::<u32>().map_err(|_| invalid())?;

        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
        debug!("got date {} for file: {}", date, identifier);
        Ok(Some(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_pattern_extracts() {
        let extractor = PatternExtractor::new(DEFAULT_NAME_PATTERN).unwrap();
        let got = extractor.extract("dir/file-2020-02-29.ext").unwrap();
        assert_eq!(got, Some(date(2020, 2, 29)));
    }

    #[test]
    fn test_no_match_is_none() {
        let extractor = PatternExtractor::new(DEFAULT_NAME_PATTERN).unwrap();
        assert_eq!(extractor.extract("dir/readme.txt").unwrap(), None);
    }

    #[test]
    fn test_impossible_date_is_error() {
        let extractor = PatternExtractor::new(DEFAULT_NAME_PATTERN).unwrap();
        let err = extractor.extract("file-2021-02-29.ext").unwrap_err();
        assert!(matches!(err, WeederError::InvalidDate(_)));
    }

    #[test]
    fn test_custom_pattern() {
        let extractor = PatternExtractor::new(r"_(\d{4})(\d{2})(\d{2})\.dump$").unwrap();
        assert_eq!(
            extractor.extract("db_20191231.dump").unwrap(),
            Some(date(2019, 12, 31))
        );
        assert_eq!(extractor.as_str(), r"_(\d{4})(\d{2})(\d{2})\.dump$");
    }

    #[test]
    fn test_wrong_group_count_rejected() {
        let err = PatternExtractor::new(r"(\d{4})-(\d{2})").unwrap_err();
        assert!(matches!(err, WeederError::InvalidPattern(_)));
        assert!(PatternExtractor::new(r"(\d{4})-(\d{2})-(\d{2})-(\d+)").is_err());
    }

    #[test]
    fn test_bad_regex_rejected() {
        let err = PatternExtractor::new(r"(\d{4}").unwrap_err();
        assert!(err.to_string().contains("error parsing format"));
    }

    #[test]
    fn test_optional_group_missing_is_error() {
        let extractor = PatternExtractor::new(r"(\d{4})-(\d{2})(?:-(\d{2}))?").unwrap();
        assert!(extractor.extract("file-2020-01.ext").is_err());
    }

    #[test]
    fn test_closure_extractor() {
        let extractor = |id: &str| {
            id.strip_prefix("day")
                .and_then(|n| n.parse::<u32>().ok())
                .and_then(|n| NaiveDate::from_ymd_opt(2020, 1, n))
        };
        assert_eq!(extractor.extract("day5").unwrap(), Some(date(2020, 1, 5)));
        assert_eq!(extractor.extract("night5").unwrap(), None);
    }
}
