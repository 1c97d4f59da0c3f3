//! One weeder run: flags and configuration in, list of files out

use std::io::Write;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::cli::{Args, Config, OutputMode};
use crate::dates::PatternExtractor;
use crate::engine::{DatedCatalog, Decision, RetentionEngine};
use crate::errors::Result;
use crate::policy::Policy;

/// Settings of a run after merging flags over the configuration
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub policy: Policy,
    pub extractor: PatternExtractor,
    pub reference_date: NaiveDate,
    pub mode: OutputMode,
}

impl RunSettings {
    /// Command-line flags win over the configuration file
    pub fn resolve(args: &Args, config: &Config) -> Result<Self> {
        let policy = if args.policy.is_empty() {
            config.policy()?
        } else {
            Policy::new(args.policy.iter().copied())?
        };

        let extractor = match &args.format {
            Some(pattern) => PatternExtractor::new(pattern)?,
            None => config.extractor()?,
        };

        Ok(Self {
            policy,
            extractor,
            reference_date: args.refdate.unwrap_or_else(|| Local::now().date_naive()),
            mode: args.output_mode().unwrap_or(config.output.mode),
        })
    }
}

/// Classify `args.files` and print one side of the decision to `out`
pub fn run<W: Write>(args: &Args, config: &Config, out: &mut W) -> Result<Decision> {
    let settings = RunSettings::resolve(args, config)?;
    debug!(
        "policy: {}, refdate: {}, format: {}",
        settings.policy,
        settings.reference_date,
        settings.extractor.as_str()
    );

    let catalog = DatedCatalog::build(args.files.iter().cloned(), &settings.extractor)?;
    let engine = RetentionEngine::new(settings.policy, settings.reference_date);
    let decision = engine.decide(&catalog);

    let listed = match settings.mode {
        OutputMode::Keepers => &decision.keep,
        OutputMode::Goners => &decision.delete,
    };
    for file in listed {
        writeln!(out, "{}", file)?;
    }
    out.flush()?;

    info!(
        "{} files: {} kept, {} to delete",
        catalog.len(),
        decision.keep.len(),
        decision.delete.len()
    );
    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.output.mode = OutputMode::Keepers;

        let args = Args {
            policy: vec!["7:1".parse().unwrap()],
            format: Some(r"(\d{4})(\d{2})(\d{2})".to_string()),
            refdate: NaiveDate::from_ymd_opt(2020, 1, 1),
            print_goners: true,
            ..Args::default()
        };

        let settings = RunSettings::resolve(&args, &config).unwrap();
        assert_eq!(settings.policy.to_string(), "7:1");
        assert_eq!(settings.extractor.as_str(), r"(\d{4})(\d{2})(\d{2})");
        assert_eq!(settings.reference_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(settings.mode, OutputMode::Goners);
    }

    #[test]
    fn test_config_used_without_flags() {
        let mut config = Config::default();
        config.output.mode = OutputMode::Keepers;

        let settings = RunSettings::resolve(&Args::default(), &config).unwrap();
        assert_eq!(settings.policy, Policy::default());
        assert_eq!(settings.mode, OutputMode::Keepers);
    }

    #[test]
    fn test_bad_format_fails_before_reading_files() {
        let args = Args {
            files: vec!["f-2020-01-01".to_string()],
            format: Some("(".to_string()),
            ..Args::default()
        };
        let mut out = Vec::new();
        assert!(run(&args, &Config::default(), &mut out).is_err());
        assert!(out.is_empty());
    }
}
