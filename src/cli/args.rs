//! Command-line argument parsing for weeder
//!
//! Provides clap-based CLI with verbosity control.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::Parser;

use crate::cli::config::OutputMode;
use crate::errors::WeederError;
use crate::policy::PolicyTier;

const LONG_ABOUT: &str = "\
Remove an excess of files.

Implement a files retention policy such that more copies of recent files are
kept; files are deleted as they get older.

For instance, keep 1 file every day for 1 week, 1 file every week for 1 month,
1 file every month for 1 year, 1 file every year forever.

By default, print on stdout the names of the files to delete.";

/// weeder - remove unneeded historical files
#[derive(Parser, Debug, Default)]
#[command(name = "weeder")]
#[command(version)]
#[command(about = "Remove an excess of files", long_about = LONG_ABOUT)]
pub struct Args {
    /// The files to weed
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// Of every file older than AGE days, keep at least one every DIST days
    /// [default: 14:7 84:28 364:364]
    #[arg(short, long, value_name = "AGE:DIST", num_args = 1.., value_parser = parse_policy)]
    pub policy: Vec<PolicyTier>,

    /// The pattern to extract a date from a file name
    /// [default: (\d{4})-(\d{2})-(\d{2})]
    #[arg(short, long, value_name = "REGEX")]
    pub format: Option<String>,

    /// Reference date to establish retention [default: today]
    #[arg(short, long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub refdate: Option<NaiveDate>,

    /// Print the files to keep
    #[arg(long, conflicts_with = "print_goners")]
    pub print_keepers: bool,

    /// Print the files to delete [default]
    #[arg(long)]
    pub print_goners: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Talk more: -v (debug), -vv (trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Talk less
    #[arg(short, long)]
    pub quiet: bool,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    VeryVerbose,
}

fn parse_policy(s: &str) -> Result<PolicyTier, String> {
    s.parse::<PolicyTier>().map_err(|e| e.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| format!("not a valid date: {}", s))
}

impl Args {
    /// Verbosity from the flags, `fallback` if none was given
    pub fn verbosity_or(&self, fallback: Verbosity) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => fallback,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity_or(Verbosity::Normal)
    }

    /// Output mode chosen on the command line, if any
    pub fn output_mode(&self) -> Option<OutputMode> {
        if self.print_keepers {
            Some(OutputMode::Keepers)
        } else if self.print_goners {
            Some(OutputMode::Goners)
        } else {
            None
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }
}

impl FromStr for Verbosity {
    type Err = WeederError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quiet" => Ok(Verbosity::Quiet),
            "normal" => Ok(Verbosity::Normal),
            "verbose" => Ok(Verbosity::Verbose),
            "very_verbose" => Ok(Verbosity::VeryVerbose),
            other => Err(WeederError::ConfigError(format!(
                "Invalid verbosity level: {}",
                other
            ))),
        }
    }
}
