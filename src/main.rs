//! weeder - Main CLI Entry Point

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};
use weeder::{
    cli::{Args, Config, Verbosity},
    execution, telemetry,
};

fn run_cmdline(args: &Args, config: &Config) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execution::run(args, config, &mut out)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = Config::load(args.config.clone());
    let fallback = config
        .as_ref()
        .ok()
        .and_then(|c| c.default_verbosity().ok())
        .unwrap_or(Verbosity::Normal);
    telemetry::init(args.verbosity_or(fallback));

    if let Err(e) = ctrlc::set_handler(|| {
        info!("user interrupt");
        std::process::exit(1);
    }) {
        warn!("could not install interrupt handler: {}", e);
    }

    let result = config
        .map_err(anyhow::Error::from)
        .and_then(|config| run_cmdline(&args, &config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}
