//! warden - contract analysis for annotated declarations
//!
//! `warden check` scans a declaration manifest and reports which validator
//! annotations would be woven; `warden replay` runs the woven checks of one
//! method against concrete arguments.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod commands;
mod settings;

use settings::{LogOverrides, Output, Overrides, Settings};

/// warden - contract analysis for annotated declarations
#[derive(Parser, Debug)]
#[command(name = "warden")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the settings file
    #[arg(short, long, default_value = "warden.toml", env = "WARDEN_CONFIG")]
    config: PathBuf,

    /// Log filter directive (e.g. info, warden_weave=debug)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format (compact, pretty, json)
    #[arg(long, global = true)]
    log_format: Option<warden_log::Format>,

    /// Report format
    #[arg(short, long, global = true, value_enum)]
    output: Option<Output>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a manifest and report diagnostics and planned interceptions
    Check(commands::check::CheckArgs),

    /// Run the woven checks of one method against arguments
    Replay(commands::replay::ReplayArgs),

    /// Print the effective settings as TOML
    Config,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let overrides = Overrides {
        output: cli.output,
        deny_warnings: match &cli.command {
            Commands::Check(args) if args.deny_warnings => Some(true),
            _ => None,
        },
        log: LogOverrides {
            level: cli.log_level.clone(),
            format: cli.log_format,
        },
    };
    let settings = Settings::load(&cli.config, &overrides)?;

    warden_log::init(&settings.log).context("failed to initialize logging")?;
    tracing::debug!(config = %cli.config.display(), "settings loaded");

    match cli.command {
        Commands::Check(args) => commands::check::run(&args, &settings),
        Commands::Replay(args) => commands::replay::run(&args, &settings),
        Commands::Config => {
            let rendered =
                toml::to_string_pretty(&settings).context("failed to render settings")?;
            print!("{rendered}");
            Ok(ExitCode::SUCCESS)
        }
    }
}
