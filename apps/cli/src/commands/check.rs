//! `warden check`

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use warden_weave::prelude::*;

use crate::settings::{Output, Settings};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Declaration manifest (.json or .toml)
    pub manifest: PathBuf,

    /// Fail when any warning is reported
    #[arg(long)]
    pub deny_warnings: bool,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    passed: bool,
    report: ScanReport,
    errors: usize,
    warnings: usize,
    diagnostics: &'a Diagnostics,
    units: Vec<UnitSummary>,
}

pub fn run(args: &CheckArgs, settings: &Settings) -> Result<ExitCode> {
    let woven = super::weave(&args.manifest)?;
    let errors = woven.diagnostics.count(Severity::Error);
    let warnings = woven.diagnostics.count(Severity::Warning);
    let passed = errors == 0 && !(settings.deny_warnings && warnings > 0);

    match settings.output {
        Output::Human => {
            for message in &woven.diagnostics {
                println!("{message}");
            }
            for unit in woven.plan.units() {
                let summary = unit.summary();
                println!(
                    "woven: {} {} ({}) {}",
                    summary.join_point,
                    summary.target,
                    summary.parameters.join(", "),
                    summary.validator
                );
            }
            println!(
                "{} methods, {} properties: {} registered, {} excluded, {errors} errors, {warnings} warnings",
                woven.report.methods,
                woven.report.properties,
                woven.report.registered,
                woven.report.excluded,
            );
        }
        Output::Json => {
            let report = CheckReport {
                passed,
                report: woven.report,
                errors,
                warnings,
                diagnostics: &woven.diagnostics,
                units: woven.plan.units().iter().map(InterceptionUnit::summary).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
