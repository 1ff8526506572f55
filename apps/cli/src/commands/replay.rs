//! `warden replay`

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Args;
use serde::Serialize;
use warden_weave::prelude::*;

use crate::settings::{Output, Settings};

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Declaration manifest (.json or .toml)
    pub manifest: PathBuf,

    /// Method to call, as Type::method (property setters are Type::set_name)
    #[arg(short, long)]
    pub method: String,

    /// Arguments as a JSON array, in parameter order
    #[arg(short, long, default_value = "[]")]
    pub args: String,

    /// Instance the call runs on, as JSON
    #[arg(short, long)]
    pub target: Option<String>,
}

#[derive(Serialize)]
struct Rejection {
    kind: String,
    parameter: Option<String>,
    message: String,
}

#[derive(Serialize)]
struct ReplayReport {
    method: String,
    checks: usize,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection: Option<Rejection>,
}

fn split_method(method: &str) -> Result<(&str, &str)> {
    match method.rsplit_once("::") {
        Some((ty, name)) if !ty.is_empty() && !name.is_empty() => Ok((ty, name)),
        _ => bail!("method must be written as Type::method, got '{method}'"),
    }
}

fn kind_label(err: &ContractError) -> String {
    match err {
        ContractError::Violation(violation) => violation.kind.as_str().to_owned(),
        ContractError::Custom(custom) => custom.type_name().to_owned(),
        ContractError::Configuration(_) => "configuration".to_owned(),
    }
}

pub fn run(args: &ReplayArgs, settings: &Settings) -> Result<ExitCode> {
    let (declaring_type, method) = split_method(&args.method)?;
    let arguments: Vec<Value> =
        serde_json::from_str(&args.args).context("--args must be a JSON array")?;
    let target: Option<Value> = args
        .target
        .as_deref()
        .map(serde_json::from_str::<Value>)
        .transpose()
        .context("--target must be JSON")?;

    let woven = super::weave(&args.manifest)?;
    let checks = woven.plan.method_units(declaring_type, method).count();
    if checks == 0 {
        tracing::warn!(method = %args.method, "no checks are woven into this method");
    }

    let outcome = woven
        .plan
        .check_call(declaring_type, method, target.as_ref(), &arguments);
    let rejection = outcome.as_ref().err().map(|err| Rejection {
        kind: kind_label(err),
        parameter: err.parameter().map(str::to_owned),
        message: err.to_string(),
    });
    let report = ReplayReport {
        method: args.method.clone(),
        checks,
        passed: rejection.is_none(),
        rejection,
    };

    match settings.output {
        Output::Human => match &report.rejection {
            None => println!("{}: passed {} checks", report.method, report.checks),
            Some(rejection) => println!(
                "{}: rejected ({}): {}",
                report.method, rejection.kind, rejection.message
            ),
        },
        Output::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(if report.passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_paths() {
        assert_eq!(split_method("Orders::place").unwrap(), ("Orders", "place"));
        assert_eq!(split_method("a::b::Orders::place").unwrap(), ("a::b::Orders", "place"));
        assert!(split_method("place").is_err());
        assert!(split_method("Orders::").is_err());
    }

    #[test]
    fn kind_labels() {
        let err = ContractError::from(Violation::new(ViolationKind::ArgumentNull, "x"));
        assert_eq!(kind_label(&err), "argument_null");
        let err = ContractError::from(ConfigurationError::EmptyPattern);
        assert_eq!(kind_label(&err), "configuration");
    }
}
