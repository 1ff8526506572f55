//! Subcommands

pub mod check;
pub mod replay;

use std::path::Path;

use anyhow::{Context, Result};
use warden_weave::prelude::*;

/// A manifest after scanning.
pub struct Woven {
    pub plan: WeavePlan,
    pub diagnostics: Diagnostics,
    pub report: ScanReport,
}

/// Loads `manifest` and runs the advisor over it.
pub fn weave(manifest: &Path) -> Result<Woven> {
    let module = Module::load(manifest)
        .with_context(|| format!("failed to load manifest '{}'", manifest.display()))?;

    let mut plan = WeavePlan::new();
    let mut diagnostics = Diagnostics::new();
    let report = {
        let mut sink = TracingSink::new(&mut diagnostics);
        Advisor::new(&module).provide_advices(&mut plan, &mut sink)
    };

    Ok(Woven {
        plan,
        diagnostics,
        report,
    })
}
