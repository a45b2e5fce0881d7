/*
 * check.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Check command implementation
 */

//! Check command implementation.
//!
//! Loads the project the same way `render` does, then adds the join checks.
//! Every diagnostic is printed to stdout. The command fails when any of them
//! is a warning or an error; notes and infos alone pass.

use anyhow::{Context, Result};

use kmscale_core::{DiagnosticMessage, check_join, load_sources};

use super::load_project;

/// Arguments for the check command
#[derive(Debug)]
pub struct CheckArgs {
    /// Project directory
    pub dir: Option<String>,
    /// Print diagnostics as JSON
    pub json: bool,
}

/// Execute the check command
pub fn execute(args: CheckArgs) -> Result<()> {
    let project = load_project(args.dir.as_deref())?;
    let diagnostics = collect_diagnostics(&project);

    if args.json {
        let text =
            serde_json::to_string_pretty(&diagnostics).context("Failed to serialize diagnostics")?;
        println!("{}", text);
    } else if diagnostics.is_empty() {
        println!("No problems found.");
    } else {
        for diagnostic in &diagnostics {
            println!("{}", diagnostic.to_text());
        }
    }

    let problems = diagnostics.iter().filter(|d| d.is_problem()).count();
    if problems > 0 {
        anyhow::bail!("{} problem(s) found", problems);
    }
    Ok(())
}

fn collect_diagnostics(project: &kmscale_core::ProjectConfig) -> Vec<DiagnosticMessage> {
    let (sources, mut diagnostics) = project.read_sources();
    let loaded = load_sources(&sources);
    diagnostics.extend(loaded.diagnostics.iter().cloned());
    diagnostics.extend(check_join(&loaded));
    diagnostics
}
