/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Render command implementation
 */

//! Render command implementation.
//!
//! Reads every source document of the project, joins the catalogs with the
//! bibliography and writes the tables. Unreadable or broken sources are
//! logged and left out; the command itself only fails when the project file
//! or the output cannot be handled.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use kmscale_core::{OutputFormat, render, write};

use super::load_project;

/// Arguments for the render command
#[derive(Debug)]
pub struct RenderArgs {
    /// Project directory
    pub dir: Option<String>,
    /// Output format
    pub to: String,
    /// Output file path; stdout when absent or `-`
    pub output: Option<String>,
    /// Suppress console output
    pub quiet: bool,
}

/// Execute the render command
pub fn execute(args: RenderArgs) -> Result<()> {
    let format = OutputFormat::try_from(args.to.as_str()).map_err(|e| anyhow::anyhow!("{}", e))?;
    let project = load_project(args.dir.as_deref())?;

    let (sources, mut diagnostics) = project.read_sources();
    let mut output = render(&sources);
    diagnostics.append(&mut output.diagnostics);
    output.diagnostics = diagnostics;

    match args.output.as_deref() {
        None | Some("-") => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write(&output, format, &mut handle).context("Failed to write output")?;
            handle.flush().context("Failed to write output")?;
        }
        Some(path) => {
            let path = Path::new(path);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory {}", parent.display())
                })?;
            }
            let mut buf = Vec::new();
            write(&output, format, &mut buf).context("Failed to format output")?;
            fs::write(path, buf)
                .with_context(|| format!("Failed to write output file {}", path.display()))?;

            if !args.quiet {
                info!(
                    "Wrote {} papers from {} catalogs to {}",
                    output.total_rows,
                    output.catalogs.len(),
                    path.display()
                );
            }
        }
    }

    Ok(())
}
