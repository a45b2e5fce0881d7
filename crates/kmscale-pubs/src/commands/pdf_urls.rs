/*
 * pdf_urls.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * PDF URL listing command
 */

//! PDF URL listing command.
//!
//! Prints `<key>\t<url>` for every bibliography entry with a PDF location,
//! in bibliography order, followed by the entries that have none. Nothing
//! is downloaded.

use anyhow::{Context, Result};

use kmscale_core::arxiv::pdf_location;
use kmscale_core::citation::parse_bibliography;

use super::load_project;

/// Execute the pdf-urls command
pub fn execute(dir: Option<String>) -> Result<()> {
    let project = load_project(dir.as_deref())?;
    let text = std::fs::read_to_string(&project.bibliography).with_context(|| {
        format!(
            "Failed to read bibliography {}",
            project.bibliography.display()
        )
    })?;
    let (index, problems) = parse_bibliography(&text).context("Failed to parse bibliography")?;
    for problem in &problems {
        problem
            .to_diagnostic(&project.bibliography.display().to_string())
            .emit();
    }

    let mut skipped = Vec::new();
    for (key, fields) in index.iter() {
        match pdf_location(fields) {
            Some(url) => println!("{}\t{}", key, url),
            None => skipped.push(key),
        }
    }

    if !skipped.is_empty() {
        println!();
        println!("Skipped entries:");
        for key in skipped {
            println!("- {}: no PDF url found", key);
        }
    }
    Ok(())
}
