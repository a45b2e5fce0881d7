/*
 * scaffold.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Scaffold command implementation
 */

//! Scaffold command implementation.
//!
//! Prints the BibTeX entry and the catalog skeleton for a new arXiv paper,
//! together with the files they belong in. Existing keys are reported as
//! warnings; nothing is written.

use anyhow::Result;
use tracing::warn;

use kmscale_core::load_sources;
use kmscale_core::scaffold::{
    Category, PaperMetadata, ScaffoldRequest, existing_key_locations, scaffold,
};

use super::load_project;

/// Arguments for the scaffold command
#[derive(Debug)]
pub struct ScaffoldArgs {
    pub url: String,
    pub title: String,
    pub author: String,
    pub year: String,
    pub id: Option<String>,
    pub category: Option<String>,
    pub primary_class: String,
    pub dir: Option<String>,
}

/// Execute the scaffold command
pub fn execute(args: ScaffoldArgs) -> Result<()> {
    let category = args
        .category
        .as_deref()
        .map(Category::try_from)
        .transpose()?;

    let request = ScaffoldRequest {
        url_or_id: args.url,
        metadata: PaperMetadata {
            title: args.title,
            author: args.author,
            year: args.year,
            primary_class: args.primary_class,
        },
        key: args.id,
        category,
    };
    let scaffold = scaffold(&request)?;

    let project = load_project(args.dir.as_deref())?;
    let (sources, _) = project.read_sources();
    for location in existing_key_locations(&scaffold.key, &load_sources(&sources)) {
        warn!("Key '{}' already exists in {}", scaffold.key, location);
    }
    if request.metadata.year.trim().is_empty() {
        warn!("No year given; the BibTeX year is left blank");
    }

    let catalog_file = project
        .catalog(scaffold.category.as_str())
        .map(|entry| entry.path.display().to_string())
        .unwrap_or_else(|| format!("the {} catalog", scaffold.category));

    println!("# arXiv {} ({})", scaffold.arxiv_id, scaffold.pdf_url);
    println!();
    println!("# Add to {}", project.bibliography.display());
    println!("{}", scaffold.bib_entry);
    println!("# Add under `papers:` in {}", catalog_file);
    print!("{}", scaffold.catalog_entry);
    Ok(())
}
