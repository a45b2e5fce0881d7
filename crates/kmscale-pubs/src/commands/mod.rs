//! Command implementations for the kmscale-pubs CLI
//!
//! Each command module handles the CLI interface and delegates to
//! kmscale-core for actual implementation.

pub mod check;
pub mod pdf_urls;
pub mod render;
pub mod scaffold;

use std::path::PathBuf;

use anyhow::{Context, Result};
use kmscale_core::ProjectConfig;

/// Locate the project for `dir`, or for the current directory.
pub fn load_project(dir: Option<&str>) -> Result<ProjectConfig> {
    let start = match dir {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    if !start.is_dir() {
        anyhow::bail!("Project directory does not exist: {}", start.display());
    }

    let project = ProjectConfig::discover(&start).context("Failed to load project configuration")?;
    match &project.config_file {
        Some(file) => tracing::debug!("Using project file {}", file.display()),
        None => tracing::debug!("Using default layout in {}", project.dir.display()),
    }
    Ok(project)
}
