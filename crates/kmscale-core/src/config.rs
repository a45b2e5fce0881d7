/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Project configuration: where the catalogs and the bibliography live.
 */

//! Project configuration.
//!
//! A project is a directory holding the catalog documents and the shared
//! bibliography. Their locations come from `_kmscale.yml`, found by walking
//! up from the start directory:
//!
//! ```yaml
//! bibliography: database/references.bib
//! catalogs:
//!   - name: forecasting
//!     title: Km-scale forecasting models
//!     path: database/km_forecasting_models.yaml
//! ```
//!
//! Without a project file the three standard catalogs under `database/` are
//! used, relative to the start directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::diagnostic::{DiagnosticMessage, DiagnosticMessageBuilder};
use crate::error::{ConfigError, Result};
use crate::render::{CatalogSource, Sources};

/// Project file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["_kmscale.yml", "_kmscale.yaml"];

pub const DEFAULT_BIBLIOGRAPHY: &str = "database/references.bib";

/// One configured catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub caption: String,
    pub path: PathBuf,
}

/// The standard catalogs: (name, caption, path relative to the project).
const DEFAULT_CATALOGS: [(&str, &str, &str); 3] = [
    (
        "forecasting",
        "Km-scale forecasting models",
        "database/km_forecasting_models.yaml",
    ),
    (
        "downscaling",
        "Km-scale downscaling and generative models",
        "database/km_downscaling_and_generative.yaml",
    ),
    (
        "global",
        "Global drivers and priors",
        "database/global_drivers_priors.yaml",
    ),
];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    bibliography: Option<PathBuf>,
    catalogs: Option<Vec<CatalogFileEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFileEntry {
    name: String,
    title: Option<String>,
    path: PathBuf,
}

/// Resolved project configuration. All paths are joined onto `dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Project root: the project file's directory, or the start directory.
    pub dir: PathBuf,
    /// The project file, when one was found.
    pub config_file: Option<PathBuf>,
    pub bibliography: PathBuf,
    pub catalogs: Vec<CatalogEntry>,
}

impl ProjectConfig {
    /// The standard layout rooted at `dir`.
    pub fn default_for(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        Self {
            bibliography: dir.join(DEFAULT_BIBLIOGRAPHY),
            catalogs: DEFAULT_CATALOGS
                .iter()
                .map(|(name, caption, path)| CatalogEntry {
                    name: name.to_string(),
                    caption: caption.to_string(),
                    path: dir.join(path),
                })
                .collect(),
            config_file: None,
            dir,
        }
    }

    /// Find the project file at or above `start` and load it, falling back
    /// to the standard layout rooted at `start`.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self> {
        let start = start.as_ref();
        match find_config_file(start) {
            Some(path) => Self::from_file(&path),
            None => {
                tracing::debug!(dir = %start.display(), "No project file; using default layout");
                Ok(Self::default_for(start))
            }
        }
    }

    /// Load a specific project file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
        let mut config = Self::parse(&content, &dir).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        config.config_file = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse project file text. An empty file means the default layout.
    fn parse(content: &str, dir: &Path) -> std::result::Result<Self, String> {
        let defaults = Self::default_for(dir);
        if content.trim().is_empty() {
            return Ok(defaults);
        }

        let file: ConfigFile = serde_yaml::from_str(content).map_err(|e| e.to_string())?;

        let catalogs = match file.catalogs {
            Some(entries) => entries
                .into_iter()
                .map(|entry| CatalogEntry {
                    caption: entry.title.unwrap_or_else(|| entry.name.clone()),
                    name: entry.name,
                    path: dir.join(entry.path),
                })
                .collect(),
            None => defaults.catalogs,
        };

        Ok(Self {
            dir: dir.to_path_buf(),
            config_file: None,
            bibliography: file
                .bibliography
                .map(|p| dir.join(p))
                .unwrap_or(defaults.bibliography),
            catalogs,
        })
    }

    /// The configured catalog called `name`.
    pub fn catalog(&self, name: &str) -> Option<&CatalogEntry> {
        self.catalogs.iter().find(|c| c.name == name)
    }

    /// Read every source document from disk.
    ///
    /// Unreadable files become K-4-1 diagnostics and are left out of the
    /// render rather than failing it.
    pub fn read_sources(&self) -> (Sources, Vec<DiagnosticMessage>) {
        let mut diagnostics = Vec::new();

        let bibliography = read_source(&self.bibliography, "bibliography", &mut diagnostics);
        let catalogs = self
            .catalogs
            .iter()
            .map(|entry| CatalogSource {
                name: entry.name.clone(),
                caption: entry.caption.clone(),
                text: read_source(&entry.path, &entry.name, &mut diagnostics),
            })
            .collect();

        (
            Sources {
                catalogs,
                bibliography,
            },
            diagnostics,
        )
    }
}

fn read_source(
    path: &Path,
    source: &str,
    diagnostics: &mut Vec<DiagnosticMessage>,
) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            let diagnostic = DiagnosticMessageBuilder::warning("Unreadable Source")
                .with_code("K-4-1")
                .with_source(source)
                .problem(format!("Could not read {}", path.display()))
                .add_detail(e.to_string())
                .build();
            diagnostic.emit();
            diagnostics.push(diagnostic);
            None
        }
    }
}

/// Search for a project file in `start_dir` and its parents.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        current = dir.parent();
    }
    None
}
