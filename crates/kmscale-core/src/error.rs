/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Error types for kmscale-core.
 */

//! Error types for kmscale-core.
//!
//! None of these escape the render pipeline: loaders convert them into
//! [`DiagnosticMessage`]s and degrade to an empty collection. They are public
//! so hosts that call the strict parsing functions directly can match on them.

use std::path::PathBuf;

use thiserror::Error;

use crate::diagnostic::{DiagnosticMessage, DiagnosticMessageBuilder};

/// Why a catalog or citation document could not be loaded.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("catalog document is not a mapping")]
    NotAMapping,

    #[error("catalog document has no `papers` key")]
    MissingPapers,

    #[error("`papers` is not a sequence")]
    PapersNotSequence,

    #[error("BibTeX parse error: {0}")]
    Bibtex(String),
}

impl LoadError {
    /// Convert this error to a diagnostic attributed to `source`.
    ///
    /// Catalog errors use K-1-* codes, citation errors K-2-*.
    pub fn to_diagnostic(&self, source: &str) -> DiagnosticMessage {
        let builder = match self {
            LoadError::Yaml(e) => DiagnosticMessageBuilder::warning("Catalog Parse Error")
                .with_code("K-1-1")
                .problem("The catalog document is not valid YAML")
                .add_detail(e.to_string()),
            LoadError::NotAMapping => DiagnosticMessageBuilder::warning("Invalid Catalog")
                .with_code("K-1-2")
                .problem("The catalog document must be a mapping")
                .add_hint("Does the file start with `papers:`?"),
            LoadError::MissingPapers => DiagnosticMessageBuilder::warning("Invalid Catalog")
                .with_code("K-1-3")
                .problem("The catalog document has no `papers` key"),
            LoadError::PapersNotSequence => DiagnosticMessageBuilder::warning("Invalid Catalog")
                .with_code("K-1-4")
                .problem("`papers` must be a sequence of records"),
            LoadError::Bibtex(message) => {
                DiagnosticMessageBuilder::warning("Bibliography Parse Error")
                    .with_code("K-2-1")
                    .problem("The bibliography could not be parsed")
                    .add_detail(message.clone())
                    .add_hint("Every entry needs balanced braces and a key?")
            }
        };
        builder.with_source(source).build()
    }
}

/// Errors raised while locating or reading the project file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while preparing entries for a new arXiv paper.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScaffoldError {
    #[error("no arXiv identifier in '{0}'")]
    MissingArxivId(String),

    #[error("a title is required")]
    MissingTitle,

    #[error("unknown category '{0}' (expected forecasting, downscaling or global)")]
    UnknownCategory(String),

    #[error("unable to infer a category from the title; pass --category forecasting|downscaling|global")]
    CannotInferCategory,
}
