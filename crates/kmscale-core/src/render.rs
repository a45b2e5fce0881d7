/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The recompute entry point.
 */

//! The recompute entry point.
//!
//! A render is a pure function of its source documents: every call loads the
//! bibliography and each catalog from text, joins them, and returns fresh
//! rows. Nothing is cached between calls, so a host that watches the source
//! files simply calls [`render`] again when one changes.
//!
//! ```
//! use kmscale_core::render::{CatalogSource, Sources, render};
//!
//! let sources = Sources {
//!     catalogs: vec![CatalogSource::new(
//!         "forecasting",
//!         "Forecasting",
//!         "papers:\n  - id: lam2023\n",
//!     )],
//!     bibliography: Some("@article{lam2023, title = {GraphCast}, year = {2023}}".into()),
//! };
//! let output = render(&sources);
//! assert_eq!(output.total_rows, 1);
//! assert_eq!(output.catalogs[0].rows[0].title, "GraphCast");
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{PublicationRecord, load_catalog};
use crate::citation::{CitationIndex, load_citations};
use crate::diagnostic::DiagnosticMessage;
use crate::normalize::{DisplayRow, build_rows};
use crate::table::{Table, build_table};

/// strftime format of [`RenderOutput::last_updated`].
pub const LAST_UPDATED_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Label used for the bibliography in diagnostics.
pub const BIBLIOGRAPHY_SOURCE: &str = "bibliography";

/// One catalog document and how to present it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSource {
    pub name: String,
    pub caption: String,
    /// Document text; `None` when the document could not be read.
    pub text: Option<String>,
}

impl CatalogSource {
    pub fn new(name: impl Into<String>, caption: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            caption: caption.into(),
            text: Some(text.into()),
        }
    }
}

/// Everything a render reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sources {
    pub catalogs: Vec<CatalogSource>,
    /// BibTeX text; `None` when the document could not be read.
    pub bibliography: Option<String>,
}

/// A catalog after loading, before joining.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub name: String,
    pub caption: String,
    pub records: Vec<PublicationRecord>,
}

/// All sources after loading.
#[derive(Debug, Clone)]
pub struct LoadedSources {
    pub catalogs: Vec<LoadedCatalog>,
    pub citations: CitationIndex,
    pub diagnostics: Vec<DiagnosticMessage>,
}

/// The rows of one catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogOutput {
    pub name: String,
    pub caption: String,
    pub rows: Vec<DisplayRow>,
}

impl CatalogOutput {
    pub fn table(&self) -> Table {
        build_table(&self.name, &self.caption, &self.rows)
    }
}

/// Result of one render.
#[derive(Debug, Clone, Serialize)]
pub struct RenderOutput {
    pub catalogs: Vec<CatalogOutput>,
    /// Sum of the row counts of all catalogs.
    pub total_rows: usize,
    pub last_updated: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<DiagnosticMessage>,
}

impl RenderOutput {
    pub fn tables(&self) -> Vec<Table> {
        self.catalogs.iter().map(CatalogOutput::table).collect()
    }
}

/// Load the bibliography and every catalog.
pub fn load_sources(sources: &Sources) -> LoadedSources {
    let mut diagnostics = Vec::new();

    let citations = match &sources.bibliography {
        Some(text) => {
            let (index, diags) = load_citations(BIBLIOGRAPHY_SOURCE, text);
            diagnostics.extend(diags);
            index
        }
        None => CitationIndex::new(),
    };

    let catalogs = sources
        .catalogs
        .iter()
        .map(|source| {
            let records = match &source.text {
                Some(text) => {
                    let (records, diags) = load_catalog(&source.name, text);
                    diagnostics.extend(diags);
                    records
                }
                None => Vec::new(),
            };
            LoadedCatalog {
                name: source.name.clone(),
                caption: source.caption.clone(),
                records,
            }
        })
        .collect();

    LoadedSources {
        catalogs,
        citations,
        diagnostics,
    }
}

impl LoadedSources {
    /// Join and normalize every catalog, stamping the output with `now`.
    pub fn render_at(&self, now: DateTime<Utc>) -> RenderOutput {
        let catalogs: Vec<CatalogOutput> = self
            .catalogs
            .iter()
            .map(|catalog| CatalogOutput {
                name: catalog.name.clone(),
                caption: catalog.caption.clone(),
                rows: build_rows(&catalog.records, &self.citations),
            })
            .collect();

        let total_rows = catalogs.iter().map(|c| c.rows.len()).sum();
        tracing::debug!(catalogs = catalogs.len(), total_rows, "Rendered catalogs");

        RenderOutput {
            catalogs,
            total_rows,
            last_updated: now.format(LAST_UPDATED_FORMAT).to_string(),
            diagnostics: self.diagnostics.clone(),
        }
    }
}

/// Render all sources from scratch, stamped with the current time.
pub fn render(sources: &Sources) -> RenderOutput {
    render_at(sources, Utc::now())
}

/// Render all sources from scratch, stamped with `now`.
pub fn render_at(sources: &Sources, now: DateTime<Utc>) -> RenderOutput {
    load_sources(sources).render_at(now)
}
