//! Catalog and citation join pipeline for km-scale publication tables.
//!
//! This crate turns a set of curated YAML catalogs and one shared BibTeX
//! bibliography into render-ready tables:
//!
//! ```text
//! catalog YAML ──► PublicationRecord ─┐
//!                                     ├─► DisplayRow ─► Table ─► markdown / html / json
//! references.bib ─► CitationIndex ────┘
//! ```
//!
//! - [`catalog`] and [`citation`] load the source documents. Neither fails:
//!   a broken document yields an empty collection plus diagnostics.
//! - [`normalize`] joins each record with its citation and resolves every
//!   display field (title, year, authors, resolution, architecture, links).
//! - [`table`] shapes rows into columns; [`writers`] serialize them.
//! - [`render`] is the recompute entry point tying these together.
//!
//! Around that pipeline sit the project configuration ([`config`]), join
//! checks ([`check`]), PDF location lookup ([`arxiv`]) and entry scaffolding
//! for new arXiv papers ([`scaffold`]).
//!
//! # Example
//!
//! ```
//! use kmscale_core::{CatalogSource, OutputFormat, Sources, render, write_to_string};
//!
//! let sources = Sources {
//!     catalogs: vec![CatalogSource::new(
//!         "global",
//!         "Global drivers and priors",
//!         "papers:\n  - id: lam2023\n    domain:\n      nominal_resolution_deg: 0.25\n",
//!     )],
//!     bibliography: Some(
//!         "@article{lam2023, title = {GraphCast}, author = {Lam, Remi}, year = {2023}}".into(),
//!     ),
//! };
//! let output = render(&sources);
//! let markdown = write_to_string(&output, OutputFormat::Markdown);
//! assert!(markdown.contains("| GraphCast | 2023 | 0.25 deg |"));
//! assert!(markdown.contains("| Remi Lam |"));
//! ```

pub mod arxiv;
pub mod catalog;
pub mod check;
pub mod citation;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod links;
pub mod normalize;
pub mod render;
pub mod scaffold;
pub mod table;
pub mod writers;

// Re-export commonly used types
pub use catalog::{PublicationRecord, load_catalog};
pub use check::check_join;
pub use citation::{CitationFields, CitationIndex, EntryProblem, load_citations};
pub use config::{CatalogEntry, ProjectConfig};
pub use diagnostic::{DiagnosticKind, DiagnosticMessage, DiagnosticMessageBuilder};
pub use error::{ConfigError, LoadError, Result, ScaffoldError};
pub use links::Link;
pub use normalize::DisplayRow;
pub use render::{
    CatalogOutput, CatalogSource, LoadedSources, RenderOutput, Sources, load_sources, render,
    render_at,
};
pub use table::Table;
pub use writers::{OutputFormat, write, write_to_string};
