/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Field normalizer: one catalog record + matched citation -> display row.
 */

//! Field normalizer.
//!
//! Citation data wins over catalog data for title, year and authors. The
//! Resolution, Architecture and Tags columns come from the catalog only.
//! Blank values are treated as absent at every step.

pub mod authors;
pub mod resolution;

use serde::{Deserialize, Serialize};

use crate::catalog::{ArchitectureDescriptor, PublicationRecord};
use crate::citation::{CitationFields, CitationIndex};
use crate::links::{Link, collect_links};

/// Title shown when neither source has one.
pub const UNTITLED: &str = "Untitled";

/// The render-ready form of one publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    /// Catalog identifier, kept for diagnostics and JSON consumers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub year: String,
    pub resolution: String,
    pub architecture: String,
    pub authors: String,
    pub links: Vec<Link>,
    pub tags: Vec<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn resolve_title(record: &PublicationRecord, citation: Option<&CitationFields>) -> String {
    citation
        .and_then(|c| c.get_non_blank("title"))
        .or_else(|| non_blank(record.title.as_deref()))
        .unwrap_or(UNTITLED)
        .to_string()
}

pub fn resolve_year(record: &PublicationRecord, citation: Option<&CitationFields>) -> String {
    if let Some(year) = citation.and_then(|c| c.get_non_blank("year")) {
        return year.to_string();
    }
    record
        .year
        .as_ref()
        .filter(|y| !y.is_blank())
        .map(|y| y.to_string())
        .unwrap_or_default()
}

pub fn resolve_authors(citation: Option<&CitationFields>) -> String {
    citation
        .and_then(|c| c.get_non_blank("author"))
        .map(authors::format_authors)
        .unwrap_or_default()
}

/// "<family>. <notes>", or whichever part exists. `notes` beats `details`.
pub fn format_architecture(architecture: Option<&ArchitectureDescriptor>) -> String {
    let Some(arch) = architecture else {
        return String::new();
    };
    let family = non_blank(arch.family.as_deref());
    let notes = non_blank(arch.notes.as_deref()).or_else(|| non_blank(arch.details.as_deref()));
    match (family, notes) {
        (Some(family), Some(notes)) => format!("{}. {}", family, notes),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => String::new(),
    }
}

/// Resolve every display field of `record` against its matched citation.
pub fn normalize_record(
    record: &PublicationRecord,
    citation: Option<&CitationFields>,
) -> DisplayRow {
    DisplayRow {
        id: record.id.clone(),
        title: resolve_title(record, citation),
        year: resolve_year(record, citation),
        resolution: resolution::format_resolution(record.domain.as_ref()),
        architecture: format_architecture(record.architecture.as_ref()),
        authors: resolve_authors(citation),
        links: collect_links(record, citation),
        tags: record.tags.clone(),
    }
}

/// Join each record with `citations` on its identifier and normalize it.
///
/// Row order follows record order.
pub fn build_rows(records: &[PublicationRecord], citations: &CitationIndex) -> Vec<DisplayRow> {
    records
        .iter()
        .map(|record| {
            let citation = record.id.as_deref().and_then(|id| citations.get(id));
            if citation.is_none() {
                tracing::debug!(id = ?record.id, "No citation entry; using catalog fields");
            }
            normalize_record(record, citation)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Scalar;

    fn fields(pairs: &[(&str, &str)]) -> CitationFields {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    fn record() -> PublicationRecord {
        PublicationRecord {
            id: Some("x".into()),
            title: Some("Catalog title".into()),
            year: Some(Scalar::Integer(2022)),
            ..Default::default()
        }
    }

    #[test]
    fn test_citation_wins_for_title_and_year() {
        let citation = fields(&[("title", "Bib title"), ("year", "2024")]);
        let row = normalize_record(&record(), Some(&citation));
        assert_eq!(row.title, "Bib title");
        assert_eq!(row.year, "2024");
    }

    #[test]
    fn test_catalog_fallback() {
        let row = normalize_record(&record(), None);
        assert_eq!(row.title, "Catalog title");
        assert_eq!(row.year, "2022");
        assert_eq!(row.authors, "");
    }

    #[test]
    fn test_blank_citation_values_fall_back() {
        let citation = fields(&[("title", " "), ("year", "")]);
        let row = normalize_record(&record(), Some(&citation));
        assert_eq!(row.title, "Catalog title");
        assert_eq!(row.year, "2022");
    }

    #[test]
    fn test_untitled_and_empty_year() {
        let row = normalize_record(&PublicationRecord::default(), None);
        assert_eq!(row.title, UNTITLED);
        assert_eq!(row.year, "");
        assert_eq!(row.resolution, "");
        assert_eq!(row.architecture, "");
        assert!(row.links.is_empty());
        assert!(row.tags.is_empty());
    }

    #[test]
    fn test_authors_from_citation_only() {
        let citation = fields(&[("Author", "Lam, Remi and Willson, Matthew")]);
        assert_eq!(resolve_authors(Some(&citation)), "Remi Lam, Matthew Willson");
        assert_eq!(resolve_authors(None), "");
    }

    #[test]
    fn test_architecture_formatting() {
        let arch = |family: Option<&str>, notes: Option<&str>, details: Option<&str>| {
            ArchitectureDescriptor {
                family: family.map(String::from),
                notes: notes.map(String::from),
                details: details.map(String::from),
            }
        };
        assert_eq!(
            format_architecture(Some(&arch(Some("GNN"), Some("Hierarchical mesh"), None))),
            "GNN. Hierarchical mesh"
        );
        assert_eq!(format_architecture(Some(&arch(Some("GNN"), None, None))), "GNN");
        assert_eq!(
            format_architecture(Some(&arch(None, None, Some("U-Net backbone")))),
            "U-Net backbone"
        );
        assert_eq!(
            format_architecture(Some(&arch(Some("Diffusion"), Some("notes"), Some("details")))),
            "Diffusion. notes"
        );
        assert_eq!(format_architecture(Some(&arch(Some(""), Some(""), None))), "");
        assert_eq!(format_architecture(None), "");
    }

    #[test]
    fn test_tags_pass_through() {
        let record = PublicationRecord {
            tags: vec!["lam".into(), "gnn".into(), "lam".into()],
            ..Default::default()
        };
        assert_eq!(normalize_record(&record, None).tags, vec!["lam", "gnn", "lam"]);
    }

    #[test]
    fn test_build_rows_joins_on_id() {
        let mut citations = CitationIndex::new();
        citations.insert("b", fields(&[("title", "Joined")]));
        let records = vec![
            PublicationRecord {
                id: Some("a".into()),
                ..Default::default()
            },
            PublicationRecord {
                id: Some("b".into()),
                ..Default::default()
            },
            PublicationRecord::default(),
        ];
        let rows = build_rows(&records, &citations);
        let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec![UNTITLED, "Joined", UNTITLED]);
        assert_eq!(rows[1].id.as_deref(), Some("b"));
    }
}
