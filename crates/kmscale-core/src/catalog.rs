/*
 * catalog.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Catalog loader.
 */

//! Catalog loader.
//!
//! A catalog is a YAML document of the form
//!
//! ```yaml
//! papers:
//!   - id: pathak2024_graphcast_lam
//!     title: Kilometer-scale limited-area forecasting
//!     year: 2024
//!     domain:
//!       nominal_resolution_km: 2.5
//!     architecture:
//!       family: Graph neural network
//!       notes: Hierarchical mesh
//!     tags: [lam, gnn]
//!     links:
//!       code: https://github.com/example/repo
//! ```
//!
//! Loading never fails. A document that cannot be used yields zero records
//! and a diagnostic; a record whose fields have unexpected shapes keeps the
//! fields that do make sense.

use std::fmt;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::diagnostic::{DiagnosticMessage, DiagnosticMessageBuilder};
use crate::error::LoadError;
use crate::links::Link;

/// A scalar catalog value as written in YAML.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Integers are kept exact so numeric ids still join.
    Integer(i128),
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Scalar {
    /// Read a scalar from YAML; collections and null are not scalars.
    pub fn from_yaml(value: &Value) -> Option<Scalar> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(i128::from)
                .or_else(|| n.as_u64().map(i128::from))
                .map(Scalar::Integer)
                .or_else(|| n.as_f64().map(Scalar::Number)),
            Value::String(s) => Some(Scalar::Text(s.clone())),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Tagged(tagged) => Scalar::from_yaml(&tagged.value),
            _ => None,
        }
    }

    /// True for text that is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        matches!(self, Scalar::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64's Display is already the shortest round-trip form (9, 2.2).
            Scalar::Integer(n) => write!(f, "{}", n),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Spatial resolution and coverage of a modeling system.
///
/// Only the keys the resolution rules consult are kept; their values stay
/// as raw YAML because their shape varies between records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainDescriptor {
    pub nominal_resolution_km: Option<Value>,
    pub nominal_resolution_deg: Option<Value>,
    pub input_resolution_km: Option<Value>,
    pub output_resolution_km: Option<Value>,
    pub resolution: Option<Value>,
    pub nominal_resolution: Option<Value>,
    pub scope: Option<String>,
}

impl DomainDescriptor {
    fn from_mapping(map: &Mapping) -> Self {
        let field = |key: &str| map.get(key).filter(|v| !v.is_null()).cloned();
        Self {
            nominal_resolution_km: field("nominal_resolution_km"),
            nominal_resolution_deg: field("nominal_resolution_deg"),
            input_resolution_km: field("input_resolution_km"),
            output_resolution_km: field("output_resolution_km"),
            resolution: field("resolution"),
            nominal_resolution: field("nominal_resolution"),
            scope: map.get("scope").and_then(scalar_text),
        }
    }
}

/// Model family plus free-text notes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArchitectureDescriptor {
    pub family: Option<String>,
    pub notes: Option<String>,
    pub details: Option<String>,
}

impl ArchitectureDescriptor {
    fn from_mapping(map: &Mapping) -> Self {
        Self {
            family: map.get("family").and_then(scalar_text),
            notes: map.get("notes").and_then(scalar_text),
            details: map.get("details").and_then(scalar_text),
        }
    }
}

/// One entry of a catalog's `papers` sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublicationRecord {
    /// Join key against the bibliography. `None` when the entry has no id.
    pub id: Option<String>,
    pub title: Option<String>,
    pub year: Option<Scalar>,
    pub domain: Option<DomainDescriptor>,
    pub architecture: Option<ArchitectureDescriptor>,
    pub tags: Vec<String>,
    /// Fallback links, in document order.
    pub links: Vec<Link>,
}

impl PublicationRecord {
    /// Build a record from one YAML mapping, dropping mis-shaped fields.
    pub fn from_mapping(map: &Mapping) -> Self {
        let tags = match map.get("tags") {
            Some(Value::Sequence(items)) => items.iter().filter_map(scalar_text).collect(),
            _ => Vec::new(),
        };

        let links = match map.get("links") {
            Some(Value::Mapping(entries)) => entries
                .iter()
                .filter_map(|(label, url)| {
                    Some(Link::new(scalar_text(label)?, scalar_text(url)?))
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            id: map.get("id").and_then(scalar_text).filter(|s| !s.trim().is_empty()),
            title: map.get("title").and_then(scalar_text),
            year: map.get("year").and_then(Scalar::from_yaml),
            domain: match map.get("domain") {
                Some(Value::Mapping(m)) => Some(DomainDescriptor::from_mapping(m)),
                _ => None,
            },
            architecture: match map.get("architecture") {
                Some(Value::Mapping(m)) => Some(ArchitectureDescriptor::from_mapping(m)),
                _ => None,
            },
            tags,
            links,
        }
    }
}

/// Text of a scalar YAML value.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    Scalar::from_yaml(value).map(|s| s.to_string())
}

/// Parse a catalog document, strict at the top level.
///
/// Returns the raw `papers` entries; per-entry tolerance is applied by
/// [`load_catalog`].
pub fn parse_catalog(text: &str) -> Result<Vec<Value>, LoadError> {
    let document: Value = serde_yaml::from_str(text)?;
    let Value::Mapping(root) = document else {
        return Err(LoadError::NotAMapping);
    };
    match root.get("papers") {
        Some(Value::Sequence(papers)) => Ok(papers.clone()),
        Some(_) => Err(LoadError::PapersNotSequence),
        None => Err(LoadError::MissingPapers),
    }
}

/// Load the publication records of one catalog.
///
/// `source` names the catalog in diagnostics. Any failure yields an empty
/// record list plus the diagnostics explaining it; this function never
/// fails.
pub fn load_catalog(source: &str, text: &str) -> (Vec<PublicationRecord>, Vec<DiagnosticMessage>) {
    let mut diagnostics = Vec::new();

    let papers = match parse_catalog(text) {
        Ok(papers) => papers,
        Err(e) => {
            let diagnostic = e.to_diagnostic(source);
            diagnostic.emit();
            diagnostics.push(diagnostic);
            return (Vec::new(), diagnostics);
        }
    };

    let mut records = Vec::with_capacity(papers.len());
    for (index, paper) in papers.iter().enumerate() {
        let Value::Mapping(map) = paper else {
            let diagnostic = DiagnosticMessageBuilder::warning("Skipped Catalog Entry")
                .with_code("K-1-5")
                .with_source(source)
                .problem(format!("Entry {} of `papers` is not a mapping", index + 1))
                .build();
            diagnostic.emit();
            diagnostics.push(diagnostic);
            continue;
        };

        let record = PublicationRecord::from_mapping(map);
        if record.id.is_none() {
            let diagnostic = DiagnosticMessageBuilder::warning("Missing Identifier")
                .with_code("K-1-6")
                .with_source(source)
                .problem(format!(
                    "Entry {} has no `id`; it is shown without citation data",
                    index + 1
                ))
                .build();
            diagnostic.emit();
            diagnostics.push(diagnostic);
        }
        records.push(record);
    }

    tracing::debug!(catalog = source, records = records.len(), "Loaded catalog");
    (records, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(text: &str) -> Vec<PublicationRecord> {
        load_catalog("test", text).0
    }

    #[test]
    fn test_unparseable_catalog_is_empty() {
        let (records, diagnostics) = load_catalog("test", "papers: [unclosed");
        assert!(records.is_empty());
        assert_eq!(diagnostics[0].code.as_deref(), Some("K-1-1"));
    }

    #[test]
    fn test_non_mapping_documents_are_empty() {
        assert!(records("").is_empty());
        assert!(records("- a\n- b\n").is_empty());
        assert!(records("just a string").is_empty());
    }

    #[test]
    fn test_missing_or_wrong_papers_is_empty() {
        let (r, d) = load_catalog("test", "models: []\n");
        assert!(r.is_empty());
        assert_eq!(d[0].code.as_deref(), Some("K-1-3"));

        let (r, d) = load_catalog("test", "papers:\n  id: x\n");
        assert!(r.is_empty());
        assert_eq!(d[0].code.as_deref(), Some("K-1-4"));
    }

    #[test]
    fn test_order_preserved() {
        let ids: Vec<_> = records("papers:\n  - id: c\n  - id: a\n  - id: b\n")
            .into_iter()
            .map(|r| r.id.unwrap())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_full_record() {
        let text = r#"
papers:
  - id: graphcast_lam
    title: Limited-area GraphCast
    year: 2024
    domain:
      scope: Nordics
      nominal_resolution_km: 2.5
    architecture:
      family: GNN
      notes: Hierarchical mesh
    tags: [lam, gnn]
    links:
      code: https://github.com/x/y
      data: https://example.org/data
"#;
        let record = records(text).remove(0);
        assert_eq!(record.id.as_deref(), Some("graphcast_lam"));
        assert_eq!(record.title.as_deref(), Some("Limited-area GraphCast"));
        assert_eq!(record.year, Some(Scalar::Integer(2024)));
        let domain = record.domain.unwrap();
        assert_eq!(domain.scope.as_deref(), Some("Nordics"));
        assert!(domain.nominal_resolution_km.is_some());
        assert!(domain.input_resolution_km.is_none());
        let arch = record.architecture.unwrap();
        assert_eq!(arch.family.as_deref(), Some("GNN"));
        assert_eq!(arch.notes.as_deref(), Some("Hierarchical mesh"));
        assert_eq!(record.tags, vec!["lam", "gnn"]);
        assert_eq!(
            record.links,
            vec![
                Link::new("code", "https://github.com/x/y"),
                Link::new("data", "https://example.org/data"),
            ]
        );
    }

    #[test]
    fn test_mis_shaped_fields_are_dropped() {
        let text = "papers:\n  - id: x\n    tags: lam\n    domain: 3 km\n    links: [a, b]\n    title: [t]\n";
        let record = records(text).remove(0);
        assert_eq!(record.id.as_deref(), Some("x"));
        assert!(record.tags.is_empty());
        assert!(record.domain.is_none());
        assert!(record.links.is_empty());
        assert!(record.title.is_none());
    }

    #[test]
    fn test_entry_without_id_is_kept() {
        let (records, diagnostics) = load_catalog("test", "papers:\n  - title: Orphan\n");
        assert_eq!(records.len(), 1);
        assert!(records[0].id.is_none());
        assert_eq!(diagnostics[0].code.as_deref(), Some("K-1-6"));
    }

    #[test]
    fn test_non_mapping_entry_is_skipped() {
        let (records, diagnostics) = load_catalog("test", "papers:\n  - just-text\n  - id: y\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_deref(), Some("y"));
        assert_eq!(diagnostics[0].code.as_deref(), Some("K-1-5"));
    }

    #[test]
    fn test_numeric_id_and_string_year() {
        let record = records("papers:\n  - id: 42\n    year: '2023'\n").remove(0);
        assert_eq!(record.id.as_deref(), Some("42"));
        assert_eq!(record.year, Some(Scalar::Text("2023".into())));
    }

    #[test]
    fn test_large_integer_id_is_exact() {
        let text = "papers:\n  - id: 12345678901234567890\n  - id: -9007199254740993\n";
        let ids: Vec<_> = records(text).into_iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![
                Some("12345678901234567890".to_string()),
                Some("-9007199254740993".to_string()),
            ]
        );
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Integer(2024).to_string(), "2024");
        assert_eq!(Scalar::Number(9.0).to_string(), "9");
        assert_eq!(Scalar::Number(2.2).to_string(), "2.2");
        assert_eq!(Scalar::Number(0.25).to_string(), "0.25");
        assert_eq!(Scalar::Text("~3".into()).to_string(), "~3");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
    }
}
