/*
 * check.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Consistency checks between catalogs and the bibliography.
 */

//! Consistency checks between catalogs and the bibliography.
//!
//! None of these conditions stop a render. They exist so maintainers can
//! find catalog entries that render with less information than intended.
//!
//! - K-3-1 (warning): an identifier appears more than once in one catalog
//! - K-3-2 (info): a catalog identifier has no bibliography entry
//! - K-3-3 (note): a bibliography entry is not referenced by any catalog

use std::collections::{HashMap, HashSet};

use crate::diagnostic::{DiagnosticMessage, DiagnosticMessageBuilder};
use crate::render::{BIBLIOGRAPHY_SOURCE, LoadedSources};

/// Run all join checks. Messages come out grouped by catalog, in catalog order.
pub fn check_join(loaded: &LoadedSources) -> Vec<DiagnosticMessage> {
    let mut diagnostics = Vec::new();
    let mut referenced: HashSet<&str> = HashSet::new();

    for catalog in &loaded.catalogs {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for record in &catalog.records {
            let Some(id) = record.id.as_deref() else {
                continue;
            };
            referenced.insert(id);

            let count = seen.entry(id).or_insert(0);
            *count += 1;
            if *count == 2 {
                diagnostics.push(
                    DiagnosticMessageBuilder::warning("Duplicate Identifier")
                        .with_code("K-3-1")
                        .with_source(&catalog.name)
                        .problem(format!("`{}` appears more than once", id))
                        .add_hint("Remove or rename one of the entries?")
                        .build(),
                );
            }

            if !loaded.citations.contains_key(id) && *count == 1 {
                diagnostics.push(
                    DiagnosticMessageBuilder::info("Unmatched Identifier")
                        .with_code("K-3-2")
                        .with_source(&catalog.name)
                        .problem(format!("`{}` has no bibliography entry", id))
                        .add_detail("The row shows catalog fields only")
                        .build(),
                );
            }
        }
    }

    for key in loaded.citations.keys() {
        if !referenced.contains(key) {
            diagnostics.push(
                DiagnosticMessageBuilder::note("Unused Bibliography Entry")
                    .with_code("K-3-3")
                    .with_source(BIBLIOGRAPHY_SOURCE)
                    .problem(format!("`{}` is not listed in any catalog", key))
                    .build(),
            );
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CatalogSource, Sources, load_sources};

    fn codes(diagnostics: &[DiagnosticMessage]) -> Vec<&str> {
        diagnostics.iter().filter_map(|d| d.code.as_deref()).collect()
    }

    #[test]
    fn test_clean_sources() {
        let loaded = load_sources(&Sources {
            catalogs: vec![CatalogSource::new("forecasting", "F", "papers:\n  - id: a\n")],
            bibliography: Some("@misc{a, title = {A}}".into()),
        });
        assert!(check_join(&loaded).is_empty());
    }

    #[test]
    fn test_duplicate_unmatched_and_unused() {
        let loaded = load_sources(&Sources {
            catalogs: vec![
                CatalogSource::new("forecasting", "F", "papers:\n  - id: a\n  - id: a\n  - id: z\n"),
                CatalogSource::new("global", "G", "papers:\n  - id: a\n"),
            ],
            bibliography: Some("@misc{a, title = {A}}\n@misc{b, title = {B}}\n".into()),
        });
        let diagnostics = check_join(&loaded);
        assert_eq!(codes(&diagnostics), vec!["K-3-1", "K-3-2", "K-3-3"]);
        assert_eq!(diagnostics[0].source.as_deref(), Some("forecasting"));
        assert_eq!(diagnostics[0].hints, vec!["Remove or rename one of the entries?"]);
        assert!(diagnostics[1].problem.as_deref().unwrap().contains("`z`"));
        assert!(diagnostics[2].problem.as_deref().unwrap().contains("`b`"));
    }

    #[test]
    fn test_same_id_in_two_catalogs_is_not_duplicate() {
        let loaded = load_sources(&Sources {
            catalogs: vec![
                CatalogSource::new("forecasting", "F", "papers:\n  - id: a\n"),
                CatalogSource::new("global", "G", "papers:\n  - id: a\n"),
            ],
            bibliography: Some("@misc{a, title = {A}}".into()),
        });
        assert!(check_join(&loaded).is_empty());
    }
}
