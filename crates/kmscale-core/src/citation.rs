/*
 * citation.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Citation loader.
 */

//! Citation loader.
//!
//! Reads the shared BibTeX database into a [`CitationIndex`]: citation key to
//! a flat field set. Field names are lower-cased on the way in, so `Author`
//! and `author` are the same field. Values are the verbatim field text with
//! runs of whitespace collapsed, since BibTeX values commonly wrap lines.

use std::collections::{BTreeMap, HashMap};

use biblatex::{Bibliography, ChunksExt, Entry, RawBibliography};

use crate::diagnostic::{DiagnosticMessage, DiagnosticMessageBuilder};
use crate::error::LoadError;

/// The fields of one bibliography entry, keyed by lower-case field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationFields {
    fields: BTreeMap<String, String>,
}

impl CitationFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. The name is lower-cased.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_lowercase(), value.into());
    }

    /// Look up a field by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(value) => Some(value.as_str()),
            None => self.fields.get(&name.to_lowercase()).map(String::as_str),
        }
    }

    /// Like [`get`](Self::get), but blank values count as absent.
    pub fn get_non_blank(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.trim().is_empty())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for CitationFields {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut fields = CitationFields::new();
        for (name, value) in iter {
            fields.insert(name.as_ref(), value);
        }
        fields
    }
}

/// Citation key to field set, built once per render and passed explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationIndex {
    entries: HashMap<String, CitationFields>,
    /// Keys in document order, for reporting.
    order: Vec<String>,
}

impl CitationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. A repeated key replaces the earlier entry's fields.
    pub fn insert(&mut self, key: impl Into<String>, fields: CitationFields) {
        let key = key.into();
        if self.entries.insert(key.clone(), fields).is_none() {
            self.order.push(key);
        }
    }

    /// Fields for a citation key. Keys are matched exactly.
    pub fn get(&self, key: &str) -> Option<&CitationFields> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Citation keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CitationFields)> {
        self.order
            .iter()
            .filter_map(|key| Some((key.as_str(), self.entries.get(key)?)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn entry_fields(entry: &Entry) -> CitationFields {
    entry
        .fields
        .iter()
        .map(|(name, chunks)| (name.as_str(), collapse_whitespace(&chunks.format_verbatim())))
        .collect()
}

/// An entry that could not be taken as written. The rest of the document
/// still loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryProblem {
    /// The key repeats an earlier entry; the later entry replaced it.
    DuplicateKey(String),
    /// The entry did not resolve (e.g. an undefined `@string`) and was skipped.
    Unresolved { key: String, message: String },
}

impl EntryProblem {
    pub fn key(&self) -> &str {
        match self {
            EntryProblem::DuplicateKey(key) => key,
            EntryProblem::Unresolved { key, .. } => key,
        }
    }

    /// Convert to a K-2-* diagnostic attributed to `source`.
    pub fn to_diagnostic(&self, source: &str) -> DiagnosticMessage {
        let builder = match self {
            EntryProblem::DuplicateKey(key) => {
                DiagnosticMessageBuilder::warning("Duplicate Bibliography Key")
                    .with_code("K-2-2")
                    .problem(format!("`{}` is defined more than once", key))
                    .add_detail("The last definition is used")
                    .add_hint("Remove or rename one of the entries?")
            }
            EntryProblem::Unresolved { key, message } => {
                DiagnosticMessageBuilder::warning("Unresolved Bibliography Entry")
                    .with_code("K-2-3")
                    .problem(format!("`{}` could not be resolved and was skipped", key))
                    .add_detail(message.clone())
                    .add_hint("Is every `@string` abbreviation it uses defined?")
            }
        };
        builder.with_source(source).build()
    }
}

/// Parse a BibTeX document.
///
/// Only a syntax error fails the whole document. Duplicate keys and entries
/// that do not resolve are reported per entry: a repeated key keeps its last
/// definition and an unresolvable entry is left out.
pub fn parse_bibliography(text: &str) -> Result<(CitationIndex, Vec<EntryProblem>), LoadError> {
    let raw = RawBibliography::parse(text).map_err(|e| LoadError::Bibtex(e.to_string()))?;

    let mut index = CitationIndex::new();

    // Whole-document resolution also follows crossref/xdata links.
    if let Ok(bibliography) = Bibliography::from_raw(raw.clone()) {
        for entry in bibliography.iter() {
            index.insert(entry.key.clone(), entry_fields(entry));
        }
        return Ok((index, Vec::new()));
    }

    let mut problems = Vec::new();
    for entry in &raw.entries {
        let key = entry.v.key.v;
        let single = RawBibliography {
            preamble: String::new(),
            entries: vec![entry.clone()],
            abbreviations: raw.abbreviations.clone(),
        };
        match Bibliography::from_raw(single) {
            Ok(bibliography) => {
                if index.contains_key(key) {
                    problems.push(EntryProblem::DuplicateKey(key.to_string()));
                }
                for resolved in bibliography.iter() {
                    index.insert(resolved.key.clone(), entry_fields(resolved));
                }
            }
            Err(e) => problems.push(EntryProblem::Unresolved {
                key: key.to_string(),
                message: e.kind.to_string(),
            }),
        }
    }
    Ok((index, problems))
}

/// Load the citation database.
///
/// A document that does not parse yields an empty index plus a K-2-1
/// diagnostic; entry-level problems add one diagnostic each. This function
/// never fails.
pub fn load_citations(source: &str, text: &str) -> (CitationIndex, Vec<DiagnosticMessage>) {
    match parse_bibliography(text) {
        Ok((index, problems)) => {
            tracing::debug!(source, entries = index.len(), "Loaded bibliography");
            let diagnostics: Vec<_> = problems.iter().map(|p| p.to_diagnostic(source)).collect();
            for diagnostic in &diagnostics {
                diagnostic.emit();
            }
            (index, diagnostics)
        }
        Err(e) => {
            let diagnostic = e.to_diagnostic(source);
            diagnostic.emit();
            (CitationIndex::new(), vec![diagnostic])
        }
    }
}
