/*
 * scaffold.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Entry scaffolding for new arXiv papers.
 */

//! Entry scaffolding for new arXiv papers.
//!
//! Given an arXiv URL and the paper's metadata, this prepares the two pieces
//! a maintainer adds by hand: a `@misc` bibliography entry and a catalog
//! record skeleton with the same key. Nothing is fetched and nothing is
//! written; the caller decides what to do with the text.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::arxiv;
use crate::error::ScaffoldError;
use crate::render::{BIBLIOGRAPHY_SOURCE, LoadedSources};

const STOP_WORDS: [&str; 5] = ["a", "an", "the", "for", "and"];
const TITLE_WORDS: usize = 3;
const MAX_SLUG_LEN: usize = 40;

static NON_ALNUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));
static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s]+").expect("valid regex"));

/// The catalog a new paper belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Forecasting,
    Downscaling,
    Global,
}

impl Category {
    /// Catalog name, as used in the project configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Forecasting => "forecasting",
            Category::Downscaling => "downscaling",
            Category::Global => "global",
        }
    }

    fn terms(self) -> &'static [&'static str] {
        match self {
            Category::Forecasting => &[
                "limited-area",
                "limited area",
                "lam ",
                "regional",
                "stretched-grid",
                "stretched grid",
            ],
            Category::Downscaling => &[
                "downscaling",
                "super-resolution",
                "super resolution",
                "diffusion",
                "generative",
            ],
            Category::Global => &["global", "medium-range", "medium range"],
        }
    }

    /// Guess the category from free text such as a title or abstract.
    ///
    /// Forecasting terms win over downscaling terms, which win over global
    /// terms.
    pub fn infer(text: &str) -> Result<Category, ScaffoldError> {
        // Pad so a trailing "LAM" still matches the "lam " term.
        let lower = format!("{} ", text.to_lowercase());
        [Category::Forecasting, Category::Downscaling, Category::Global]
            .into_iter()
            .find(|category| category.terms().iter().any(|term| lower.contains(term)))
            .ok_or(ScaffoldError::CannotInferCategory)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Category {
    type Error = ScaffoldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "forecasting" => Ok(Category::Forecasting),
            "downscaling" => Ok(Category::Downscaling),
            "global" => Ok(Category::Global),
            other => Err(ScaffoldError::UnknownCategory(other.to_string())),
        }
    }
}

/// What the maintainer knows about the paper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperMetadata {
    pub title: String,
    /// BibTeX author list, names separated by ` and `.
    pub author: String,
    pub year: String,
    /// arXiv primary subject class, e.g. `physics.ao-ph`.
    pub primary_class: String,
}

/// A request to scaffold a paper.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldRequest {
    /// arXiv abstract URL, PDF URL or bare identifier.
    pub url_or_id: String,
    pub metadata: PaperMetadata,
    /// Explicit key; generated from the metadata when absent.
    pub key: Option<String>,
    /// Explicit category; inferred from the title when absent.
    pub category: Option<Category>,
}

/// The prepared entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffold {
    pub key: String,
    pub arxiv_id: String,
    pub category: Category,
    pub abs_url: String,
    pub pdf_url: String,
    pub bib_entry: String,
    pub catalog_entry: String,
}

/// Prepare bibliography and catalog entries for one paper.
pub fn scaffold(request: &ScaffoldRequest) -> Result<Scaffold, ScaffoldError> {
    let arxiv_id = arxiv::normalize_id(&request.url_or_id);
    if arxiv_id.is_empty() {
        return Err(ScaffoldError::MissingArxivId(request.url_or_id.clone()));
    }
    if request.metadata.title.trim().is_empty() {
        return Err(ScaffoldError::MissingTitle);
    }

    let category = match request.category {
        Some(category) => category,
        None => Category::infer(&request.metadata.title)?,
    };
    let key = request
        .key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| generate_key(&request.metadata));

    tracing::debug!(%key, %arxiv_id, category = %category, "Scaffolded paper");

    Ok(Scaffold {
        bib_entry: bib_entry(&key, &request.metadata, &arxiv_id),
        catalog_entry: catalog_entry(&key),
        abs_url: arxiv::abs_url(&arxiv_id),
        pdf_url: arxiv::pdf_url(&arxiv_id),
        key,
        arxiv_id,
        category,
    })
}

/// Build a key of the form `<lastname><year>_<slug>`.
///
/// ```
/// use kmscale_core::scaffold::{PaperMetadata, generate_key};
///
/// let meta = PaperMetadata {
///     title: "A Comparison of Limited-Area and Stretched-Grid Models".into(),
///     author: "Wijnands, Jasper and Others, Ann".into(),
///     year: "2025".into(),
///     primary_class: String::new(),
/// };
/// assert_eq!(generate_key(&meta), "wijnands2025_comparison_of_limitedarea");
/// ```
pub fn generate_key(metadata: &PaperMetadata) -> String {
    let first_author = metadata.author.split(" and ").next().unwrap_or_default().trim();
    let last_name = match first_author.split_once(',') {
        Some((last, _)) => last,
        None => first_author.split_whitespace().last().unwrap_or_default(),
    };
    let last_name = NON_ALNUM_RE.replace_all(&last_name.to_lowercase(), "").into_owned();
    let last_name = if last_name.is_empty() {
        "unknown".to_string()
    } else {
        last_name
    };

    let year = match metadata.year.trim() {
        "" => "0000",
        year => year,
    };

    let title = metadata.title.to_lowercase();
    let title = NON_WORD_RE.replace_all(&title, "");
    let words: Vec<&str> = title
        .split_whitespace()
        .filter(|word| !STOP_WORDS.contains(word))
        .take(TITLE_WORDS)
        .collect();
    let slug = words.join("_");
    let slug = slug[..slug.len().min(MAX_SLUG_LEN)].trim_matches('_');
    let slug = if slug.is_empty() { "paper" } else { slug };

    format!("{}{}_{}", last_name, year, slug)
}

/// A `@misc` entry for an arXiv preprint.
pub fn bib_entry(key: &str, metadata: &PaperMetadata, arxiv_id: &str) -> String {
    format!(
        "@misc{{{key},\n  title        = {{{title}}},\n  author       = {{{author}}},\n  year         = {{{year}}},\n  eprint       = {{{arxiv_id}}},\n  archivePrefix= {{arXiv}},\n  primaryClass = {{{class}}},\n  url          = {{{url}}}\n}}\n",
        key = key,
        title = metadata.title.trim(),
        author = metadata.author.trim(),
        year = metadata.year.trim(),
        arxiv_id = arxiv_id,
        class = metadata.primary_class.trim(),
        url = arxiv::abs_url(arxiv_id),
    )
}

/// A catalog record skeleton, indented to sit under `papers:`.
pub fn catalog_entry(key: &str) -> String {
    format!(
        "  - id: {key}\n    domain:\n      scope: \"\"\n    architecture:\n      family: \"\"\n      notes: \"\"\n    outputs:\n      probabilistic: false\n      ensembles: false\n    tags: []\n"
    )
}

/// Where `key` is already in use: the bibliography and/or catalog names.
pub fn existing_key_locations(key: &str, loaded: &LoadedSources) -> Vec<String> {
    let mut locations = Vec::new();
    if loaded.citations.contains_key(key) {
        locations.push(BIBLIOGRAPHY_SOURCE.to_string());
    }
    for catalog in &loaded.catalogs {
        if catalog.records.iter().any(|r| r.id.as_deref() == Some(key)) {
            locations.push(catalog.name.clone());
        }
    }
    locations
}
