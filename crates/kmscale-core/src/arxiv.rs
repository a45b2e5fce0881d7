/*
 * arxiv.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! arXiv identifiers and PDF locations.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::citation::CitationFields;

/// Marker that identifies an arXiv abstract page URL.
pub const ABS_MARKER: &str = "arxiv.org/abs/";

static ABS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"arxiv\.org/abs/([\w.\-]+)").expect("valid regex"));
static PDF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"arxiv\.org/pdf/([\w.\-]+)\.pdf").expect("valid regex"));

/// The text following [`ABS_MARKER`] in `url`, if any.
pub fn abs_url_id(url: &str) -> Option<&str> {
    let start = url.find(ABS_MARKER)? + ABS_MARKER.len();
    Some(&url[start..]).filter(|id| !id.is_empty())
}

pub fn pdf_url(id: &str) -> String {
    format!("https://arxiv.org/pdf/{}.pdf", id)
}

pub fn abs_url(id: &str) -> String {
    format!("https://arxiv.org/abs/{}", id)
}

/// Reduce an arXiv abstract URL, PDF URL or bare identifier to the identifier.
///
/// ```
/// use kmscale_core::arxiv::normalize_id;
///
/// assert_eq!(normalize_id("https://arxiv.org/abs/2507.18378"), "2507.18378");
/// assert_eq!(normalize_id("https://arxiv.org/pdf/2507.18378v2.pdf"), "2507.18378v2");
/// assert_eq!(normalize_id(" 2507.18378.pdf "), "2507.18378");
/// ```
pub fn normalize_id(url_or_id: &str) -> String {
    let captured = ABS_RE
        .captures(url_or_id)
        .or_else(|| PDF_RE.captures(url_or_id))
        .and_then(|c| c.get(1));
    match captured {
        Some(m) => m.as_str().to_string(),
        None => url_or_id.trim().replace(".pdf", ""),
    }
}

/// Where the PDF of a bibliography entry can be fetched from.
///
/// Tried in order: a `pdf` or `file` field ending in `.pdf`, a `url` ending in
/// `.pdf`, an arXiv abstract `url`, an `eprint` with `archiveprefix = arXiv`.
pub fn pdf_location(fields: &CitationFields) -> Option<String> {
    let is_pdf = |s: &str| s.to_lowercase().ends_with(".pdf");

    let declared = fields
        .get_non_blank("pdf")
        .or_else(|| fields.get_non_blank("file"));
    if let Some(declared) = declared.filter(|s| is_pdf(s)) {
        return Some(declared.to_string());
    }

    let url = fields.get_non_blank("url").unwrap_or_default();
    if url.ends_with(".pdf") {
        return Some(url.to_string());
    }
    if let Some(id) = abs_url_id(url) {
        return Some(pdf_url(id));
    }

    let eprint = fields.get_non_blank("eprint")?;
    let archive = fields.get("archiveprefix").unwrap_or_default();
    if archive.eq_ignore_ascii_case("arxiv") {
        return Some(pdf_url(eprint));
    }

    None
}
