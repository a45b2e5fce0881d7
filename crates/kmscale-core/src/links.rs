/*
 * links.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Link collector.
 */

//! Link collector.
//!
//! Emission order, first to last:
//!
//! 1. citation `pdf` as `pdf`
//! 2. citation `url` as `landing`
//! 3. citation `doi` as `doi`, resolved through `https://doi.org/`
//! 4. when step 1 found nothing and `url` is an arXiv abstract page, the
//!    matching arXiv PDF as `pdf`
//! 5. when nothing was emitted so far, the catalog record's own `links`
//!
//! Links are not de-duplicated: a citation with both a `pdf` field and an
//! arXiv `url` yields two PDF-ish entries.

use serde::{Deserialize, Serialize};

use crate::arxiv;
use crate::catalog::PublicationRecord;
use crate::citation::CitationFields;

/// An outbound link shown in the Links column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Collect the links for one record and its matched citation fields.
pub fn collect_links(record: &PublicationRecord, citation: Option<&CitationFields>) -> Vec<Link> {
    let mut links = Vec::new();

    if let Some(fields) = citation {
        let pdf = fields.get_non_blank("pdf");
        let url = fields.get_non_blank("url");

        if let Some(pdf) = pdf {
            links.push(Link::new("pdf", pdf));
        }
        if let Some(url) = url {
            links.push(Link::new("landing", url));
        }
        if let Some(doi) = fields.get_non_blank("doi") {
            links.push(Link::new("doi", format!("https://doi.org/{}", doi)));
        }
        if pdf.is_none() {
            if let Some(id) = url.and_then(arxiv::abs_url_id) {
                links.push(Link::new("pdf", arxiv::pdf_url(id)));
            }
        }
    }

    if links.is_empty() {
        links.extend(
            record
                .links
                .iter()
                .filter(|link| !link.url.trim().is_empty())
                .cloned(),
        );
    }

    links
}
