/*
 * authors.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Author list formatting.

/// Separator between names in a BibTeX `author` field.
pub const NAME_SEPARATOR: &str = " and ";

/// Number of names shown before the list is cut off with "et al.".
pub const MAX_NAMES: usize = 3;

/// Turn "Last, First" into "First Last"; other names are only trimmed.
pub fn display_name(entry: &str) -> String {
    match entry.split_once(',') {
        Some((last, first)) => {
            let (last, first) = (last.trim(), first.trim());
            if first.is_empty() {
                last.to_string()
            } else {
                format!("{} {}", first, last)
            }
        }
        None => entry.trim().to_string(),
    }
}

/// Split a BibTeX `author` field into display names.
pub fn split_names(field: &str) -> Vec<String> {
    field
        .split(NAME_SEPARATOR)
        .map(display_name)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Format an `author` field for the Authors column.
///
/// ```
/// use kmscale_core::normalize::authors::format_authors;
///
/// assert_eq!(format_authors("Smith, Jane and Doe, John"), "Jane Smith, John Doe");
/// ```
pub fn format_authors(field: &str) -> String {
    let names = split_names(field);
    if names.len() <= MAX_NAMES {
        names.join(", ")
    } else {
        format!("{} et al.", names[..MAX_NAMES].join(", "))
    }
}
