/*
 * table.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Table model handed to the page layer.
//!
//! Columns are fixed; cells carry data rather than markup so each writer in
//! [`crate::writers`] can decide how links and tags look.

use serde::{Deserialize, Serialize};

use crate::links::Link;
use crate::normalize::DisplayRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Column {
    Title,
    Year,
    Resolution,
    Architecture,
    Authors,
    Links,
    Tags,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Title,
        Column::Year,
        Column::Resolution,
        Column::Architecture,
        Column::Authors,
        Column::Links,
        Column::Tags,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Title => "Title",
            Column::Year => "Year",
            Column::Resolution => "Resolution",
            Column::Architecture => "Architecture",
            Column::Authors => "Authors",
            Column::Links => "Links",
            Column::Tags => "Tags",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Cell {
    Text(String),
    Links(Vec<Link>),
    Tags(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Catalog name, e.g. `forecasting`.
    pub catalog: String,
    /// Human-readable heading for the catalog.
    pub caption: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<&DisplayRow> for Row {
    fn from(row: &DisplayRow) -> Self {
        let cells = Column::ALL
            .iter()
            .map(|column| match column {
                Column::Title => Cell::Text(row.title.clone()),
                Column::Year => Cell::Text(row.year.clone()),
                Column::Resolution => Cell::Text(row.resolution.clone()),
                Column::Architecture => Cell::Text(row.architecture.clone()),
                Column::Authors => Cell::Text(row.authors.clone()),
                Column::Links => Cell::Links(row.links.clone()),
                Column::Tags => Cell::Tags(row.tags.clone()),
            })
            .collect();
        Row { cells }
    }
}

/// Build the table for one catalog, one row per display row, in order.
pub fn build_table(
    catalog: impl Into<String>,
    caption: impl Into<String>,
    rows: &[DisplayRow],
) -> Table {
    Table {
        catalog: catalog.into(),
        caption: caption.into(),
        columns: Column::ALL.to_vec(),
        rows: rows.iter().map(Row::from).collect(),
    }
}
