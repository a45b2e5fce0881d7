/*
 * markdown.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * GitHub-flavoured Markdown table writer.
 */

use std::io::{self, Write};

use crate::render::RenderOutput;
use crate::table::{Cell, Table};

/// Write every catalog as a `##` section with a pipe table, then the summary.
pub fn write<W: Write>(output: &RenderOutput, buf: &mut W) -> io::Result<()> {
    for table in output.tables() {
        writeln!(buf, "## {}", escape(&table.caption))?;
        writeln!(buf)?;
        write_table(&table, buf)?;
        writeln!(buf)?;
    }
    writeln!(
        buf,
        "Total papers: {} (last updated {})",
        output.total_rows, output.last_updated
    )
}

/// Write one table. An empty table is written as a placeholder line.
pub fn write_table<W: Write>(table: &Table, buf: &mut W) -> io::Result<()> {
    if table.is_empty() {
        return writeln!(buf, "_No entries._");
    }

    let headers: Vec<&str> = table.columns.iter().map(|c| c.header()).collect();
    writeln!(buf, "| {} |", headers.join(" | "))?;
    writeln!(buf, "|{}", " --- |".repeat(headers.len()))?;

    for row in &table.rows {
        let cells: Vec<String> = row.cells.iter().map(cell_text).collect();
        writeln!(buf, "| {} |", cells.join(" | "))?;
    }
    Ok(())
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => escape(text),
        Cell::Links(links) => links
            .iter()
            .map(|link| format!("[{}]({})", escape(&link.label), escape_url(&link.url)))
            .collect::<Vec<_>>()
            .join(" "),
        Cell::Tags(tags) => tags
            .iter()
            .map(|tag| format!("`{}`", tag.replace('`', "'").replace('|', "\\|")))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Keep a value inside its table cell.
fn escape(text: &str) -> String {
    text.replace('|', "\\|")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Percent-encode the characters that would end a link target or a cell.
fn escape_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.trim().chars() {
        match c {
            ' ' => out.push_str("%20"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '|' => out.push_str("%7C"),
            _ => out.push(c),
        }
    }
    out
}
