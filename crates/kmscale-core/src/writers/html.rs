/*
 * html.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * HTML fragment writer.
 */

//! HTML fragment writer.
//!
//! Produces one `<section>` per catalog plus a summary paragraph. The page
//! around it (stylesheets, scripts, layout) belongs to the host.

use std::io::{self, Write};

use crate::render::RenderOutput;
use crate::table::{Cell, Column, Table};

/// Write all catalogs and the summary.
pub fn write<W: Write>(output: &RenderOutput, buf: &mut W) -> io::Result<()> {
    for table in output.tables() {
        write_table(&table, buf)?;
    }
    writeln!(
        buf,
        "<p class=\"summary\"><span class=\"total\">{}</span> papers. Last updated <time>{}</time>.</p>",
        output.total_rows,
        escape_html(&output.last_updated)
    )
}

/// Write one catalog section.
pub fn write_table<W: Write>(table: &Table, buf: &mut W) -> io::Result<()> {
    writeln!(
        buf,
        "<section class=\"catalog\" id=\"catalog-{}\">",
        escape_html(&table.catalog)
    )?;
    writeln!(buf, "<h2>{}</h2>", escape_html(&table.caption))?;
    writeln!(buf, "<table class=\"papers\">")?;

    write!(buf, "<thead>\n<tr>")?;
    for column in &table.columns {
        write!(buf, "<th>{}</th>", column.header())?;
    }
    writeln!(buf, "</tr>\n</thead>")?;

    writeln!(buf, "<tbody>")?;
    for row in &table.rows {
        write!(buf, "<tr>")?;
        for (column, cell) in table.columns.iter().zip(&row.cells) {
            write!(buf, "<td class=\"{}\">", column_class(*column))?;
            write_cell(cell, buf)?;
            write!(buf, "</td>")?;
        }
        writeln!(buf, "</tr>")?;
    }
    writeln!(buf, "</tbody>")?;

    writeln!(buf, "</table>")?;
    writeln!(buf, "</section>")
}

fn column_class(column: Column) -> &'static str {
    match column {
        Column::Title => "title",
        Column::Year => "year",
        Column::Resolution => "resolution",
        Column::Architecture => "architecture",
        Column::Authors => "authors",
        Column::Links => "links",
        Column::Tags => "tags",
    }
}

fn write_cell<W: Write>(cell: &Cell, buf: &mut W) -> io::Result<()> {
    match cell {
        Cell::Text(text) => write!(buf, "{}", escape_html(text)),
        Cell::Links(links) => {
            for (i, link) in links.iter().enumerate() {
                if i > 0 {
                    write!(buf, " ")?;
                }
                write!(
                    buf,
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
                    escape_html(&link.url),
                    escape_html(&link.label)
                )?;
            }
            Ok(())
        }
        Cell::Tags(tags) => {
            for (i, tag) in tags.iter().enumerate() {
                if i > 0 {
                    write!(buf, " ")?;
                }
                write!(buf, "<span class=\"tag\">{}</span>", escape_html(tag))?;
            }
            Ok(())
        }
    }
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
