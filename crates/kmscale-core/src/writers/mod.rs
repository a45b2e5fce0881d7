/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Writers that turn a [`RenderOutput`] into text.

pub mod html;
pub mod markdown;

use std::fmt;
use std::io::{self, Write};

use crate::render::RenderOutput;

/// Output formats understood by [`write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Html,
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for OutputFormat {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "markdown" | "md" | "gfm" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "Unknown output format '{}' (expected markdown, html or json)",
                other
            )),
        }
    }
}

/// Write `output` in the requested format.
pub fn write<W: Write>(output: &RenderOutput, format: OutputFormat, buf: &mut W) -> io::Result<()> {
    match format {
        OutputFormat::Markdown => markdown::write(output, buf),
        OutputFormat::Html => html::write(output, buf),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *buf, output).map_err(io::Error::other)?;
            writeln!(buf)
        }
    }
}

/// Write `output` into a string.
pub fn write_to_string(output: &RenderOutput, format: OutputFormat) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write(output, format, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        assert_eq!(OutputFormat::try_from("md"), Ok(OutputFormat::Markdown));
        assert_eq!(OutputFormat::try_from("HTML"), Ok(OutputFormat::Html));
        assert_eq!(OutputFormat::try_from("json"), Ok(OutputFormat::Json));
        assert!(OutputFormat::try_from("pdf").is_err());
        assert_eq!(OutputFormat::default().to_string(), "markdown");
    }
}
