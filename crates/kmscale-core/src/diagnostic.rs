/*
 * diagnostic.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Diagnostic messages produced while loading and joining sources.
 */

//! Diagnostic messages following tidyverse-style structure.
//!
//! Nothing in the render pipeline is fatal. Whatever goes wrong with a source
//! document (unparseable YAML, broken BibTeX, an unreadable file) is recorded
//! as a [`DiagnosticMessage`], logged through `tracing`, and the affected
//! source degrades to an empty collection.
//!
//! Codes follow `K-<subsystem>-<number>`:
//!
//! | Subsystem | Area                    |
//! |-----------|-------------------------|
//! | 1         | catalog documents       |
//! | 2         | bibliography            |
//! | 3         | catalog/citation join   |
//! | 4         | configuration and IO    |

use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// The kind of diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// A note providing additional context
    Note,
    /// Informational message
    Info,
    /// A warning that indicates a problem with a source
    Warning,
    /// An error that prevents a source from being used
    Error,
}

impl DiagnosticKind {
    fn label(self) -> &'static str {
        match self {
            DiagnosticKind::Error => "Error",
            DiagnosticKind::Warning => "Warning",
            DiagnosticKind::Info => "Info",
            DiagnosticKind::Note => "Note",
        }
    }
}

/// A diagnostic message.
///
/// Structure:
/// 1. **Code**: Optional code (e.g., "K-1-1") for searchability
/// 2. **Title**: Brief message
/// 3. **Kind**: Error, Warning, Info, Note
/// 4. **Problem**: What went wrong
/// 5. **Details**: Specific information (bulleted)
/// 6. **Hints**: Optional guidance for fixing (ends with ?)
/// 7. **Source**: The catalog name or file the message is about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    pub title: String,

    pub kind: DiagnosticKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub details: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub hints: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl DiagnosticMessage {
    /// Create a new diagnostic message with just a title and kind.
    pub fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            code: None,
            title: title.into(),
            kind,
            problem: None,
            details: Vec::new(),
            hints: Vec::new(),
            source: None,
        }
    }

    /// True for warnings and errors.
    pub fn is_problem(&self) -> bool {
        self.kind >= DiagnosticKind::Warning
    }

    /// Render this diagnostic message as text.
    ///
    /// Format:
    /// ```text
    /// Warning [K-1-1] (forecasting): title
    /// Problem statement here
    /// ✖ Detail 1
    /// ? Hint 1
    /// ```
    pub fn to_text(&self) -> String {
        let mut result = String::new();

        result.push_str(self.kind.label());
        if let Some(code) = &self.code {
            let _ = write!(result, " [{}]", code);
        }
        if let Some(source) = &self.source {
            let _ = write!(result, " ({})", source);
        }
        let _ = writeln!(result, ": {}", self.title);

        if let Some(problem) = &self.problem {
            let _ = writeln!(result, "{}", problem);
        }
        for detail in &self.details {
            let _ = writeln!(result, "✖ {}", detail);
        }
        for hint in &self.hints {
            let _ = writeln!(result, "? {}", hint);
        }

        result
    }

    /// Log this message through `tracing` at a level matching its kind.
    pub fn emit(&self) {
        let code = self.code.as_deref().unwrap_or("-");
        let source = self.source.as_deref().unwrap_or("-");
        let problem = self.problem.as_deref().unwrap_or("");
        match self.kind {
            DiagnosticKind::Error => {
                tracing::error!(code, source, title = %self.title, "{}", problem)
            }
            DiagnosticKind::Warning => {
                tracing::warn!(code, source, title = %self.title, "{}", problem)
            }
            DiagnosticKind::Info => {
                tracing::info!(code, source, title = %self.title, "{}", problem)
            }
            DiagnosticKind::Note => {
                tracing::debug!(code, source, title = %self.title, "{}", problem)
            }
        }
    }
}

/// Builder for [`DiagnosticMessage`].
///
/// ```
/// use kmscale_core::diagnostic::DiagnosticMessageBuilder;
///
/// let msg = DiagnosticMessageBuilder::warning("Duplicate Identifier")
///     .with_code("K-3-1")
///     .problem("`graphcast2023` appears twice")
///     .add_hint("Remove one of the entries?")
///     .build();
/// assert!(msg.to_text().contains("K-3-1"));
/// ```
#[derive(Debug, Clone)]
pub struct DiagnosticMessageBuilder {
    message: DiagnosticMessage,
}

impl DiagnosticMessageBuilder {
    pub fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            message: DiagnosticMessage::new(kind, title),
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Info, title)
    }

    pub fn note(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Note, title)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.message.code = Some(code.into());
        self
    }

    pub fn problem(mut self, problem: impl Into<String>) -> Self {
        self.message.problem = Some(problem.into());
        self
    }

    pub fn add_detail(mut self, detail: impl Into<String>) -> Self {
        self.message.details.push(detail.into());
        self
    }

    pub fn add_hint(mut self, hint: impl Into<String>) -> Self {
        self.message.hints.push(hint.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.message.source = Some(source.into());
        self
    }

    pub fn build(self) -> DiagnosticMessage {
        self.message
    }
}
