//! Per-file diagnostics produced while loading a rule pack.
//!
//! Loading is best-effort: a structural defect in one rule document must not
//! block activation of the others. Each diagnostic names the offending file
//! and the specific defect so a host tool can surface it to the author.

use std::fmt;

use serde::Serialize;

/// How bad a diagnostic is.
///
/// Errors mean the rule was dropped entirely; warnings mean the rule loaded
/// but is degraded (excluded from path matching) or suspicious (dead rule,
/// empty description).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// The structural defects a rule document can carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The file does not begin with a `---` frontmatter block.
    MissingFrontmatter,
    /// An opening `---` delimiter with no closing delimiter.
    UnterminatedFrontmatter,
    /// A second frontmatter-like block at the end of the file.
    TrailingFrontmatter,
    /// Frontmatter is not valid YAML or violates the schema.
    MalformedYaml { message: String },
    /// A glob pattern failed to compile; the rule is excluded from path
    /// matching.
    InvalidGlob { pattern: String, message: String },
    /// Empty globs with `alwaysApply: false`: the rule can never activate.
    DeadRule,
    /// The description field is missing or blank.
    EmptyDescription,
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingFrontmatter
            | Self::UnterminatedFrontmatter
            | Self::TrailingFrontmatter
            | Self::MalformedYaml { .. } => Severity::Error,
            Self::InvalidGlob { .. } | Self::DeadRule | Self::EmptyDescription => {
                Severity::Warning
            }
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFrontmatter => {
                write!(f, "frontmatter missing (file must begin with a `---` block)")
            }
            Self::UnterminatedFrontmatter => write!(f, "frontmatter block is never closed"),
            Self::TrailingFrontmatter => write!(f, "frontmatter duplicated at end of file"),
            Self::MalformedYaml { message } => {
                write!(f, "frontmatter is not valid YAML: {}", message)
            }
            Self::InvalidGlob { pattern, message } => {
                write!(
                    f,
                    "glob '{}' does not compile ({}); rule excluded from path matching",
                    pattern, message
                )
            }
            Self::DeadRule => {
                write!(f, "no globs and alwaysApply is false; rule can never activate")
            }
            Self::EmptyDescription => write!(f, "description is missing or empty"),
        }
    }
}

/// A defect found in one rule document during load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Logical path of the offending rule document.
    pub path: String,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(path: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}
