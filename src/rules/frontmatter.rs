//! Frontmatter parsing for rule documents.
//!
//! A rule document is a `---`-delimited YAML block followed by an opaque
//! body. The block must be the first non-blank content in the file, and a
//! second frontmatter-like block at the end of the file is rejected; it is
//! the most common authoring defect in rule packs.

use serde::{Deserialize, Serialize};

use super::diagnostics::DiagnosticKind;
use crate::error::Result;

/// Frontmatter fence line.
pub const DELIMITER: &str = "---";

/// Frontmatter keys used to tell a duplicated metadata block apart from a
/// legitimate `---` horizontal rule in the body.
const KNOWN_KEYS: [&str; 3] = ["description:", "globs:", "alwaysApply:"];

/// Declared activation metadata for a rule document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Frontmatter {
    /// Display and semantic-trigger hint. Free text, no formal grammar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Path-based activation patterns. Absent means "no path trigger".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub globs: Option<GlobsField>,

    /// Activate regardless of glob matching.
    #[serde(default)]
    pub always_apply: bool,
}

impl Frontmatter {
    /// Glob patterns in declaration order. A lone blank string counts as
    /// "no patterns".
    pub fn patterns(&self) -> Vec<String> {
        self.globs
            .clone()
            .map(GlobsField::into_patterns)
            .unwrap_or_default()
    }

    /// Serialize back to YAML. Field values and glob ordering survive a
    /// parse/serialize round trip.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_bw::to_string(self)?)
    }
}

/// The `globs` field accepts either a single pattern or a list of patterns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GlobsField {
    One(String),
    Many(Vec<String>),
}

impl GlobsField {
    pub fn into_patterns(self) -> Vec<String> {
        match self {
            Self::One(pattern) if pattern.trim().is_empty() => Vec::new(),
            Self::One(pattern) => vec![pattern],
            Self::Many(patterns) => patterns,
        }
    }
}

/// A document split into its raw frontmatter text and body.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitDocument<'a> {
    pub frontmatter: &'a str,
    pub body: &'a str,
}

/// A fully parsed rule file: declared metadata plus the verbatim body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub frontmatter: Frontmatter,
    pub body: String,
}

/// Parse a rule document's content.
///
/// Per-file defects are returned as [`DiagnosticKind`] so the caller can
/// record them without aborting the surrounding load.
pub fn parse(content: &str) -> std::result::Result<ParsedDocument, DiagnosticKind> {
    let split = split(content)?;

    if has_trailing_frontmatter(split.body) {
        return Err(DiagnosticKind::TrailingFrontmatter);
    }

    let frontmatter = if split.frontmatter.trim().is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml_bw::from_str(split.frontmatter).map_err(|e| DiagnosticKind::MalformedYaml {
            message: e.to_string(),
        })?
    };

    Ok(ParsedDocument {
        frontmatter,
        body: split.body.to_string(),
    })
}

/// Split the leading frontmatter block from the body.
///
/// The opening delimiter must be the first non-blank line of the file.
pub fn split(content: &str) -> std::result::Result<SplitDocument<'_>, DiagnosticKind> {
    let mut offset = 0;
    let mut frontmatter_start = None;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            offset += line.len();
            continue;
        }
        if trimmed == DELIMITER {
            frontmatter_start = Some(offset + line.len());
        }
        break;
    }

    let Some(start) = frontmatter_start else {
        return Err(DiagnosticKind::MissingFrontmatter);
    };

    let mut pos = start;
    for line in content[start..].split_inclusive('\n') {
        if line.trim() == DELIMITER {
            return Ok(SplitDocument {
                frontmatter: &content[start..pos],
                body: &content[pos + line.len()..],
            });
        }
        pos += line.len();
    }

    Err(DiagnosticKind::UnterminatedFrontmatter)
}

/// Detect a frontmatter-like block closing out the body.
///
/// The block must end the file, be fenced by two `---` lines, and contain at
/// least one frontmatter key between them.
pub fn has_trailing_frontmatter(body: &str) -> bool {
    let trimmed = body.trim_end();
    let last_line_start = trimmed.rfind('\n').map_or(0, |i| i + 1);
    if last_line_start == 0 || trimmed[last_line_start..].trim() != DELIMITER {
        return false;
    }

    let before = &trimmed[..last_line_start];
    let mut block_start = None;
    let mut offset = 0;
    for line in before.split_inclusive('\n') {
        let line_end = offset + line.len();
        if line.trim() == DELIMITER {
            block_start = Some(line_end);
        }
        offset = line_end;
    }

    let Some(block_start) = block_start else {
        return false;
    };

    before[block_start..]
        .lines()
        .any(|line| KNOWN_KEYS.iter().any(|key| line.trim_start().starts_with(key)))
}
