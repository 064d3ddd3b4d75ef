//! Rule document model.
//!
//! A rule document is the unit a registry loads and a matcher activates:
//! a logical path, the declared frontmatter fields, and an opaque body
//! that is passed through verbatim to the consumer.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::frontmatter::Frontmatter;

/// Ordering rank derived from the numeric prefix convention in rule paths
/// (`000-core/...` before `600-tooling/...`, `304-ts.mdc` ranks 304).
///
/// Always recomputed from the path; never stored independently, so the
/// ordering cannot drift from the source tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Precedence(u32);

impl Precedence {
    /// Rank for paths without a numeric prefix; sorts after every numbered
    /// rule.
    pub const UNNUMBERED: Precedence = Precedence(u32::MAX);

    /// Derive precedence from the first path component carrying a leading
    /// digit run.
    pub fn from_path(path: &str) -> Self {
        for component in path.split('/') {
            let digits = component
                .bytes()
                .take_while(u8::is_ascii_digit)
                .count();
            if digits > 0 {
                return component[..digits]
                    .parse()
                    .map(Precedence)
                    .unwrap_or(Self::UNNUMBERED);
            }
        }
        Self::UNNUMBERED
    }

    /// The numeric rank, or `None` for unnumbered rules.
    pub fn value(self) -> Option<u32> {
        (self != Self::UNNUMBERED).then_some(self.0)
    }
}

impl fmt::Display for Precedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(rank) => write!(f, "{}", rank),
            None => write!(f, "-"),
        }
    }
}

/// A single rule document loaded from disk.
#[derive(Debug, Clone, Serialize)]
pub struct RuleDocument {
    /// Logical identifier: path relative to the registry root, with `/`
    /// separators. Unique within a rule set.
    pub path: String,

    /// Absolute location the document was read from.
    pub source_path: PathBuf,

    /// Display and semantic-trigger hint from the frontmatter.
    pub description: Option<String>,

    /// Activation globs in declaration order.
    pub globs: Vec<String>,

    /// Active regardless of glob matching.
    pub always_apply: bool,

    /// Opaque body text, passed through verbatim.
    #[serde(skip)]
    pub body: String,
}

impl RuleDocument {
    pub fn new(
        path: impl Into<String>,
        source_path: impl Into<PathBuf>,
        frontmatter: Frontmatter,
        body: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            source_path: source_path.into(),
            globs: frontmatter.patterns(),
            description: frontmatter.description,
            always_apply: frontmatter.always_apply,
            body: body.into(),
        }
    }

    /// Precedence derived from `path`. Recomputing always yields the same
    /// ordering.
    pub fn precedence(&self) -> Precedence {
        Precedence::from_path(&self.path)
    }

    /// Activation result ordering: ascending precedence, then path.
    pub fn sort_key(&self) -> (Precedence, &str) {
        (self.precedence(), self.path.as_str())
    }

    /// A rule with no globs and no always-apply flag can never activate.
    pub fn is_dead(&self) -> bool {
        !self.always_apply && self.globs.is_empty()
    }

    /// Best-effort action trigger: the keyword occurs case-insensitively in
    /// the description or body.
    pub fn matches_action(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&keyword))
            || self.body.to_lowercase().contains(&keyword)
    }
}
