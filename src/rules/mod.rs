//! Rule registry and activation matching for `.mdc` rule packs.
//!
//! A rule document is a YAML frontmatter block (description, globs,
//! always-apply flag) followed by an opaque body. The registry loads every
//! document under a root directory into an immutable snapshot; the matcher
//! answers which rules activate for a file path, in precedence order:
//!
//! - always-apply rules activate for every path
//! - glob rules activate when any pattern matches the path
//! - action keywords activate rules that mention them (best effort)
//!
//! Results are ordered ascending by the numeric prefix convention
//! (`000-core` before `600-tooling`), with path as the tie-break.

mod diagnostics;
mod document;
mod frontmatter;
mod matcher;
mod registry;

pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use document::{Precedence, RuleDocument};
pub use frontmatter::{Frontmatter, GlobsField, ParsedDocument, parse as parse_document};
pub use matcher::{ActivatedRules, ActivationMatcher};
pub use registry::{LoadReport, RuleRegistry, RuleSet, load_rule_set};
