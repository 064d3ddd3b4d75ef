//! Rule registry: discovery, parsing, and the active snapshot.
//!
//! `load_rule_set` is a one-shot batch scan of the rules tree. Per-file
//! defects are collected as diagnostics and never abort the load; only a
//! duplicate logical path is fatal, since precedence ordering assumes
//! uniqueness. The resulting [`RuleSet`] is immutable, and [`RuleRegistry`]
//! replaces its active snapshot in a single assignment on reload, so
//! concurrent matchers never observe a half-built registry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use globset::{Glob, GlobSet, GlobSetBuilder};
use parking_lot::RwLock;
use tokio::fs;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::diagnostics::{Diagnostic, DiagnosticKind, Severity};
use super::document::RuleDocument;
use super::frontmatter;
use crate::config::RegistryConfig;
use crate::error::{Result, RulekitError};

/// A rule compiled for matching: the document plus its glob set.
///
/// `globs` is `None` when the rule has no usable patterns: always-apply
/// rules, dead rules, and rules excluded after a glob compile failure.
#[derive(Debug)]
pub(crate) struct CompiledRule {
    pub doc: RuleDocument,
    pub globs: Option<GlobSet>,
}

/// Immutable snapshot of all loaded rules, sorted by `(precedence, path)`.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Build a sorted, compiled rule set from parsed documents.
    ///
    /// Duplicate logical paths are fatal. Dead rules, blank descriptions,
    /// and invalid globs are reported as diagnostics; an invalid pattern
    /// excludes the whole rule from path matching (fail closed).
    pub fn build(
        docs: Vec<RuleDocument>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Self> {
        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        let mut rules = Vec::with_capacity(docs.len());

        for doc in docs {
            if let Some(first) = seen.insert(doc.path.clone(), doc.source_path.clone()) {
                return Err(RulekitError::DuplicatePath {
                    path: doc.path,
                    first,
                    second: doc.source_path,
                });
            }

            if doc
                .description
                .as_deref()
                .is_none_or(|d| d.trim().is_empty())
            {
                diagnostics.push(Diagnostic::new(&doc.path, DiagnosticKind::EmptyDescription));
            }
            if doc.is_dead() {
                diagnostics.push(Diagnostic::new(&doc.path, DiagnosticKind::DeadRule));
            }

            let globs = compile_globs(&doc, diagnostics);
            rules.push(CompiledRule { doc, globs });
        }

        rules.sort_by(|a, b| a.doc.sort_key().cmp(&b.doc.sort_key()));
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Documents in `(precedence, path)` order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleDocument> {
        self.rules.iter().map(|rule| &rule.doc)
    }

    /// Look up one document by its logical path.
    pub fn get(&self, path: &str) -> Option<&RuleDocument> {
        self.rules
            .iter()
            .map(|rule| &rule.doc)
            .find(|doc| doc.path == path)
    }

    pub(crate) fn compiled(&self) -> &[CompiledRule] {
        &self.rules
    }
}

fn compile_globs(doc: &RuleDocument, diagnostics: &mut Vec<Diagnostic>) -> Option<GlobSet> {
    if doc.globs.is_empty() {
        return None;
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in &doc.globs {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => {
                warn!(path = %doc.path, pattern = %pattern, "invalid glob, excluding rule");
                diagnostics.push(Diagnostic::new(
                    &doc.path,
                    DiagnosticKind::InvalidGlob {
                        pattern: pattern.clone(),
                        message: e.kind().to_string(),
                    },
                ));
                return None;
            }
        }
    }

    match builder.build() {
        Ok(set) => Some(set),
        Err(e) => {
            diagnostics.push(Diagnostic::new(
                &doc.path,
                DiagnosticKind::InvalidGlob {
                    pattern: doc.globs.join(", "),
                    message: e.to_string(),
                },
            ));
            None
        }
    }
}

/// Result of a registry load: the usable rules plus non-fatal diagnostics,
/// so a host can operate degraded instead of failing entirely.
#[derive(Debug)]
pub struct LoadReport {
    pub rules: Arc<RuleSet>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Error)
            .count()
    }
}

/// Load all rule documents under `root`.
///
/// Walks the tree for files with the configured rule extension, splits
/// frontmatter from body, and builds a compiled rule set. Filesystem reads
/// only; no writes, no network.
pub async fn load_rule_set(root: &Path, config: &RegistryConfig) -> Result<LoadReport> {
    if !root.is_dir() {
        return Err(RulekitError::RulesDirNotFound(root.to_path_buf()));
    }

    let mut diagnostics = Vec::new();
    let mut docs = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(config.follow_links)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(config.extension.as_str()) {
            continue;
        }

        let logical = logical_path(root, path);
        let content = fs::read_to_string(path).await?;

        match frontmatter::parse(&content) {
            Ok(parsed) => {
                docs.push(RuleDocument::new(
                    logical,
                    path.to_path_buf(),
                    parsed.frontmatter,
                    parsed.body,
                ));
            }
            Err(kind) => {
                warn!(path = %logical, defect = %kind, "skipping rule document");
                diagnostics.push(Diagnostic::new(logical, kind));
            }
        }
    }

    let rules = RuleSet::build(docs, &mut diagnostics)?;
    debug!(
        count = rules.len(),
        diagnostics = diagnostics.len(),
        "loaded rule set"
    );

    Ok(LoadReport {
        rules: Arc::new(rules),
        diagnostics,
    })
}

/// Logical identifier for a rule file: its path relative to the registry
/// root, normalized to `/` separators.
fn logical_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Loads rule documents from a directory tree and holds the active
/// snapshot.
///
/// Snapshots are immutable; `reload` builds a complete replacement and
/// swaps it in a single assignment. Concurrent readers clone the `Arc` and
/// keep matching against whatever snapshot they hold.
pub struct RuleRegistry {
    root: PathBuf,
    config: RegistryConfig,
    active: RwLock<Arc<RuleSet>>,
}

impl RuleRegistry {
    /// Load all rule documents under `root` and return the registry along
    /// with any load diagnostics.
    pub async fn load(
        root: impl Into<PathBuf>,
        config: RegistryConfig,
    ) -> Result<(Self, Vec<Diagnostic>)> {
        let root = root.into();
        let report = load_rule_set(&root, &config).await?;
        let registry = Self {
            root,
            config,
            active: RwLock::new(report.rules),
        };
        Ok((registry, report.diagnostics))
    }

    /// Current snapshot. Cheap to clone and safe to hold across a reload.
    pub fn snapshot(&self) -> Arc<RuleSet> {
        self.active.read().clone()
    }

    /// Re-scan the source tree and atomically replace the snapshot.
    ///
    /// In-flight matches against the previous snapshot are unaffected. On
    /// error the previous snapshot stays active.
    pub async fn reload(&self) -> Result<Vec<Diagnostic>> {
        let report = load_rule_set(&self.root, &self.config).await?;
        *self.active.write() = report.rules;
        Ok(report.diagnostics)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
