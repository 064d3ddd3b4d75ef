//! Activation matching over an immutable rule set snapshot.
//!
//! Matching is a pure computation: no I/O, no hidden state. Identical
//! inputs against the same snapshot yield identical ordered results, and
//! concurrent callers need no coordination.

use super::document::RuleDocument;
use super::registry::{CompiledRule, RuleSet};

/// Matches file paths and action keywords against a rule set.
pub struct ActivationMatcher<'a> {
    rules: &'a RuleSet,
}

impl<'a> ActivationMatcher<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Ordered activation for a file path and optional action keyword.
    ///
    /// A rule is selected when it is always-apply, when any of its globs
    /// matches `path`, or when the action keyword occurs in its description
    /// or body. The result is ordered by ascending precedence with a
    /// lexicographic path tie-break; no rule appears twice even if several
    /// of its globs match.
    pub fn activate(&self, path: &str, action: Option<&str>) -> ActivatedRules<'a> {
        let rules = self
            .rules
            .compiled()
            .iter()
            .filter(|rule| Self::selects(rule, path, action))
            .map(|rule| &rule.doc)
            .collect();

        ActivatedRules { rules }
    }

    /// Activation for a file path alone.
    pub fn for_path(&self, path: &str) -> ActivatedRules<'a> {
        self.activate(path, None)
    }

    fn selects(rule: &CompiledRule, path: &str, action: Option<&str>) -> bool {
        if rule.doc.always_apply {
            return true;
        }
        if let Some(globs) = &rule.globs
            && globs.is_match(path)
        {
            return true;
        }
        if let Some(keyword) = action
            && rule.doc.matches_action(keyword)
        {
            return true;
        }
        false
    }
}

/// Ordered activation result, ready for prompt-context injection.
#[derive(Debug, Clone, Default)]
pub struct ActivatedRules<'a> {
    rules: Vec<&'a RuleDocument>,
}

impl<'a> ActivatedRules<'a> {
    pub fn rules(&self) -> &[&'a RuleDocument] {
        &self.rules
    }

    /// Logical paths in activation order.
    pub fn paths(&self) -> Vec<&'a str> {
        self.rules.iter().map(|rule| rule.path.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Assemble the rule bodies into a prompt-context block for the
    /// consuming editor or agent.
    pub fn to_prompt(&self) -> String {
        if self.rules.is_empty() {
            return String::new();
        }

        let mut prompt =
            String::with_capacity(self.rules.iter().map(|rule| rule.body.len()).sum());
        prompt.push_str("# Active Rules\n\n");

        for rule in &self.rules {
            prompt.push_str(&format!("## {}\n", rule.path));
            if let Some(description) = &rule.description {
                prompt.push_str(&format!("{}\n\n", description));
            }
            prompt.push_str(rule.body.trim());
            prompt.push_str("\n\n");
        }

        prompt
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::super::diagnostics::Diagnostic;
    use super::super::document::RuleDocument;
    use super::super::frontmatter::{Frontmatter, GlobsField};
    use super::*;

    fn doc(path: &str, globs: Vec<&str>, always_apply: bool) -> RuleDocument {
        RuleDocument::new(
            path,
            PathBuf::from("/rules").join(path),
            Frontmatter {
                description: Some(format!("{} conventions", path)),
                globs: Some(GlobsField::Many(
                    globs.into_iter().map(String::from).collect(),
                )),
                always_apply,
            },
            format!("{} body", path),
        )
    }

    fn rule_set(docs: Vec<RuleDocument>) -> RuleSet {
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        RuleSet::build(docs, &mut diagnostics).unwrap()
    }

    #[test]
    fn test_always_apply_matches_every_path() {
        let set = rule_set(vec![doc("000-always.mdc", vec![], true)]);
        let matcher = ActivationMatcher::new(&set);

        assert_eq!(matcher.for_path("src/app.tsx").len(), 1);
        assert_eq!(matcher.for_path("README.md").len(), 1);
        assert_eq!(matcher.for_path("").len(), 1);
    }

    #[test]
    fn test_glob_selection_by_extension() {
        let set = rule_set(vec![doc("304-ts.mdc", vec!["*.ts", "*.tsx"], false)]);
        let matcher = ActivationMatcher::new(&set);

        assert_eq!(matcher.for_path("src/app.tsx").paths(), vec!["304-ts.mdc"]);
        assert!(matcher.for_path("src/app.py").is_empty());
    }

    #[test]
    fn test_brace_list_glob() {
        let set = rule_set(vec![doc("304-ts.mdc", vec!["*.{ts,tsx}"], false)]);
        let matcher = ActivationMatcher::new(&set);

        assert!(!matcher.for_path("Foo.tsx").is_empty());
        assert!(!matcher.for_path("Foo.ts").is_empty());
        assert!(matcher.for_path("Foo.py").is_empty());
    }

    #[test]
    fn test_double_star_spans_directories() {
        let set = rule_set(vec![doc("402-prisma.mdc", vec!["prisma/**/*.prisma"], false)]);
        let matcher = ActivationMatcher::new(&set);

        assert!(!matcher.for_path("prisma/migrations/init.prisma").is_empty());
        assert!(matcher.for_path("src/schema.prisma").is_empty());
    }

    #[test]
    fn test_ordering_by_precedence_then_path() {
        let set = rule_set(vec![
            doc("600-tooling/eslint.mdc", vec![], true),
            doc("000-core/base.mdc", vec![], true),
            doc("000-core/agent.mdc", vec![], true),
            doc("304-ts.mdc", vec![], true),
        ]);
        let matcher = ActivationMatcher::new(&set);

        assert_eq!(
            matcher.for_path("src/app.ts").paths(),
            vec![
                "000-core/agent.mdc",
                "000-core/base.mdc",
                "304-ts.mdc",
                "600-tooling/eslint.mdc"
            ]
        );
    }

    #[test]
    fn test_rule_appears_once_with_overlapping_globs() {
        let set = rule_set(vec![doc("304-ts.mdc", vec!["*.tsx", "**/*.tsx"], false)]);
        let matcher = ActivationMatcher::new(&set);

        assert_eq!(matcher.for_path("src/app.tsx").len(), 1);
    }

    #[test]
    fn test_activation_is_idempotent() {
        let set = rule_set(vec![
            doc("000-always.mdc", vec![], true),
            doc("304-ts.mdc", vec!["*.ts", "*.tsx"], false),
        ]);
        let matcher = ActivationMatcher::new(&set);

        let first = matcher.activate("src/app.tsx", Some("commit"));
        let second = matcher.activate("src/app.tsx", Some("commit"));
        assert_eq!(first.paths(), second.paths());
    }

    #[test]
    fn test_action_keyword_selects_by_description() {
        let mut commit = doc("200-git/commit.mdc", vec![], false);
        commit.description = Some("Use Conventional Commits for every commit message".into());
        let set = rule_set(vec![commit]);
        let matcher = ActivationMatcher::new(&set);

        assert!(matcher.for_path("src/app.ts").is_empty());
        assert_eq!(
            matcher.activate("src/app.ts", Some("commit")).paths(),
            vec!["200-git/commit.mdc"]
        );
    }

    #[test]
    fn test_dead_rule_never_activates() {
        let set = rule_set(vec![doc("misc/dead.mdc", vec![], false)]);
        let matcher = ActivationMatcher::new(&set);

        assert!(matcher.for_path("src/app.ts").is_empty());
        assert!(matcher.activate("src/app.ts", None).is_empty());
    }

    #[test]
    fn test_invalid_glob_fails_closed_for_that_rule_only() {
        let set = rule_set(vec![
            doc("100-bad.mdc", vec!["src/["], false),
            doc("304-ts.mdc", vec!["*.ts"], false),
        ]);
        let matcher = ActivationMatcher::new(&set);

        assert_eq!(matcher.for_path("src/app.ts").paths(), vec!["304-ts.mdc"]);
    }

    #[test]
    fn test_to_prompt_contains_bodies_in_order() {
        let set = rule_set(vec![
            doc("304-ts.mdc", vec![], true),
            doc("000-always.mdc", vec![], true),
        ]);
        let matcher = ActivationMatcher::new(&set);

        let prompt = matcher.for_path("src/app.ts").to_prompt();
        assert!(prompt.starts_with("# Active Rules"));
        let first = prompt.find("000-always.mdc body").unwrap();
        let second = prompt.find("304-ts.mdc body").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_empty_activation_has_empty_prompt() {
        let set = rule_set(vec![]);
        let matcher = ActivationMatcher::new(&set);

        assert!(matcher.for_path("src/app.ts").to_prompt().is_empty());
    }

    #[test]
    fn test_spec_scenario() {
        let set = rule_set(vec![
            doc("000-always.mdc", vec![], true),
            doc("304-ts.mdc", vec!["*.ts", "*.tsx"], false),
        ]);
        let matcher = ActivationMatcher::new(&set);

        assert_eq!(
            matcher.for_path("src/app.tsx").paths(),
            vec!["000-always.mdc", "304-ts.mdc"]
        );
        assert_eq!(matcher.for_path("src/app.py").paths(), vec!["000-always.mdc"]);
    }
}
