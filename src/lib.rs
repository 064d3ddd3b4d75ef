pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod rules;

pub use config::{DisplayConfig, MatcherConfig, RegistryConfig, RulekitConfig};
pub use error::{Result, RulekitError};
pub use rules::{
    ActivatedRules, ActivationMatcher, Diagnostic, DiagnosticKind, Frontmatter, LoadReport,
    Precedence, RuleDocument, RuleRegistry, RuleSet, Severity, load_rule_set,
};
