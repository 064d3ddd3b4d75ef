use std::io::{self, Write};

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::rules::{ActivatedRules, Diagnostic, RuleDocument};

/// Output writer that handles the machine-readable formats.
///
/// Text output goes through `cli::Display`; this writer owns the JSON
/// serialization so a host editor or agent can script every command.
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Returns the configured output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Emit a list of rules.
    pub fn emit_rules(&self, rules: &[&RuleDocument]) {
        let list: Vec<RuleOutput> = rules.iter().copied().map(RuleOutput::from).collect();
        self.write_json(&list);
    }

    /// Emit an activation result, including the assembled prompt context.
    pub fn emit_activation(&self, activation: &ActivatedRules<'_>) {
        let output = ActivationOutput {
            rules: activation
                .rules()
                .iter()
                .copied()
                .map(RuleOutput::from)
                .collect(),
            prompt: activation.to_prompt(),
        };
        self.write_json(&output);
    }

    /// Emit load diagnostics.
    pub fn emit_diagnostics(&self, diagnostics: &[Diagnostic]) {
        let list: Vec<DiagnosticOutput> = diagnostics.iter().map(DiagnosticOutput::from).collect();
        self.write_json(&list);
    }

    /// Emit one rule with its body.
    pub fn emit_rule_detail(&self, rule: &RuleDocument) {
        let output = RuleDetailOutput {
            rule: RuleOutput::from(rule),
            body: rule.body.clone(),
        };
        self.write_json(&output);
    }

    /// Emit a simple message.
    pub fn emit_message(&self, message: &str) {
        let msg = MessageOutput {
            message: message.to_string(),
        };
        self.write_json(&msg);
    }

    fn write_json<T: Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string(value) {
            let mut stdout = io::stdout().lock();
            let _ = writeln!(stdout, "{}", json);
            let _ = stdout.flush();
        }
    }
}

/// JSON view of a rule for `list` and `match`.
#[derive(Serialize)]
pub struct RuleOutput {
    pub path: String,
    pub description: Option<String>,
    pub globs: Vec<String>,
    pub always_apply: bool,
    pub precedence: Option<u32>,
}

impl From<&RuleDocument> for RuleOutput {
    fn from(rule: &RuleDocument) -> Self {
        Self {
            path: rule.path.clone(),
            description: rule.description.clone(),
            globs: rule.globs.clone(),
            always_apply: rule.always_apply,
            precedence: rule.precedence().value(),
        }
    }
}

#[derive(Serialize)]
struct ActivationOutput {
    rules: Vec<RuleOutput>,
    prompt: String,
}

#[derive(Serialize)]
struct RuleDetailOutput {
    #[serde(flatten)]
    rule: RuleOutput,
    body: String,
}

/// JSON view of a load diagnostic.
#[derive(Serialize)]
pub struct DiagnosticOutput {
    pub path: String,
    pub severity: String,
    pub message: String,
}

impl From<&Diagnostic> for DiagnosticOutput {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            path: diagnostic.path.clone(),
            severity: diagnostic.severity().to_string(),
            message: diagnostic.kind.to_string(),
        }
    }
}

#[derive(Serialize)]
struct MessageOutput {
    message: String,
}
