use console::style;

use crate::rules::{Diagnostic, RuleDocument, Severity};

pub struct Display;

impl Display {
    pub fn new() -> Self {
        Self
    }

    pub fn print_header(&self, text: &str) {
        println!();
        println!("{}", style(text).bold().cyan());
        println!("{}", style("═".repeat(60)).dim());
        println!();
    }

    pub fn print_rule_summary(&self, rule: &RuleDocument, description_width: usize) {
        println!(
            "{}  {}",
            style(format!("{:>5}", rule.precedence().to_string())).bold(),
            style(&rule.path).white()
        );
        println!(
            "       Applies: {}",
            style(self.applies_label(rule)).yellow()
        );
        if let Some(description) = &rule.description {
            println!(
                "       {}",
                style(truncate_chars(description, description_width)).dim()
            );
        }
        println!();
    }

    pub fn print_rule_detail(&self, rule: &RuleDocument) {
        self.print_header(&format!("Rule: {}", rule.path));

        println!("Precedence:  {}", style(rule.precedence()).bold());
        println!("Applies:     {}", style(self.applies_label(rule)).yellow());
        println!("Source:      {}", style(rule.source_path.display()).dim());
        if let Some(description) = &rule.description {
            println!("Description: {}", style(description).white());
        }
        println!();
        println!("{}", rule.body.trim());
        println!();
    }

    pub fn print_diagnostic(&self, diagnostic: &Diagnostic) {
        let tag = match diagnostic.severity() {
            Severity::Error => style("error").red().bold(),
            Severity::Warning => style("warning").yellow().bold(),
        };
        println!("{}: {}", tag, diagnostic);
    }

    pub fn print_success(&self, message: &str) {
        println!("{} {}", style("✓").green().bold(), message);
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red().bold(), message);
    }

    pub fn print_warning(&self, message: &str) {
        println!("{} {}", style("!").yellow().bold(), message);
    }

    pub fn print_info(&self, message: &str) {
        println!("{} {}", style("→").cyan(), message);
    }

    fn applies_label(&self, rule: &RuleDocument) -> String {
        if rule.always_apply {
            "always".to_string()
        } else if rule.globs.is_empty() {
            "never (dead rule)".to_string()
        } else {
            rule.globs.join(", ")
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate a string to a maximum number of characters, with a marker.
fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
