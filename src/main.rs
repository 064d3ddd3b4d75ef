use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use rulekit::cli::{Cli, Commands, Display, OutputFormat};
use rulekit::config::RulekitConfig;
use rulekit::error::{Result, RulekitError};
use rulekit::output::OutputWriter;
use rulekit::rules::{ActivationMatcher, Diagnostic, RuleRegistry, Severity};

/// Directory rule packs live in, searched upward from the working
/// directory when `--rules-dir` is not given.
const DEFAULT_RULES_DIR: &str = ".cursor/rules";

/// Context for command output handling.
struct OutputContext<'a> {
    display: &'a Display,
    writer: &'a OutputWriter,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Display::new().print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("rulekit=debug")
    } else {
        EnvFilter::new("rulekit=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let display = Display::new();
    let writer = OutputWriter::new(cli.output);
    let out = OutputContext {
        display: &display,
        writer: &writer,
    };

    let rules_dir = match cli.rules_dir {
        Some(dir) => dir,
        None => find_rules_dir()?,
    };

    match cli.command {
        Commands::List => cmd_list(&out, &rules_dir).await,
        Commands::Match { path, action } => cmd_match(&out, &rules_dir, &path, action).await,
        Commands::Check => cmd_check(&out, &rules_dir).await,
        Commands::Show { rule } => cmd_show(&out, &rules_dir, &rule).await,
        Commands::Prompt { path, action } => cmd_prompt(&out, &rules_dir, &path, action).await,
    }
}

/// Walk upward from the working directory to the nearest rules directory.
fn find_rules_dir() -> Result<PathBuf> {
    let current = std::env::current_dir()?;

    let mut path = current.as_path();
    loop {
        let candidate = path.join(DEFAULT_RULES_DIR);
        if candidate.is_dir() {
            return Ok(candidate);
        }
        path = path
            .parent()
            .ok_or_else(|| RulekitError::RulesDirNotFound(current.join(DEFAULT_RULES_DIR)))?;
    }
}

/// Load the registry, reporting non-fatal diagnostics as warnings so the
/// command still operates on the usable subset.
async fn load_registry(
    out: &OutputContext<'_>,
    rules_dir: &Path,
) -> Result<(RulekitConfig, RuleRegistry)> {
    let config = RulekitConfig::load(rules_dir).await?;
    let (registry, diagnostics) = RuleRegistry::load(rules_dir, config.registry.clone()).await?;

    if !diagnostics.is_empty() && out.writer.format() == OutputFormat::Text {
        out.display.print_warning(&format!(
            "{} rule document(s) have defects; run 'rulekit check' for details.",
            diagnostics.len()
        ));
    }

    Ok((config, registry))
}

async fn cmd_list(out: &OutputContext<'_>, rules_dir: &Path) -> Result<()> {
    let (config, registry) = load_registry(out, rules_dir).await?;
    let snapshot = registry.snapshot();

    match out.writer.format() {
        OutputFormat::Text => {
            out.display
                .print_header(&format!("Rules: {}", registry.root().display()));
            if snapshot.is_empty() {
                out.display.print_info("No rules loaded.");
                return Ok(());
            }
            for rule in snapshot.iter() {
                out.display
                    .print_rule_summary(rule, config.display.description_width);
            }
        }
        OutputFormat::Json => {
            let rules: Vec<_> = snapshot.iter().collect();
            out.writer.emit_rules(&rules);
        }
    }

    Ok(())
}

async fn cmd_match(
    out: &OutputContext<'_>,
    rules_dir: &Path,
    path: &str,
    action: Option<String>,
) -> Result<()> {
    let (config, registry) = load_registry(out, rules_dir).await?;
    let snapshot = registry.snapshot();
    let matcher = ActivationMatcher::new(&snapshot);

    let action = if config.matcher.action_triggers {
        action
    } else {
        None
    };
    let activation = matcher.activate(path, action.as_deref());

    match out.writer.format() {
        OutputFormat::Text => {
            out.display.print_header(&format!("Match: {}", path));
            if activation.is_empty() {
                out.display.print_info("No rules activate for this path.");
                return Ok(());
            }
            for rule in activation.rules() {
                out.display
                    .print_rule_summary(rule, config.display.description_width);
            }
        }
        OutputFormat::Json => out.writer.emit_activation(&activation),
    }

    Ok(())
}

async fn cmd_check(out: &OutputContext<'_>, rules_dir: &Path) -> Result<()> {
    let config = RulekitConfig::load(rules_dir).await?;
    let (registry, diagnostics) = RuleRegistry::load(rules_dir, config.registry).await?;

    let errors = diagnostics
        .iter()
        .filter(|d| d.severity() == Severity::Error)
        .count();

    match out.writer.format() {
        OutputFormat::Text => {
            if diagnostics.is_empty() {
                out.display.print_success(&format!(
                    "{} rule(s) loaded, no defects found.",
                    registry.snapshot().len()
                ));
                return Ok(());
            }
            for diagnostic in &diagnostics {
                out.display.print_diagnostic(diagnostic);
            }
            print_check_summary(out, &diagnostics, errors);
        }
        OutputFormat::Json => out.writer.emit_diagnostics(&diagnostics),
    }

    if errors > 0 {
        return Err(RulekitError::CheckFailed { errors });
    }
    Ok(())
}

fn print_check_summary(out: &OutputContext<'_>, diagnostics: &[Diagnostic], errors: usize) {
    let warnings = diagnostics.len() - errors;
    out.display.print_warning(&format!(
        "{} error(s), {} warning(s).",
        errors, warnings
    ));
}

async fn cmd_show(out: &OutputContext<'_>, rules_dir: &Path, rule: &str) -> Result<()> {
    let (_, registry) = load_registry(out, rules_dir).await?;
    let snapshot = registry.snapshot();

    let document = snapshot
        .get(rule)
        .ok_or_else(|| RulekitError::RuleNotFound(rule.to_string()))?;

    match out.writer.format() {
        OutputFormat::Text => out.display.print_rule_detail(document),
        OutputFormat::Json => out.writer.emit_rule_detail(document),
    }

    Ok(())
}

async fn cmd_prompt(
    out: &OutputContext<'_>,
    rules_dir: &Path,
    path: &str,
    action: Option<String>,
) -> Result<()> {
    let (config, registry) = load_registry(out, rules_dir).await?;
    let snapshot = registry.snapshot();
    let matcher = ActivationMatcher::new(&snapshot);

    let action = if config.matcher.action_triggers {
        action
    } else {
        None
    };
    let activation = matcher.activate(path, action.as_deref());

    match out.writer.format() {
        OutputFormat::Text => print!("{}", activation.to_prompt()),
        OutputFormat::Json => out.writer.emit_activation(&activation),
    }

    Ok(())
}
