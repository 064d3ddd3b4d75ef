use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "rulekit")]
#[command(author, version, about = "Rule registry and activation matcher for .mdc rule packs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Path to the rules directory (default: nearest .cursor/rules)
    #[arg(long, global = true, env = "RULEKIT_RULES_DIR")]
    pub rules_dir: Option<PathBuf>,
}

/// Output format for CLI results.
/// - Text: Human-readable text output (default)
/// - Json: Single JSON object per command
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all loaded rules in precedence order
    List,

    /// Show the rules that activate for a file path
    Match {
        /// File path to match, relative to the project root
        path: String,

        /// Action keyword for trigger-based activation
        #[arg(long)]
        action: Option<String>,
    },

    /// Report authoring defects in the rule pack
    Check,

    /// Show one rule document's metadata and body
    Show {
        /// Rule path relative to the rules directory
        rule: String,
    },

    /// Print the assembled prompt context for a file path
    Prompt {
        /// File path to match, relative to the project root
        path: String,

        /// Action keyword for trigger-based activation
        #[arg(long)]
        action: Option<String>,
    },
}
