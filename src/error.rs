use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulekitError {
    #[error("Rules directory not found: {0}")]
    RulesDirNotFound(PathBuf),

    #[error("Rule not found: {0}")]
    RuleNotFound(String),

    #[error("Duplicate rule path '{path}' (from {first} and {second})")]
    DuplicatePath {
        path: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Rule pack check failed: {errors} error(s)")]
    CheckFailed { errors: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_bw::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RulekitError>;
