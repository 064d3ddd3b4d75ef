//! Configuration types and loading.
//!
//! Provides the configuration structures for rulekit:
//! - `RulekitConfig`: Top-level configuration with validation
//! - `RegistryConfig`, `MatcherConfig`, `DisplayConfig`: Section settings

mod settings;

pub use settings::{CONFIG_FILE, DisplayConfig, MatcherConfig, RegistryConfig, RulekitConfig};
