//! Machine-readable output for host editors and agents.
//!
//! - `OutputWriter`: JSON emitters keyed on the CLI output format
//! - `RuleOutput`, `DiagnosticOutput`: serialized views of domain types

mod writer;

pub use writer::{DiagnosticOutput, OutputWriter, RuleOutput};
