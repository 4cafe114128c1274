//! Error types for rule loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type for rule operations
pub type RulesResult<T> = Result<T, RulesError>;

/// Errors that abort rule loading.
///
/// These are structural faults in the sense of the error taxonomy: an
/// unreadable or unparsable rule file means there is nothing to run against.
/// A single malformed rule entry is not represented here; the loader reports
/// it as a diagnostic and skips the entry.
#[derive(Debug, Error)]
pub enum RulesError {
    /// Failed to read the rule file
    #[error("failed to read rule file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rule file is not valid YAML
    #[error("failed to parse YAML in {path}: {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The rule file parsed but is not a sequence of rules
    #[error("rule file {path} must contain a YAML sequence of rules")]
    NotASequence { path: PathBuf },
}
