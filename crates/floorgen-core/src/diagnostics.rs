//! Diagnostics collected during a merge run
//!
//! Per-rule and per-entity findings are advisory: they are logged as they are
//! recorded and collected so the caller can surface them after the run, but
//! they never change control flow. Only pre-run structural faults (parse
//! failures) abort a run, and those are plain errors, not diagnostics.

use std::fmt;

use tracing::{error, info, warn};

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One finding from a merge run
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Rule type the finding belongs to, if it is rule-scoped
    pub rule: Option<String>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rule {
            Some(rule) => write!(f, "[{}] rule '{}': {}", self.severity, rule, self.message),
            None => write!(f, "[{}] {}", self.severity, self.message),
        }
    }
}

/// Collects diagnostics and forwards them to the tracing subscriber
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, rule: Option<&str>, message: impl Into<String>) {
        self.record(Severity::Info, rule, message.into());
    }

    pub fn warn(&mut self, rule: Option<&str>, message: impl Into<String>) {
        self.record(Severity::Warning, rule, message.into());
    }

    pub fn error(&mut self, rule: Option<&str>, message: impl Into<String>) {
        self.record(Severity::Error, rule, message.into());
    }

    fn record(&mut self, severity: Severity, rule: Option<&str>, message: String) {
        match severity {
            Severity::Info => info!(rule, "{message}"),
            Severity::Warning => warn!(rule, "{message}"),
            Severity::Error => error!(rule, "{message}"),
        }
        self.entries.push(Diagnostic {
            severity,
            rule: rule.map(str::to_string),
            message,
        });
    }

    /// All findings recorded so far, in recording order
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// True if any finding is Warning or Error
    pub fn has_problems(&self) -> bool {
        self.entries
            .iter()
            .any(|d| d.severity != Severity::Info)
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order_with_scope() {
        let mut sink = Diagnostics::new();
        sink.info(None, "fetched 2 entities");
        sink.warn(Some("light"), "more than one svg snippet found");

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].severity, Severity::Info);
        assert_eq!(entries[0].rule, None);
        assert_eq!(entries[1].rule.as_deref(), Some("light"));
        assert_eq!(
            entries[1].to_string(),
            "[warning] rule 'light': more than one svg snippet found"
        );
    }

    #[test]
    fn problems_exclude_info() {
        let mut sink = Diagnostics::new();
        sink.info(None, "all good");
        assert!(!sink.has_problems());
        sink.error(Some("cover"), "no svg snippet found");
        assert!(sink.has_problems());
    }
}
