//! Diagnostic sinks.
//!
//! Components never log through a process-wide logger of their own. Callers
//! hand in a [`DiagnosticSink`] and every operator-facing message goes there,
//! tagged with a [`Severity`].

use std::cell::RefCell;
use std::fmt;

use tracing::{error, info};

use crate::consts::DIAGNOSTIC_TARGET;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
  /// Informational, e.g. a destination that was rewritten.
  Info,
  /// An injection failed.
  Error,
}

impl Severity {
  pub fn as_str(&self) -> &'static str {
    match self {
      Severity::Info => "info",
      Severity::Error => "error",
    }
  }
}

impl fmt::Display for Severity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A single message emitted to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
  pub severity: Severity,
  pub message: String,
}

/// Receiver for diagnostics emitted by the injection components.
pub trait DiagnosticSink {
  fn emit(&self, severity: Severity, message: &str);

  fn info(&self, message: &str) {
    self.emit(Severity::Info, message);
  }

  fn error(&self, message: &str) {
    self.emit(Severity::Error, message);
  }
}

impl<F> DiagnosticSink for F
where
  F: Fn(Severity, &str),
{
  fn emit(&self, severity: Severity, message: &str) {
    self(severity, message)
  }
}

/// Forwards diagnostics to `tracing` under the `henge::injection` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
  fn emit(&self, severity: Severity, message: &str) {
    match severity {
      Severity::Info => info!(target: DIAGNOSTIC_TARGET, "{}", message),
      Severity::Error => error!(target: DIAGNOSTIC_TARGET, "{}", message),
    }
  }
}

/// Keeps every diagnostic in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
  entries: RefCell<Vec<Diagnostic>>,
}

impl RecordingSink {
  pub fn new() -> Self {
    Self::default()
  }

  /// Snapshot of everything recorded so far.
  pub fn diagnostics(&self) -> Vec<Diagnostic> {
    self.entries.borrow().clone()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.borrow().is_empty()
  }

  pub fn len(&self) -> usize {
    self.entries.borrow().len()
  }
}

impl DiagnosticSink for RecordingSink {
  fn emit(&self, severity: Severity, message: &str) {
    self.entries.borrow_mut().push(Diagnostic {
      severity,
      message: message.to_string(),
    });
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tracing_test::traced_test;

  #[test]
  fn recording_sink_keeps_order_and_severity() {
    let sink = RecordingSink::new();
    sink.info("first");
    sink.error("second");

    assert_eq!(
      sink.diagnostics(),
      vec![
        Diagnostic {
          severity: Severity::Info,
          message: "first".to_string()
        },
        Diagnostic {
          severity: Severity::Error,
          message: "second".to_string()
        },
      ]
    );
  }

  #[test]
  fn closures_are_sinks() {
    let seen = RefCell::new(Vec::new());
    let sink = |severity: Severity, message: &str| seen.borrow_mut().push(format!("{severity}: {message}"));

    sink.error("boom");

    assert_eq!(seen.into_inner(), vec!["error: boom".to_string()]);
  }

  #[test]
  #[traced_test]
  fn tracing_sink_forwards_messages() {
    TracingSink.info("destination rewritten");
    TracingSink.error("injection failed");

    assert!(logs_contain("destination rewritten"));
    assert!(logs_contain("injection failed"));
    assert!(logs_contain("ERROR"));
  }
}
