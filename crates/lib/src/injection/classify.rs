//! Injection failure classification.
//!
//! The copy into the container happens elsewhere. When it fails, the error
//! is run through here so the operator gets a hint they can act on. The error
//! itself always comes back untouched.

use std::fmt::Display;

use crate::consts::NOT_FOUND_SIGNATURE;
use crate::diagnostics::DiagnosticSink;
use crate::injection::types::InjectionSpec;

/// What kind of injection failure an error represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
  /// The destination directory does not exist inside the container.
  DestinationMissing,
  /// Anything else.
  Generic,
}

/// Classify a copy error by its message.
pub fn classify<E: Display + ?Sized>(err: &E) -> FailureKind {
  if err.to_string().to_lowercase().contains(NOT_FOUND_SIGNATURE) {
    FailureKind::DestinationMissing
  } else {
    FailureKind::Generic
  }
}

/// Report a failed injection of `spec` and hand the result back unchanged.
///
/// `Ok` passes through silently. An `Err` produces one error diagnostic: a
/// remediation hint when the destination directory is missing in the
/// container, or a generic message naming source, destination and error.
pub fn handle_injection_error<T, E: Display>(
  spec: &InjectionSpec,
  result: Result<T, E>,
  sink: &dyn DiagnosticSink,
) -> Result<T, E> {
  if let Err(err) = &result {
    match classify(err) {
      FailureKind::DestinationMissing => sink.error(&format!(
        "The destination directory for {:?} injection must exist in container ({:?})",
        spec.source, spec.destination
      )),
      FailureKind::Generic => sink.error(&format!(
        "Error occurred during injecting {:?} to {:?}: {}",
        spec.source, spec.destination, err
      )),
    }
  }
  result
}
