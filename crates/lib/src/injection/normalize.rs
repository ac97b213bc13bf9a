//! Destination normalization.
//!
//! Injections may name their destination as `.`, leave it empty, or give it
//! relative to the image's working directory. Everything downstream expects
//! absolute container paths, so those are rewritten here.

use std::path::Path;

use crate::consts::CURRENT_DIR;
use crate::diagnostics::DiagnosticSink;
use crate::injection::types::InjectionList;
use crate::util::path::clean;

/// Rewrite every non-absolute destination to an absolute one under `working_dir`.
///
/// Per entry, in order:
/// 1. A destination that cleans to `.` (including an empty one) becomes `working_dir`
/// 2. A destination that is still not absolute becomes `working_dir/<destination>`, cleaned
/// 3. If either rewrite happened, an informational diagnostic names the result
///
/// Absolute destinations are passed through untouched, order is preserved and
/// no entry is dropped.
pub fn normalize_destinations(
  working_dir: &Path,
  injections: InjectionList,
  sink: &dyn DiagnosticSink,
) -> InjectionList {
  if injections.is_empty() {
    return injections;
  }

  injections
    .into_iter()
    .map(|mut injection| {
      let mut changed = false;

      if clean(&injection.destination) == Path::new(CURRENT_DIR) {
        injection.destination = working_dir.to_path_buf();
        changed = true;
      }

      if !injection.destination.is_absolute() {
        injection.destination = clean(&working_dir.join(&injection.destination));
        changed = true;
      }

      if changed {
        sink.info(&format!(
          "Using {:?} as a destination for injecting {:?}",
          injection.destination, injection.source
        ));
      }

      injection
    })
    .collect()
}
