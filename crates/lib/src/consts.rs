/// Prefix of the temporary file holding a generated cleanup script.
pub const CLEANUP_SCRIPT_PREFIX: &str = "henge-injection-remove";

/// The current-directory marker a destination may be given as.
pub const CURRENT_DIR: &str = ".";

/// Error text a copy step reports when a path is absent in the container.
///
/// Compared case-insensitively.
pub const NOT_FOUND_SIGNATURE: &str = "no such file or directory";

/// Tracing target used by [`crate::diagnostics::TracingSink`].
pub const DIAGNOSTIC_TARGET: &str = "henge::injection";
