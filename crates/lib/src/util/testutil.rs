//! Test utilities for henge-lib.
//!
//! Helpers for building source trees on disk and running generated scripts.

use std::fs;
use std::path::Path;

/// Write `files` (relative path, content) under `root`, creating parents.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
  for (relative, content) in files {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
  }
}

/// Run a script through `/bin/sh`, returning whether it exited successfully.
#[cfg(unix)]
pub fn run_script(script: &Path) -> bool {
  std::process::Command::new("/bin/sh")
    .arg(script)
    .status()
    .map(|status| status.success())
    .unwrap_or(false)
}

/// Whether the current process ignores file permissions (e.g. runs as root).
#[cfg(unix)]
pub fn permissions_are_bypassed(locked_dir: &Path) -> bool {
  fs::read_dir(locked_dir).is_ok()
}
