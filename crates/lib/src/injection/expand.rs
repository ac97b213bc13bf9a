//! Injection expansion.
//!
//! Turns each injection into the concrete container paths it will produce:
//! a file source yields its destination, a directory source yields one path
//! per non-directory entry beneath it.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::debug;
use walkdir::WalkDir;

use crate::injection::types::{InjectionError, InjectionList, InjectionSpec};
use crate::util::path::join_clean;

/// Files produced by an injection list, split by whether they get truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
  /// Every file the injections create, in expansion order.
  pub files: Vec<PathBuf>,
  /// The subset of `files` coming from injections not marked `keep`.
  pub to_truncate: Vec<PathBuf>,
}

/// Return the flat list of container paths created by `injections`.
///
/// Destinations are expected to be normalized already. Specs are processed in
/// input order and each tree is walked sorted by file name. Directories are
/// descended into but never listed; symlinks are listed like files and not
/// followed below the source root.
///
/// The first missing source or traversal error aborts the whole expansion.
/// No partial list is ever returned: a file missing from this list would also
/// be missing from the cleanup script.
pub fn expand_injected_files(injections: &InjectionList) -> Result<Vec<PathBuf>, InjectionError> {
  let mut files = Vec::new();
  for injection in injections {
    files.extend(expand_injection(injection)?);
  }
  Ok(files)
}

/// Expand every injection once and partition the result by `keep`.
///
/// Both lists come from the same walk, so a summary built from `files` can
/// never disagree with a script built from `to_truncate`.
pub fn expand_partitioned(injections: &InjectionList) -> Result<Expansion, InjectionError> {
  let mut expansion = Expansion::default();
  for injection in injections {
    let files = expand_injection(injection)?;
    if !injection.keep {
      expansion.to_truncate.extend(files.iter().cloned());
    }
    expansion.files.extend(files);
  }
  Ok(expansion)
}

/// Expand a single injection into the container paths it creates.
///
/// A source root that is a symlink is followed. When it resolves to a
/// directory, the root itself is not listed, only the files beneath it.
pub fn expand_injection(injection: &InjectionSpec) -> Result<Vec<PathBuf>, InjectionError> {
  let root = fs::metadata(&injection.source).map_err(|source| {
    let path = injection.source.clone();
    if source.kind() == io::ErrorKind::NotFound {
      InjectionError::SourceNotFound { path, source }
    } else {
      InjectionError::SourceInaccessible { path, source }
    }
  })?;

  let mut files = Vec::new();
  for entry in WalkDir::new(&injection.source).sort_by_file_name() {
    let entry = entry.map_err(|source| InjectionError::Traversal {
      path: injection.source.clone(),
      source,
    })?;

    // the root's file_type is the symlink's own when the source is a link
    if entry.file_type().is_dir() || (entry.depth() == 0 && root.is_dir()) {
      continue;
    }

    let relative = entry.path().strip_prefix(&injection.source).unwrap_or(entry.path());
    files.push(join_clean(&injection.destination, relative));
  }

  debug!(
    source = ?injection.source,
    destination = ?injection.destination,
    files = files.len(),
    "expanded injection"
  );
  Ok(files)
}
