//! Lexical path manipulation.
//!
//! Nothing in here touches the filesystem: paths are cleaned by looking at
//! their components only, so symlinks are never resolved.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path.
///
/// - Repeated and trailing separators collapse
/// - `.` components are dropped
/// - `..` removes the previous normal component; at the root it is dropped,
///   in a relative path with nothing left to remove it is kept
/// - An empty result becomes `.`
pub fn clean(path: &Path) -> PathBuf {
  let mut parts: Vec<Component<'_>> = Vec::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => match parts.last() {
        Some(Component::Normal(_)) => {
          parts.pop();
        }
        Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
        _ => parts.push(component),
      },
      _ => parts.push(component),
    }
  }

  if parts.is_empty() {
    return PathBuf::from(".");
  }
  parts.iter().collect()
}

/// Join `tail` onto `base` and clean the result.
///
/// An absolute `tail` is treated as relative to `base`, the way a container
/// destination suffix is appended rather than substituted.
pub fn join_clean(base: &Path, tail: &Path) -> PathBuf {
  let relative: PathBuf = tail
    .components()
    .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
    .collect();
  clean(&base.join(relative))
}
