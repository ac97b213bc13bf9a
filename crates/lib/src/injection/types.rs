//! Types shared by the injection components.

use std::fmt;
use std::ops::Deref;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One requested file-or-tree injection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InjectionSpec {
  /// Path on the build host. Must exist when the injection is expanded.
  pub source: PathBuf,

  /// Path inside the container. May be empty, relative, or `.` until normalized.
  #[serde(default)]
  pub destination: PathBuf,

  /// Keep the injected content after the build instead of truncating it.
  #[serde(default)]
  pub keep: bool,
}

impl InjectionSpec {
  pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
    Self {
      source: source.into(),
      destination: destination.into(),
      keep: false,
    }
  }

  /// Mark this injection as one that survives the build.
  pub fn keep(mut self) -> Self {
    self.keep = true;
    self
  }
}

impl fmt::Display for InjectionSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.source.display(), self.destination.display())
  }
}

/// Error parsing the `SOURCE[:DESTINATION]` form of an injection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InjectionParseError {
  #[error("injection source must not be empty: {0:?}")]
  EmptySource(String),

  #[error("injection must be SOURCE[:DESTINATION], got {0:?}")]
  TooManySegments(String),
}

impl FromStr for InjectionSpec {
  type Err = InjectionParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let value = s.trim();
    let (source, destination) = match value.split_once(':') {
      Some((_, rest)) if rest.contains(':') => return Err(InjectionParseError::TooManySegments(s.to_string())),
      Some((source, destination)) => (source, destination),
      None => (value, ""),
    };

    if source.is_empty() {
      return Err(InjectionParseError::EmptySource(s.to_string()));
    }

    Ok(InjectionSpec::new(source, destination))
  }
}

/// An ordered sequence of injections.
///
/// Order is preserved through every transformation. Duplicate destinations
/// are not detected here; that policy belongs to whoever performs the copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InjectionList(Vec<InjectionSpec>);

impl InjectionList {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, spec: InjectionSpec) {
    self.0.push(spec);
  }

  /// The injections whose content must be destroyed after the build.
  pub fn to_remove(&self) -> InjectionList {
    self.0.iter().filter(|spec| !spec.keep).cloned().collect()
  }

  pub fn into_inner(self) -> Vec<InjectionSpec> {
    self.0
  }
}

impl Deref for InjectionList {
  type Target = [InjectionSpec];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl From<Vec<InjectionSpec>> for InjectionList {
  fn from(specs: Vec<InjectionSpec>) -> Self {
    Self(specs)
  }
}

impl FromIterator<InjectionSpec> for InjectionList {
  fn from_iter<I: IntoIterator<Item = InjectionSpec>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

impl IntoIterator for InjectionList {
  type Item = InjectionSpec;
  type IntoIter = std::vec::IntoIter<InjectionSpec>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.into_iter()
  }
}

impl<'a> IntoIterator for &'a InjectionList {
  type Item = &'a InjectionSpec;
  type IntoIter = std::slice::Iter<'a, InjectionSpec>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}

/// Errors that can occur while expanding injections or writing the cleanup script.
#[derive(Debug, Error)]
pub enum InjectionError {
  /// The injection source does not exist on the host.
  #[error("injection source not found: {path}")]
  SourceNotFound {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The injection source exists but could not be inspected.
  #[error("failed to stat injection source {path}: {source}")]
  SourceInaccessible {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Walking a source tree failed part way through.
  #[error("failed to traverse injection source {path}: {source}")]
  Traversal {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },

  /// The cleanup script could not be created or written.
  #[error("failed to persist cleanup script: {source}")]
  ScriptPersist {
    #[source]
    source: std::io::Error,
  },

  /// A path cannot be written into a shell script without being altered.
  #[error("path is not valid UTF-8 and cannot be placed in a cleanup script: {path:?}")]
  NonUtf8Path { path: PathBuf },
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_source_and_destination() {
    let spec: InjectionSpec = "/secrets/id_rsa:/root/.ssh".parse().unwrap();
    assert_eq!(spec, InjectionSpec::new("/secrets/id_rsa", "/root/.ssh"));
  }

  #[test]
  fn parse_source_only_leaves_destination_empty() {
    let spec: InjectionSpec = " /secrets/token ".parse().unwrap();
    assert_eq!(spec.source, PathBuf::from("/secrets/token"));
    assert_eq!(spec.destination, PathBuf::new());
    assert!(!spec.keep);
  }

  #[test]
  fn parse_rejects_empty_source() {
    assert!(matches!(
      ":/dest".parse::<InjectionSpec>(),
      Err(InjectionParseError::EmptySource(_))
    ));
    assert!(matches!("".parse::<InjectionSpec>(), Err(InjectionParseError::EmptySource(_))));
  }

  #[test]
  fn parse_rejects_extra_segments() {
    assert!(matches!(
      "/a:/b:/c".parse::<InjectionSpec>(),
      Err(InjectionParseError::TooManySegments(_))
    ));
  }

  #[test]
  fn to_remove_skips_kept_injections_in_order() {
    let list: InjectionList = vec![
      InjectionSpec::new("/a", "/x"),
      InjectionSpec::new("/b", "/y").keep(),
      InjectionSpec::new("/c", "/z"),
    ]
    .into();

    let sources: Vec<_> = list.to_remove().iter().map(|s| s.source.clone()).collect();
    assert_eq!(sources, vec![PathBuf::from("/a"), PathBuf::from("/c")]);
  }

  #[test]
  fn list_deserializes_with_defaults() {
    let list: InjectionList = serde_json::from_str(r#"[{"source": "/a"}, {"source": "/b", "destination": "etc", "keep": true}]"#).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].destination, PathBuf::new());
    assert!(list[1].keep);
  }
}
