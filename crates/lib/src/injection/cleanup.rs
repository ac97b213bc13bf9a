//! Cleanup script generation.
//!
//! Injected files live on in the committed layer even after the step that
//! needed them has run. The script generated here truncates each of them to
//! zero bytes, keeping the directory entries (bind mounts stay valid) while
//! destroying the content. Truncating an empty file is a no-op, so the script
//! can run any number of times.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::CLEANUP_SCRIPT_PREFIX;
use crate::injection::types::InjectionError;

const STRICT_MODE: &str = "set -e";
const LENIENT_MODE: &str = "set +e";

/// Render the body of the cleanup script.
///
/// The body starts in strict mode, truncates every file in order, then the
/// script itself when `script_name` is given and non-empty, and ends by
/// switching back to lenient mode.
pub fn render_cleanup_script(files: &[PathBuf], script_name: Option<&Path>) -> Result<String, InjectionError> {
  let mut script = String::new();
  script.push_str(STRICT_MODE);
  script.push('\n');

  for file in files {
    script.push_str(&truncate_command(file)?);
  }

  if let Some(name) = script_name.filter(|name| !name.as_os_str().is_empty()) {
    script.push_str(&truncate_command(name)?);
  }

  script.push_str(LENIENT_MODE);
  script.push('\n');
  Ok(script)
}

/// Write the cleanup script to a new temporary file and return its path.
///
/// The file is created in the system temp directory and is owned by the
/// caller from then on; it is never removed by this crate.
pub fn create_cleanup_script(files: &[PathBuf], script_name: Option<&Path>) -> Result<PathBuf, InjectionError> {
  create_cleanup_script_in(&std::env::temp_dir(), files, script_name)
}

/// Like [`create_cleanup_script`], creating the temporary file inside `dir`.
pub fn create_cleanup_script_in(
  dir: &Path,
  files: &[PathBuf],
  script_name: Option<&Path>,
) -> Result<PathBuf, InjectionError> {
  let body = render_cleanup_script(files, script_name)?;

  let mut file = tempfile::Builder::new()
    .prefix(CLEANUP_SCRIPT_PREFIX)
    .tempfile_in(dir)
    .map_err(|source| InjectionError::ScriptPersist { source })?;

  file
    .write_all(body.as_bytes())
    .and_then(|_| file.as_file().sync_all())
    .map_err(|source| InjectionError::ScriptPersist { source })?;

  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o700))
      .map_err(|source| InjectionError::ScriptPersist { source })?;
  }

  let (_, path) = file
    .keep()
    .map_err(|e| InjectionError::ScriptPersist { source: e.error })?;

  debug!(path = ?path, files = files.len(), "wrote cleanup script");
  Ok(path)
}

fn truncate_command(path: &Path) -> Result<String, InjectionError> {
  let text = path.to_str().ok_or_else(|| InjectionError::NonUtf8Path {
    path: path.to_path_buf(),
  })?;
  Ok(format!("truncate -s0 {}\n", quote(text)))
}

/// Double-quote `value` for a POSIX shell.
///
/// Inside double quotes only `\`, `"`, `$` and backtick keep a special
/// meaning, so those are escaped.
fn quote(value: &str) -> String {
  let mut quoted = String::with_capacity(value.len() + 2);
  quoted.push('"');
  for c in value.chars() {
    if matches!(c, '\\' | '"' | '$' | '`') {
      quoted.push('\\');
    }
    quoted.push(c);
  }
  quoted.push('"');
  quoted
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn empty_list_renders_only_mode_switches() {
    assert_eq!(render_cleanup_script(&[], None).unwrap(), "set -e\nset +e\n");
  }

  #[test]
  fn one_truncation_per_file_in_order() {
    let files = vec![PathBuf::from("/build/b"), PathBuf::from("/build/a")];

    assert_eq!(
      render_cleanup_script(&files, None).unwrap(),
      "set -e\ntruncate -s0 \"/build/b\"\ntruncate -s0 \"/build/a\"\nset +e\n"
    );
  }

  #[test]
  fn script_name_is_truncated_last_exactly_once() {
    let files = vec![PathBuf::from("/build/id_rsa")];
    let script = render_cleanup_script(&files, Some(Path::new("/tmp/remove.sh"))).unwrap();

    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(
      lines,
      vec![
        "set -e",
        "truncate -s0 \"/build/id_rsa\"",
        "truncate -s0 \"/tmp/remove.sh\"",
        "set +e"
      ]
    );
    assert_eq!(script.matches("/tmp/remove.sh").count(), 1);
  }

  #[test]
  fn empty_script_name_is_ignored() {
    assert_eq!(render_cleanup_script(&[], Some(Path::new(""))).unwrap(), "set -e\nset +e\n");
  }

  #[test]
  fn newline_in_script_name_stays_inside_quotes() {
    assert_eq!(
      render_cleanup_script(&[], Some(Path::new("/tmp/clean\nup.sh"))).unwrap(),
      "set -e\ntruncate -s0 \"/tmp/clean\nup.sh\"\nset +e\n"
    );
  }

  #[test]
  fn quote_escapes_shell_specials() {
    assert_eq!(quote("/a b/c"), "\"/a b/c\"");
    assert_eq!(quote("$HOME/`x`\"\\"), "\"\\$HOME/\\`x\\`\\\"\\\\\"");
  }

  #[cfg(unix)]
  #[test]
  fn non_utf8_paths_are_rejected_before_anything_is_written() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = TempDir::new().unwrap();
    let bad = PathBuf::from(OsStr::from_bytes(b"/build/\xff"));

    let result = create_cleanup_script_in(temp.path(), &[bad], None);

    assert!(matches!(result, Err(InjectionError::NonUtf8Path { .. })));
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
  }

  #[test]
  fn persisted_script_holds_rendered_body() {
    let temp = TempDir::new().unwrap();
    let files = vec![PathBuf::from("/build/token")];

    let path = create_cleanup_script_in(temp.path(), &files, None).unwrap();

    assert!(path.starts_with(temp.path()));
    assert!(
      path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with(CLEANUP_SCRIPT_PREFIX)
    );
    assert_eq!(
      std::fs::read_to_string(&path).unwrap(),
      render_cleanup_script(&files, None).unwrap()
    );
  }

  #[cfg(unix)]
  #[test]
  fn persisted_script_is_owner_only_executable() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let path = create_cleanup_script_in(temp.path(), &[], None).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o700);
  }

  #[test]
  fn missing_directory_surfaces_persist_error() {
    let temp = TempDir::new().unwrap();
    let result = create_cleanup_script_in(&temp.path().join("missing"), &[], None);

    assert!(matches!(result, Err(InjectionError::ScriptPersist { .. })));
  }

  #[cfg(unix)]
  #[test]
  fn running_the_script_twice_is_idempotent() {
    use crate::util::testutil::{run_script, write_tree};

    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    write_tree(&data, &[("secret one", "hunter2"), ("$weird", "token")]);
    let files = vec![data.join("secret one"), data.join("$weird")];

    let script = create_cleanup_script_in(temp.path(), &files, None).unwrap();

    assert!(run_script(&script));
    assert!(run_script(&script));
    for file in &files {
      assert_eq!(std::fs::metadata(file).unwrap().len(), 0);
    }
  }
}
