//! Stand-in analyzer binaries written as shell scripts
//!
//! The scripts accept the same arguments as the real analyzer and only
//! behave differently in what they leave at the output path.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

const PARSE_ARGS: &str = r#"out=""
report=""
dir=""
while [ $# -gt 0 ]; do
  case "$1" in
    --output) out="$2"; shift 2 ;;
    --HTML-report) report="$2"; shift 2 ;;
    --directory) dir="$2"; shift 2 ;;
    *) shift ;;
  esac
done
"#;

/// Writes one line per staged file to the report path, or the output path
/// in timeline mode
pub fn writing_tool(dir: &Path) -> PathBuf {
    script(
        dir,
        "hayabusa",
        &format!(
            "{PARSE_ARGS}target=\"${{report:-$out}}\"\necho \"Timestamp,Computer,Channel\" > \"$target\"\nls \"$dir\" >> \"$target\"\n"
        ),
    )
}

/// Exits cleanly without writing anything
pub fn silent_tool(dir: &Path) -> PathBuf {
    script(dir, "hayabusa-silent", "exit 0\n")
}

/// Like [`writing_tool`], but keeps running long enough to be polled
pub fn slow_tool(dir: &Path) -> PathBuf {
    script(
        dir,
        "hayabusa-slow",
        &format!(
            "{PARSE_ARGS}sleep 0.4\ntarget=\"${{report:-$out}}\"\necho \"Timestamp,Computer,Channel\" > \"$target\"\n"
        ),
    )
}

/// Writes a complete output but reports failure
pub fn complaining_tool(dir: &Path) -> PathBuf {
    script(
        dir,
        "hayabusa-complain",
        &format!("{PARSE_ARGS}echo \"Timestamp\" > \"${{report:-$out}}\"\nexit 1\n"),
    )
}

/// Runs until killed
pub fn hanging_tool(dir: &Path) -> PathBuf {
    script(dir, "hayabusa-hang", "exec sleep 30\n")
}

fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
