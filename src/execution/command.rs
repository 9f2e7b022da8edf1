//! Command templates for the wrapped analyzer.
//!
//! Both modes run the analyzer's `csv-timeline` subcommand over the staging
//! directory with UTC ISO-8601 timestamps, no interactive wizard, and
//! overwriting allowed. They differ only in where results go:
//!
//! - timeline: `--profile timesketch-verbose --clobber --output <out>`
//! - report:   `--clobber --HTML-report <out> --output /dev/null`

use crate::constants::tool::{NULL_SINK, TIMELINE_PROFILE};
use serde::{Deserialize, Serialize};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolMode {
    /// Structured timeline table written to the output path
    CsvTimeline,
    /// Self-contained HTML report; the table goes to the null sink
    HtmlReport,
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolMode::CsvTimeline => write!(f, "csv_timeline"),
            ToolMode::HtmlReport => write!(f, "html_report"),
        }
    }
}

/// Ordered argument vector for one tool run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ToolCommand {
    pub fn new<I, S>(program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Fill the template for `mode`
    pub fn build(mode: ToolMode, binary: &Path, output_file: &Path, staging_dir: &Path) -> Self {
        let mut args: Vec<OsString> = ["csv-timeline", "--ISO-8601", "--UTC", "--no-wizard", "--quiet"]
            .into_iter()
            .map(OsString::from)
            .collect();

        match mode {
            ToolMode::CsvTimeline => {
                args.extend(
                    ["--profile", TIMELINE_PROFILE, "--clobber", "--output"]
                        .into_iter()
                        .map(OsString::from),
                );
                args.push(output_file.as_os_str().to_os_string());
            }
            ToolMode::HtmlReport => {
                args.extend(["--clobber", "--HTML-report"].into_iter().map(OsString::from));
                args.push(output_file.as_os_str().to_os_string());
                args.extend(["--output", NULL_SINK].into_iter().map(OsString::from));
            }
        }

        args.push(OsString::from("--directory"));
        args.push(staging_dir.as_os_str().to_os_string());

        Self {
            program: binary.to_path_buf(),
            args,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> impl Iterator<Item = &OsStr> {
        self.args.iter().map(OsString::as_os_str)
    }

    /// Program followed by arguments, as recorded in the task result
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.as_os_str())
            .chain(self.args())
            .map(|part| part.to_string_lossy().into_owned())
            .collect()
    }

    /// Space-joined command line for audit
    pub fn command_line(&self) -> String {
        self.argv().join(" ")
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}
