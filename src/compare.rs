//! The comparison helpers.
//!
//! Every helper returns [`Outcome`] values instead of failing fast, so a case
//! reports all of its mismatches in one run.

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;

use crate::config::HarnessConfig;
use crate::diagnostics::FixtureError;
use crate::discovery::expected_files;
use crate::fixture::{
    actual_path_for, actual_path_from_expected, decode_fixture, expected_path_for, expected_root,
    normalize, read_fixture, read_fixture_bytes, write_fixture,
};

#[cfg(windows)]
pub const LINEFEED: &str = "\r\n";
#[cfg(not(windows))]
pub const LINEFEED: &str = "\n";

/// A content mismatch between an actual file and its fixture.
#[derive(Debug, Clone, Serialize)]
pub struct Mismatch {
    pub actual_path: PathBuf,
    pub expected_path: PathBuf,
    /// Fixture content after optional whitespace normalization.
    pub expected: String,
    /// Actual content after optional whitespace normalization.
    pub actual: String,
    pub hint: String,
}

/// The verdict of a single check.
#[derive(Debug)]
pub enum Outcome {
    Match { path: PathBuf },
    Mismatch(Box<Mismatch>),
    /// The fixture was rewritten from the actual output.
    Updated { path: PathBuf },
    UnexpectedFile { path: PathBuf },
    Error(FixtureError),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Outcome::Mismatch(_) | Outcome::UnexpectedFile { .. } | Outcome::Error(_)
        )
    }

    /// One-line description used by reports.
    pub fn message(&self) -> String {
        match self {
            Outcome::Match { path } => format!("matched {}", path.display()),
            Outcome::Mismatch(m) => m.hint.clone(),
            Outcome::Updated { path } => format!("updated {}", path.display()),
            Outcome::UnexpectedFile { path } => {
                format!("Expected this file to not exist: {}", path.display())
            }
            Outcome::Error(err) => match std::error::Error::source(err) {
                Some(source) => format!("{err}: {source}"),
                None => err.to_string(),
            },
        }
    }
}

/// Builds the message shown when a fixture does not match.
pub fn mismatch_hint(diff_tool: &str, actual: &Path, expected: &Path) -> String {
    format!(
        "Actual did not match expected.  Run this to compare:{}{} \"{}\" \"{}\"",
        LINEFEED,
        diff_tool,
        actual.display(),
        expected.display()
    )
}

/// Runs checks against the fixture tree under a harness root.
pub struct Comparator<'a> {
    root: &'a Path,
    diff_tool: &'a str,
    update: bool,
}

impl<'a> Comparator<'a> {
    pub fn new(config: &'a HarnessConfig) -> Self {
        Self {
            root: &config.root,
            diff_tool: &config.diff_tool,
            update: config.update,
        }
    }

    fn resolve(&self, rel: &Path) -> PathBuf {
        if self.root == Path::new(".") || self.root.as_os_str().is_empty() {
            rel.to_path_buf()
        } else {
            self.root.join(rel)
        }
    }

    /// Compares `test/<path>` with `test/expected/<path>`.
    pub fn test_file(&self, path: &str, ignore_whitespace: bool) -> Outcome {
        let actual = self.resolve(&actual_path_for(path));
        let expected = self.resolve(&expected_path_for(path));
        self.compare(actual, expected, ignore_whitespace)
    }

    /// Compares a fixture with the actual file derived from its name.
    ///
    /// `expected` is relative to the harness root, e.g.
    /// `test/expected/es6/out.js` or `test/html/a.expected.html.ts`.
    pub fn test_expected_file(&self, expected: &str, ignore_whitespace: bool) -> Outcome {
        let actual = self.resolve(Path::new(&actual_path_from_expected(expected)));
        let expected = self.resolve(Path::new(expected));
        self.compare(actual, expected, ignore_whitespace)
    }

    /// Checks every file under `test/expected/<folder>` with
    /// [`test_expected_file`](Self::test_expected_file).
    pub fn test_directory(&self, folder: &str, ignore_whitespace: bool) -> Vec<Outcome> {
        let dir = self.resolve(&expected_root().join(folder));
        let files = match expected_files(&dir) {
            Ok(files) => files,
            Err(err) => return vec![Outcome::Error(err)],
        };
        if files.is_empty() {
            info!("no fixtures under {}", dir.display());
        }
        files
            .iter()
            .map(|file| {
                // Rewrite only the root-relative part so the root itself is never touched.
                let rel = file.strip_prefix(self.root).unwrap_or(file);
                self.test_expected_file(&rel.to_string_lossy(), ignore_whitespace)
            })
            .collect()
    }

    /// Fails when `path` (relative to the root) exists.
    pub fn assert_file_does_not_exist(&self, path: &str) -> Outcome {
        let full = self.resolve(Path::new(path));
        debug!("checking absence of {}", full.display());
        if full.exists() {
            Outcome::UnexpectedFile { path: full }
        } else {
            Outcome::Match { path: full }
        }
    }

    fn compare(&self, actual_path: PathBuf, expected_path: PathBuf, ignore_ws: bool) -> Outcome {
        debug!(
            "comparing {} against {}",
            actual_path.display(),
            expected_path.display()
        );
        // Raw bytes are kept so update mode copies the output verbatim.
        let raw_actual = match read_fixture_bytes(&actual_path) {
            Ok(bytes) => bytes,
            Err(err) => return Outcome::Error(err),
        };
        let raw_expected = match read_fixture(&expected_path) {
            Ok(text) => Some(text),
            Err(_) if self.update => None,
            Err(err) => return Outcome::Error(err),
        };

        if let Some(raw_expected) = raw_expected {
            let expected = normalize(raw_expected, ignore_ws);
            let actual = normalize(decode_fixture(&raw_actual), ignore_ws);
            if expected == actual {
                return Outcome::Match {
                    path: expected_path,
                };
            }
            if !self.update {
                let hint = mismatch_hint(self.diff_tool, &actual_path, &expected_path);
                return Outcome::Mismatch(Box::new(Mismatch {
                    actual_path,
                    expected_path,
                    expected,
                    actual,
                    hint,
                }));
            }
        }

        info!("updating fixture {}", expected_path.display());
        match write_fixture(&expected_path, &raw_actual) {
            Ok(()) => Outcome::Updated {
                path: expected_path,
            },
            Err(err) => Outcome::Error(err),
        }
    }
}
