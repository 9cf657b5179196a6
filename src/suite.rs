//! Suites of named cases, loaded from YAML manifests.
//!
//! ```yaml
//! name: grunt-ts
//! root: .
//! diff_tool: kdiff3
//! cases:
//!   - name: simple
//!     checks:
//!       - file: simple/js/zoo.js
//!         ignore_whitespace: true
//!       - file: simple/js/zoo.d.ts
//!   - name: noEmitOnError
//!     checks:
//!       - directory: noEmitOnError
//!       - absent: test/noEmitOnError/testNoEmitOnError_true.js
//! ```

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{FixtureError, Result};
use crate::manifest_err;

const BUILTIN_NAME: &str = "suites/grunt-ts.yaml";
const BUILTIN_MANIFEST: &str = include_str!("../suites/grunt-ts.yaml");

/// One assertion inside a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCheck", into = "RawCheck")]
pub enum Check {
    /// `test/<file>` must equal `test/expected/<file>`.
    File {
        file: String,
        ignore_whitespace: bool,
    },
    /// A fixture path whose actual counterpart is derived from its name.
    ExpectedFile {
        expected_file: String,
        ignore_whitespace: bool,
    },
    /// Every file under `test/expected/<directory>`.
    Directory {
        directory: String,
        ignore_whitespace: bool,
    },
    /// The path must not exist after the build.
    Absent { absent: String },
}

/// Manifest form of a check. Unknown keys are rejected so a misspelled
/// option cannot silently fall back to its default.
#[derive(Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCheck {
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    absent: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    ignore_whitespace: bool,
}

impl TryFrom<RawCheck> for Check {
    type Error = String;

    fn try_from(raw: RawCheck) -> std::result::Result<Self, Self::Error> {
        let ignore_whitespace = raw.ignore_whitespace;
        match (raw.file, raw.expected_file, raw.directory, raw.absent) {
            (Some(file), None, None, None) => Ok(Check::File {
                file,
                ignore_whitespace,
            }),
            (None, Some(expected_file), None, None) => Ok(Check::ExpectedFile {
                expected_file,
                ignore_whitespace,
            }),
            (None, None, Some(directory), None) => Ok(Check::Directory {
                directory,
                ignore_whitespace,
            }),
            (None, None, None, Some(absent)) if !ignore_whitespace => Ok(Check::Absent { absent }),
            (None, None, None, Some(_)) => {
                Err("`ignore_whitespace` does not apply to an `absent` check".to_string())
            }
            _ => Err(
                "a check needs exactly one of `file`, `expected_file`, `directory` or `absent`"
                    .to_string(),
            ),
        }
    }
}

impl From<Check> for RawCheck {
    fn from(check: Check) -> Self {
        match check {
            Check::File {
                file,
                ignore_whitespace,
            } => RawCheck {
                file: Some(file),
                ignore_whitespace,
                ..RawCheck::default()
            },
            Check::ExpectedFile {
                expected_file,
                ignore_whitespace,
            } => RawCheck {
                expected_file: Some(expected_file),
                ignore_whitespace,
                ..RawCheck::default()
            },
            Check::Directory {
                directory,
                ignore_whitespace,
            } => RawCheck {
                directory: Some(directory),
                ignore_whitespace,
                ..RawCheck::default()
            },
            Check::Absent { absent } => RawCheck {
                absent: Some(absent),
                ..RawCheck::default()
            },
        }
    }
}

impl Check {
    fn target(&self) -> &str {
        match self {
            Check::File { file, .. } => file,
            Check::ExpectedFile { expected_file, .. } => expected_file,
            Check::Directory { directory, .. } => directory,
            Check::Absent { absent } => absent,
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, ws) = match self {
            Check::File {
                ignore_whitespace, ..
            } => ("file", *ignore_whitespace),
            Check::ExpectedFile {
                ignore_whitespace, ..
            } => ("expected", *ignore_whitespace),
            Check::Directory {
                ignore_whitespace, ..
            } => ("dir", *ignore_whitespace),
            Check::Absent { .. } => ("absent", false),
        };
        write!(f, "{kind} {}", self.target())?;
        if ws {
            write!(f, " (ignoring whitespace)")?;
        }
        Ok(())
    }
}

/// A named group of checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub name: String,
    pub checks: Vec<Check>,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suite {
    pub name: String,
    /// Harness root. Relative roots are resolved against the manifest's directory.
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default)]
    pub diff_tool: Option<String>,
    pub cases: Vec<Case>,
}

impl Suite {
    /// Parses manifest text. `origin` names the manifest in diagnostics.
    pub fn parse(origin: &str, content: &str) -> Result<Suite> {
        let suite: Suite = serde_yaml::from_str(content)
            .map_err(|e| FixtureError::manifest_syntax(origin, content, &e))?;
        suite.validate(origin)?;
        Ok(suite)
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Suite> {
        let content = fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut suite = Suite::parse(&path.display().to_string(), &content)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        suite.root = Some(match suite.root.take() {
            Some(root) if root.is_absolute() => root,
            Some(root) => base.join(root),
            None => base.to_path_buf(),
        });
        debug!(
            "loaded suite '{}' with {} cases from {}",
            suite.name,
            suite.cases.len(),
            path.display()
        );
        Ok(suite)
    }

    /// The case table for the grunt-ts fixture tree.
    pub fn builtin() -> Result<Suite> {
        Suite::parse(BUILTIN_NAME, BUILTIN_MANIFEST)
    }

    pub fn case(&self, name: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.name == name)
    }

    fn validate(&self, origin: &str) -> Result<()> {
        let mut seen = HashSet::new();
        for case in &self.cases {
            if case.name.trim().is_empty() {
                return Err(manifest_err!(origin, "case names must not be empty"));
            }
            if !seen.insert(case.name.as_str()) {
                return Err(manifest_err!(origin, "duplicate case '{}'", case.name));
            }
            if let Some(check) = case.checks.iter().find(|c| c.target().is_empty()) {
                return Err(manifest_err!(
                    origin,
                    "case '{}' has a check with an empty path: {}",
                    case.name,
                    check
                ));
            }
        }
        Ok(())
    }
}
