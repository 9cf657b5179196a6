//! Error type for the fixture harness.
//!
//! Content mismatches and unexpected files are *not* errors: they are
//! [`Outcome`](crate::compare::Outcome) values so that a run can collect and
//! report every one of them. `FixtureError` is reserved for conditions that
//! keep a check from producing a verdict at all (an unreadable file, a broken
//! manifest, a directory walk that fails half-way).
//!
//! Construct manifest errors with [`manifest_err!`](crate::manifest_err)
//! rather than building the variant by hand.

use std::io;
use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

pub type Result<T, E = FixtureError> = std::result::Result<T, E>;

#[derive(Debug, Error, Diagnostic)]
pub enum FixtureError {
    #[error("Failed to read '{}'", .path.display())]
    #[diagnostic(
        code(fixcheck::read),
        help("did the build step run and produce this file?")
    )]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write '{}'", .path.display())]
    #[diagnostic(code(fixcheck::write))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to walk '{}'", .path.display())]
    #[diagnostic(code(fixcheck::walk))]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Invalid manifest '{path}': {message}")]
    #[diagnostic(code(fixcheck::manifest))]
    Manifest { path: String, message: String },

    #[error("Manifest syntax error: {message}")]
    #[diagnostic(
        code(fixcheck::manifest::syntax),
        help("see `fixcheck list` for the shape of a valid suite")
    )]
    ManifestSyntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("I/O error")]
    #[diagnostic(code(fixcheck::io))]
    Io(#[from] io::Error),

    #[error("Failed to encode report")]
    #[diagnostic(code(fixcheck::report))]
    Report(#[from] serde_json::Error),
}

impl FixtureError {
    /// Builds a syntax error that points into the manifest text.
    pub fn manifest_syntax(name: &str, content: &str, err: &serde_yaml::Error) -> Self {
        let offset = err
            .location()
            .map(|loc| loc.index().min(content.len()))
            .unwrap_or(0);
        FixtureError::ManifestSyntax {
            message: err.to_string(),
            src: NamedSource::new(name, content.to_string()),
            span: SourceSpan::from((offset, 1)),
        }
    }
}

/// Constructs a `FixtureError::Manifest` with a formatted message.
///
/// `manifest_err!(path, "duplicate case '{}'", name)`
#[macro_export]
macro_rules! manifest_err {
    ($path:expr, $msg:expr) => {
        $crate::FixtureError::Manifest {
            path: $path.to_string(),
            message: format!("{}", $msg),
        }
    };
    ($path:expr, $fmt:expr, $($arg:expr),+) => {
        $crate::FixtureError::Manifest {
            path: $path.to_string(),
            message: format!($fmt, $($arg),+),
        }
    };
}
