//! Golden-fixture comparison for build-tool output.
//!
//! A build step writes its output under `test/<case>/...`; the checked-in
//! fixtures live under `test/expected/<case>/...` with matching relative
//! paths. [`compare::Comparator`] checks single files, whole fixture trees and
//! files that must not exist; [`runner`] runs named cases from a
//! [`suite::Suite`] and [`report`] renders the verdicts.
//!
//! ```rust,no_run
//! use fixcheck::{config::HarnessConfig, runner::run_suite, suite::Suite};
//!
//! let suite = Suite::builtin()?;
//! let (_, summary) = run_suite(&suite, &HarnessConfig::default(), None);
//! assert!(summary.success());
//! # Ok::<(), fixcheck::FixtureError>(())
//! ```

pub use crate::diagnostics::{FixtureError, Result};

pub mod cli;
pub mod compare;
pub mod config;
pub mod diagnostics;
pub mod discovery;
pub mod fixture;
pub mod report;
pub mod runner;
pub mod suite;
