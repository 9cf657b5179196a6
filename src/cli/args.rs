//! Defines the command-line arguments and subcommands for the fixcheck CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{ColorMode, ReportFormat};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "fixcheck",
    version,
    about = "Compare build output against checked-in expected fixtures."
)]
pub struct FixcheckArgs {
    /// Directory containing `test/` and `test/expected/`.
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Diff tool suggested in mismatch messages.
    #[arg(long, global = true)]
    pub diff_tool: Option<String>,

    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Overwrite mismatching fixtures with the actual output.
    #[arg(short, long, global = true)]
    pub update: bool,

    #[arg(long, global = true, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run every case of a suite.
    Run {
        /// Suite manifest; the built-in grunt-ts suite when omitted.
        #[arg(short, long)]
        manifest: Option<PathBuf>,
        /// Run only cases whose name contains this substring.
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Compare `test/<PATH>` with `test/expected/<PATH>`.
    File {
        #[arg(required = true)]
        path: String,
        #[arg(short = 'w', long)]
        ignore_whitespace: bool,
    },
    /// Compare an expected file with the actual file derived from its name.
    Expected {
        #[arg(required = true)]
        path: String,
        #[arg(short = 'w', long)]
        ignore_whitespace: bool,
    },
    /// Compare every fixture under `test/expected/<FOLDER>`.
    Dir {
        #[arg(required = true)]
        folder: String,
        #[arg(short = 'w', long)]
        ignore_whitespace: bool,
    },
    /// Fail if the path exists.
    Absent {
        #[arg(required = true)]
        path: String,
    },
    /// List the cases and checks of a suite.
    List {
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}
