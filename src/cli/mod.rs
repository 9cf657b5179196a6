//! The fixcheck command-line interface.
//!
//! Every subcommand is expressed as a suite: `run` and `list` load one, the
//! single-check commands build a one-case suite on the fly. That keeps
//! reporting and exit codes identical across commands.

use std::path::Path;

use clap::Parser;
use log::debug;

use crate::cli::args::{Command, FixcheckArgs};
use crate::config::HarnessConfig;
use crate::diagnostics::Result;
use crate::report::print_report;
use crate::runner::run_suite;
use crate::suite::{Case, Check, Suite};

pub mod args;

/// Exit status when every check passed.
pub const EXIT_OK: i32 = 0;
/// Exit status when at least one check failed.
pub const EXIT_FAILED: i32 = 1;
/// Exit status when the harness itself could not run.
pub const EXIT_ERROR: i32 = 2;

/// The main entry point for the CLI. Returns the process exit status.
pub fn run() -> i32 {
    let args = FixcheckArgs::parse();
    match execute(&args) {
        Ok(true) => EXIT_OK,
        Ok(false) => EXIT_FAILED,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            EXIT_ERROR
        }
    }
}

/// Dispatches a parsed command line. `Ok(false)` means checks failed.
pub fn execute(args: &FixcheckArgs) -> Result<bool> {
    let suite = match &args.command {
        Command::Run { manifest, .. } => load_suite(manifest.as_deref())?,
        Command::List { manifest } => {
            let suite = load_suite(manifest.as_deref())?;
            print_suite(&suite);
            return Ok(true);
        }
        Command::File {
            path,
            ignore_whitespace,
        } => single_check(
            "file",
            Check::File {
                file: path.clone(),
                ignore_whitespace: *ignore_whitespace,
            },
        ),
        Command::Expected {
            path,
            ignore_whitespace,
        } => single_check(
            "expected",
            Check::ExpectedFile {
                expected_file: path.clone(),
                ignore_whitespace: *ignore_whitespace,
            },
        ),
        Command::Dir {
            folder,
            ignore_whitespace,
        } => single_check(
            "dir",
            Check::Directory {
                directory: folder.clone(),
                ignore_whitespace: *ignore_whitespace,
            },
        ),
        Command::Absent { path } => single_check(
            "absent",
            Check::Absent {
                absent: path.clone(),
            },
        ),
    };

    let filter = match &args.command {
        Command::Run { filter, .. } => filter.as_deref(),
        _ => None,
    };
    let config = build_config(args, &suite);
    debug!("effective config: {config:?}");

    let (results, summary) = run_suite(&suite, &config, filter);
    print_report(&suite.name, &results, &summary, &config)?;
    Ok(summary.success())
}

fn load_suite(manifest: Option<&Path>) -> Result<Suite> {
    match manifest {
        Some(path) => Suite::load(path),
        None => Suite::builtin(),
    }
}

fn single_check(name: &str, check: Check) -> Suite {
    Suite {
        name: name.to_string(),
        root: None,
        diff_tool: None,
        cases: vec![Case {
            name: check.to_string(),
            checks: vec![check],
            skip: false,
            only: false,
        }],
    }
}

/// Layers defaults, then suite settings, then command-line flags.
pub fn build_config(args: &FixcheckArgs, suite: &Suite) -> HarnessConfig {
    let mut config = HarnessConfig::default();
    if let Some(root) = &suite.root {
        config.root = root.clone();
    }
    if let Some(tool) = &suite.diff_tool {
        config.diff_tool = tool.clone();
    }
    if let Some(root) = &args.root {
        config.root = root.clone();
    }
    if let Some(tool) = &args.diff_tool {
        config.diff_tool = tool.clone();
    }
    config.color = args.color;
    config.update = args.update;
    config.format = args.format;
    config
}

fn print_suite(suite: &Suite) {
    println!("{} ({} cases)", suite.name, suite.cases.len());
    for case in &suite.cases {
        let mut flags = String::new();
        if case.skip {
            flags.push_str(" [skip]");
        }
        if case.only {
            flags.push_str(" [only]");
        }
        println!("  {}{}", case.name, flags);
        for check in &case.checks {
            println!("    - {check}");
        }
    }
}
