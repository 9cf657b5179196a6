//! Case selection and execution.

use log::{debug, info};
use serde::Serialize;

use crate::compare::{Comparator, Outcome};
use crate::config::HarnessConfig;
use crate::suite::{Case, Check, Suite};

/// The result of running (or skipping) one case.
#[derive(Debug)]
pub enum CaseResult {
    Pass {
        name: String,
        outcomes: Vec<Outcome>,
    },
    /// At least one outcome is a failure; all outcomes are kept.
    Fail {
        name: String,
        outcomes: Vec<Outcome>,
    },
    Skipped {
        name: String,
        reason: String,
    },
}

impl CaseResult {
    pub fn name(&self) -> &str {
        match self {
            CaseResult::Pass { name, .. }
            | CaseResult::Fail { name, .. }
            | CaseResult::Skipped { name, .. } => name,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        let outcomes: &[Outcome] = match self {
            CaseResult::Fail { outcomes, .. } => outcomes,
            _ => &[],
        };
        outcomes.iter().filter(|o| o.is_failure())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// Tally results by outcome type.
pub fn partition_results(results: &[CaseResult]) -> Summary {
    let mut summary = Summary::default();
    for r in results {
        match r {
            CaseResult::Pass { .. } => summary.passed += 1,
            CaseResult::Fail { .. } => summary.failed += 1,
            CaseResult::Skipped { .. } => summary.skipped += 1,
        }
    }
    summary
}

/// Why a case should not run, if it shouldn't.
pub fn skip_reason(case: &Case, has_only: bool, filter: Option<&str>) -> Option<String> {
    if has_only && !case.only {
        return Some("Not marked 'only' in 'only' mode".to_string());
    }
    if case.skip {
        return Some("Marked 'skip'".to_string());
    }
    if let Some(f) = filter {
        if !case.name.to_lowercase().contains(&f.to_lowercase()) {
            return Some(format!("Filtered out by substring: {}", f));
        }
    }
    None
}

/// Runs a single check, expanding directories into one outcome per fixture.
pub fn run_check(cmp: &Comparator<'_>, check: &Check) -> Vec<Outcome> {
    match check {
        Check::File {
            file,
            ignore_whitespace,
        } => vec![cmp.test_file(file, *ignore_whitespace)],
        Check::ExpectedFile {
            expected_file,
            ignore_whitespace,
        } => vec![cmp.test_expected_file(expected_file, *ignore_whitespace)],
        Check::Directory {
            directory,
            ignore_whitespace,
        } => cmp.test_directory(directory, *ignore_whitespace),
        Check::Absent { absent } => vec![cmp.assert_file_does_not_exist(absent)],
    }
}

/// Runs every check of a case in order. Later checks still run after a failure.
pub fn run_case(cmp: &Comparator<'_>, case: &Case) -> CaseResult {
    debug!("running case '{}'", case.name);
    let outcomes: Vec<Outcome> = case
        .checks
        .iter()
        .flat_map(|check| run_check(cmp, check))
        .collect();
    let name = case.name.clone();
    if outcomes.iter().any(Outcome::is_failure) {
        CaseResult::Fail { name, outcomes }
    } else {
        CaseResult::Pass { name, outcomes }
    }
}

/// Runs a suite with optional name filtering.
pub fn run_suite(
    suite: &Suite,
    config: &HarnessConfig,
    filter: Option<&str>,
) -> (Vec<CaseResult>, Summary) {
    info!(
        "running suite '{}' under {}",
        suite.name,
        config.root.display()
    );
    let cmp = Comparator::new(config);
    let has_only = suite.cases.iter().any(|c| c.only);

    let results: Vec<CaseResult> = suite
        .cases
        .iter()
        .map(|case| match skip_reason(case, has_only, filter) {
            Some(reason) => CaseResult::Skipped {
                name: case.name.clone(),
                reason,
            },
            None => run_case(&cmp, case),
        })
        .collect();

    let summary = partition_results(&results);
    info!(
        "suite '{}' finished: {} passed, {} failed, {} skipped",
        suite.name, summary.passed, summary.failed, summary.skipped
    );
    (results, summary)
}
