//! Rendering run results for people (colored text) and for CI (JSON).

use std::io::{self, Write};

use difference::{Changeset, Difference};
use serde::Serialize;
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

use crate::compare::{Mismatch, Outcome};
use crate::config::{HarnessConfig, ReportFormat};
use crate::diagnostics::Result;
use crate::runner::{CaseResult, Summary};

// Unchanged runs longer than this are collapsed in diffs.
const DIFF_CONTEXT: usize = 3;

/// Writes the report in the configured format to stdout.
pub fn print_report(
    suite: &str,
    results: &[CaseResult],
    summary: &Summary,
    config: &HarnessConfig,
) -> Result<()> {
    match config.format {
        ReportFormat::Text => {
            let mut stdout = StandardStream::stdout(config.color_choice());
            write_text(&mut stdout, results, summary)?;
        }
        ReportFormat::Json => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_json(&mut lock, suite, results, summary)?;
            writeln!(lock)?;
        }
    }
    Ok(())
}

fn status<W: WriteColor>(out: &mut W, label: &str, color: Color) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{label}")?;
    out.reset()
}

/// Prints every case, failure details with diffs, and a summary line.
pub fn write_text<W: WriteColor>(
    out: &mut W,
    results: &[CaseResult],
    summary: &Summary,
) -> io::Result<()> {
    for r in results {
        match r {
            CaseResult::Pass { name, outcomes } => {
                status(out, "PASS", Color::Green)?;
                writeln!(out, ": {name}")?;
                for outcome in outcomes {
                    if let Outcome::Updated { .. } = outcome {
                        writeln!(out, "  {}", outcome.message())?;
                    }
                }
            }
            CaseResult::Fail { name, .. } => {
                status(out, "FAIL", Color::Red)?;
                writeln!(out, ": {name}")?;
                for failure in r.failures() {
                    write_failure(out, failure)?;
                }
            }
            CaseResult::Skipped { name, reason } => {
                status(out, "SKIP", Color::Yellow)?;
                writeln!(out, ": {name} ({reason})")?;
            }
        }
    }

    write!(out, "\nTest summary: total {}, ", summary.total())?;
    status(out, "passed", Color::Green)?;
    write!(out, " {}, ", summary.passed)?;
    status(out, "failed", Color::Red)?;
    write!(out, " {}, ", summary.failed)?;
    status(out, "skipped", Color::Yellow)?;
    writeln!(out, " {}", summary.skipped)?;

    if summary.failed > 0 {
        writeln!(out, "\nFailed tests:")?;
        for r in results {
            if let CaseResult::Fail { name, .. } = r {
                writeln!(out, "  - {name}")?;
            }
        }
    }
    Ok(())
}

fn write_failure<W: WriteColor>(out: &mut W, failure: &Outcome) -> io::Result<()> {
    for line in failure.message().lines() {
        writeln!(out, "  {line}")?;
    }
    if let Outcome::Mismatch(m) = failure {
        writeln!(out, "  Diff (- expected, + actual):")?;
        write_diff(out, m)?;
    }
    Ok(())
}

/// Line diff from the fixture to the actual content.
pub fn write_diff<W: WriteColor>(out: &mut W, mismatch: &Mismatch) -> io::Result<()> {
    let changeset = Changeset::new(&mismatch.expected, &mismatch.actual, "\n");
    for diff in &changeset.diffs {
        match diff {
            Difference::Same(text) => {
                out.reset()?;
                let lines: Vec<&str> = text.lines().collect();
                if lines.len() > DIFF_CONTEXT * 2 {
                    for line in &lines[..DIFF_CONTEXT] {
                        writeln!(out, "     {line}")?;
                    }
                    writeln!(out, "     ... {} unchanged lines", lines.len() - DIFF_CONTEXT * 2)?;
                    for line in &lines[lines.len() - DIFF_CONTEXT..] {
                        writeln!(out, "     {line}")?;
                    }
                } else {
                    for line in lines {
                        writeln!(out, "     {line}")?;
                    }
                }
            }
            Difference::Rem(text) => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                for line in text.lines() {
                    writeln!(out, "   - {line}")?;
                }
                out.reset()?;
            }
            Difference::Add(text) => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                for line in text.lines() {
                    writeln!(out, "   + {line}")?;
                }
                out.reset()?;
            }
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    suite: &'a str,
    summary: &'a Summary,
    results: Vec<JsonCase<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonCase<'a> {
    name: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failures: Vec<JsonFailure>,
}

#[derive(Debug, Serialize)]
struct JsonFailure {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    actual_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected_path: Option<String>,
}

impl From<&Outcome> for JsonFailure {
    fn from(outcome: &Outcome) -> Self {
        let (kind, actual_path, expected_path) = match outcome {
            Outcome::Mismatch(m) => (
                "mismatch",
                Some(m.actual_path.display().to_string()),
                Some(m.expected_path.display().to_string()),
            ),
            Outcome::UnexpectedFile { .. } => ("unexpected_file", None, None),
            Outcome::Error(_) => ("error", None, None),
            Outcome::Match { .. } | Outcome::Updated { .. } => ("ok", None, None),
        };
        JsonFailure {
            kind,
            message: outcome.message(),
            actual_path,
            expected_path,
        }
    }
}

/// Writes a single JSON document describing the run.
pub fn write_json<W: Write>(
    out: &mut W,
    suite: &str,
    results: &[CaseResult],
    summary: &Summary,
) -> Result<()> {
    let results = results
        .iter()
        .map(|r| {
            let (status, reason) = match r {
                CaseResult::Pass { .. } => ("pass", None),
                CaseResult::Fail { .. } => ("fail", None),
                CaseResult::Skipped { reason, .. } => ("skip", Some(reason.as_str())),
            };
            JsonCase {
                name: r.name(),
                status,
                reason,
                failures: r.failures().map(JsonFailure::from).collect(),
            }
        })
        .collect();
    let report = JsonReport {
        suite,
        summary,
        results,
    };
    serde_json::to_writer_pretty(out, &report)?;
    Ok(())
}
