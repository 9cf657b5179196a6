use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use termcolor::ColorChoice;

pub const DEFAULT_DIFF_TOOL: &str = "kdiff3";

/// How a run's results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Whether reports are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    /// Color when stdout is a terminal, honouring `NO_COLOR` and `TERM=dumb`.
    Auto,
    Always,
    Never,
}

/// Configuration for comparison and reporting.
///
/// Defaults are overridden by the suite manifest (`root`, `diff_tool`) and
/// then by command-line flags.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Directory containing `test/` and `test/expected/`.
    pub root: PathBuf,
    /// Tool named in the mismatch hint.
    pub diff_tool: String,
    pub color: ColorMode,
    /// Rewrite fixtures from actual output instead of failing.
    pub update: bool,
    pub format: ReportFormat,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            diff_tool: DEFAULT_DIFF_TOOL.to_string(),
            color: ColorMode::Auto,
            update: false,
            format: ReportFormat::Text,
        }
    }
}

impl HarnessConfig {
    /// Maps the color mode onto termcolor's choice for stdout.
    pub fn color_choice(&self) -> ColorChoice {
        match self.color {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto if atty::is(atty::Stream::Stdout) => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_cwd_and_kdiff3() {
        let config = HarnessConfig::default();
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.diff_tool, "kdiff3");
        assert!(!config.update);
        assert_eq!(config.format, ReportFormat::Text);
        assert_eq!(config.color, ColorMode::Auto);
    }

    #[test]
    fn explicit_color_modes_bypass_detection() {
        let mut config = HarnessConfig {
            color: ColorMode::Always,
            ..HarnessConfig::default()
        };
        assert_eq!(config.color_choice(), ColorChoice::Always);
        config.color = ColorMode::Never;
        assert_eq!(config.color_choice(), ColorChoice::Never);
    }
}
