//! How command results reach the terminal.
//!
//! Each report is a `Serialize` struct with two hand-written renderers, one
//! terse (`text`) and one framed for people (`pretty`); `json` needs no
//! renderer. The mode comes from the first of these that is set:
//!
//! 1. `--format`, or the hidden `--json` shorthand
//! 2. the `FORMAT` environment variable (case-insensitive mode name)
//! 3. whether stdout is a terminal: `pretty` if so, `text` otherwise

use clap::ValueEnum;
use quorum_core::config::ConfigError;
use quorum_core::{AnalysisError, ErrorCode};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

/// Column width of the rule under a pretty heading.
const RULE_WIDTH: usize = 72;

/// Write `title` underlined with a dashed rule.
pub fn heading(w: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(w, "{title}\n{}", "-".repeat(RULE_WIDTH))
}

/// Write a `Label:  value` line with labels padded to a common column.
pub fn field(w: &mut dyn Write, label: &str, value: impl AsRef<str>) -> io::Result<()> {
    let label = format!("{label}:");
    writeln!(w, "{label:<14} {}", value.as_ref())
}

/// How a command prints its report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Sections, aligned tables and a verdict line.
    Pretty,
    /// One `key=value` record per line, for scripts.
    Text,
    /// The report struct serialized as pretty-printed JSON.
    Json,
}

impl OutputMode {
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }

    /// Parse a `FORMAT` value; unrecognized names are ignored.
    fn from_env_value(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value.trim(), true).ok()
    }
}

fn pick_output_mode(
    flag: Option<OutputMode>,
    json_shorthand: bool,
    env_value: Option<&str>,
    stdout_is_tty: bool,
) -> OutputMode {
    flag.or_else(|| json_shorthand.then_some(OutputMode::Json))
        .or_else(|| env_value.and_then(OutputMode::from_env_value))
        .unwrap_or(if stdout_is_tty {
            OutputMode::Pretty
        } else {
            OutputMode::Text
        })
}

/// Settle the output mode for this process.
pub fn resolve_output_mode(flag: Option<OutputMode>, json_shorthand: bool) -> OutputMode {
    let env_value = std::env::var("FORMAT").ok();
    pick_output_mode(
        flag,
        json_shorthand,
        env_value.as_deref(),
        io::stdout().is_terminal(),
    )
}

/// Print `report` to stdout in `mode`.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    report: &T,
    text: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    write_mode(&mut stdout.lock(), mode, report, text, pretty)
}

fn write_mode<T: Serialize>(
    out: &mut dyn Write,
    mode: OutputMode,
    report: &T,
    text: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputMode::Text => text(report, out)?,
        OutputMode::Pretty => pretty(report, out)?,
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. "E2001").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Create an error with a suggestion and error code.
    #[cfg(test)]
    pub fn with_details(
        message: impl Into<String>,
        suggestion: impl Into<String>,
        error_code: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            suggestion: Some(suggestion.into()),
            error_code: Some(error_code.into()),
        }
    }

    fn from_code(message: String, code: ErrorCode) -> Self {
        Self {
            message,
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
        }
    }
}

impl From<&AnalysisError> for CliError {
    fn from(err: &AnalysisError) -> Self {
        Self::from_code(err.to_string(), err.code())
    }
}

/// Classify a command failure by the typed error at the root of its chain.
impl From<&anyhow::Error> for CliError {
    fn from(err: &anyhow::Error) -> Self {
        Self::from_code(format!("{err:#}"), classify(err))
    }
}

fn classify(err: &anyhow::Error) -> ErrorCode {
    if let Some(analysis) = err.downcast_ref::<AnalysisError>() {
        return analysis.code();
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return ErrorCode::ConfigParseError;
    }
    if err.downcast_ref::<serde_json::Error>().is_some()
        || err.downcast_ref::<std::num::ParseIntError>().is_some()
    {
        return ErrorCode::InputParseFailed;
    }
    if err.downcast_ref::<io::Error>().is_some() {
        return ErrorCode::InputReadFailed;
    }
    ErrorCode::InternalUnexpected
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(&mut out, mode, error)
}

fn write_error(out: &mut dyn Write, mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    if mode.is_json() {
        let wrapper = serde_json::json!({
            "error": error,
        });
        serde_json::to_writer_pretty(&mut *out, &wrapper)?;
        writeln!(out)?;
        return Ok(());
    }

    match error.error_code {
        Some(ref code) => writeln!(out, "error[{code}]: {}", error.message)?,
        None => writeln!(out, "error: {}", error.message)?,
    }
    if let Some(ref suggestion) = error.suggestion {
        writeln!(out, "  suggestion: {suggestion}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use quorum_core::RecordField;

    // ── mode selection ──────────────────────────────────────────────────────

    #[test]
    fn mode_selection_precedence() {
        use OutputMode::{Json, Pretty, Text};
        let cases = [
            // (flag, --json, FORMAT, tty) => expected
            ((Some(Text), true, Some("pretty"), true), Text),
            ((None, true, Some("pretty"), true), Json),
            ((None, false, Some("json"), false), Json),
            ((None, false, Some(" Pretty "), false), Pretty),
            ((None, false, None, true), Pretty),
            ((None, false, None, false), Text),
        ];
        for ((flag, json, env, tty), expected) in cases {
            assert_eq!(
                pick_output_mode(flag, json, env, tty),
                expected,
                "flag={flag:?} json={json} env={env:?} tty={tty}"
            );
        }
    }

    #[test]
    fn unknown_format_env_is_ignored() {
        assert_eq!(pick_output_mode(None, false, Some("yaml"), true), OutputMode::Pretty);
        assert_eq!(pick_output_mode(None, false, Some(""), false), OutputMode::Text);
    }

    #[test]
    fn heading_and_field_layout() {
        let mut buf = Vec::new();
        heading(&mut buf, "Report").expect("heading");
        field(&mut buf, "Values", "12").expect("field");
        let rendered = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Report");
        assert_eq!(lines[1].len(), RULE_WIDTH);
        assert_eq!(lines[2], "Values:        12");
    }

    // ── write_mode ──────────────────────────────────────────────────────────

    #[derive(Serialize)]
    struct TestData {
        name: String,
    }

    #[test]
    fn write_mode_json_is_parseable() {
        let data = TestData {
            name: "test".into(),
        };
        let mut buf = Vec::new();
        write_mode(&mut buf, OutputMode::Json, &data, |_, _| Ok(()), |_, _| Ok(()))
            .expect("render");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(value["name"], "test");
    }

    #[test]
    fn write_mode_dispatches_text_and_pretty() {
        let data = TestData {
            name: "test".into(),
        };
        let mut text = Vec::new();
        write_mode(
            &mut text,
            OutputMode::Text,
            &data,
            |d, w| writeln!(w, "text {}", d.name),
            |d, w| writeln!(w, "pretty {}", d.name),
        )
        .expect("render");
        assert_eq!(String::from_utf8(text).expect("utf8"), "text test\n");

        let mut pretty = Vec::new();
        write_mode(
            &mut pretty,
            OutputMode::Pretty,
            &data,
            |d, w| writeln!(w, "text {}", d.name),
            |d, w| writeln!(w, "pretty {}", d.name),
        )
        .expect("render");
        assert_eq!(String::from_utf8(pretty).expect("utf8"), "pretty test\n");
    }

    // ── Errors ──────────────────────────────────────────────────────────────

    #[test]
    fn cli_error_from_analysis_error() {
        let err = AnalysisError::DataFormat {
            index: 2,
            field: RecordField::Source,
        };
        let cli_err = CliError::from(&err);
        assert!(cli_err.message.contains("record 2"));
        assert_eq!(cli_err.error_code.as_deref(), Some("E2001"));
        assert!(cli_err.suggestion.is_some());
    }

    #[test]
    fn anyhow_chain_is_classified_by_root_cause() {
        let err = anyhow::Error::from(AnalysisError::EmptySample).context("scoring sample");
        let cli_err = CliError::from(&err);
        assert_eq!(cli_err.error_code.as_deref(), Some("E2003"));
        assert!(cli_err.message.starts_with("scoring sample: "));

        let io_err: anyhow::Result<()> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone")).context("reading input");
        let cli_err = CliError::from(&io_err.expect_err("io error"));
        assert_eq!(cli_err.error_code.as_deref(), Some("E5001"));

        let parse_err = anyhow::Error::from("x1".parse::<i64>().expect_err("not a number"));
        assert_eq!(CliError::from(&parse_err).error_code.as_deref(), Some("E5002"));

        let other = anyhow::anyhow!("something odd");
        assert_eq!(CliError::from(&other).error_code.as_deref(), Some("E9001"));
    }

    #[test]
    fn write_error_human_includes_code_and_suggestion() {
        let err = CliError::with_details("bad input", "try again", "E2002");
        let mut buf = Vec::new();
        write_error(&mut buf, OutputMode::Text, &err).expect("render");
        let rendered = String::from_utf8(buf).expect("utf8");
        assert!(rendered.contains("error[E2002]: bad input"));
        assert!(rendered.contains("suggestion: try again"));
    }

    #[test]
    fn write_error_json_wraps_in_error_key() {
        let err = CliError::with_details("bad input", "try again", "E2002");
        let mut buf = Vec::new();
        write_error(&mut buf, OutputMode::Json, &err).expect("render");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(value["error"]["error_code"], "E2002");
        assert_eq!(value["error"]["message"], "bad input");
    }
}
