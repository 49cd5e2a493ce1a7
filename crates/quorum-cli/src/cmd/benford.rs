//! `quorum benford`: score a numeric sample against Benford's law.

use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgGroup, Args, ValueEnum};
use quorum_core::{AnalysisConfig, AnalysisError, SampleConfig};
use quorum_metrics::digits::{DigitComparison, compare, positive_only};
use quorum_metrics::{DeviationScore, score_benford_deviation};
use quorum_sim::SampleKind;
use serde::Serialize;
use tracing::{debug, info};

use crate::output::{OutputMode, field, heading, render_mode};

/// Width of the widest bar in the pretty digit chart.
const BAR_WIDTH: f64 = 40.0;

/// Synthetic generator selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Synthetic {
    /// Log-normal magnitudes spanning several decades.
    Organic,
    /// Uniform integers in [1000, 25000).
    Engineered,
}

impl From<Synthetic> for SampleKind {
    fn from(value: Synthetic) -> Self {
        match value {
            Synthetic::Organic => Self::Organic,
            Synthetic::Engineered => Self::Engineered,
        }
    }
}

/// Arguments for `quorum benford`.
#[derive(Args, Debug, Default)]
#[command(group(ArgGroup::new("sample").required(true).args(["input", "synthetic"])))]
pub struct BenfordArgs {
    /// File with one integer per line. Blank lines and `#` comments are ignored.
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Generate a synthetic sample instead of reading a file.
    #[arg(long, value_enum)]
    pub synthetic: Option<Synthetic>,

    /// Seed for the synthetic generator.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of values to draw for a synthetic sample.
    #[arg(long)]
    pub size: Option<usize>,

    /// Deviation (percentage points) above which the sample is flagged.
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Skip zero and negative values instead of rejecting the sample.
    #[arg(long)]
    pub drop_non_positive: bool,
}

#[derive(Debug, Serialize)]
pub struct BenfordReport {
    /// Where the sample came from.
    pub sample: String,
    /// Number of values scored.
    pub values: u64,
    /// Number of non-positive values skipped.
    pub dropped: usize,
    pub digits: Vec<DigitComparison>,
    pub deviation: DeviationScore,
    pub threshold: f64,
    pub anomalous: bool,
}

/// Execute `quorum benford`.
pub fn run_benford(
    args: &BenfordArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let (label, sample) = if let Some(ref path) = args.input {
        (path.display().to_string(), load_sample(path)?)
    } else {
        let kind = SampleKind::from(args.synthetic.unwrap_or(Synthetic::Organic));
        let sample_config = SampleConfig {
            seed: args.seed.unwrap_or(config.simulation.seed),
            size: args.size.unwrap_or(config.simulation.size),
        };
        let sample = quorum_sim::generate(kind, sample_config)?;
        (synthetic_label(kind, sample_config), sample)
    };

    let threshold = args
        .threshold
        .unwrap_or(config.benford.anomaly_threshold);
    let report = build_report(label, &sample, args.drop_non_positive, threshold)
        .context("scoring sample")?;

    render_mode(output, &report, render_benford_text, render_benford_pretty)
}

pub fn synthetic_label(kind: SampleKind, config: SampleConfig) -> String {
    format!(
        "synthetic {} (seed {}, size {})",
        kind.as_str(),
        config.seed,
        config.size
    )
}

fn load_sample(path: &Path) -> anyhow::Result<Vec<i64>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let sample = parse_sample(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    info!(path = %path.display(), values = sample.len(), "loaded sample");
    Ok(sample)
}

/// Parse one integer per line, skipping blank lines and `#` comments.
fn parse_sample(content: &str) -> anyhow::Result<Vec<i64>> {
    let mut sample = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let value = trimmed
            .parse::<i64>()
            .with_context(|| format!("line {}: `{trimmed}` is not an integer", line_no + 1))?;
        sample.push(value);
    }
    Ok(sample)
}

/// Score `sample` and assemble the report shared by `benford` and `audit`.
pub fn build_report(
    sample_label: String,
    sample: &[i64],
    drop_non_positive: bool,
    threshold: f64,
) -> Result<BenfordReport, AnalysisError> {
    let values: Cow<'_, [i64]> = if drop_non_positive {
        Cow::Owned(positive_only(sample))
    } else {
        Cow::Borrowed(sample)
    };
    let dropped = sample.len() - values.len();
    if dropped > 0 {
        debug!(dropped, "skipped non-positive values");
    }

    let (histogram, deviation) = score_benford_deviation(&values)?;
    Ok(BenfordReport {
        sample: sample_label,
        values: histogram.total(),
        dropped,
        digits: compare(&histogram),
        deviation,
        threshold,
        anomalous: deviation.is_anomalous(threshold),
    })
}

fn render_benford_text(report: &BenfordReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "sample={} values={} dropped={}",
        report.sample, report.values, report.dropped
    )?;
    for row in &report.digits {
        writeln!(
            w,
            "digit={} observed={:.2} expected={:.2} diff={:+.2}",
            row.digit, row.observed, row.expected, row.difference
        )?;
    }
    writeln!(
        w,
        "deviation={} threshold={:.2} anomalous={}",
        report.deviation, report.threshold, report.anomalous
    )
}

pub fn render_benford_pretty(report: &BenfordReport, w: &mut dyn Write) -> std::io::Result<()> {
    heading(w, "Benford Deviation")?;
    field(w, "Sample", &report.sample)?;
    field(w, "Values", report.values.to_string())?;
    if report.dropped > 0 {
        field(w, "Dropped", format!("{} non-positive", report.dropped))?;
    }

    writeln!(w)?;
    writeln!(
        w,
        "{:>5}  {:>8}  {:>8}  {:>7}",
        "DIGIT", "OBSERVED", "BENFORD", "DIFF"
    )?;
    for row in &report.digits {
        writeln!(
            w,
            "{:>5}  {:>7.2}%  {:>7.2}%  {:>+7.2}  {}",
            row.digit,
            row.observed,
            row.expected,
            row.difference,
            bar(row.observed)
        )?;
    }

    writeln!(w)?;
    field(
        w,
        "Deviation",
        format!("{} (threshold {:.2})", report.deviation, report.threshold),
    )?;
    field(w, "Verdict", verdict(report.anomalous))
}

pub const fn verdict(anomalous: bool) -> &'static str {
    if anomalous {
        "ANOMALOUS: leading digits deviate from Benford's law"
    } else {
        "consistent with Benford's law"
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar(percentage: f64) -> String {
    let len = (percentage / 100.0 * BAR_WIDTH).round().clamp(0.0, BAR_WIDTH) as usize;
    "#".repeat(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: BenfordArgs,
    }

    #[test]
    fn benford_args_need_a_sample_source() {
        assert!(Wrapper::try_parse_from(["test"]).is_err());
        assert!(Wrapper::try_parse_from(["test", "--input", "a.txt", "--synthetic", "organic"]).is_err());
    }

    #[test]
    fn benford_args_parse_synthetic() {
        let parsed = Wrapper::parse_from([
            "test",
            "--synthetic",
            "engineered",
            "--seed",
            "7",
            "--size",
            "100",
            "--drop-non-positive",
        ]);
        assert_eq!(parsed.args.synthetic, Some(Synthetic::Engineered));
        assert_eq!(parsed.args.seed, Some(7));
        assert_eq!(parsed.args.size, Some(100));
        assert!(parsed.args.drop_non_positive);
    }

    #[test]
    fn parse_sample_skips_blanks_and_comments() {
        let sample = parse_sample("# totals\n120\n\n  45 \n# end\n9\n").expect("parse");
        assert_eq!(sample, vec![120, 45, 9]);
    }

    #[test]
    fn parse_sample_reports_line_number() {
        let err = parse_sample("1\n2\nthree\n").expect_err("bad line");
        assert!(err.to_string().contains("line 3"), "err={err}");
    }

    #[test]
    fn build_report_drops_non_positive_on_request() {
        let report = build_report("t".into(), &[0, 15, -2, 300], true, 2.0).expect("report");
        assert_eq!(report.values, 2);
        assert_eq!(report.dropped, 2);
        assert_eq!(report.digits.len(), 9);
    }

    #[test]
    fn build_report_rejects_non_positive_by_default() {
        let err = build_report("t".into(), &[15, 0], false, 2.0).expect_err("zero");
        assert_eq!(err, AnalysisError::ValueRange { index: 1, value: 0 });
    }

    #[test]
    fn engineered_sample_is_flagged() {
        let config = SampleConfig::default();
        let sample = quorum_sim::engineered_sample(config);
        let report = build_report(
            synthetic_label(SampleKind::Engineered, config),
            &sample,
            false,
            2.0,
        )
        .expect("report");
        assert!(report.anomalous);
        assert!(report.sample.contains("seed 42"));
    }

    #[test]
    fn render_pretty_shows_table_and_verdict() {
        let report = build_report("t".into(), &[1, 2, 3, 4, 5, 6, 7, 8, 9], false, 2.0)
            .expect("report");
        let mut out = Vec::new();
        render_benford_pretty(&report, &mut out).expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("Benford Deviation"));
        assert!(rendered.contains("DIGIT"));
        assert!(rendered.contains("ANOMALOUS"));
    }

    #[test]
    fn render_text_is_one_line_per_digit() {
        let report = build_report("t".into(), &[1, 10, 100], false, 2.0).expect("report");
        let mut out = Vec::new();
        render_benford_text(&report, &mut out).expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert_eq!(rendered.lines().count(), 11);
        assert!(rendered.contains("digit=1 observed=100.00"));
    }

    #[test]
    fn bar_scales_to_width() {
        assert_eq!(bar(0.0), "");
        assert_eq!(bar(100.0).len(), 40);
        assert_eq!(bar(50.0).len(), 20);
    }
}
