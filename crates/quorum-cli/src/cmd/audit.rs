//! `quorum audit`: run both diagnostics on the built-in demo inputs.
//!
//! Ranks the demo relationship dataset, then scores an organic and an
//! engineered synthetic sample drawn with the same seed.

use std::io::Write;

use clap::Args;
use quorum_core::{AnalysisConfig, SampleConfig};
use quorum_metrics::{DirectedGraph, RankConfig};
use quorum_sim::SampleKind;
use serde::Serialize;
use tracing::info;

use crate::cmd::authority::{self, AuthorityReport, render_authority_pretty};
use crate::cmd::benford::{self, BenfordReport, render_benford_pretty, synthetic_label, verdict};
use crate::output::{OutputMode, heading, render_mode};

/// Arguments for `quorum audit`.
#[derive(Args, Debug, Default)]
pub struct AuditArgs {
    /// Seed for both synthetic samples.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of values to draw per synthetic sample.
    #[arg(long)]
    pub size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct AuditReport {
    pub authority: AuthorityReport,
    pub samples: Vec<BenfordReport>,
}

/// Execute `quorum audit`.
pub fn run_audit(
    args: &AuditArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let report = build_audit(args, config)?;
    info!(
        leaders = report.authority.leaders.len(),
        anomalous = report.samples.iter().filter(|s| s.anomalous).count(),
        "audit complete"
    );
    render_mode(output, &report, render_audit_text, render_audit_pretty)
}

fn build_audit(args: &AuditArgs, config: &AnalysisConfig) -> anyhow::Result<AuditReport> {
    let relationships = quorum_sim::demo_relationships()?;
    let graph = DirectedGraph::from_relationships(&relationships);
    let authority = authority::build_report(
        "demo".to_string(),
        &graph,
        &RankConfig::from(&config.authority),
        config.authority.leader_threshold,
    )?;

    let sample_config = SampleConfig {
        seed: args.seed.unwrap_or(config.simulation.seed),
        size: args.size.unwrap_or(config.simulation.size),
    };
    let mut samples = Vec::new();
    for kind in [SampleKind::Organic, SampleKind::Engineered] {
        let sample = quorum_sim::generate(kind, sample_config)?;
        samples.push(benford::build_report(
            synthetic_label(kind, sample_config),
            &sample,
            false,
            config.benford.anomaly_threshold,
        )?);
    }

    Ok(AuditReport { authority, samples })
}

fn render_audit_text(report: &AuditReport, w: &mut dyn Write) -> std::io::Result<()> {
    let leaders: Vec<&str> = report
        .authority
        .leaders
        .iter()
        .map(|leader| leader.id.as_str())
        .collect();
    writeln!(
        w,
        "authority converged={} leaders={}",
        report.authority.converged,
        leaders.join(",")
    )?;
    for sample in &report.samples {
        writeln!(
            w,
            "benford sample=\"{}\" deviation={} anomalous={}",
            sample.sample, sample.deviation, sample.anomalous
        )?;
    }
    Ok(())
}

fn render_audit_pretty(report: &AuditReport, w: &mut dyn Write) -> std::io::Result<()> {
    render_authority_pretty(&report.authority, w)?;
    for sample in &report.samples {
        writeln!(w)?;
        render_benford_pretty(sample, w)?;
    }

    writeln!(w)?;
    heading(w, "Summary")?;
    match report.authority.leaders.first() {
        Some(top) => writeln!(
            w,
            "Top authority: {} ({:.4}), {} leader(s) above {:.3}",
            top.id,
            top.score,
            report.authority.leaders.len(),
            report.authority.threshold
        )?,
        None => writeln!(w, "No entity stands out as a leader.")?,
    }
    for sample in &report.samples {
        writeln!(
            w,
            "{}: {} ({})",
            sample.sample,
            sample.deviation,
            verdict(sample.anomalous)
        )?;
    }
    Ok(())
}
