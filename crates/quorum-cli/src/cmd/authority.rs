//! `quorum authority`: rank entities by reversed-edge authority.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use quorum_core::{AnalysisConfig, AnalysisError, RelationshipRecord};
use quorum_metrics::metrics::rank;
use quorum_metrics::{DirectedGraph, GraphStats, RankConfig, RankedEntity};
use serde::Serialize;
use tracing::{info, instrument};

use crate::output::{OutputMode, field, heading, render_mode};

/// Arguments for `quorum authority`.
#[derive(Args, Debug, Default)]
pub struct AuthorityArgs {
    /// JSON array of `{source, target, kind}` records. Uses the built-in demo
    /// dataset when omitted.
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Report entities scoring strictly above this as leaders.
    #[arg(long)]
    pub threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct AuthorityReport {
    /// Where the relationships came from: a file path or `"demo"`.
    pub dataset: String,
    pub content_hash: String,
    pub stats: GraphStats,
    pub iterations: usize,
    pub converged: bool,
    pub floor: f64,
    pub threshold: f64,
    pub leaders: Vec<RankedEntity>,
    pub ranking: Vec<RankedEntity>,
}

/// Execute `quorum authority`.
pub fn run_authority(
    args: &AuthorityArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let (dataset, graph) = match args.input {
        Some(ref path) => (path.display().to_string(), load_graph(path)?),
        None => {
            let relationships = quorum_sim::demo_relationships()?;
            ("demo".to_string(), DirectedGraph::from_relationships(&relationships))
        }
    };

    let threshold = args
        .threshold
        .unwrap_or(config.authority.leader_threshold);
    let report = build_report(dataset, &graph, &RankConfig::from(&config.authority), threshold)?;

    render_mode(
        output,
        &report,
        render_authority_text,
        render_authority_pretty,
    )
}

/// Read and shape-check a relationship file.
fn load_graph(path: &Path) -> anyhow::Result<DirectedGraph> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let records: Vec<RelationshipRecord> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let graph = DirectedGraph::from_records(&records)
        .with_context(|| format!("invalid relationship in {}", path.display()))?;
    info!(
        path = %path.display(),
        records = records.len(),
        "loaded relationships"
    );
    Ok(graph)
}

/// Rank `graph` and assemble the report shared by `authority` and `audit`.
#[instrument(skip(graph, config))]
pub fn build_report(
    dataset: String,
    graph: &DirectedGraph,
    config: &RankConfig,
    threshold: f64,
) -> Result<AuthorityReport, AnalysisError> {
    let scores = rank(graph, config)?;
    Ok(AuthorityReport {
        dataset,
        content_hash: graph.content_hash().to_string(),
        stats: GraphStats::from_graph(graph),
        iterations: scores.iterations,
        converged: scores.converged,
        floor: scores.floor,
        threshold,
        leaders: scores.leaders(threshold),
        ranking: scores.ranked(),
    })
}

fn render_authority_text(report: &AuthorityReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "dataset={} nodes={} edges={} iterations={} converged={}",
        report.dataset,
        report.stats.node_count,
        report.stats.edge_count,
        report.iterations,
        report.converged
    )?;
    for entry in &report.ranking {
        let marker = if entry.score > report.threshold {
            "*"
        } else {
            "-"
        };
        writeln!(w, "{marker} {:.6}  {}", entry.score, entry.id)?;
    }
    Ok(())
}

pub fn render_authority_pretty(report: &AuthorityReport, w: &mut dyn Write) -> std::io::Result<()> {
    heading(w, "Authority Ranking")?;
    field(w, "Dataset", &report.dataset)?;
    field(w, "Content hash", &report.content_hash)?;
    field(
        w,
        "Graph",
        format!(
            "{} entities, {} edges ({} relationships), density {:.3}",
            report.stats.node_count,
            report.stats.edge_count,
            report.stats.relationship_count,
            report.stats.density
        ),
    )?;
    field(
        w,
        "Iterations",
        format!("{} ({})", report.iterations, convergence_label(report.converged)),
    )?;
    field(w, "Floor", format!("{:.6}", report.floor))?;
    if !report.converged {
        writeln!(
            w,
            "\nLow confidence: ranking stopped at the iteration cap before converging."
        )?;
    }

    writeln!(w)?;
    if report.leaders.is_empty() {
        writeln!(w, "No entities above {:.3}.", report.threshold)?;
    } else {
        writeln!(w, "Leaders (score > {:.3}):", report.threshold)?;
        for leader in &report.leaders {
            writeln!(w, "  {:<28} {:.4}", leader.id.as_str(), leader.score)?;
        }
    }

    writeln!(w)?;
    writeln!(w, "{:>4}  {:<28} {:>8}", "RANK", "ENTITY", "SCORE")?;
    for (idx, entry) in report.ranking.iter().enumerate() {
        writeln!(
            w,
            "{:>4}  {:<28} {:>8.4}",
            idx + 1,
            entry.id.as_str(),
            entry.score
        )?;
    }
    Ok(())
}

const fn convergence_label(converged: bool) -> &'static str {
    if converged {
        "converged"
    } else {
        "not converged"
    }
}
