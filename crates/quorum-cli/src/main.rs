#![forbid(unsafe_code)]

mod cmd;
mod config;
mod output;

use clap::{Parser, Subcommand};
use output::{CliError, OutputMode};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "quorum: authority ranking and Benford deviation audits",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (defaults to pretty on a TTY, text when piped).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file to use instead of `.quorum/config.toml`.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags and environment.
    fn output_mode(&self) -> OutputMode {
        output::resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Rank entities by reversed-edge authority",
        long_about = "Build a directed graph from relationship records, reverse every edge, and \
                      rank entities by PageRank so that root controllers score highest.",
        after_help = "EXAMPLES:\n    # Rank the built-in demo dataset\n    quorum authority\n\n    # Rank relationships from a file\n    quorum authority --input relationships.json --threshold 0.1\n\n    # Emit machine-readable output\n    quorum authority --format json"
    )]
    Authority(cmd::authority::AuthorityArgs),

    #[command(
        about = "Score a numeric sample against Benford's law",
        long_about = "Compute the leading-digit distribution of a sample and its mean absolute \
                      deviation from the Benford reference distribution.",
        after_help = "EXAMPLES:\n    # Score values from a file, one integer per line\n    quorum benford --input totals.txt\n\n    # Score a synthetic uniform sample\n    quorum benford --synthetic engineered --seed 7\n\n    # Emit machine-readable output\n    quorum benford --input totals.txt --format json"
    )]
    Benford(cmd::benford::BenfordArgs),

    #[command(
        about = "Run both diagnostics on the demo inputs",
        long_about = "Rank the demo relationship dataset and score an organic and an engineered \
                      synthetic sample, then print a combined report.",
        after_help = "EXAMPLES:\n    # Full demo audit\n    quorum audit\n\n    # Smaller samples with another seed\n    quorum audit --seed 7 --size 1000"
    )]
    Audit(cmd::audit::AuditArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("QUORUM_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "quorum=debug,info"
        } else {
            "quorum=info,warn"
        })
    });

    let format = env::var("QUORUM_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    let project_root = env::current_dir()?;
    let config = config::load_config(cli.config.as_deref(), &project_root)?;

    match cli.command {
        Commands::Authority(ref args) => cmd::authority::run_authority(args, output, &config),
        Commands::Benford(ref args) => cmd::benford::run_benford(args, output, &config),
        Commands::Audit(ref args) => cmd::audit::run_audit(args, output, &config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = cli.output_mode();
    debug!(?output, "resolved output mode");

    match run(&cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("command failed: {err:#}");
            if let Err(render_err) = output::render_error(output, &CliError::from(&err)) {
                eprintln!("error: {err:#} ({render_err})");
            }
            ExitCode::FAILURE
        }
    }
}
