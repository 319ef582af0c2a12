//! Main CLI application structure

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use super::analyze::{self, Overrides};
use super::logging;
use super::output::{Output, OutputFormat};
use crate::config::AnalyzerConfig;
use crate::engine::Analyzer;
use crate::scoring::Strategy;

#[derive(Parser)]
#[command(name = "task-analyzer")]
#[command(author, version, about = "Dependency-aware task prioritization")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Config file (defaults to ./task-analyzer.toml, then the user config dir)
    #[arg(long, global = true, env = "TASK_ANALYZER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score every task and print them in dependency order
    Analyze {
        /// Task document (JSON or YAML); stdin when omitted or "-"
        input: Option<PathBuf>,

        /// Scoring strategy (overrides the document and config)
        #[arg(long, short)]
        strategy: Option<String>,

        /// Reference date for deadlines, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Show the highest-priority tasks
    Suggest {
        /// Task document (JSON or YAML); stdin when omitted or "-"
        input: Option<PathBuf>,

        /// Number of tasks to show (defaults to suggest_limit from config)
        #[arg(long, short = 'n')]
        limit: Option<usize>,

        /// Scoring strategy (overrides the document and config)
        #[arg(long, short)]
        strategy: Option<String>,

        /// Reference date for deadlines, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Check a task document and print its dependency order
    Validate {
        /// Task document (JSON or YAML); stdin when omitted or "-"
        input: Option<PathBuf>,
    },

    /// List the available scoring strategies
    Strategies,
}

/// Main entry point for the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new(cli.format);

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("Warning: {:#}", e);
    }

    match execute(cli, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            output.failure(&e);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli, output: &Output) -> Result<()> {
    let config = AnalyzerConfig::load(cli.config.as_deref())?;
    let analyzer = Analyzer::new(config);

    match cli.command {
        Commands::Analyze { input, strategy, today } => {
            let overrides = Overrides { strategy, today };
            analyze::analyze(output, &analyzer, input.as_deref(), overrides)
        }
        Commands::Suggest { input, limit, strategy, today } => {
            let overrides = Overrides { strategy, today };
            analyze::suggest(output, &analyzer, input.as_deref(), overrides, limit)
        }
        Commands::Validate { input } => analyze::validate(output, &analyzer, input.as_deref()),
        Commands::Strategies => strategies(output, &analyzer),
    }
}

/// Lists the known strategies, marking the configured default
fn strategies(output: &Output, analyzer: &Analyzer) -> Result<()> {
    let default = analyzer.config().default_strategy;

    if output.is_json() {
        let items: Vec<_> = Strategy::ALL
            .iter()
            .map(|s| {
                serde_json::json!({
                    "name": s.name(),
                    "description": s.description(),
                    "default": *s == default,
                })
            })
            .collect();
        output.data(&items);
    } else {
        println!("{:<22} DESCRIPTION", "STRATEGY");
        println!("{}", "-".repeat(80));
        for s in Strategy::ALL {
            let marker = if s == default { " (default)" } else { "" };
            println!("{:<22} {}{}", s.name(), s.description(), marker);
        }
    }

    Ok(())
}
