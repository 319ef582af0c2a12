//! Task Analyzer - dependency-aware task prioritization

use std::process::ExitCode;

fn main() -> ExitCode {
    task_analyzer::cli::run()
}
