//! # Command-Line Interface
//!
//! The transport around the analysis engine: reads task documents, runs the
//! [`Analyzer`](crate::engine::Analyzer), renders results.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `analyze` | Score every task, in dependency order |
//! | `suggest` | Show the top tasks by score |
//! | `validate` | Check a document and print the dependency order |
//! | `strategies` | List scoring strategies |
//!
//! ## Input
//!
//! A JSON (or `.yaml`/`.yml`) document: either an array of tasks or an
//! object with `tasks` and optional `strategy` and `today`. Reads stdin when
//! no file is given.
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! Errors go to stderr; in JSON mode as `{"success": false, "kind": ..., "error": ...}`.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod analyze;
mod logging;
mod output;

pub use app::{run, Cli, Commands};
pub use output::{band, Output, OutputFormat};
