//! Analysis commands (analyze, suggest, validate)
//!
//! These commands are the transport around the engine: they read a task
//! document, hand it to the [`Analyzer`] and render the result.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::output::{band, Output};
use crate::domain::DUE_DATE_FORMAT;
use crate::engine::{AnalysisError, AnalysisRequest, Analyzer, RequestError, ScoredTask};
use crate::scoring::Strategy;

/// Command-line values that take precedence over the document
#[derive(Debug, Default)]
pub struct Overrides {
    pub strategy: Option<String>,
    pub today: Option<NaiveDate>,
}

impl Overrides {
    /// Rejects an unknown strategy before any document is read
    fn check(&self) -> Result<()> {
        if let Some(name) = &self.strategy {
            name.parse::<Strategy>().map_err(AnalysisError::from)?;
        }
        Ok(())
    }

    /// Writes the overrides into a request document
    ///
    /// A bare task array is wrapped into `{"tasks": [...]}` first. Anything
    /// else is left for request decoding to reject.
    fn apply(self, document: Value) -> Value {
        if self.strategy.is_none() && self.today.is_none() {
            return document;
        }

        let mut object = match document {
            Value::Object(object) => object,
            Value::Array(tasks) => {
                let mut object = Map::new();
                object.insert("tasks".to_string(), Value::Array(tasks));
                object
            }
            other => return other,
        };

        if let Some(strategy) = self.strategy {
            object.insert("strategy".to_string(), Value::String(strategy));
        }
        if let Some(today) = self.today {
            object.insert(
                "today".to_string(),
                Value::String(today.format(DUE_DATE_FORMAT).to_string()),
            );
        }
        Value::Object(object)
    }
}

/// Reads a request from a file or stdin, with command-line overrides applied
pub fn read_request(input: Option<&Path>, overrides: Overrides) -> Result<AnalysisRequest> {
    overrides.check()?;

    let document = overrides.apply(read_document(input)?);
    let request = AnalysisRequest::from_value(document)?;

    tracing::debug!(tasks = request.tasks.len(), "read task document");
    Ok(request)
}

/// Reads a raw document from a file or stdin
///
/// Files ending in `.yaml`/`.yml` are parsed as YAML, everything else as JSON.
fn read_document(input: Option<&Path>) -> Result<Value> {
    let (text, is_yaml) = match input {
        None => (read_stdin()?, false),
        Some(path) if path == Path::new("-") => (read_stdin()?, false),
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read task document: {}", path.display()))?;
            let is_yaml = matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yaml") | Some("yml")
            );
            (text, is_yaml)
        }
    };

    if is_yaml {
        Ok(serde_yaml::from_str(&text).context("Failed to parse YAML task document")?)
    } else {
        Ok(serde_json::from_str(&text).map_err(|e| RequestError::InvalidDocument(e.to_string()))?)
    }
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read task document from stdin")?;
    Ok(text)
}

/// Score every task and print them in dependency order
pub fn analyze(
    output: &Output,
    analyzer: &Analyzer,
    input: Option<&Path>,
    overrides: Overrides,
) -> Result<()> {
    let request = read_request(input, overrides)?;
    let report = analyzer.analyze(&request)?;

    if output.is_json() {
        output.data(&report);
    } else if report.is_empty() {
        println!("No tasks to analyze.");
    } else {
        println!("Strategy: {} (as of {})", report.strategy, report.today);
        println!();
        print_table(&report.tasks);
    }

    Ok(())
}

/// Show the highest-priority tasks
pub fn suggest(
    output: &Output,
    analyzer: &Analyzer,
    input: Option<&Path>,
    overrides: Overrides,
    limit: Option<usize>,
) -> Result<()> {
    if limit == Some(0) {
        anyhow::bail!("--limit must be at least 1");
    }

    let request = read_request(input, overrides)?;
    let suggestions = analyzer.suggest(&request, limit)?;

    if output.is_json() {
        output.data(&suggestions);
    } else if suggestions.tasks.is_empty() {
        println!("No tasks to suggest.");
    } else {
        println!(
            "Top {} of {} tasks by {} (as of {}):",
            suggestions.tasks.len(),
            suggestions.total,
            suggestions.strategy,
            suggestions.today
        );
        println!();
        print_table(&suggestions.tasks);
    }

    Ok(())
}

/// Check a task document and print its dependency order
pub fn validate(output: &Output, analyzer: &Analyzer, input: Option<&Path>) -> Result<()> {
    let request = read_request(input, Overrides::default())?;
    let order = analyzer.validate(&request)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "valid": true,
            "order": order,
        }));
    } else {
        output.success(&format!("{} task(s), no dependency problems.", order.len()));
        if !order.is_empty() {
            let ids: Vec<String> = order.iter().map(|id| id.to_string()).collect();
            println!("Order: {}", ids.join(" -> "));
        }
    }

    Ok(())
}

fn print_table(tasks: &[ScoredTask]) {
    println!("{:<6} {:<12} {:>8} {:<7} TITLE", "ORDER", "ID", "SCORE", "BAND");
    println!("{}", "-".repeat(70));
    for scored in tasks {
        println!(
            "{:<6} {:<12} {:>8.2} {:<7} {}",
            scored.order,
            scored.task.id.to_string(),
            scored.score,
            band(scored.score),
            scored.task.title
        );
        println!("{:<36}{}", "", scored.explanation);
    }
}
