//! that-message CLI
//!
//! Prints the synthesized assertion message for each condition given on the
//! command line, or for each line of stdin.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::io::{self, BufRead};
use std::process;
use that_message::logging::{self, LoggingConfig};
use that_message::{parse_condition, synthesize_with_negation, Evaluator, Template, Value};
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Conditions to synthesize messages for (one per line on stdin if omitted)
    conditions: Vec<String>,

    /// Treat each condition as wrapped in a logical not
    #[arg(long)]
    negate: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Also render the failure text with this binding (repeatable)
    #[arg(long = "bind", value_name = "NAME=VALUE", value_parser = parse_binding)]
    bindings: Vec<(String, String)>,

    /// Log level for this tool's own events (RUST_LOG overrides)
    #[arg(long, default_value = "warn")]
    log_level: Level,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    condition: &'a str,
    message: &'a Template,
    #[serde(skip_serializing_if = "Option::is_none")]
    rendered: Option<String>,
}

fn parse_binding(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init(
        &LoggingConfig::default()
            .with_level(args.log_level)
            .with_json_format(args.log_json),
    )
    .map_err(|e| anyhow!(e))?;

    let conditions = if args.conditions.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("reading conditions from stdin")?
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .collect()
    } else {
        args.conditions.clone()
    };

    let evaluator = (!args.bindings.is_empty()).then(|| {
        Evaluator::new(
            args.bindings
                .iter()
                .map(|(name, value)| (name.clone(), Value::infer(value)))
                .collect(),
        )
    });

    let mut failures = 0usize;
    for condition in &conditions {
        if let Err(err) = report(condition, &args, evaluator.as_ref()) {
            warn!(condition = %condition, error = %err, "skipping condition");
            eprintln!("{condition}: {err:#}");
            failures += 1;
        }
    }

    info!(total = conditions.len(), failures, "done");
    if failures > 0 {
        process::exit(1);
    }
    Ok(())
}

fn report(condition: &str, args: &Args, evaluator: Option<&Evaluator>) -> Result<()> {
    let expr = parse_condition(condition)?;
    let message = synthesize_with_negation(&expr, args.negate);
    let rendered = evaluator
        .map(|evaluator| evaluator.render(&message))
        .transpose()?;

    match args.format {
        Format::Text => {
            println!("{message}");
            if let Some(rendered) = &rendered {
                println!("  => {rendered}");
            }
        }
        Format::Json => {
            let report = Report {
                condition,
                message: &message,
                rendered,
            };
            println!("{}", serde_json::to_string(&report)?);
        }
    }
    Ok(())
}
