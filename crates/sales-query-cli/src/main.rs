//! salesq - answer sales questions from structured intents
//!
//! Subcommands:
//! - `resolve` - print the date range a time expression resolves to
//! - `ask`     - answer a question from its parsed intent and a records file
//! - `prompt`  - print the semantic-parser request payload for a question

mod config;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use sales_query::{
    answer, build_parse_request, extract_intent, parse_intent, resolve_date_range,
    InMemorySource, QueryIntent,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Answer natural-language sales questions deterministically
#[derive(Parser, Debug)]
#[command(name = "salesq", version, about)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a time expression to an inclusive date range
    Resolve {
        /// Time expression, e.g. "last weekend" or "July 1st"
        expression: String,

        /// Anchor date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Answer a question from its parsed intent
    Ask {
        /// The original user question
        query: String,

        /// Intent JSON, or @path to read it from a file
        #[arg(long)]
        intent: String,

        /// Treat --intent as a full parser response body instead of bare intent JSON
        #[arg(long)]
        llm_response: bool,

        /// JSON file of sale records (overrides config)
        #[arg(long)]
        records: Option<PathBuf>,

        /// Anchor date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print the full answer as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the semantic-parser request payload for a question
    Prompt {
        /// The user question
        query: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_logging(&config);

    match cli.command {
        Command::Resolve { expression, today } => {
            let today = config.today(today);
            let range = resolve_date_range(Some(expression.as_str()), today);
            debug!(%today, expression = %expression, resolved = range.is_resolved(), "resolve");
            println!("{}", serde_json::to_string(&range)?);
        }
        Command::Ask {
            query,
            intent,
            llm_response,
            records,
            today,
            json,
        } => {
            let intent = read_intent(&intent, llm_response)?;
            let Some(records_path) = config.records_path(records.as_deref()) else {
                bail!("no records file: pass --records or set [data] records in the config");
            };
            let source = InMemorySource::from_json_file(records_path)
                .with_context(|| format!("Failed to load records: {}", records_path.display()))?;
            info!(
                records = source.records().len(),
                path = %records_path.display(),
                "loaded records"
            );

            let result = answer(&query, &intent, config.today(today), &source)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.response);
            }
        }
        Command::Prompt { query } => {
            println!(
                "{}",
                serde_json::to_string_pretty(&build_parse_request(&query))?
            );
        }
    }

    Ok(())
}

/// Structured logging to stderr; RUST_LOG wins over the configured level.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_intent(arg: &str, llm_response: bool) -> anyhow::Result<QueryIntent> {
    let text = match arg.strip_prefix('@') {
        Some(path) => fs::read_to_string(Path::new(path))
            .with_context(|| format!("Failed to read intent file: {path}"))?,
        None => arg.to_string(),
    };

    let intent = if llm_response {
        let body: serde_json::Value =
            serde_json::from_str(&text).context("Parser response is not JSON")?;
        extract_intent(&body)?
    } else {
        parse_intent(&text)?
    };
    debug!(?intent, "parsed intent");
    Ok(intent)
}
