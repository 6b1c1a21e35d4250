pub mod reports;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::application::services::reports::{DEFAULT_KEYWORD_LIMIT, EmptyPercent, ReportConfig};
use crate::domain::labels::LabelTables;
use crate::domain::payload::ReportPayload;
use crate::domain::temporal::YearMonth;
use crate::infrastructure::labels::load_label_tables;

#[derive(Debug, Parser)]
#[command(author, version, about = "Build monthly reading reports", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "READING_REPORT_URL",
        default_value = "http://localhost:8080"
    )]
    pub api_url: String,

    #[arg(long, global = true, env = "READING_REPORT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a report from a payload file ("-" reads stdin)
    Build(BuildCommand),

    /// Fetch the payload from the API and build the report
    Fetch(FetchCommand),

    /// Show the first and last active month of a payload
    Span(SpanCommand),

    /// Print the empty report for a month
    Empty(EmptyCommand),
}

#[derive(Debug, Args)]
pub struct BuildCommand {
    #[arg(long)]
    pub payload: String,

    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Debug, Args)]
pub struct FetchCommand {
    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Debug, Args)]
pub struct SpanCommand {
    #[arg(long)]
    pub payload: String,
}

#[derive(Debug, Args)]
pub struct EmptyCommand {
    #[command(flatten)]
    pub report: ReportArgs,
}

/// Options shared by every command that produces a report.
#[derive(Debug, Args)]
pub struct ReportArgs {
    #[arg(long)]
    pub year: i32,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,

    /// Override today's date (YYYY-MM-DD); its month counts as in progress
    #[arg(long)]
    pub today: Option<NaiveDate>,

    #[arg(
        long,
        env = "READING_REPORT_KEYWORD_LIMIT",
        default_value_t = DEFAULT_KEYWORD_LIMIT
    )]
    pub keyword_limit: usize,

    /// Summary percent for the empty report: null or zero
    #[arg(
        long,
        env = "READING_REPORT_EMPTY_PERCENT",
        default_value_t = EmptyPercent::Null
    )]
    pub empty_percent: EmptyPercent,

    /// Merge hashtag spellings ("#tag", "tag") before ranking keywords
    #[arg(long, env = "READING_REPORT_NORMALIZE_HASHTAGS")]
    pub normalize_hashtags: bool,

    /// JSON file replacing the built-in label tables
    #[arg(long, env = "READING_REPORT_LABELS")]
    pub labels: Option<PathBuf>,
}

impl ReportArgs {
    pub fn target(&self) -> Result<YearMonth> {
        YearMonth::new(self.year, self.month)
            .with_context(|| format!("invalid month: {}", self.month))
    }

    pub fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    pub fn config(&self) -> ReportConfig {
        ReportConfig {
            keyword_limit: self.keyword_limit,
            empty_percent: self.empty_percent,
            normalize_hashtags: self.normalize_hashtags,
        }
    }

    pub fn label_tables(&self) -> Result<LabelTables> {
        match &self.labels {
            Some(path) => Ok(load_label_tables(path)?),
            None => Ok(LabelTables::default()),
        }
    }
}

/// Read and decode a payload from a file path, or stdin for "-".
pub fn read_payload(source: &str) -> Result<ReportPayload> {
    let contents = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read payload from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read payload file {source}"))?
    };
    serde_json::from_str(&contents).context("failed to decode report payload")
}

pub(crate) fn print_json<T>(value: &T) -> Result<()>
where
    T: serde::Serialize,
{
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
