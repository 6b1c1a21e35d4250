use anyhow::Result;
use clap::Parser;
use reading_report::infrastructure::client::ReportClient;
use reading_report::presentation::cli::{Cli, Commands, reports};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before clap parses env vars)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build(cmd) => reports::build(cmd),
        Commands::Fetch(cmd) => {
            let client = ReportClient::from_base_url(&cli.api_url, cli.token)?;
            reports::fetch(&client, cmd).await
        }
        Commands::Span(cmd) => reports::span(cmd),
        Commands::Empty(cmd) => reports::empty(cmd),
    }
}

/// Logs go to stderr so stdout carries only the JSON document.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}
