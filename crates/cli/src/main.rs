//! Research CLI entry point.
//!
//! This binary is the composition root for the workspace. Responsibilities:
//!
//! 1. **Parse arguments**: topic words and unit option overrides.
//! 2. **Wire observability**: `tracing-subscriber` with an env filter, a text or
//!    JSON layer on stderr, and an optional OpenTelemetry OTLP exporter.
//! 3. **Load configuration**: `.env` and process environment credentials.
//! 4. **Construct infrastructure**: `NewsApiClient` and `AnthropicProvider`,
//!    injected into the research pipeline.
//! 5. **Run and persist**: execute the pipeline, save the summaries as JSON,
//!    print the console report.
//!
//! Exit status is 0 on success and 1 on any usage, configuration or pipeline
//! failure.

mod args;
mod config;
mod output;
mod telemetry;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use chrono::Local;
use clap::Parser;
use llm::AnthropicProvider;
use news::NewsApiClient;
use nodes::{research_pipeline, Pipeline};
use pipeline::{ConfigError, SummarizedArticle};

use crate::args::Cli;
use crate::config::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let dotenv = dotenvy::dotenv();
    let _telemetry = match telemetry::init(
        cli.json_logs,
        std::env::var(telemetry::OTLP_ENDPOINT_VAR).ok(),
    ) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    config::report_dotenv(&dotenv);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Research failed");
            eprintln!("\nError: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.check_config {
        return check_config();
    }

    let topic = cli.topic();
    let mut pipeline = assemble(&cli, config::env_lookup)?;
    tracing::info!(%topic, "Starting research");
    println!("\nResearching topic: {topic}");

    let (path, results) = research(&mut pipeline, &topic, &cli.output_dir, cli.timeout()).await?;
    print!("{}", output::render_report(&path, &topic, &results));
    Ok(())
}

/// Resolves options and credentials, then builds the adapters and the pipeline.
///
/// Nothing is constructed when either check fails.
fn assemble(cli: &Cli, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Pipeline> {
    let options = cli.research_options()?;
    let settings = Settings::from_lookup(lookup)?;
    tracing::debug!(?settings, ?options, "Configuration resolved");

    let mut news = NewsApiClient::new(settings.news_api_key);
    if let Some(url) = settings.news_base_url {
        news = news.with_base_url(url);
    }
    let mut llm = AnthropicProvider::new(settings.anthropic_api_key);
    if let Some(url) = settings.anthropic_base_url {
        llm = llm.with_base_url(url);
    }

    Ok(research_pipeline(Arc::new(news), Arc::new(llm), options))
}

/// Runs `pipeline` on `topic` and saves the summaries under `output_dir`.
///
/// The results file is written only after the whole pipeline succeeded.
async fn research(
    pipeline: &mut Pipeline,
    topic: &str,
    output_dir: &Path,
    timeout: Option<Duration>,
) -> anyhow::Result<(PathBuf, Vec<SummarizedArticle>)> {
    let outcome = match timeout {
        Some(limit) => tokio::time::timeout(limit, pipeline.run_suspendable(topic))
            .await
            .map_err(|_| anyhow!("research did not finish within {}s", limit.as_secs()))?,
        None => pipeline.run_suspendable(topic).await,
    };
    let results = outcome
        .context("research pipeline failed")?
        .into_summaries()
        .context("research pipeline did not produce summaries")?;

    let path = output::save_results(output_dir, topic, &results, Local::now())?;
    Ok((path, results))
}

fn check_config() -> anyhow::Result<()> {
    let report = config::credential_report(config::env_lookup);
    println!("Checking credentials:");
    for status in &report {
        println!("  {status}");
    }

    let missing: Vec<String> = report
        .iter()
        .filter(|s| s.preview.is_none())
        .map(|s| s.name.to_string())
        .collect();
    if !missing.is_empty() {
        bail!(ConfigError::MissingCredentials { names: missing });
    }
    println!("Configuration OK");
    Ok(())
}
