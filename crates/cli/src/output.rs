//! Results file and console report.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Local};
use pipeline::SummarizedArticle;

const PREVIEW_CHARS: usize = 200;

/// `research_<topic with underscores>_<YYYYmmdd_HHMMSS>.json`
///
/// Spaces and characters that separate or qualify path components become `_`,
/// so the name is always a single component inside the output directory.
pub fn results_file_name(topic: &str, at: DateTime<Local>) -> String {
    let topic: String = topic
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | ':' | '\0' => '_',
            other => other,
        })
        .collect();
    format!("research_{}_{}.json", topic, at.format("%Y%m%d_%H%M%S"))
}

/// Writes `results` as pretty-printed JSON into `dir`, creating it if needed.
pub fn save_results(
    dir: &Path,
    topic: &str,
    results: &[SummarizedArticle],
    at: DateTime<Local>,
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let path = dir.join(results_file_name(topic, at));
    let json = serde_json::to_string_pretty(results).context("failed to serialise results")?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write results to {}", path.display()))?;

    tracing::info!(path = %path.display(), articles = results.len(), "Results saved");
    Ok(path)
}

/// Human-readable summary printed after a successful run.
pub fn render_report(path: &Path, topic: &str, results: &[SummarizedArticle]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nResearch complete! Results saved to: {}", path.display());
    let _ = writeln!(out, "\nSummary:");
    let _ = writeln!(out, "Topic: {topic}");
    let _ = writeln!(out, "Articles processed: {}", results.len());
    let _ = writeln!(out, "\nArticle Summaries:");
    for (idx, item) in results.iter().enumerate() {
        let preview: String = item.summary.chars().take(PREVIEW_CHARS).collect();
        let _ = writeln!(out, "\n{}. {}", idx + 1, item.article.title);
        let _ = writeln!(out, "Source: {}", item.article.source);
        let _ = writeln!(out, "Summary: {preview}...");
    }
    out
}
