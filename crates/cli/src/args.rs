//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use nodes::{ResearchOptions, RetrieverConfig, SummarizerConfig, ValidatorConfig};
use pipeline::ConfigError;

/// Research a topic: fetch recent news articles and summarize each one.
#[derive(Parser, Debug, Clone)]
#[command(name = "research", version, about, long_about = None)]
pub struct Cli {
    /// Topic to research. Several words are joined with single spaces.
    #[arg(required_unless_present = "check_config", num_args = 1..)]
    pub topic: Vec<String>,

    /// Directory the results file is written to.
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Maximum number of articles to retrieve and summarize.
    #[arg(long)]
    pub max_articles: Option<usize>,

    /// Model used for summaries.
    #[arg(long)]
    pub model: Option<String>,

    /// Token limit per summary.
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Minimum topic length in characters.
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Maximum topic length in characters.
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Abandon the run after this many seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long)]
    pub json_logs: bool,

    /// Report which credentials are configured and exit.
    #[arg(long)]
    pub check_config: bool,
}

impl Cli {
    pub fn topic(&self) -> String {
        self.topic.join(" ")
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Merges the command-line overrides onto the default unit options.
    pub fn research_options(&self) -> Result<ResearchOptions, ConfigError> {
        let validator_defaults = ValidatorConfig::default();
        let summarizer_defaults = SummarizerConfig::default();

        let validator = ValidatorConfig {
            min_length: self.min_length.unwrap_or(validator_defaults.min_length),
            max_length: self.max_length.unwrap_or(validator_defaults.max_length),
        };
        if validator.min_length > validator.max_length {
            return Err(ConfigError::InvalidOption {
                name: "min-length".to_string(),
                message: format!(
                    "{} is greater than max-length {}",
                    validator.min_length, validator.max_length
                ),
            });
        }

        let retriever = RetrieverConfig {
            max_articles: self
                .max_articles
                .unwrap_or(RetrieverConfig::default().max_articles),
        };
        if retriever.max_articles == 0 {
            return Err(invalid("max-articles", "must be at least 1"));
        }

        let summarizer = SummarizerConfig {
            model: self.model.clone().unwrap_or(summarizer_defaults.model),
            max_tokens: self.max_tokens.unwrap_or(summarizer_defaults.max_tokens),
        };
        if summarizer.model.trim().is_empty() {
            return Err(invalid("model", "must not be empty"));
        }
        if summarizer.max_tokens == 0 {
            return Err(invalid("max-tokens", "must be at least 1"));
        }

        Ok(ResearchOptions {
            validator,
            retriever,
            summarizer,
        })
    }
}

fn invalid(name: &str, message: &str) -> ConfigError {
    ConfigError::InvalidOption {
        name: name.to_string(),
        message: message.to_string(),
    }
}
