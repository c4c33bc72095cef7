//! Article summarization unit.

use std::sync::Arc;

use async_trait::async_trait;
use pipeline::{
    Article, CompletionRequest, LlmProvider, Payload, PayloadKind, ProcessingUnit,
    SummarizedArticle, UnitError, UnitName, UnitState,
};

/// Sampling temperature for every summary request.
pub const SUMMARY_TEMPERATURE: f32 = 0.5;

/// Prefix of the summary text recorded when the model call for an article fails.
pub const SUMMARY_ERROR_PREFIX: &str = "Error generating summary: ";

/// Model selection for the summarizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizerConfig {
    pub model: String,
    pub max_tokens: u32,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-opus-20240229".to_string(),
            max_tokens: 150,
        }
    }
}

/// State of an [`ArticleSummarizer`]: the input articles and the summarized list (decision and result).
pub type SummarizerState = UnitState<Vec<Article>, Vec<SummarizedArticle>, Vec<SummarizedArticle>>;

/// Summarizes each article with one model call, in input order.
///
/// A failed model call does not fail the unit: the article is kept and its
/// summary becomes [`SUMMARY_ERROR_PREFIX`] followed by the error. This is the
/// only unit that tolerates failures of its external service.
pub struct ArticleSummarizer {
    name: UnitName,
    config: SummarizerConfig,
    provider: Arc<dyn LlmProvider>,
    state: SummarizerState,
}

impl ArticleSummarizer {
    /// Summarizer that sends one request per article to `provider`.
    pub fn new(name: UnitName, config: SummarizerConfig, provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            name,
            config,
            provider,
            state: SummarizerState::default(),
        }
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    async fn summarize(&self, article: &Article) -> SummarizedArticle {
        let request = CompletionRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: SUMMARY_TEMPERATURE,
            prompt: summary_prompt(article),
        };

        match self.provider.complete(&request).await {
            Ok(summary) => {
                tracing::info!(unit = %self.name, title = %article.title, "Summarized article");
                SummarizedArticle::new(article, summary)
            }
            Err(e) => {
                tracing::warn!(
                    unit = %self.name,
                    title = %article.title,
                    error = %e,
                    "Error summarizing article"
                );
                SummarizedArticle::new(article, format!("{SUMMARY_ERROR_PREFIX}{e}"))
            }
        }
    }
}

/// Builds the summarization prompt for one article.
pub fn summary_prompt(article: &Article) -> String {
    format!(
        "Please summarize the following article concisely and objectively.\n\
         \n\
         Title: {}\n\
         Source: {}\n\
         Content: {}\n\
         \n\
         Provide a clear, factual summary that captures the main points and key findings.",
        article.title, article.source, article.content
    )
}

#[async_trait]
impl ProcessingUnit for ArticleSummarizer {
    type Input = Vec<Article>;
    type Decision = Vec<SummarizedArticle>;
    type Output = Vec<SummarizedArticle>;

    const OUTPUT_KIND: PayloadKind = PayloadKind::Summaries;

    fn name(&self) -> &UnitName {
        &self.name
    }

    fn state(&self) -> &SummarizerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SummarizerState {
        &mut self.state
    }

    fn perceive(&mut self, input: Payload) -> Result<(), UnitError> {
        let articles = input.expect_articles(&self.name)?;
        tracing::info!(unit = %self.name, count = articles.len(), "Preparing to summarize articles");
        self.state.input = Some(articles);
        Ok(())
    }

    async fn decide(&self) -> Result<Vec<SummarizedArticle>, UnitError> {
        let articles = self
            .state
            .input
            .as_ref()
            .ok_or_else(|| UnitError::NothingPerceived {
                unit: self.name.clone(),
            })?;

        // Strictly one call at a time so output order is input order.
        let mut summarized = Vec::with_capacity(articles.len());
        for article in articles {
            summarized.push(self.summarize(article).await);
        }
        Ok(summarized)
    }

    async fn act(&self, decision: &Vec<SummarizedArticle>) -> Result<Vec<SummarizedArticle>, UnitError> {
        tracing::info!(unit = %self.name, count = decision.len(), "Completed summarization");
        Ok(decision.clone())
    }
}

impl std::fmt::Display for ArticleSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ArticleSummarizer(name={})", self.name)
    }
}

impl std::fmt::Debug for ArticleSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleSummarizer")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("provider", &"<dyn LlmProvider>")
            .field("state", &self.state)
            .finish()
    }
}
