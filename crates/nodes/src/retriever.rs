//! Article retrieval unit.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use pipeline::{
    Article, NewsQuery, NewsSource, Payload, PayloadKind, ProcessingUnit, RawArticle, UnitError,
    UnitName, UnitState,
};

/// How many articles the retriever requests and keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrieverConfig {
    pub max_articles: usize,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self { max_articles: 5 }
    }
}

/// State of an [`ArticleRetriever`]: the topic, the provider records, and the mapped articles.
pub type RetrieverState = UnitState<String, Vec<RawArticle>, Vec<Article>>;

/// Fetches recent articles about the topic from a [`NewsSource`].
///
/// The topic is taken as-is; validating it is the previous unit's job. Any
/// provider failure ends the run with [`UnitError::Retrieval`].
pub struct ArticleRetriever {
    name: UnitName,
    config: RetrieverConfig,
    source: Arc<dyn NewsSource>,
    state: RetrieverState,
}

impl ArticleRetriever {
    /// Retriever that queries `source` on every cycle.
    pub fn new(name: UnitName, config: RetrieverConfig, source: Arc<dyn NewsSource>) -> Self {
        Self {
            name,
            config,
            source,
            state: RetrieverState::default(),
        }
    }

    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }
}

#[async_trait]
impl ProcessingUnit for ArticleRetriever {
    type Input = String;
    type Decision = Vec<RawArticle>;
    type Output = Vec<Article>;

    const OUTPUT_KIND: PayloadKind = PayloadKind::Articles;

    fn name(&self) -> &UnitName {
        &self.name
    }

    fn state(&self) -> &RetrieverState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RetrieverState {
        &mut self.state
    }

    fn perceive(&mut self, input: Payload) -> Result<(), UnitError> {
        let topic = input.expect_topic(&self.name)?;
        tracing::info!(unit = %self.name, topic = %topic, "Preparing to retrieve articles");
        self.state.input = Some(topic);
        Ok(())
    }

    async fn decide(&self) -> Result<Vec<RawArticle>, UnitError> {
        let topic = self
            .state
            .input
            .as_deref()
            .ok_or_else(|| UnitError::NothingPerceived {
                unit: self.name.clone(),
            })?;

        let query = NewsQuery::trailing_week(topic, self.config.max_articles, Utc::now());
        self.source.search(&query).await.map_err(|e| {
            tracing::error!(unit = %self.name, error = %e, "Error retrieving articles");
            UnitError::Retrieval(e)
        })
    }

    async fn act(&self, decision: &Vec<RawArticle>) -> Result<Vec<Article>, UnitError> {
        let articles: Vec<Article> = decision
            .iter()
            .take(self.config.max_articles)
            .map(Article::from_record)
            .collect();
        tracing::info!(unit = %self.name, count = articles.len(), "Retrieved articles");
        Ok(articles)
    }
}

impl std::fmt::Display for ArticleRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ArticleRetriever(name={})", self.name)
    }
}

impl std::fmt::Debug for ArticleRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleRetriever")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("source", &"<dyn NewsSource>")
            .field("state", &self.state)
            .finish()
    }
}
