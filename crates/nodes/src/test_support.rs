//! In-memory port implementations shared by the unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use pipeline::{
    CompletionRequest, LlmError, LlmProvider, NewsError, NewsQuery, NewsSource, RawArticle,
    RawSource,
};

/// A fully populated provider record numbered `n`.
pub(crate) fn record(n: usize) -> RawArticle {
    RawArticle {
        title: Some(format!("Article {n}")),
        url: Some(format!("https://news.example.com/{n}")),
        description: Some(format!("Description {n}")),
        content: Some(format!("Content {n}")),
        source: Some(RawSource {
            name: Some(format!("Source {n}")),
        }),
        published_at: Some(format!("2026-10-1{}T09:00:00Z", n % 10)),
    }
}

/// Returns a fixed record list and remembers the last query.
pub(crate) struct StaticNews {
    records: Vec<RawArticle>,
    last_query: Mutex<Option<NewsQuery>>,
}

impl StaticNews {
    pub(crate) fn new(records: Vec<RawArticle>) -> Self {
        Self {
            records,
            last_query: Mutex::new(None),
        }
    }

    pub(crate) fn last_query(&self) -> Option<NewsQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl NewsSource for StaticNews {
    async fn search(&self, query: &NewsQuery) -> Result<Vec<RawArticle>, NewsError> {
        *self.last_query.lock().unwrap() = Some(query.clone());
        Ok(self.records.clone())
    }
}

/// Fails every search with the given error.
pub(crate) struct FailingNews(pub(crate) NewsError);

#[async_trait]
impl NewsSource for FailingNews {
    async fn search(&self, _query: &NewsQuery) -> Result<Vec<RawArticle>, NewsError> {
        Err(self.0.clone())
    }
}

/// Answers `Summary of <title>`, except for prompts naming one of `failing` titles.
#[derive(Default)]
pub(crate) struct ScriptedLlm {
    failing: Vec<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedLlm {
    pub(crate) fn failing_on(titles: &[&str]) -> Self {
        Self {
            failing: titles.iter().map(|t| t.to_string()).collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());

        let title = request
            .prompt
            .lines()
            .find_map(|line| line.strip_prefix("Title: "))
            .unwrap_or_default();
        if self.failing.iter().any(|t| t == title) {
            return Err(LlmError::Status {
                status: 529,
                body: "overloaded".into(),
            });
        }
        Ok(format!("Summary of {title}"))
    }
}
