//! Shared value types for the research pipeline domain.
//!
//! Data flows one way through these types: a topic string becomes a list of
//! [`RawArticle`] provider records, which become [`Article`]s, which become
//! [`SummarizedArticle`]s. Between units every value travels as a [`Payload`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

/// Source name used when a provider record carries none.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// A news record exactly as the search provider returned it.
///
/// Every field is optional; providers routinely omit or null out `content`,
/// `source`, and occasionally `publishedAt`. The fallback rules that turn a
/// record into an [`Article`] live in [`Article::from_record`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawArticle {
    /// Headline.
    pub title: Option<String>,
    /// Link to the full story.
    pub url: Option<String>,
    /// Short teaser, used when `content` is missing.
    pub description: Option<String>,
    /// Article body, often truncated by the provider.
    pub content: Option<String>,
    /// Publisher.
    pub source: Option<RawSource>,
    /// ISO-8601 publication time, kept as the provider's string.
    pub published_at: Option<String>,
}

/// The `source` object nested in a [`RawArticle`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSource {
    /// Display name of the publisher.
    pub name: Option<String>,
}

/// A retrieved news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    /// Article body, or the provider's description when the body is absent.
    pub content: String,
    /// Publisher name, [`UNKNOWN_SOURCE`] when the provider gave none.
    pub source: String,
    pub published_at: String,
}

impl Article {
    /// Builds an [`Article`] from a provider record.
    ///
    /// - missing `content` falls back to `description`, then to `""`
    /// - missing `source.name` becomes [`UNKNOWN_SOURCE`]
    /// - any other missing field becomes `""`
    pub fn from_record(record: &RawArticle) -> Self {
        Self {
            title: record.title.clone().unwrap_or_default(),
            url: record.url.clone().unwrap_or_default(),
            content: record
                .content
                .clone()
                .or_else(|| record.description.clone())
                .unwrap_or_default(),
            source: record
                .source
                .as_ref()
                .and_then(|s| s.name.clone())
                .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            published_at: record.published_at.clone().unwrap_or_default(),
        }
    }
}

/// An [`Article`] extended with a generated summary.
///
/// Serialises flat: the article fields followed by `summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizedArticle {
    #[serde(flatten)]
    pub article: Article,
    pub summary: String,
}

impl SummarizedArticle {
    /// Extends `article` with `summary`, leaving the original untouched.
    pub fn new(article: &Article, summary: impl Into<String>) -> Self {
        Self {
            article: article.clone(),
            summary: summary.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload: the value handed from one unit to the next
// ---------------------------------------------------------------------------

/// A value flowing between processing units.
///
/// Units declare which variant they accept; handing a unit any other variant
/// fails its perceive phase with [`crate::UnitError::InvalidInputKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Payload {
    Topic(String),
    Articles(Vec<Article>),
    Summaries(Vec<SummarizedArticle>),
}

impl Payload {
    /// Returns the variant tag without the data.
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Topic(_) => PayloadKind::Topic,
            Payload::Articles(_) => PayloadKind::Articles,
            Payload::Summaries(_) => PayloadKind::Summaries,
        }
    }

    /// Returns the summarized articles, or `None` for any other variant.
    pub fn into_summaries(self) -> Option<Vec<SummarizedArticle>> {
        match self {
            Payload::Summaries(items) => Some(items),
            _ => None,
        }
    }
}

impl From<String> for Payload {
    fn from(topic: String) -> Self {
        Payload::Topic(topic)
    }
}

impl From<&str> for Payload {
    fn from(topic: &str) -> Self {
        Payload::Topic(topic.to_string())
    }
}

impl From<Vec<Article>> for Payload {
    fn from(articles: Vec<Article>) -> Self {
        Payload::Articles(articles)
    }
}

impl From<Vec<SummarizedArticle>> for Payload {
    fn from(summaries: Vec<SummarizedArticle>) -> Self {
        Payload::Summaries(summaries)
    }
}

/// Shape of a [`Payload`], used in errors and observer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    Topic,
    Articles,
    Summaries,
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PayloadKind::Topic => "topic",
            PayloadKind::Articles => "articles",
            PayloadKind::Summaries => "summaries",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Port request types
// ---------------------------------------------------------------------------

/// How many days back a news search reaches.
pub const SEARCH_WINDOW_DAYS: i64 = 7;

/// Result ordering requested from the news provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Closest match to the query first.
    Relevancy,
}

impl SortOrder {
    /// Returns the wire value for this ordering.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Relevancy => "relevancy",
        }
    }
}

/// A news search request handed to a [`crate::NewsSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsQuery {
    pub topic: String,
    /// Start of the publication window (inclusive).
    pub from: DateTime<Utc>,
    /// End of the publication window (inclusive).
    pub to: DateTime<Utc>,
    /// ISO-639-1 language filter.
    pub language: String,
    pub sort_by: SortOrder,
    pub page_size: usize,
}

impl NewsQuery {
    /// English, relevance-ordered search over the [`SEARCH_WINDOW_DAYS`] ending at `now`.
    pub fn trailing_week(topic: impl Into<String>, page_size: usize, now: DateTime<Utc>) -> Self {
        Self {
            topic: topic.into(),
            from: now - Duration::days(SEARCH_WINDOW_DAYS),
            to: now,
            language: "en".to_string(),
            sort_by: SortOrder::Relevancy,
            page_size,
        }
    }
}

/// A single-message completion request handed to a [`crate::LlmProvider`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Sent as the only user-role message.
    pub prompt: String,
}
