//! News API `/v2/everything` client.

use async_trait::async_trait;
use pipeline::{NewsError, NewsQuery, NewsSource, RawArticle};
use serde::Deserialize;

/// Production News API host.
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";

const EVERYTHING_PATH: &str = "/v2/everything";
const API_KEY_HEADER: &str = "X-Api-Key";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

/// HTTP client for the News API article search.
pub struct NewsApiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl NewsApiClient {
    /// Client for the production host, authenticated with `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Points the client at another host (a proxy, or a mock server in tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn search(&self, query: &NewsQuery) -> Result<Vec<RawArticle>, NewsError> {
        let url = format!("{}{}", self.base_url, EVERYTHING_PATH);
        let from = query.from.format(DATE_FORMAT).to_string();
        let to = query.to.format(DATE_FORMAT).to_string();
        let page_size = query.page_size.to_string();

        tracing::debug!(topic = %query.topic, %from, %to, page_size = query.page_size, "News search request");

        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[
                ("q", query.topic.as_str()),
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("language", query.language.as_str()),
                ("sortBy", query.sort_by.as_str()),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NewsError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(transport_error)?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| NewsError::Decode {
                message: e.to_string(),
            })?;

        tracing::debug!(count = parsed.articles.len(), "News search response");
        Ok(parsed.articles)
    }
}

fn transport_error(err: reqwest::Error) -> NewsError {
    NewsError::Transport {
        message: err.to_string(),
    }
}

impl std::fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slash() {
        let client = NewsApiClient::new("key").with_base_url("http://localhost:9000/");
        assert_eq!(client.base_url(), "http://localhost:9000");
    }

    #[test]
    fn debug_output_hides_the_key() {
        let client = NewsApiClient::new("super-secret");
        assert!(!format!("{client:?}").contains("super-secret"));
    }
}
