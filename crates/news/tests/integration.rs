//! `NewsApiClient` against a mock News API server.

use chrono::{TimeZone, Utc};
use news::NewsApiClient;
use pipeline::{NewsError, NewsQuery, NewsSource};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn query() -> NewsQuery {
    let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
    NewsQuery::trailing_week("quantum computing", 5, now)
}

#[tokio::test]
async fn search_sends_the_expected_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(header("X-Api-Key", "test-key"))
        .and(query_param("q", "quantum computing"))
        .and(query_param("from", "2026-10-09"))
        .and(query_param("to", "2026-10-16"))
        .and(query_param("language", "en"))
        .and(query_param("sortBy", "relevancy"))
        .and(query_param("pageSize", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": { "id": null, "name": "Wire" },
                    "title": "First",
                    "url": "https://example.com/1",
                    "description": "d1",
                    "content": "c1",
                    "publishedAt": "2026-10-15T09:00:00Z"
                },
                {
                    "source": null,
                    "title": "Second",
                    "url": "https://example.com/2",
                    "description": "d2",
                    "content": null,
                    "publishedAt": null
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = NewsApiClient::new("test-key").with_base_url(server.uri());
    let records = client.search(&query()).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title.as_deref(), Some("First"));
    assert_eq!(
        records[0].source.as_ref().and_then(|s| s.name.as_deref()),
        Some("Wire")
    );
    assert!(records[1].source.is_none());
    assert!(records[1].content.is_none());
}

#[tokio::test]
async fn missing_articles_field_is_an_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let client = NewsApiClient::new("k").with_base_url(server.uri());
    assert!(client.search(&query()).await.unwrap().is_empty());
}

#[tokio::test]
async fn error_status_is_reported_with_its_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(401).set_body_string("apiKeyInvalid"))
        .mount(&server)
        .await;

    let client = NewsApiClient::new("bad").with_base_url(server.uri());
    let err = client.search(&query()).await.unwrap_err();

    assert_eq!(
        err,
        NewsError::Status {
            status: 401,
            body: "apiKeyInvalid".to_string()
        }
    );
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = NewsApiClient::new("k").with_base_url(server.uri());
    let err = client.search(&query()).await.unwrap_err();

    assert!(matches!(err, NewsError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let client = NewsApiClient::new("k").with_base_url("http://127.0.0.1:1");
    let err = client.search(&query()).await.unwrap_err();

    assert!(matches!(err, NewsError::Transport { .. }));
}
