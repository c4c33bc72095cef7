//! End-to-end research runs through the real HTTP adapters, pointed at mock servers.

use std::sync::Arc;

use llm::AnthropicProvider;
use news::NewsApiClient;
use nodes::{
    research_pipeline, PipelineStatus, ResearchOptions, StageState, RETRIEVER_UNIT,
    SUMMARIZER_UNIT, VALIDATOR_UNIT,
};
use pipeline::{NewsError, UnitError, UnitName, ValidationError};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn news_body(count: usize) -> serde_json::Value {
    let articles: Vec<_> = (1..=count)
        .map(|n| {
            json!({
                "source": { "id": null, "name": format!("Source {n}") },
                "title": format!("Article {n}"),
                "url": format!("https://example.com/{n}"),
                "description": format!("Description {n}"),
                "content": format!("Content {n}"),
                "publishedAt": "2026-10-15T09:00:00Z"
            })
        })
        .collect();
    json!({ "status": "ok", "totalResults": count, "articles": articles })
}

fn model_reply(text: &str) -> serde_json::Value {
    json!({ "content": [{ "type": "text", "text": text }] })
}

async fn news_server(body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("q", "quantum computing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

async fn model_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_reply("A concise summary.")))
        .mount(&server)
        .await;
    server
}

fn unit(name: &str) -> UnitName {
    UnitName::new(name).unwrap()
}

#[tokio::test]
async fn topic_to_five_summaries() {
    let news = news_server(news_body(8)).await;
    let model = model_server().await;

    let mut pipeline = research_pipeline(
        Arc::new(NewsApiClient::new("news-key").with_base_url(news.uri())),
        Arc::new(AnthropicProvider::new("model-key").with_base_url(model.uri())),
        ResearchOptions::default(),
    );

    let summaries = pipeline
        .run_suspendable("quantum computing")
        .await
        .unwrap()
        .into_summaries()
        .unwrap();

    assert_eq!(summaries.len(), 5);
    for (i, item) in summaries.iter().enumerate() {
        assert_eq!(item.article.title, format!("Article {}", i + 1));
        assert_eq!(item.article.source, format!("Source {}", i + 1));
        assert_eq!(item.summary, "A concise summary.");
    }

    let state = pipeline.get_state();
    assert_eq!(state.status, PipelineStatus::Completed);
    assert_eq!(state.units.len(), 3);
    match &state.units[&unit(RETRIEVER_UNIT)] {
        StageState::Retrieve(s) => {
            assert_eq!(s.last_decision.as_ref().map(Vec::len), Some(8));
            assert_eq!(s.last_result.as_ref().map(Vec::len), Some(5));
        }
        other => panic!("unexpected state {other:?}"),
    }
    assert_eq!(model.received_requests().await.unwrap().len(), 5);
}

#[tokio::test]
async fn failed_summary_is_recorded_inline() {
    let news = news_server(news_body(3)).await;
    let model = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_string_contains("Title: Article 2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .with_priority(1)
        .mount(&model)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_reply("Fine.")))
        .mount(&model)
        .await;

    let mut pipeline = research_pipeline(
        Arc::new(NewsApiClient::new("k").with_base_url(news.uri())),
        Arc::new(AnthropicProvider::new("k").with_base_url(model.uri())),
        ResearchOptions::default(),
    );

    let summaries = pipeline
        .run_suspendable("quantum computing")
        .await
        .unwrap()
        .into_summaries()
        .unwrap();

    let texts: Vec<_> = summaries.iter().map(|s| s.summary.as_str()).collect();
    assert_eq!(
        texts,
        [
            "Fine.",
            "Error generating summary: model provider returned HTTP 500: boom",
            "Fine.",
        ]
    );
    assert_eq!(pipeline.status(), PipelineStatus::Completed);
}

#[tokio::test]
async fn news_outage_fails_the_run_before_summarizing() {
    let news = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&news)
        .await;
    let model = model_server().await;

    let mut pipeline = research_pipeline(
        Arc::new(NewsApiClient::new("k").with_base_url(news.uri())),
        Arc::new(AnthropicProvider::new("k").with_base_url(model.uri())),
        ResearchOptions::default(),
    );

    let err = pipeline.run_suspendable("quantum computing").await.unwrap_err();

    assert_eq!(
        err,
        UnitError::Retrieval(NewsError::Status {
            status: 503,
            body: "down".to_string()
        })
    );
    let state = pipeline.get_state();
    assert_eq!(state.status, PipelineStatus::Failed);
    assert!(state.units.contains_key(&unit(VALIDATOR_UNIT)));
    assert!(!state.units.contains_key(&unit(SUMMARIZER_UNIT)));
    assert!(model.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn short_topic_never_reaches_the_network() {
    let news = news_server(news_body(1)).await;
    let model = model_server().await;

    let mut pipeline = research_pipeline(
        Arc::new(NewsApiClient::new("k").with_base_url(news.uri())),
        Arc::new(AnthropicProvider::new("k").with_base_url(model.uri())),
        ResearchOptions::default(),
    );

    let err = pipeline.run_suspendable("ab").await.unwrap_err();

    assert_eq!(
        err,
        UnitError::Validation(ValidationError::TooShort { min: 3, length: 2 })
    );
    assert!(news.received_requests().await.unwrap().is_empty());
    assert!(pipeline.get_state().units.is_empty());
}
