//! End-to-end feed loading against a mock contents API.
//!
//! Each test starts its own `MockServer`, so tests are isolated and can run
//! in parallel. These exercise the real HTTP client, the date-index shape
//! decoding and the detail fan-out together.

use std::time::Duration;

use newbie_feed::api::{ApiClient, IdentifierSource};
use newbie_feed::config::Config;
use newbie_feed::day::FeedDay;
use newbie_feed::feed::{CancelToken, FeedAggregator, FeedError};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn detail_json(id: &str, full_summary: &str) -> serde_json::Value {
    json!({
        "_id": {"timestamp": 1755394382, "date": "2025-08-17T01:33:02.000+00:00"},
        "topic": "politics",
        "date": "2025-08-17",
        "background_summary": "background",
        "conservative_media_stance": "c-stance",
        "content_title": format!("Title {}", id),
        "core_issue": format!("Core {}", id),
        "full_article_summary": full_summary,
        "glossary": [],
        "media_summary": {"progressive": ["Hankyoreh"], "conservative": ["Chosun", "Donga"]},
        "progressive_media_stance": "p-stance",
        "reporting_volume_compare": {"progressive": 0.4, "conservative": 0.6},
        "source_articles": []
    })
}

async fn mount_index(server: &MockServer, day: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/contents/date/{}", day)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, id: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/api/contents/{}", id)))
        .respond_with(template)
        .mount(server)
        .await;
}

fn client_for(server: &MockServer, timeout_secs: u64) -> ApiClient {
    let config = Config {
        api_base_url: server.uri(),
        request_timeout_secs: timeout_secs,
        ..Config::default()
    };
    ApiClient::from_config(reqwest::Client::new(), &config).unwrap()
}

fn day() -> FeedDay {
    "2025-08-17".parse().unwrap()
}

#[tokio::test]
async fn test_feed_with_one_timed_out_detail() {
    let server = MockServer::start().await;
    mount_index(&server, "2025-08-17", json!(["101", "102", "103"])).await;
    mount_detail(
        &server,
        "101",
        ResponseTemplate::new(200).set_body_json(detail_json("101", "Full 101")),
    )
    .await;
    mount_detail(
        &server,
        "102",
        ResponseTemplate::new(200)
            .set_body_json(detail_json("102", "Full 102"))
            .set_delay(Duration::from_secs(5)),
    )
    .await;
    mount_detail(
        &server,
        "103",
        ResponseTemplate::new(200).set_body_json(detail_json("103", "")),
    )
    .await;

    let client = client_for(&server, 1);
    let aggregator = FeedAggregator::new(client.clone(), client);

    let load = aggregator
        .load_feed_with_report(day(), &CancelToken::new())
        .await
        .unwrap();

    let ids: Vec<&str> = load.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["101", "103"]);
    assert_eq!(load.entries[0].body, "Full 101");
    assert_eq!(load.entries[1].body, "Core 103");
    assert_eq!(load.entries[0].conservative_sources, vec!["Chosun", "Donga"]);
    assert_eq!(load.dropped.len(), 1);
    assert_eq!(load.dropped[0].id, "102");
}

#[tokio::test]
async fn test_envelope_shape_and_missing_detail() {
    let server = MockServer::start().await;
    mount_index(
        &server,
        "2025-08-17",
        json!({"contents": [{"_id": "a"}, {"id": "b", "_id": "ignored"}]}),
    )
    .await;
    mount_detail(
        &server,
        "a",
        ResponseTemplate::new(200).set_body_json(detail_json("a", "Full a")),
    )
    .await;
    mount_detail(&server, "b", ResponseTemplate::new(404)).await;

    let client = client_for(&server, 5);
    let aggregator = FeedAggregator::new(client.clone(), client);

    let entries = aggregator
        .load_feed(day(), &CancelToken::new())
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "a");
    assert_eq!(entries[0].title, "Title a");
}

#[tokio::test]
async fn test_empty_day_returns_empty_feed() {
    let server = MockServer::start().await;
    mount_index(&server, "2025-08-17", json!([])).await;

    let client = client_for(&server, 5);
    let aggregator = FeedAggregator::new(client.clone(), client);

    let entries = aggregator
        .load_feed(day(), &CancelToken::new())
        .await
        .unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_index_failure_fails_load_without_detail_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contents/date/2025-08-17"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/contents/101"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let aggregator = FeedAggregator::new(client.clone(), client);

    match aggregator.load_feed(day(), &CancelToken::new()).await {
        Err(FeedError::Resolve(e)) => {
            assert!(e.is_network());
            assert_eq!(e.status(), Some(500));
        }
        other => panic!("Expected Resolve error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unrecognized_index_body_is_parse_error() {
    let server = MockServer::start().await;
    mount_index(&server, "2025-08-17", json!([{"id": null, "_id": null}])).await;

    let client = client_for(&server, 5);
    let err = client.resolve_identifiers(day()).await.unwrap_err();
    assert!(err.is_parse());
}
