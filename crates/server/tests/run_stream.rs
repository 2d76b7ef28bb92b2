//! HTTP-level tests for the run endpoint with stub collaborators.

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use orchestrator::{CompletionService, SearchProvider};
use providers::{OrganicResult, ProviderError, SearchResponse};
use serde_json::{json, Value};
use server::state::AppState;

struct StubSearch;

#[async_trait]
impl SearchProvider for StubSearch {
    async fn search(&self, _query: &str) -> Result<SearchResponse, ProviderError> {
        Ok(SearchResponse {
            organic: vec![
                OrganicResult {
                    title: Some("Result 1".to_string()),
                    link: Some("https://example.com/1".to_string()),
                    url: None,
                    snippet: Some("Snippet 1".to_string()),
                },
                OrganicResult {
                    title: Some("Result 2".to_string()),
                    link: Some("https://example.com/2".to_string()),
                    url: None,
                    snippet: Some("Snippet 2".to_string()),
                },
            ],
            ..Default::default()
        })
    }
}

struct StubCompletion;

#[async_trait]
impl CompletionService for StubCompletion {
    async fn generate_report(&self, _research_text: &str) -> Result<String, ProviderError> {
        Ok("# Report".to_string())
    }

    async fn generate_summary(
        &self,
        _query: &str,
        _report_excerpt: &str,
    ) -> Result<String, ProviderError> {
        Ok("Done, see the report.".to_string())
    }
}

fn test_server() -> TestServer {
    let state = AppState::with_collaborators(Arc::new(StubSearch), Arc::new(StubCompletion));
    TestServer::new(server::create_router(state)).expect("test server")
}

fn parse_sse_frames(body: &str) -> Vec<Value> {
    body.lines()
        .filter_map(|line| line.strip_prefix("data: "))
        .filter_map(|data| serde_json::from_str(data).ok())
        .collect()
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = test_server();
    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_run_streams_ordered_event_sequence() {
    let server = test_server();

    let response = server
        .post("/")
        .json(&json!({
            "threadId": "thread-1",
            "runId": "run-1",
            "messages": [{"role": "user", "content": "quantum computing"}]
        }))
        .await;

    response.assert_status_ok();
    let content_type = response.header("content-type");
    assert!(content_type
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));

    let frames = parse_sse_frames(&response.text());
    let types: Vec<&str> = frames
        .iter()
        .map(|frame| frame["type"].as_str().unwrap())
        .collect();

    assert_eq!(types.first(), Some(&"RUN_STARTED"));
    assert_eq!(types.get(1), Some(&"STATE_SNAPSHOT"));
    assert_eq!(types.last(), Some(&"RUN_FINISHED"));

    // One snapshot, then only deltas until the text triple.
    assert_eq!(types.iter().filter(|t| **t == "STATE_SNAPSHOT").count(), 1);
    assert_eq!(types.iter().filter(|t| **t == "RUN_FINISHED").count(), 1);
    let triple_start = types.iter().position(|t| *t == "TEXT_MESSAGE_START").unwrap();
    assert_eq!(types[triple_start + 1], "TEXT_MESSAGE_CONTENT");
    assert_eq!(types[triple_start + 2], "TEXT_MESSAGE_END");

    // Run ids echo the request.
    assert_eq!(frames[0]["threadId"], "thread-1");
    assert_eq!(frames[0]["runId"], "run-1");

    // The snapshot carries the query; the last delta completes the run.
    assert_eq!(frames[1]["snapshot"]["research"]["query"], "quantum computing");
    let last_delta = frames
        .iter()
        .rev()
        .find(|frame| frame["type"] == "STATE_DELTA")
        .unwrap();
    let ops = last_delta["delta"].as_array().unwrap();
    assert!(ops
        .iter()
        .any(|op| op["path"] == "/status/phase" && op["value"] == "completed"));
    assert!(ops
        .iter()
        .any(|op| op["path"] == "/processing/progress" && op["value"] == 1.0));

    // The reply content matches the stub summary.
    let content = frames
        .iter()
        .find(|frame| frame["type"] == "TEXT_MESSAGE_CONTENT")
        .unwrap();
    assert_eq!(content["delta"], "Done, see the report.");
}

#[tokio::test]
async fn test_run_rejects_empty_messages() {
    let server = test_server();

    let response = server
        .post("/")
        .json(&json!({
            "threadId": "thread-1",
            "runId": "run-1",
            "messages": []
        }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "bad_request");
}
