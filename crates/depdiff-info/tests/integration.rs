//! Integration tests for depdiff-info against a mock HTTP server
//!
//! Tests hitting the real deps.dev API are ignored by default.
//! Run with: cargo test --package depdiff-info -- --ignored

use depdiff_core::{
    create_annotations, ChangeKind, CheckDocs, CheckRunOutput, DependencyChangeRecord,
};
use depdiff_info::{DepsDevClient, Error, GitHubClient, PackageExistence};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_entry_exists_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/systems/npm/packages/react/versions/18.2.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let client = DepsDevClient::with_base_url(&format!("{}/v3/", server.uri())).unwrap();
    assert!(client.entry_exists("NPM", "react", "18.2.0").await.unwrap());
}

#[tokio::test]
async fn test_entry_exists_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = DepsDevClient::with_base_url(&format!("{}/v3/", server.uri())).unwrap();
    assert!(!client.entry_exists("npm", "nope", "0.0.0").await.unwrap());
}

#[tokio::test]
async fn test_entry_exists_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = DepsDevClient::with_base_url(&format!("{}/v3/", server.uri())).unwrap();
    let err = client.entry_exists("npm", "react", "1.0.0").await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_entry_exists_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = DepsDevClient::with_base_url(&format!("{}/v3/", server.uri())).unwrap();
    let err = client.entry_exists("npm", "react", "1.0.0").await.unwrap_err();
    assert!(matches!(err, Error::RateLimitExceeded(_)));
}

#[tokio::test]
async fn test_create_issue_comment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/ossf/scorecard/issues/42/comments"))
        .and(header("authorization", "Bearer secret"))
        .and(body_partial_json(serde_json::json!({ "body": "report" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 7,
            "html_url": "https://github.com/ossf/scorecard/pull/42#issuecomment-7"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::with_api_url(server.uri(), "secret").unwrap();
    let comment = client
        .create_issue_comment("ossf", "scorecard", 42, "report")
        .await
        .unwrap();
    assert_eq!(comment.id, 7);
}

#[tokio::test]
async fn test_create_issue_comment_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = GitHubClient::with_api_url(server.uri(), "secret").unwrap();
    let err = client
        .create_issue_comment("ossf", "scorecard", 42, "report")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::GitHubApi(_)));
}

#[tokio::test]
async fn test_create_check_run_batches_annotations() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/ossf/scorecard/check-runs"))
        .and(body_partial_json(serde_json::json!({
            "name": "Scorecard Action Dependency-diff",
            "head_sha": "abc123",
            "status": "completed",
            "conclusion": "neutral"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "id": 99 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/repos/ossf/scorecard/check-runs/99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 99 })))
        .expect(1)
        .mount(&server)
        .await;

    let records: Vec<_> = (0..60)
        .map(|i| DependencyChangeRecord::new(format!("dep-{i}"), ChangeKind::Added))
        .collect();
    let docs = CheckDocs::built_in().unwrap();
    let output = CheckRunOutput::new(create_annotations(&records, &docs).unwrap());

    let client = GitHubClient::with_api_url(server.uri(), "secret").unwrap();
    let run = client
        .create_check_run("ossf", "scorecard", "abc123", &output)
        .await
        .unwrap();
    assert_eq!(run.id, 99);
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_deps_dev_live_lookup() {
    let client = DepsDevClient::new().unwrap();
    assert!(client.entry_exists("npm", "react", "18.2.0").await.unwrap());
    assert!(!client
        .entry_exists("npm", "react", "0.0.0-does-not-exist")
        .await
        .unwrap());
}
