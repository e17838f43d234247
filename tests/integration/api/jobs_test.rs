// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::stub_engine::StubEngine;
use crate::integration::helpers::{settings_for, source_server, test_app};
use axum::http::StatusCode;
use linkprobe::domain::models::job::{JobSnapshot, JobStatus};
use linkprobe::domain::models::verification::TITLE_UNREACHABLE;
use linkprobe::domain::repositories::job_repository::JobRepository;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const SOURCE_PAGE: &str = r#"
<html>
  <head><title>Sites</title></head>
  <body>
    <a href="https://a.com/home">Alpha</a>
    <a href="http://www.b.net">Beta</a>
    <a href="https://a.com/again">Alpha again</a>
    <a href="mailto:admin@c.org">Mail</a>
    <a href="/relative/path">Relative</a>
  </body>
</html>
"#;

#[tokio::test]
async fn test_create_job_returns_finished_report() {
    let source = source_server(200, SOURCE_PAGE).await;
    let engine = Arc::new(StubEngine::new(&[
        ("https://a.com", 200, "<html><title>Alpha</title></html>"),
        ("https://b.net", 500, ""),
    ]));
    let (server, _) = test_app(settings_for(&source.uri()), engine.clone());

    let response = server
        .post("/v1/jobs")
        .json(&json!({ "sync_wait_ms": 5000 }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let job: JobSnapshot = response.json();
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.progress.links, vec!["a.com", "b.net"]);
    assert_eq!(job.progress.processed, 2);

    let report = job.report.unwrap();
    assert_eq!(report.total_candidates, 2);
    assert_eq!(report.valid_count, 1);
    assert_eq!(report.invalid_count, 1);
    assert!(!report.deadline_exceeded);

    let alpha = &report.results[0];
    assert_eq!(alpha.domain, "a.com");
    assert!(alpha.valid);
    assert_eq!(alpha.status, 200);
    assert_eq!(alpha.title, "Alpha");
    assert!(alpha.error.is_none());

    let beta = &report.results[1];
    assert_eq!(beta.domain, "b.net");
    assert!(!beta.valid);
    assert_eq!(beta.status, 500);
    assert_eq!(beta.title, TITLE_UNREACHABLE);
    assert_eq!(beta.error.as_deref(), Some("HTTP status 500"));

    assert_eq!(engine.calls(), 2);
}

#[tokio::test]
async fn test_source_fetch_failure_fails_job() {
    let source = source_server(500, "").await;
    let engine = Arc::new(StubEngine::new(&[]));
    let (server, _) = test_app(settings_for(&source.uri()), engine.clone());

    let response = server
        .post("/v1/jobs")
        .json(&json!({ "sync_wait_ms": 5000 }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let job: JobSnapshot = response.json();
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.report.is_none());
    assert!(job.error.unwrap().contains("HTTP status 500"));
    assert_eq!(job.progress.total, 0);
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn test_unreachable_source_fails_job() {
    // 端口 9 通常没有监听者
    let engine = Arc::new(StubEngine::new(&[]));
    let (server, _) = test_app(settings_for("http://127.0.0.1:9/"), engine);

    let response = server
        .post("/v1/jobs")
        .json(&json!({ "sync_wait_ms": 5000 }))
        .await;

    let job: JobSnapshot = response.json();
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.error.is_some());
}

#[tokio::test]
async fn test_job_is_accepted_then_polled_to_completion() {
    let source = source_server(200, SOURCE_PAGE).await;
    let engine = Arc::new(
        StubEngine::new(&[("https://a.com", 200, ""), ("https://b.net", 200, "")])
            .with_delay(Duration::from_millis(200)),
    );
    let (server, _) = test_app(settings_for(&source.uri()), engine);

    let response = server.post("/v1/jobs").json(&json!({})).await;
    response.assert_status(StatusCode::ACCEPTED);
    let accepted: Value = response.json();
    assert_eq!(accepted["success"], true);
    let id = accepted["id"].as_str().unwrap().to_string();

    let mut finished = None;
    for _ in 0..50 {
        let job: JobSnapshot = server.get(&format!("/v1/jobs/{}", id)).await.json();
        if job.status.is_finished() {
            finished = Some(job);
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let job = finished.expect("job did not finish in time");
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.report.unwrap().valid_count, 2);
}

#[tokio::test]
async fn test_request_overrides_limit_and_seed() {
    let source = source_server(200, "<p>nothing to see</p>").await;
    let engine = Arc::new(StubEngine::new(&[("https://seed.org", 200, "")]));
    let (server, _) = test_app(settings_for(&source.uri()), engine);

    let response = server
        .post("/v1/jobs")
        .json(&json!({
            "seed": ["seed.org", "other.org", "not-a-domain"],
            "candidate_limit": 1,
            "fetch_title": false,
            "sync_wait_ms": 5000
        }))
        .await;

    let job: JobSnapshot = response.json();
    let report = job.report.unwrap();
    assert_eq!(report.total_candidates, 1);
    assert_eq!(report.results[0].domain, "seed.org");
    assert!(report.results[0].valid);
}

#[tokio::test]
async fn test_invalid_request_is_rejected() {
    let engine = Arc::new(StubEngine::new(&[]));
    let (server, repo) = test_app(settings_for("http://127.0.0.1:9/"), engine);

    let response = server
        .post("/v1/jobs")
        .json(&json!({ "concurrency": 0 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);

    let response = server
        .post("/v1/jobs")
        .json(&json!({ "source_url": "not a url" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/v1/jobs")
        .json(&json!({ "candidate_limit": 101 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_unknown_job_returns_404() {
    let engine = Arc::new(StubEngine::new(&[]));
    let (server, _) = test_app(settings_for("http://127.0.0.1:9/"), engine);

    let response = server
        .get(&format!("/v1/jobs/{}", uuid::Uuid::new_v4()))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Job not found"));
}
