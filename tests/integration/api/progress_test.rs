// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::stub_engine::StubEngine;
use crate::integration::helpers::{settings_for, source_server, test_app};
use axum::http::StatusCode;
use linkprobe::domain::models::progress::ProgressState;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const FIVE_LINKS: &str = r#"
<a href="https://one.com">1</a>
<a href="https://two.com">2</a>
<a href="https://three.com">3</a>
<a href="https://four.com">4</a>
<a href="https://five.com">5</a>
"#;

#[tokio::test]
async fn test_progress_is_monotonic_while_polling() {
    let source = source_server(200, FIVE_LINKS).await;
    let engine = Arc::new(
        StubEngine::new(&[
            ("https://one.com", 200, ""),
            ("https://two.com", 200, ""),
            ("https://three.com", 404, ""),
            ("https://four.com", 200, ""),
            ("https://five.com", 200, ""),
        ])
        .with_delay(Duration::from_millis(100)),
    );
    let (server, _) = test_app(settings_for(&source.uri()), engine);

    let accepted: Value = server
        .post("/v1/jobs")
        .json(&json!({ "concurrency": 2 }))
        .await
        .json();
    let id = accepted["id"].as_str().unwrap().to_string();

    let mut last = ProgressState::default();
    let mut done = false;
    for _ in 0..100 {
        let response = server.get(&format!("/v1/jobs/{}/progress", id)).await;
        response.assert_status_ok();
        let progress: ProgressState = response.json();

        assert!(progress.processed <= progress.total || progress.total == 0);
        if last.total > 0 {
            assert_eq!(progress.total, last.total);
            assert!(progress.processed >= last.processed);
        }

        last = progress;
        if last.current == "Completed" {
            done = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert!(done, "job did not complete in time");
    assert_eq!(last.total, 5);
    assert_eq!(last.processed, 5);
    assert!(last.is_complete());
    assert_eq!(
        last.links,
        vec!["one.com", "two.com", "three.com", "four.com", "five.com"]
    );
}

#[tokio::test]
async fn test_latest_progress_follows_newest_job() {
    let source = source_server(200, FIVE_LINKS).await;
    let engine = Arc::new(StubEngine::new(&[]));
    let (server, _) = test_app(settings_for(&source.uri()), engine);

    server
        .get("/v1/progress")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server
        .post("/v1/jobs")
        .json(&json!({ "sync_wait_ms": 5000 }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get("/v1/progress").await;
    response.assert_status_ok();
    let progress: ProgressState = response.json();
    assert_eq!(progress.total, 5);
    assert_eq!(progress.processed, 5);

    server
        .post("/v1/jobs")
        .json(&json!({ "candidate_limit": 2, "sync_wait_ms": 5000 }))
        .await
        .assert_status(StatusCode::CREATED);

    let progress: ProgressState = server.get("/v1/progress").await.json();
    assert_eq!(progress.total, 2);
    assert_eq!(progress.links, vec!["one.com", "two.com"]);
}

#[tokio::test]
async fn test_progress_for_unknown_job_returns_404() {
    let engine = Arc::new(StubEngine::new(&[]));
    let (server, _) = test_app(settings_for("http://127.0.0.1:9/"), engine);

    server
        .get(&format!("/v1/jobs/{}/progress", uuid::Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
