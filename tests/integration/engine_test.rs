// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use linkprobe::config::settings::DEFAULT_USER_AGENT;
use linkprobe::domain::models::candidate::DomainCandidate;
use linkprobe::domain::models::verification::{TITLE_FAILED, TITLE_NONE};
use linkprobe::domain::services::candidate_service::CandidateSetBuilder;
use linkprobe::domain::services::progress_tracker::ProgressTracker;
use linkprobe::domain::services::verification_service::{
    VerificationOptions, VerificationService,
};
use linkprobe::engines::reqwest_engine::ReqwestEngine;
use linkprobe::engines::traits::SourceFetcher;
use axum::{http::HeaderMap, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine() -> Arc<ReqwestEngine> {
    Arc::new(ReqwestEngine::new(DEFAULT_USER_AGENT, 10, Duration::from_secs(5)).unwrap())
}

fn http_options(fetch_title: bool) -> VerificationOptions {
    VerificationOptions {
        concurrency: 5,
        timeout: Duration::from_millis(500),
        fetch_title,
        scheme: "http".to_string(),
        overall_deadline: None,
    }
}

/// 以 `host:port` 作为候选，探测URL落到模拟服务器上
fn candidate_for(server: &MockServer) -> DomainCandidate {
    let host = server.uri().trim_start_matches("http://").to_string();
    DomainCandidate::parse(&host).unwrap()
}

/// 把请求里的 `user-agent` 原样写回响应体
async fn start_agent_echo_server() -> String {
    let app = Router::new().route(
        "/",
        get(|headers: HeaderMap| async move {
            headers
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string()
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_source_fetch_sends_browser_user_agent() {
    assert!(DEFAULT_USER_AGENT.contains(','));
    let server_url = start_agent_echo_server().await;

    let page = engine().fetch_page(&format!("{}/", server_url)).await.unwrap();

    assert_eq!(page, DEFAULT_USER_AGENT);
}

#[tokio::test]
async fn test_verifier_reads_titles_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><head><title>Mock &amp; Co</title></head></html>"),
        )
        .mount(&server)
        .await;

    let candidates = CandidateSetBuilder::new(20).build(vec![candidate_for(&server)], &[]);
    let progress = ProgressTracker::new();
    progress.reset(candidates.len());

    let results = VerificationService::new(engine())
        .verify(&candidates, &http_options(true), &progress)
        .await;

    assert_eq!(results.len(), 1);
    assert!(results[0].valid);
    assert_eq!(results[0].status, 200);
    assert_eq!(results[0].title, "Mock & Co");
    assert_eq!(progress.snapshot().processed, 1);
}

#[tokio::test]
async fn test_fast_mode_uses_head_requests() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let candidates = CandidateSetBuilder::new(20).build(vec![candidate_for(&server)], &[]);
    let results = VerificationService::new(engine())
        .verify(&candidates, &http_options(false), &ProgressTracker::new())
        .await;

    assert!(results[0].valid);
    assert_eq!(results[0].title, TITLE_NONE);
}

#[tokio::test]
async fn test_slow_site_times_out_without_blocking_others() {
    let slow = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&slow)
        .await;

    let fast = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<title>Fast</title>"))
        .mount(&fast)
        .await;

    let candidates = CandidateSetBuilder::new(20)
        .build(vec![candidate_for(&slow), candidate_for(&fast)], &[]);

    let started = std::time::Instant::now();
    let results = VerificationService::new(engine())
        .verify(&candidates, &http_options(true), &ProgressTracker::new())
        .await;

    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(results.len(), 2);
    assert!(!results[0].valid);
    assert_eq!(results[0].status, 0);
    assert_eq!(results[0].title, TITLE_FAILED);
    assert!(results[0].error.as_deref().unwrap().contains("timed out"));
    assert!(results[1].valid);
    assert_eq!(results[1].title, "Fast");
}
