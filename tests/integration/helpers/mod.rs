// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.


use axum_test::TestServer;
use linkprobe::application::use_cases::link_job::{JobOptions, LinkJobUseCase};
use linkprobe::config::settings::Settings;
use linkprobe::engines::reqwest_engine::ReqwestEngine;
use linkprobe::engines::traits::ProbeEngine;
use linkprobe::infrastructure::repositories::job_repo_impl::InMemoryJobRepository;
use linkprobe::presentation::routes;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 默认配置，源页面指向给定地址
pub fn settings_for(source_url: &str) -> Settings {
    let mut settings = Settings::from_defaults().unwrap();
    settings.source.url = source_url.to_string();
    settings
}

/// 启动提供源页面的模拟服务器
pub async fn source_server(status: u16, html: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(html),
        )
        .mount(&server)
        .await;
    server
}

/// 构建测试服务：真实的源页面抓取，探测交给给定引擎
pub fn test_app(
    settings: Settings,
    probe_engine: Arc<dyn ProbeEngine>,
) -> (TestServer, Arc<InMemoryJobRepository>) {
    let fetcher = Arc::new(ReqwestEngine::from_settings(&settings).unwrap());
    let use_case = Arc::new(LinkJobUseCase::new(
        fetcher,
        probe_engine,
        JobOptions::from_settings(&settings),
    ));
    let repo = Arc::new(InMemoryJobRepository::new());
    let app = routes::app(repo.clone(), use_case, Arc::new(settings));

    (TestServer::new(app).unwrap(), repo)
}
