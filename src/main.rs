// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use linkprobe::application::use_cases::link_job::{JobOptions, LinkJobUseCase};
use linkprobe::config::settings::Settings;
use linkprobe::engines::reqwest_engine::ReqwestEngine;
use linkprobe::infrastructure::repositories::job_repo_impl::InMemoryJobRepository;
use linkprobe::presentation::routes;
use linkprobe::utils::telemetry;
use linkprobe::workers::janitor::JobJanitor;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting linkprobe...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    if settings.metrics.enabled {
        linkprobe::infrastructure::metrics::init_metrics(&settings.metrics.listen_addr);
    }

    // 3. Initialize engine
    let engine = Arc::new(ReqwestEngine::from_settings(&settings)?);
    let use_case = Arc::new(LinkJobUseCase::new(
        engine.clone(),
        engine,
        JobOptions::from_settings(&settings),
    ));

    // 4. Job registry and janitor
    let repo = Arc::new(InMemoryJobRepository::new());
    JobJanitor::from_settings(repo.clone(), &settings.jobs).start();

    // 5. Start HTTP server
    let app = routes::app(repo, use_case, settings.clone());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
