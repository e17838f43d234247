// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::link_job::LinkJobUseCase;
use crate::config::settings::Settings;
use crate::infrastructure::repositories::job_repo_impl::InMemoryJobRepository;
use crate::presentation::handlers::job_handler;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// 处理器所需的仓库、用例与配置通过 `Extension` 层注入
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let job_routes = Router::new()
        .route(
            "/v1/jobs",
            post(job_handler::create_job::<InMemoryJobRepository>),
        )
        .route(
            "/v1/jobs/{id}",
            get(job_handler::get_job::<InMemoryJobRepository>),
        )
        .route(
            "/v1/jobs/{id}/progress",
            get(job_handler::get_job_progress::<InMemoryJobRepository>),
        )
        .route(
            "/v1/progress",
            get(job_handler::get_latest_progress::<InMemoryJobRepository>),
        );

    Router::new().merge(public_routes).merge(job_routes)
}

/// 创建注入了依赖的完整应用
pub fn app(
    repo: Arc<InMemoryJobRepository>,
    use_case: Arc<LinkJobUseCase>,
    settings: Arc<Settings>,
) -> Router {
    routes()
        .layer(Extension(repo))
        .layer(Extension(use_case))
        .layer(Extension(settings))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
