// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::job_request::CreateJobRequestDto;
use crate::application::dto::job_response::JobAcceptedDto;
use crate::application::use_cases::link_job::LinkJobUseCase;
use crate::config::settings::Settings;
use crate::domain::models::job::{Job, JobSnapshot};
use crate::domain::models::progress::ProgressState;
use crate::domain::repositories::job_repository::{JobRepository, RepositoryError};
use crate::presentation::errors::AppError;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// 同步等待任务结束
///
/// # 参数
/// * `job` - 要等待的任务
/// * `sync_wait_ms` - 同步等待时间（毫秒）
/// * `base_poll_interval_ms` - 基础轮询间隔（毫秒）
///
/// # 返回值
/// 等待时间内任务结束返回 `true`，超时返回 `false`
///
/// 轮询间隔从基础值开始逐轮放大 1.5 倍，范围 50ms - 500ms
pub async fn wait_for_job_completion(
    job: &Job,
    sync_wait_ms: u64,
    base_poll_interval_ms: u64,
) -> bool {
    let start_time = Instant::now();
    let timeout_duration = Duration::from_millis(sync_wait_ms);
    let min_interval = 50u64;
    let max_interval = 500u64;

    let mut current_interval = base_poll_interval_ms.clamp(min_interval, max_interval);

    loop {
        if job.status().is_finished() {
            return true;
        }

        let remaining_time = timeout_duration.saturating_sub(start_time.elapsed());
        if remaining_time.is_zero() {
            return false;
        }

        sleep(Duration::from_millis(current_interval).min(remaining_time)).await;
        current_interval = ((current_interval as f64 * 1.5) as u64).clamp(min_interval, max_interval);
    }
}

/// 创建链接任务
///
/// 任务在后台运行；`sync_wait_ms` 内结束时返回 201 和完整任务，
/// 否则返回 202，客户端随后轮询进度。
pub async fn create_job<R: JobRepository + 'static>(
    Extension(repo): Extension<Arc<R>>,
    Extension(use_case): Extension<Arc<LinkJobUseCase>>,
    Extension(settings): Extension<Arc<Settings>>,
    Json(request): Json<CreateJobRequestDto>,
) -> Result<Response, AppError> {
    request.validate()?;

    let options = use_case.options_for(&request);
    let job = Arc::new(Job::new(options.source_url.clone()));
    repo.insert(job.clone()).await?;
    info!(job_id = %job.id, source = %job.source_url, "Job created");

    let worker_job = job.clone();
    tokio::spawn(async move {
        // 失败已记录在任务状态上
        let _ = use_case.run(&worker_job, &options).await;
    });

    let sync_wait_ms = request
        .sync_wait_ms
        .unwrap_or(settings.jobs.default_sync_wait_ms);

    if sync_wait_ms > 0 && wait_for_job_completion(&job, sync_wait_ms, 50).await {
        return Ok((StatusCode::CREATED, Json(job.snapshot())).into_response());
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(JobAcceptedDto {
            success: true,
            id: job.id,
            status: job.status(),
        }),
    )
        .into_response())
}

/// 查询任务状态
///
/// 已完成的任务带报告，失败的任务带错误描述
pub async fn get_job<R: JobRepository + 'static>(
    Extension(repo): Extension<Arc<R>>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobSnapshot>, AppError> {
    let job = find_job(repo.as_ref(), id).await?;
    Ok(Json(job.snapshot()))
}

/// 查询任务进度
pub async fn get_job_progress<R: JobRepository + 'static>(
    Extension(repo): Extension<Arc<R>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProgressState>, AppError> {
    let job = find_job(repo.as_ref(), id).await?;
    Ok(Json(job.progress().snapshot()))
}

/// 查询最近创建的任务的进度
pub async fn get_latest_progress<R: JobRepository + 'static>(
    Extension(repo): Extension<Arc<R>>,
) -> Result<Json<ProgressState>, AppError> {
    let job = repo.latest().await?.ok_or(RepositoryError::NoJobs)?;
    Ok(Json(job.progress().snapshot()))
}

async fn find_job<R: JobRepository>(repo: &R, id: Uuid) -> Result<Arc<Job>, RepositoryError> {
    repo.find_by_id(id)
        .await?
        .ok_or(RepositoryError::NotFound(id))
}
