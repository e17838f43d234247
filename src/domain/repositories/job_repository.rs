// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::models::job::Job;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 记录未找到
    #[error("Job not found: {0}")]
    NotFound(Uuid),
    /// 尚未创建过任何任务
    #[error("No job has been created yet")]
    NoJobs,
    /// 记录已存在
    #[error("Job already exists: {0}")]
    AlreadyExists(Uuid),
}

/// 任务仓库特质
///
/// 按任务ID登记进行中的与已结束的任务，多个任务可同时存在
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// 登记新任务，并记为最近创建的任务
    async fn insert(&self, job: Arc<Job>) -> Result<(), RepositoryError>;
    /// 根据ID查找任务
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Arc<Job>>, RepositoryError>;
    /// 最近创建的任务
    async fn latest(&self) -> Result<Option<Arc<Job>>, RepositoryError>;
    /// 删除在 `cutoff` 之前结束的任务，返回删除数量
    async fn remove_finished_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError>;
    /// 当前登记的任务数量
    async fn count(&self) -> Result<usize, RepositoryError>;
}
