// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::progress::ProgressState;
use crate::domain::models::report::JobReport;
use crate::domain::services::progress_tracker::ProgressTracker;

/// 任务状态枚举
///
/// 状态转换遵循以下流程：
/// Queued → Running → Completed/Failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// 已创建，尚未开始
    #[default]
    Queued,
    /// 正在抓取源页面或验证候选
    Running,
    /// 已完成，报告可用
    Completed,
    /// 源页面抓取失败，任务中止
    Failed,
}

impl JobStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "queued"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Default)]
struct JobState {
    status: JobStatus,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    report: Option<Arc<JobReport>>,
    error: Option<String>,
}

/// 任务实体
///
/// 一次完整的提取与验证运行。任务拥有自己的进度跟踪器，
/// 创建即意味着进度被重置，因此并发任务之间互不干扰。
#[derive(Debug)]
pub struct Job {
    /// 任务唯一标识符
    pub id: Uuid,
    /// 源页面URL
    pub source_url: String,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    progress: ProgressTracker,
    state: RwLock<JobState>,
}

impl Job {
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_url: source_url.into(),
            created_at: Utc::now(),
            progress: ProgressTracker::new(),
            state: RwLock::new(JobState::default()),
        }
    }

    /// 任务的进度跟踪器
    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn status(&self) -> JobStatus {
        self.state.read().status
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().finished_at
    }

    pub fn report(&self) -> Option<Arc<JobReport>> {
        self.state.read().report.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn mark_running(&self) {
        let mut state = self.state.write();
        state.status = JobStatus::Running;
        state.started_at = Some(Utc::now());
    }

    pub fn complete(&self, report: JobReport) {
        let mut state = self.state.write();
        state.status = JobStatus::Completed;
        state.finished_at = Some(Utc::now());
        state.report = Some(Arc::new(report));
    }

    pub fn fail(&self, error: impl Into<String>) {
        let mut state = self.state.write();
        state.status = JobStatus::Failed;
        state.finished_at = Some(Utc::now());
        state.error = Some(error.into());
    }

    /// 生成任务的只读视图
    pub fn snapshot(&self) -> JobSnapshot {
        let state = self.state.read();
        JobSnapshot {
            id: self.id,
            status: state.status,
            source_url: self.source_url.clone(),
            created_at: self.created_at,
            started_at: state.started_at,
            finished_at: state.finished_at,
            progress: self.progress.snapshot(),
            report: state.report.as_deref().cloned(),
            error: state.error.clone(),
        }
    }
}

/// 任务快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub id: Uuid,
    pub status: JobStatus,
    pub source_url: String,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub progress: ProgressState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<JobReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
