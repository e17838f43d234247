// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::JobSettings;
use crate::domain::repositories::job_repository::JobRepository;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// 任务清理工作器
///
/// 定期删除结束时间超过保留期的任务，进行中的任务不受影响
pub struct JobJanitor<R>
where
    R: JobRepository + Send + Sync + 'static,
{
    repository: Arc<R>,
    interval: Duration,
    retention: Duration,
}

impl<R> JobJanitor<R>
where
    R: JobRepository + Send + Sync + 'static,
{
    pub fn new(repository: Arc<R>, interval: Duration, retention: Duration) -> Self {
        Self {
            repository,
            // interval 不接受零周期
            interval: interval.max(Duration::from_secs(1)),
            retention,
        }
    }

    pub fn from_settings(repository: Arc<R>, settings: &JobSettings) -> Self {
        Self::new(
            repository,
            Duration::from_secs(settings.sweep_interval_secs),
            Duration::from_secs(settings.retention_secs),
        )
    }

    /// 运行工作器
    pub async fn run(&self) {
        info!(
            "Job janitor started (interval {:?}, retention {:?})",
            self.interval, self.retention
        );

        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;

            match self.sweep().await {
                Ok(count) => {
                    if count > 0 {
                        info!("Removed {} finished jobs", count);
                    }
                }
                Err(e) => {
                    error!("Failed to sweep finished jobs: {}", e);
                }
            }
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// 执行一次清理，返回删除的任务数
    pub async fn sweep(&self) -> Result<u64, String> {
        let retention = chrono::Duration::from_std(self.retention).map_err(|e| e.to_string())?;
        let cutoff = Utc::now() - retention;
        debug!("Sweeping jobs finished before {}", cutoff);

        self.repository
            .remove_finished_before(cutoff)
            .await
            .map_err(|e| e.to_string())
    }
}
