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

use crate::domain::models::job::Job;
use crate::domain::repositories::job_repository::{JobRepository, RepositoryError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

/// 内存任务仓库
///
/// 基于DashMap的任务登记表，额外记录创建时间最晚的任务ID
#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: DashMap<Uuid, Arc<Job>>,
    latest: RwLock<Option<(Uuid, DateTime<Utc>)>>,
}

impl InMemoryJobRepository {
    /// 创建空的任务仓库
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn insert(&self, job: Arc<Job>) -> Result<(), RepositoryError> {
        let id = job.id;
        let created_at = job.created_at;
        match self.jobs.entry(id) {
            Entry::Occupied(_) => return Err(RepositoryError::AlreadyExists(id)),
            Entry::Vacant(entry) => {
                entry.insert(job);
            }
        }

        // 并发插入的完成顺序不确定，只让更晚创建的任务覆盖
        let mut latest = self.latest.write();
        if latest.map_or(true, |(_, at)| created_at >= at) {
            *latest = Some((id, created_at));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Arc<Job>>, RepositoryError> {
        Ok(self.jobs.get(&id).map(|entry| entry.value().clone()))
    }

    async fn latest(&self) -> Result<Option<Arc<Job>>, RepositoryError> {
        let id = self.latest.read().map(|(id, _)| id);
        Ok(id.and_then(|id| self.jobs.get(&id).map(|entry| entry.value().clone())))
    }

    async fn remove_finished_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let before = self.jobs.len();
        self.jobs.retain(|_, job| match job.finished_at() {
            Some(finished_at) => finished_at >= cutoff,
            None => true,
        });
        Ok(before.saturating_sub(self.jobs.len()) as u64)
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.jobs.len())
    }
}
