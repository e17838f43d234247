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

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::application::dto::job_request::CreateJobRequestDto;
use crate::config::settings::Settings;
use crate::domain::models::candidate::{CandidateSet, ExtractionMode};
use crate::domain::models::job::Job;
use crate::domain::models::report::JobReport;
use crate::domain::services::candidate_service::CandidateSetBuilder;
use crate::domain::services::extraction_service::ExtractionService;
use crate::domain::services::verification_service::{VerificationOptions, VerificationService};
use crate::engines::traits::{ProbeEngine, SourceFetcher};
use crate::utils::errors::JobError;

/// 单个任务的运行参数
///
/// 由配置生成默认值，再由请求中的字段逐项覆盖
#[derive(Debug, Clone)]
pub struct JobOptions {
    /// 源页面URL
    pub source_url: String,
    /// 提取模式
    pub mode: ExtractionMode,
    /// 候选集合上限
    pub candidate_limit: usize,
    /// 种子域名
    pub seed: Vec<String>,
    /// 验证参数
    pub verification: VerificationOptions,
}

impl JobOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            source_url: settings.source.url.clone(),
            mode: settings.extraction.mode,
            candidate_limit: settings.extraction.candidate_limit,
            seed: settings.extraction.seed.clone(),
            verification: VerificationOptions::from_settings(&settings.verification),
        }
    }

    /// 用请求中给出的字段覆盖默认值
    ///
    /// 请求给出的种子列表整体替换配置中的种子
    pub fn with_request(mut self, request: &CreateJobRequestDto) -> Self {
        if let Some(source_url) = &request.source_url {
            self.source_url = source_url.clone();
        }
        if let Some(mode) = request.mode {
            self.mode = mode;
        }
        if let Some(limit) = request.candidate_limit {
            self.candidate_limit = limit;
        }
        if let Some(seed) = &request.seed {
            self.seed = seed.clone();
        }
        if let Some(concurrency) = request.concurrency {
            self.verification.concurrency = concurrency;
        }
        if let Some(timeout_ms) = request.timeout_ms {
            self.verification.timeout = Duration::from_millis(timeout_ms);
        }
        if let Some(fetch_title) = request.fetch_title {
            self.verification.fetch_title = fetch_title;
        }
        self
    }
}

/// 链接任务用例
///
/// 抓取源页面 → 提取候选 → 构建候选集合 → 分窗口验证 → 汇总报告。
/// 只有源页面抓取失败会让任务失败。
pub struct LinkJobUseCase {
    fetcher: Arc<dyn SourceFetcher>,
    verifier: VerificationService,
    defaults: JobOptions,
}

impl LinkJobUseCase {
    pub fn new(
        fetcher: Arc<dyn SourceFetcher>,
        engine: Arc<dyn ProbeEngine>,
        defaults: JobOptions,
    ) -> Self {
        Self {
            fetcher,
            verifier: VerificationService::new(engine),
            defaults,
        }
    }

    /// 合并默认参数与请求参数
    pub fn options_for(&self, request: &CreateJobRequestDto) -> JobOptions {
        self.defaults.clone().with_request(request)
    }

    /// 运行任务直到完成或失败
    ///
    /// 任务状态与进度都写在 `job` 上，轮询方随时可读取。
    pub async fn run(&self, job: &Job, options: &JobOptions) -> Result<(), JobError> {
        job.mark_running();
        job.progress()
            .set_current(format!("Fetching {}", options.source_url));
        info!(job_id = %job.id, source = %options.source_url, "Job started");

        let html = match self.fetcher.fetch_page(&options.source_url).await {
            Ok(html) => html,
            Err(e) => {
                let err = JobError::SourceFetch(e.describe());
                error!(job_id = %job.id, source = %options.source_url, "{}", err);
                job.progress().set_current("Failed");
                job.fail(err.to_string());
                metrics::counter!("linkprobe_jobs_total", "outcome" => "failed").increment(1);
                return Err(err);
            }
        };

        let candidates = Self::build_candidates(&html, options);
        job.progress().start(candidates.to_strings());

        let results = self
            .verifier
            .verify(&candidates, &options.verification, job.progress())
            .await;

        let report = JobReport::aggregate(&options.source_url, results, candidates.len());
        info!(
            job_id = %job.id,
            total = report.total_candidates,
            valid = report.valid_count,
            invalid = report.invalid_count,
            "Job completed"
        );

        job.progress().set_current("Completed");
        job.complete(report);
        metrics::counter!("linkprobe_jobs_total", "outcome" => "completed").increment(1);

        Ok(())
    }

    fn build_candidates(html: &str, options: &JobOptions) -> CandidateSet {
        let extracted = ExtractionService::extract(html, options.mode);
        debug!(
            "Extracted {} candidates in {} mode",
            extracted.len(),
            options.mode
        );
        CandidateSetBuilder::new(options.candidate_limit).build(extracted, &options.seed)
    }
}

#[cfg(test)]
#[path = "link_job_test.rs"]
mod tests;
