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

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::settings::VerificationSettings;
use crate::domain::models::candidate::{CandidateSet, DomainCandidate};
use crate::domain::models::verification::VerificationResult;
use crate::domain::services::progress_tracker::ProgressTracker;
use crate::engines::traits::{EngineError, ProbeEngine, ProbeMethod, ProbeRequest};
use crate::utils::text_processing::extract_title;

/// 验证参数
#[derive(Debug, Clone)]
pub struct VerificationOptions {
    /// 窗口大小，即同时进行的探测数
    pub concurrency: usize,
    /// 单次探测超时
    pub timeout: Duration,
    /// 是否读取响应体并提取标题（慢速模式）
    pub fetch_title: bool,
    /// 探测URL的协议
    pub scheme: String,
    /// 整体截止时间，超过后不再启动新窗口
    pub overall_deadline: Option<Duration>,
}

impl VerificationOptions {
    pub fn from_settings(settings: &VerificationSettings) -> Self {
        Self {
            concurrency: settings.concurrency,
            timeout: Duration::from_millis(settings.timeout_ms),
            fetch_title: settings.fetch_title,
            scheme: settings.scheme.clone(),
            overall_deadline: settings.overall_deadline_ms.map(Duration::from_millis),
        }
    }

    /// 候选域名对应的探测URL
    pub fn probe_url(&self, candidate: &DomainCandidate) -> String {
        format!("{}://{}", self.scheme, candidate)
    }
}

/// 验证服务
///
/// 按固定大小的窗口并发探测候选域名。窗口内所有探测结束（成功、失败或超时）
/// 后才开始下一个窗口；单个探测的失败被隔离在它自己的结果里，从不重试。
pub struct VerificationService {
    engine: Arc<dyn ProbeEngine>,
}

impl VerificationService {
    pub fn new(engine: Arc<dyn ProbeEngine>) -> Self {
        Self { engine }
    }

    /// 验证候选集合
    ///
    /// # 参数
    ///
    /// * `candidates` - 候选集合
    /// * `options` - 并发、超时与标题参数
    /// * `progress` - 每个窗口前后推进的进度跟踪器
    ///
    /// # 返回值
    ///
    /// 与候选顺序一致的结果列表。触发整体截止时间时只包含已验证的部分。
    pub async fn verify(
        &self,
        candidates: &CandidateSet,
        options: &VerificationOptions,
        progress: &ProgressTracker,
    ) -> Vec<VerificationResult> {
        let window_size = options.concurrency.max(1);
        let window_count = candidates.len().div_ceil(window_size);
        let started = Instant::now();
        let mut results = Vec::with_capacity(candidates.len());

        for (index, window) in candidates.as_slice().chunks(window_size).enumerate() {
            if let Some(deadline) = options.overall_deadline {
                if started.elapsed() >= deadline {
                    warn!(
                        "Verification deadline of {:?} exceeded, skipping {} remaining candidates",
                        deadline,
                        candidates.len() - results.len()
                    );
                    break;
                }
            }

            let label = window
                .iter()
                .map(DomainCandidate::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            progress.advance(results.len(), format!("Verifying {}", label));
            debug!(
                "Window {}/{}: probing {}",
                index + 1,
                window_count,
                label
            );

            let window_results =
                join_all(window.iter().map(|candidate| self.verify_one(candidate, options))).await;
            results.extend(window_results);

            progress.advance(
                results.len(),
                format!("Verified {}/{} windows", index + 1, window_count),
            );
        }

        info!(
            "Verified {} of {} candidates in {:?}, {} valid",
            results.len(),
            candidates.len(),
            started.elapsed(),
            results.iter().filter(|r| r.valid).count()
        );

        results
    }

    /// 探测单个候选域名
    ///
    /// 引擎调用与计时器竞争，超时后探测 future 被直接丢弃。
    pub async fn verify_one(
        &self,
        candidate: &DomainCandidate,
        options: &VerificationOptions,
    ) -> VerificationResult {
        let url = options.probe_url(candidate);
        let request = ProbeRequest {
            url: url.clone(),
            method: if options.fetch_title {
                ProbeMethod::Get
            } else {
                ProbeMethod::Head
            },
            timeout: options.timeout,
            read_body: options.fetch_title,
        };

        let start = Instant::now();
        let outcome = tokio::time::timeout(options.timeout, self.engine.probe(&request)).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let (result, label) = match outcome {
            Ok(Ok(response)) if response.is_success() => {
                let title = response.body.as_deref().and_then(extract_title);
                (
                    VerificationResult::valid(
                        candidate.as_str(),
                        url,
                        response.status_code,
                        title,
                        response.response_time_ms,
                    ),
                    "valid",
                )
            }
            Ok(Ok(response)) => (
                VerificationResult::http_failure(
                    candidate.as_str(),
                    url,
                    response.status_code,
                    response.response_time_ms,
                ),
                "http_error",
            ),
            Ok(Err(e)) => (
                VerificationResult::network_failure(candidate.as_str(), url, e.describe(), elapsed_ms),
                "network_error",
            ),
            Err(_) => (
                VerificationResult::network_failure(
                    candidate.as_str(),
                    url,
                    EngineError::Timeout(options.timeout.as_millis() as u64).to_string(),
                    elapsed_ms,
                ),
                "timeout",
            ),
        };

        debug!(
            "Probe {} -> {} (status {}, {}ms)",
            candidate, label, result.status, elapsed_ms
        );
        metrics::counter!("linkprobe_probes_total", "outcome" => label).increment(1);
        metrics::histogram!("linkprobe_probe_duration_seconds")
            .record(elapsed_ms as f64 / 1000.0);

        result
    }
}
