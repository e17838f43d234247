// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;
use tracing::debug;

use crate::domain::models::candidate::{CandidateSet, DomainCandidate};
use crate::domain::services::extraction_service::ExtractionService;

/// 候选集合构建器
///
/// 合并提取结果与种子列表，去重后截断到上限 `limit`。
/// 截断是有意的背压：单个请求能触发的出站探测数因此有上界。
#[derive(Debug, Clone, Copy)]
pub struct CandidateSetBuilder {
    limit: usize,
}

impl CandidateSetBuilder {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// 构建候选集合
    ///
    /// 先放入提取结果（保持提取顺序），再追加尚未出现的种子；
    /// 取合并后序列的前 `limit` 项。
    pub fn build<I>(&self, extracted: I, seed: &[String]) -> CandidateSet
    where
        I: IntoIterator<Item = DomainCandidate>,
    {
        let extracted: Vec<DomainCandidate> = extracted.into_iter().collect();
        let discovered = extracted.len();
        let mut seen = HashSet::new();

        let seeds = seed.iter().filter_map(|token| {
            let normalized = ExtractionService::normalize_token(token);
            if normalized.is_none() {
                debug!("Ignoring seed entry that is not a domain: {}", token);
            }
            normalized
        });

        let candidates: Vec<DomainCandidate> = extracted
            .into_iter()
            .chain(seeds)
            .filter(|candidate| seen.insert(candidate.as_str().to_string()))
            .take(self.limit)
            .collect();

        debug!(
            "Built candidate set: {} kept (limit {}), {} extracted",
            candidates.len(),
            self.limit,
            discovered
        );

        CandidateSet::from_unique(candidates)
    }
}
