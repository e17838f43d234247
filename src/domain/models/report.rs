// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::verification::VerificationResult;

/// 任务报告
///
/// 交付给报告渲染方的数据：全部验证结果以及汇总计数，
/// 渲染方无需再自行统计。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobReport {
    /// 源页面URL
    pub source_url: String,
    /// 按候选顺序排列的验证结果
    pub results: Vec<VerificationResult>,
    /// 候选总数
    pub total_candidates: usize,
    /// 有效链接数
    pub valid_count: usize,
    /// 无效链接数
    pub invalid_count: usize,
    /// 是否因整体截止时间而只验证了部分候选
    pub deadline_exceeded: bool,
    /// 生成时间
    pub generated_at: DateTime<Utc>,
}

impl JobReport {
    /// 汇总验证结果
    pub fn aggregate(
        source_url: impl Into<String>,
        results: Vec<VerificationResult>,
        total_candidates: usize,
    ) -> Self {
        let valid_count = results.iter().filter(|r| r.valid).count();
        let invalid_count = results.len() - valid_count;
        Self {
            source_url: source_url.into(),
            deadline_exceeded: results.len() < total_candidates,
            results,
            total_candidates,
            valid_count,
            invalid_count,
            generated_at: Utc::now(),
        }
    }

    /// 只返回有效链接
    pub fn valid_links(&self) -> impl Iterator<Item = &VerificationResult> {
        self.results.iter().filter(|r| r.valid)
    }
}
