// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::candidate::ExtractionMode;

/// 创建任务请求数据传输对象
///
/// 所有字段均可省略，省略时使用配置中的默认值
#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
pub struct CreateJobRequestDto {
    /// 源页面URL
    #[validate(url)]
    pub source_url: Option<String>,
    /// 追加在提取结果之后的种子域名
    pub seed: Option<Vec<String>>,
    /// 是否读取页面标题（慢速模式）
    pub fetch_title: Option<bool>,
    /// 每个窗口同时探测的域名数
    #[validate(range(min = 1, max = 50))]
    pub concurrency: Option<usize>,
    /// 单次探测超时（毫秒）
    #[validate(range(min = 100, max = 60000))]
    pub timeout_ms: Option<u64>,
    /// 候选域名上限
    #[validate(range(min = 1, max = 100))]
    pub candidate_limit: Option<usize>,
    /// 提取模式
    pub mode: Option<ExtractionMode>,
    /// 同步等待时间（毫秒），0 表示立即返回
    #[validate(range(min = 0, max = 300000))]
    pub sync_wait_ms: Option<u64>,
}
