// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 页面没有 `<title>` 或快速模式未读取响应体
pub const TITLE_NONE: &str = "No title";
/// 目标返回了非 2xx 状态码
pub const TITLE_UNREACHABLE: &str = "Unreachable";
/// 请求在拿到响应前失败（超时、连接错误等）
pub const TITLE_FAILED: &str = "Verification failed";

/// 验证结果
///
/// 每个实际被探测的候选域名对应一条结果，创建后不可变。
/// 不变式：`valid == true` 时 `error` 为 `None`；
/// `valid == false` 时 `title` 为失败哨兵值且 `error` 非空。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// 候选域名
    pub domain: String,
    /// 探测URL
    pub url: String,
    /// 是否为可访问的站点
    pub valid: bool,
    /// HTTP状态码，请求未完成时为 0
    pub status: u16,
    /// 页面标题或哨兵值
    pub title: String,
    /// 失败描述
    pub error: Option<String>,
    /// 探测耗时（毫秒）
    pub response_time_ms: u64,
}

impl VerificationResult {
    /// 探测成功
    pub fn valid(
        domain: impl Into<String>,
        url: impl Into<String>,
        status: u16,
        title: Option<String>,
        response_time_ms: u64,
    ) -> Self {
        Self {
            domain: domain.into(),
            url: url.into(),
            valid: true,
            status,
            title: title.unwrap_or_else(|| TITLE_NONE.to_string()),
            error: None,
            response_time_ms,
        }
    }

    /// 目标返回非成功状态码，保留状态码
    pub fn http_failure(
        domain: impl Into<String>,
        url: impl Into<String>,
        status: u16,
        response_time_ms: u64,
    ) -> Self {
        Self {
            domain: domain.into(),
            url: url.into(),
            valid: false,
            status,
            title: TITLE_UNREACHABLE.to_string(),
            error: Some(format!("HTTP status {}", status)),
            response_time_ms,
        }
    }

    /// 网络错误或超时，状态码为 0
    pub fn network_failure(
        domain: impl Into<String>,
        url: impl Into<String>,
        error: impl Into<String>,
        response_time_ms: u64,
    ) -> Self {
        Self {
            domain: domain.into(),
            url: url.into(),
            valid: false,
            status: 0,
            title: TITLE_FAILED.to_string(),
            error: Some(error.into()),
            response_time_ms,
        }
    }
}
