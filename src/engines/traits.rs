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

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 非成功状态码
    #[error("HTTP status {0}")]
    HttpStatus(u16),
    /// 超时（毫秒）
    #[error("Request timed out after {0}ms")]
    Timeout(u64),
    /// URL 无效
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl EngineError {
    /// 面向用户的简短描述
    ///
    /// reqwest 的错误链较长，这里取最有用的一层。
    pub fn describe(&self) -> String {
        match self {
            EngineError::RequestFailed(e) if e.is_timeout() => "Request timed out".to_string(),
            EngineError::RequestFailed(e) if e.is_connect() => {
                format!("Connection failed: {}", root_cause(e))
            }
            EngineError::RequestFailed(e) if e.is_redirect() => "Too many redirects".to_string(),
            EngineError::RequestFailed(e) => root_cause(e),
            other => other.to_string(),
        }
    }
}

fn root_cause(error: &(dyn std::error::Error + 'static)) -> String {
    let mut current = error;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}

/// 探测方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMethod {
    /// 只取响应头，快速模式
    Head,
    /// 完整请求，可读取响应体
    Get,
}

impl fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProbeMethod::Head => write!(f, "HEAD"),
            ProbeMethod::Get => write!(f, "GET"),
        }
    }
}

/// 探测请求
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    /// 目标URL
    pub url: String,
    /// 请求方法
    pub method: ProbeMethod,
    /// 超时时间
    pub timeout: Duration,
    /// 是否读取响应体
    pub read_body: bool,
}

/// 探测响应
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 跟随重定向后的最终URL
    pub final_url: String,
    /// 响应内容，仅在 `read_body` 时存在
    pub body: Option<String>,
    /// 响应时间（毫秒）
    pub response_time_ms: u64,
}

impl ProbeResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// 探测引擎特质
///
/// 对单个URL发起一次网络检查。非成功状态码不是错误，由调用方分类。
#[async_trait]
pub trait ProbeEngine: Send + Sync {
    /// 执行探测
    async fn probe(&self, request: &ProbeRequest) -> Result<ProbeResponse, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}

/// 源页面抓取特质
///
/// 单次 GET，非 2xx 视为失败。
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String, EngineError>;
}
