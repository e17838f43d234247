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

use crate::config::settings::Settings;
use crate::engines::traits::{
    EngineError, ProbeEngine, ProbeMethod, ProbeRequest, ProbeResponse, SourceFetcher,
};
use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// 探测引擎
///
/// 基于reqwest实现，源页面抓取与域名探测共用同一个连接池
#[derive(Debug, Clone)]
pub struct ReqwestEngine {
    client: reqwest::Client,
    source_timeout: Duration,
}

impl ReqwestEngine {
    /// 创建新的引擎实例
    ///
    /// # 参数
    ///
    /// * `user_agent` - 浏览器标识
    /// * `max_redirects` - 最大重定向次数
    /// * `source_timeout` - 源页面抓取超时
    pub fn new(
        user_agent: &str,
        max_redirects: usize,
        source_timeout: Duration,
    ) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(Policy::limited(max_redirects))
            .build()?;

        Ok(Self {
            client,
            source_timeout,
        })
    }

    /// 根据应用配置创建引擎
    pub fn from_settings(settings: &Settings) -> Result<Self, EngineError> {
        Self::new(
            &settings.source.user_agent,
            settings.verification.max_redirects,
            Duration::from_millis(settings.source.timeout_ms),
        )
    }

    fn parse_url(url: &str) -> Result<Url, EngineError> {
        Url::parse(url).map_err(|e| EngineError::InvalidUrl(format!("{}: {}", url, e)))
    }
}

#[async_trait]
impl ProbeEngine for ReqwestEngine {
    /// 执行一次探测
    ///
    /// 跟随重定向；`read_body` 为真时读取完整响应体。
    async fn probe(&self, request: &ProbeRequest) -> Result<ProbeResponse, EngineError> {
        let url = Self::parse_url(&request.url)?;

        let builder = match request.method {
            ProbeMethod::Head => self.client.head(url),
            ProbeMethod::Get => self.client.get(url),
        };

        let start = Instant::now();
        let response = builder.timeout(request.timeout).send().await?;

        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = if request.read_body {
            Some(response.text().await?)
        } else {
            None
        };

        debug!(
            "{} {} -> {} ({})",
            request.method, request.url, status_code, final_url
        );

        Ok(ProbeResponse {
            status_code,
            final_url,
            body,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[async_trait]
impl SourceFetcher for ReqwestEngine {
    async fn fetch_page(&self, url: &str) -> Result<String, EngineError> {
        let url = Self::parse_url(url)?;
        let response = self
            .client
            .get(url)
            .timeout(self.source_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::HttpStatus(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
