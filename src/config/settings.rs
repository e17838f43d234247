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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::models::candidate::ExtractionMode;

/// 桌面浏览器 User-Agent，源页面抓取与探测请求共用
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// 应用程序配置设置
///
/// 包含服务器、源页面、提取、验证、任务和指标等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 源页面配置
    pub source: SourceSettings,
    /// 候选域名提取配置
    pub extraction: ExtractionSettings,
    /// 域名验证配置
    pub verification: VerificationSettings,
    /// 任务生命周期配置
    pub jobs: JobSettings,
    /// 指标导出配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 源页面配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    /// 默认源页面URL
    pub url: String,
    /// 请求使用的 User-Agent
    pub user_agent: String,
    /// 源页面抓取超时（毫秒）
    pub timeout_ms: u64,
}

/// 提取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    /// 提取模式 (anchor, text)
    pub mode: ExtractionMode,
    /// 候选集合上限 N
    pub candidate_limit: usize,
    /// 附加种子域名，排在提取结果之后
    #[serde(default)]
    pub seed: Vec<String>,
}

/// 验证配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationSettings {
    /// 每个窗口的并发探测数
    pub concurrency: usize,
    /// 单次探测超时（毫秒）
    pub timeout_ms: u64,
    /// 是否读取响应体并提取标题
    pub fetch_title: bool,
    /// 探测URL的协议
    pub scheme: String,
    /// 整体截止时间（毫秒），超过后不再启动新窗口
    pub overall_deadline_ms: Option<u64>,
    /// 最大重定向次数
    pub max_redirects: usize,
}

/// 任务配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct JobSettings {
    /// 已结束任务的保留时间（秒）
    pub retention_secs: u64,
    /// 清理扫描间隔（秒）
    pub sweep_interval_secs: u64,
    /// 默认同步等待时间（毫秒）
    pub default_sync_wait_ms: u64,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件和环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("LINKPROBE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("extraction.seed")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("source.url", "https://site.ip138.com/")?
            .set_default("source.user_agent", DEFAULT_USER_AGENT)?
            .set_default("source.timeout_ms", 10_000)?
            .set_default("extraction.mode", "anchor")?
            .set_default("extraction.candidate_limit", 20)?
            .set_default("extraction.seed", Vec::<String>::new())?
            .set_default("verification.concurrency", 5)?
            .set_default("verification.timeout_ms", 3_000)?
            .set_default("verification.fetch_title", true)?
            .set_default("verification.scheme", "https")?
            .set_default("verification.max_redirects", 10)?
            .set_default("jobs.retention_secs", 3_600)?
            .set_default("jobs.sweep_interval_secs", 60)?
            .set_default("jobs.default_sync_wait_ms", 0)?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }

    /// 仅使用内置默认值构建配置，不读取文件和环境变量
    pub fn from_defaults() -> Result<Self, ConfigError> {
        Self::defaults()?.build()?.try_deserialize()
    }
}
