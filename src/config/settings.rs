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
use std::time::Duration;

use crate::utils::retry_policy::RetryPolicy;

pub const DEFAULT_LLM_MODEL: &str = "sonar-pro";
pub const DEFAULT_LLM_API_BASE_URL: &str = "https://api.perplexity.ai";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LLM_MAX_RETRIES: u32 = 2;
pub const DEFAULT_LLM_INITIAL_BACKOFF_MS: u64 = 500;

/// 未通过 `NOBIX__LLM__API_KEY` 配置密钥时回退读取的环境变量
pub const FALLBACK_API_KEY_VAR: &str = "PERPLEXITY_API_KEY";

/// 应用程序配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// LLM 提供商配置
    pub llm: LlmSettings,
    /// 指标导出配置
    pub metrics: MetricsSettings,
    /// 日志配置
    pub telemetry: TelemetrySettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// LLM 提供商配置设置
///
/// 提供商需兼容 OpenAI 的 `/chat/completions` 接口
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    /// API 密钥
    pub api_key: Option<String>,
    /// 模型名称
    pub model: String,
    /// API 基础 URL
    pub api_base_url: String,
    /// 单次请求超时时间（秒）
    pub timeout_secs: u64,
    /// 最大重试次数
    pub max_retries: u32,
    /// 首次重试前的退避时间（毫秒）
    pub initial_backoff_ms: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_LLM_MODEL.to_string(),
            api_base_url: DEFAULT_LLM_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
            max_retries: DEFAULT_LLM_MAX_RETRIES,
            initial_backoff_ms: DEFAULT_LLM_INITIAL_BACKOFF_MS,
        }
    }
}

impl LlmSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_retries,
            Duration::from_millis(self.initial_backoff_ms),
        )
    }
}

/// Prometheus 指标导出配置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用指标导出
    pub enabled: bool,
    /// 导出端点监听地址
    pub listen_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    /// 是否输出 JSON 格式日志
    pub json: bool,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 以及 `NOBIX__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default LLM settings
            .set_default("llm.model", DEFAULT_LLM_MODEL)?
            .set_default("llm.api_base_url", DEFAULT_LLM_API_BASE_URL)?
            .set_default("llm.timeout_secs", DEFAULT_LLM_TIMEOUT_SECS)?
            .set_default("llm.max_retries", DEFAULT_LLM_MAX_RETRIES)?
            .set_default("llm.initial_backoff_ms", DEFAULT_LLM_INITIAL_BACKOFF_MS)?
            // Default observability settings
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")?
            .set_default("telemetry.json", false)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("NOBIX").separator("__"));

        let mut settings: Settings = builder.build()?.try_deserialize()?;
        settings.llm.api_key = resolve_api_key(
            settings.llm.api_key.take(),
            std::env::var(FALLBACK_API_KEY_VAR).ok(),
        );
        Ok(settings)
    }
}

/// 显式配置的密钥优先，空字符串视为未配置
fn resolve_api_key(configured: Option<String>, fallback: Option<String>) -> Option<String> {
    configured
        .filter(|key| !key.trim().is_empty())
        .or_else(|| fallback.filter(|key| !key.trim().is_empty()))
}
