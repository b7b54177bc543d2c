// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::config::settings::LlmSettings;
use crate::domain::services::citations;
use crate::utils::errors::ReviewError;
use crate::utils::retry_policy::RetryPolicy;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// 一次结构化补全请求
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    /// 输出必须满足的 JSON Schema
    pub schema: Value,
    pub schema_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// 补全结果
///
/// `content` 为模型输出的原始文本，`citations` 来自响应元数据而非正文
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub content: Option<String>,
    pub citations: Vec<String>,
    pub usage: TokenUsage,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ReviewError>;
}

/// LLM服务 - 处理与LLM提供商的交互
///
/// # 功能
///
/// 调用兼容 OpenAI 的 `/chat/completions` 接口，以 `json_schema` 结构化输出约束模型，
/// 超时与可重试错误按 [`RetryPolicy`] 重试
///
/// # 配置
///
/// 见 [`LlmSettings`]：密钥、模型、基础 URL、超时与重试参数
pub struct LLMService {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_base_url: String,
    retry_policy: RetryPolicy,
}

#[async_trait]
impl CompletionProvider for LLMService {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ReviewError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ReviewError::Configuration("LLM API key not configured".to_string()))?;

        let body = self.request_body(request);
        let body = &body;
        let service = self;
        self.retry_policy
            .run(move |attempt| {
                debug!(attempt, model = %service.model, "Sending completion request");
                service.send_once(api_key, body)
            })
            .await
    }
}

impl LLMService {
    pub fn new(settings: &LlmSettings) -> Result<Self, ReviewError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| ReviewError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            retry_policy: settings.retry_policy(),
        })
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    fn request_body(&self, request: &CompletionRequest) -> Value {
        json!({
            "model": self.model,
            "messages": request.messages,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": request.schema_name,
                    "strict": true,
                    "schema": request.schema
                }
            },
            "temperature": request.temperature,
            "max_tokens": request.max_tokens
        })
    }

    async fn send_once(&self, api_key: &str, body: &Value) -> Result<Completion, ReviewError> {
        let url = format!("{}/chat/completions", self.api_base_url);
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error("Failed to send request to LLM API", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ReviewError::UpstreamStatus {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| transport_error("Failed to parse LLM API response", e))?;

        Ok(parse_completion(&body))
    }
}

fn transport_error(context: &str, err: reqwest::Error) -> ReviewError {
    if err.is_timeout() {
        ReviewError::UpstreamTimeout
    } else if err.is_decode() {
        ReviewError::UpstreamFormat(format!("{}: {}", context, err))
    } else {
        ReviewError::UpstreamCall(format!("{}: {}", context, err))
    }
}

/// 从补全响应体中取出消息文本、用量与引用元数据
pub fn parse_completion(body: &Value) -> Completion {
    let usage = if let Some(usage_val) = body.get("usage") {
        TokenUsage {
            prompt_tokens: usage_val["prompt_tokens"].as_u64().unwrap_or(0) as u32,
            completion_tokens: usage_val["completion_tokens"].as_u64().unwrap_or(0) as u32,
            total_tokens: usage_val["total_tokens"].as_u64().unwrap_or(0) as u32,
        }
    } else {
        TokenUsage::default()
    };

    Completion {
        content: body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string),
        citations: citations::metadata_citations(body),
        usage,
    }
}
