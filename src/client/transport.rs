// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::application::dto::review_request::ReviewRequestDto;

/// 服务端未给出错误信息时显示的文本
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed";

pub const GENERATE_REVIEW_PATH: &str = "/api/generate-review";

/// 客户端错误
///
/// 界面不区分错误类别，只展示 `Display` 文本
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// 服务端返回了非 2xx 响应
    #[error("{0}")]
    Rejected(String),
    /// 请求未能完成
    #[error("{0}")]
    Transport(String),
    /// 成功响应无法解析为评论
    #[error("Invalid review response: {0}")]
    InvalidResponse(String),
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

#[async_trait]
pub trait ReviewTransport: Send + Sync {
    /// 发送一次评论请求，返回成功响应体
    async fn send(&self, request: &ReviewRequestDto) -> Result<Value, ClientError>;
}

/// 基于 reqwest 的评论接口传输层
pub struct HttpReviewTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpReviewTransport {
    /// `base_url` 为服务根地址，例如 `http://127.0.0.1:3000`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join(GENERATE_REVIEW_PATH))
            .map_err(|e| ClientError::InvalidEndpoint(format!("{}: {}", base_url, e)))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ReviewTransport for HttpReviewTransport {
    async fn send(&self, request: &ReviewRequestDto) -> Result<Value, ClientError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        let body: Option<Value> = response.json().await.ok();

        if !status.is_success() {
            let message = body
                .as_ref()
                .and_then(|body| body.get("error"))
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .unwrap_or(REQUEST_FAILED_MESSAGE);
            return Err(ClientError::Rejected(message.to_string()));
        }

        body.ok_or_else(|| ClientError::InvalidResponse("body is not JSON".to_string()))
    }
}
