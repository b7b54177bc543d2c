// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 缺少必填字段时返回给调用方的固定错误信息
pub const MISSING_FIELDS_MESSAGE: &str = "Missing title or type";

/// 评论生成错误类型
///
/// 覆盖请求校验、上游调用以及上游输出解析的全部失败路径
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("{0}")]
    InvalidRequest(String),

    /// 请求体无法解析为 JSON
    #[error("{0}")]
    MalformedBody(String),

    #[error("{0}")]
    UpstreamCall(String),

    #[error("LLM API returned error: {status} - {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Upstream request timed out")]
    UpstreamTimeout,

    #[error("Upstream returned a malformed review: {0}")]
    UpstreamFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ReviewError {
    /// 用于日志与指标标签的错误类别
    pub fn kind(&self) -> &'static str {
        match self {
            ReviewError::InvalidRequest(_) => "invalid_request",
            ReviewError::MalformedBody(_) => "malformed_body",
            ReviewError::UpstreamCall(_) | ReviewError::UpstreamStatus { .. } => "upstream_call",
            ReviewError::UpstreamTimeout => "upstream_timeout",
            ReviewError::UpstreamFormat(_) => "upstream_format",
            ReviewError::Configuration(_) => "configuration",
        }
    }

    /// 是否为调用方输入错误
    ///
    /// 只有缺失必填字段这类校验失败属于此类；无法解析的请求体按服务端故障处理
    pub fn is_client_error(&self) -> bool {
        matches!(self, ReviewError::InvalidRequest(_))
    }

    /// 判断错误是否可重试
    ///
    /// 超时、传输层故障、429 以及 5xx 可重试；其余错误重试也不会改变结果
    pub fn is_retryable(&self) -> bool {
        match self {
            ReviewError::UpstreamTimeout | ReviewError::UpstreamCall(_) => true,
            ReviewError::UpstreamStatus { status, .. } => *status == 429 || *status >= 500,
            ReviewError::InvalidRequest(_)
            | ReviewError::MalformedBody(_)
            | ReviewError::UpstreamFormat(_)
            | ReviewError::Configuration(_) => false,
        }
    }
}
