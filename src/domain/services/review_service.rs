// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{counter, histogram};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::domain::models::review::{ReviewMode, ReviewRequest, ReviewResult};
use crate::domain::services::citations::merge_citations;
use crate::domain::services::llm_service::{Completion, CompletionProvider, CompletionRequest};
use crate::domain::services::prompt_builder::{self, GenerationProfile};
use crate::domain::services::review_schema::{
    missing_required_fields, review_schema, REVIEW_SCHEMA_NAME,
};
use crate::utils::errors::ReviewError;

/// 评论服务
///
/// 每次调用相互独立：根据实际模式构建提示词，调用一次补全（含有限重试），
/// 校验输出并合并引用。服务本身不持有可变状态。
pub struct ReviewService {
    provider: Arc<dyn CompletionProvider>,
}

impl ReviewService {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// 生成评论
    ///
    /// # 错误
    /// * `UpstreamCall` / `UpstreamStatus` / `UpstreamTimeout` - 提供商调用失败
    /// * `UpstreamFormat` - 输出不是合法 JSON 或缺少必填字段
    /// * `Configuration` - 未配置 API 密钥
    pub async fn generate_review(&self, request: &ReviewRequest) -> Result<ReviewResult, ReviewError> {
        let started = Instant::now();
        let mode = request.effective_mode();
        if request.mode == ReviewMode::Detailed && mode == ReviewMode::Simple {
            debug!(title = %request.title, "Detailed mode requested without pro, using simple");
        }
        counter!("review_requests_total", "mode" => mode.as_str()).increment(1);

        let profile = GenerationProfile::for_mode(mode);
        let completion_request = CompletionRequest {
            messages: prompt_builder::build_messages(request, mode),
            schema: review_schema(),
            schema_name: REVIEW_SCHEMA_NAME.to_string(),
            temperature: profile.temperature,
            max_tokens: profile.max_tokens,
        };

        let result = match self.provider.complete(&completion_request).await {
            Ok(completion) => {
                counter!("review_upstream_tokens_total")
                    .increment(u64::from(completion.usage.total_tokens));
                shape_result(completion, request.spoiler)
            }
            Err(err) => Err(err),
        };

        histogram!("review_duration_seconds").record(started.elapsed().as_secs_f64());
        match &result {
            Ok(review) => info!(
                title = %request.title,
                media_type = %request.media_type,
                mode = %mode,
                citations = review.citations.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Review generated"
            ),
            Err(err) => {
                counter!("review_failures_total", "kind" => err.kind()).increment(1);
                warn!(
                    title = %request.title,
                    mode = %mode,
                    kind = err.kind(),
                    error = %err,
                    "Review generation failed"
                );
            }
        }
        result
    }
}

/// 将补全结果整形为评论
///
/// 内容为空、不是 JSON 对象、缺少必填字段或请求了剧透却没有剧透内容时返回 `UpstreamFormat`；
/// 未请求剧透时清空 `spoilers`。
pub fn shape_result(completion: Completion, spoiler: bool) -> Result<ReviewResult, ReviewError> {
    let raw = completion
        .content
        .as_deref()
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .ok_or_else(|| ReviewError::UpstreamFormat("response contained no content".to_string()))?;

    let value: Value = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| ReviewError::UpstreamFormat(format!("response is not valid JSON: {}", e)))?;
    if !value.is_object() {
        return Err(ReviewError::UpstreamFormat(
            "response is not a JSON object".to_string(),
        ));
    }

    let missing = missing_required_fields(&value);
    if !missing.is_empty() {
        return Err(ReviewError::UpstreamFormat(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    }

    let mut review: ReviewResult = serde_json::from_value(value)
        .map_err(|e| ReviewError::UpstreamFormat(e.to_string()))?;
    review
        .validate()
        .map_err(|e| ReviewError::UpstreamFormat(e.to_string().replace('\n', "; ")))?;

    if spoiler {
        if review.spoilers.trim().is_empty() {
            return Err(ReviewError::UpstreamFormat(
                "spoilers were requested but none were returned".to_string(),
            ));
        }
    } else {
        review.spoilers.clear();
    }

    if review
        .character_insights
        .as_ref()
        .is_some_and(|insights| insights.is_empty())
    {
        review.character_insights = None;
    }
    review.citations = merge_citations(std::mem::take(&mut review.citations), completion.citations);
    Ok(review)
}

/// Some providers wrap JSON in a markdown fence despite instructions.
fn strip_code_fence(content: &str) -> &str {
    let content = content.trim();
    let Some(inner) = content.strip_prefix("```") else {
        return content;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    match inner.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => inner[4..].trim(),
        _ => inner.trim(),
    }
}
