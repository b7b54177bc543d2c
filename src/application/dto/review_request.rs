// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::review::{MediaType, ReviewMode, ReviewRequest};
use crate::utils::errors::{ReviewError, MISSING_FIELDS_MESSAGE};

/// 评论请求数据传输对象
///
/// 字段全部可选，缺失与非法值在 [`ReviewRequestDto::into_request`] 中统一转换为 400 错误。
/// 非空标题不限长度。
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ReviewRequestDto {
    /// 作品标题
    #[serde(default)]
    pub title: Option<String>,
    /// 媒体类型：book / manga / movie / tv
    #[serde(default, rename = "type")]
    pub media_type: Option<String>,
    /// simple 或 detailed，缺省为 simple
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// pro 权限标记，原样接受
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pro: Option<bool>,
    /// 是否需要剧透内容
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spoiler: Option<bool>,
}

impl ReviewRequestDto {
    pub fn new(title: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            title: Some(title.into()),
            media_type: Some(media_type.to_string()),
            ..Self::default()
        }
    }

    /// 校验并转换为领域请求
    ///
    /// 标题或类型缺失（含空白）时返回固定信息 "Missing title or type"
    pub fn into_request(self) -> Result<ReviewRequest, ReviewError> {
        let title = self
            .title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty());
        let media_type = self
            .media_type
            .as_deref()
            .map(str::trim)
            .filter(|media_type| !media_type.is_empty());

        let (Some(title), Some(media_type)) = (title, media_type) else {
            return Err(ReviewError::InvalidRequest(MISSING_FIELDS_MESSAGE.to_string()));
        };

        let media_type = media_type
            .parse::<MediaType>()
            .map_err(ReviewError::InvalidRequest)?;

        Ok(ReviewRequest {
            title: title.to_string(),
            media_type,
            mode: ReviewMode::parse_lenient(self.mode.as_deref()),
            pro: self.pro.unwrap_or(false),
            spoiler: self.spoiler.unwrap_or(false),
        })
    }
}
