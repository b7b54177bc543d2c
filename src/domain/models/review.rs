// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// 媒体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Book,
    Manga,
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Book => "book",
            MediaType::Manga => "manga",
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "book" => Ok(MediaType::Book),
            "manga" => Ok(MediaType::Manga),
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            other => Err(format!("Unsupported media type: {}", other)),
        }
    }
}

/// 评论模式
///
/// `Detailed` 需要 pro 权限，否则一律降级为 `Simple`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewMode {
    #[default]
    Simple,
    Detailed,
}

impl ReviewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewMode::Simple => "simple",
            ReviewMode::Detailed => "detailed",
        }
    }

    /// 解析调用方传入的模式，无法识别的值按 `Simple` 处理
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some(mode) if mode.trim().eq_ignore_ascii_case("detailed") => ReviewMode::Detailed,
            _ => ReviewMode::Simple,
        }
    }

    /// 计算实际生效的模式：当且仅当请求 `Detailed` 且 `pro` 为真时返回 `Detailed`
    pub fn effective(requested: ReviewMode, pro: bool) -> Self {
        match (requested, pro) {
            (ReviewMode::Detailed, true) => ReviewMode::Detailed,
            _ => ReviewMode::Simple,
        }
    }
}

impl fmt::Display for ReviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 已通过校验的评论请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    pub title: String,
    pub media_type: MediaType,
    /// 调用方请求的模式，未经 pro 门控
    pub mode: ReviewMode,
    pub pro: bool,
    pub spoiler: bool,
}

impl ReviewRequest {
    pub fn new(title: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            title: title.into(),
            media_type,
            mode: ReviewMode::Simple,
            pro: false,
            spoiler: false,
        }
    }

    pub fn effective_mode(&self) -> ReviewMode {
        ReviewMode::effective(self.mode, self.pro)
    }
}

/// 生成的评论
///
/// 未声明的字段在反序列化时被丢弃；`citations` 缺失或为 null 时视为空，为空时不参与序列化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ReviewResult {
    #[validate(length(min = 1))]
    pub summary: String,
    #[validate(length(min = 1))]
    pub rating: String,
    #[validate(length(min = 1))]
    pub genres: Vec<String>,
    #[validate(length(min = 1))]
    pub themes: Vec<String>,
    #[validate(length(min = 1))]
    pub strengths: Vec<String>,
    #[validate(length(min = 1))]
    pub weaknesses: Vec<String>,
    #[validate(length(min = 1))]
    pub consensus: String,
    #[validate(length(min = 1))]
    pub detailed_review: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_insights: Option<Vec<String>>,
    pub spoilers: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub citations: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
