// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::{json, Value};

/// 结构化输出约束中使用的 schema 名称
pub const REVIEW_SCHEMA_NAME: &str = "media_review";

/// 模型输出中必须出现的字段
pub const REQUIRED_FIELDS: [&str; 9] = [
    "summary",
    "rating",
    "genres",
    "themes",
    "strengths",
    "weaknesses",
    "consensus",
    "detailed_review",
    "spoilers",
];

/// 可以为空的字段
///
/// 严格模式要求 `required` 覆盖全部属性，这些字段因此也列入 schema 的 `required`，
/// 但允许空数组，输出校验时不强制出现
pub const OPTIONAL_FIELDS: [&str; 2] = ["character_insights", "citations"];

/// 评论响应的 JSON Schema
///
/// 两种模式共用同一个 schema，篇幅差异只体现在提示词与生成参数上。
pub fn review_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "summary": {
                "type": "string",
                "description": "Spoiler-free synopsis; length as instructed."
            },
            "rating": {
                "type": "string",
                "description": "Formatted score with its source, e.g. \"8.5/10 IMDb\"."
            },
            "genres": string_array(3, 6),
            "themes": string_array(3, 8),
            "strengths": string_array(3, 5),
            "weaknesses": {
                "type": "array",
                "items": { "type": "string" },
                "minItems": 2,
                "maxItems": 4,
                "description": "Genuine flaws. Never empty."
            },
            "consensus": {
                "type": "string",
                "description": "One balanced sentence of audience or critic consensus."
            },
            "detailed_review": {
                "type": "string",
                "description": "A short critical paragraph."
            },
            "character_insights": {
                "type": "array",
                "items": { "type": "string" },
                "minItems": 0,
                "maxItems": 5,
                "description": "Notes on the main characters. Empty array when not relevant."
            },
            "spoilers": {
                "type": "string",
                "description": "Ending and major twists when requested, otherwise an empty string."
            },
            "citations": {
                "type": "array",
                "items": { "type": "string", "format": "uri" },
                "minItems": 0,
                "maxItems": 6,
                "description": "Source URLs. Empty array when none."
            }
        },
        "required": schema_required_fields()
    })
}

fn schema_required_fields() -> Vec<&'static str> {
    REQUIRED_FIELDS.iter().chain(OPTIONAL_FIELDS.iter()).copied().collect()
}

fn string_array(min_items: usize, max_items: usize) -> Value {
    json!({
        "type": "array",
        "items": { "type": "string" },
        "minItems": min_items,
        "maxItems": max_items
    })
}

/// 返回 `value` 中缺失（或为 null）的必填字段
pub fn missing_required_fields(value: &Value) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| value.get(field).map_or(true, Value::is_null))
        .collect()
}
