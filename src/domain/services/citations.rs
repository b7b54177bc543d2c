// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::Value;

/// 从补全响应的元数据中提取引用链接
///
/// 依次查找消息上的 `citations`、响应顶层的 `citations`、`search_results[].url`，
/// 返回第一个非空来源。
pub fn metadata_citations(body: &Value) -> Vec<String> {
    let message_level = string_items(body.pointer("/choices/0/message/citations"));
    if !message_level.is_empty() {
        return message_level;
    }

    let top_level = string_items(body.get("citations"));
    if !top_level.is_empty() {
        return top_level;
    }

    body.get("search_results")
        .and_then(Value::as_array)
        .map(|results| {
            results
                .iter()
                .filter_map(|result| result.get("url").and_then(Value::as_str))
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// 合并正文引用与元数据引用，正文在前，不去重
pub fn merge_citations(body: Vec<String>, metadata: Vec<String>) -> Vec<String> {
    let mut merged = body;
    merged.extend(metadata);
    merged.retain(|url| !url.trim().is_empty());
    merged
}

fn string_items(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
