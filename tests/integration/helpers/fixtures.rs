// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::{json, Value};

/// 满足全部必填字段的评论正文
pub fn review_body(spoilers: &str) -> Value {
    json!({
        "summary": "An orphaned ninja with a sealed fox spirit strives to be recognised by his village.",
        "rating": "8.2/10 MyAnimeList",
        "genres": ["Action", "Adventure", "Fantasy"],
        "themes": ["Perseverance", "Friendship", "Loneliness"],
        "strengths": ["Memorable rivalries", "Inventive fights", "Emotional payoffs"],
        "weaknesses": ["Long filler stretches", "Underused female cast"],
        "consensus": "A flawed but enduring shonen landmark.",
        "detailed_review": "Naruto's early arcs are tightly plotted, while later volumes sprawl.",
        "character_insights": ["Naruto's loneliness drives his need for approval"],
        "spoilers": spoilers
    })
}

/// 包装成兼容 OpenAI 的补全响应
pub fn completion_body(content: &Value, citations: &[&str]) -> Value {
    json!({
        "id": "cmpl-test",
        "model": "sonar-pro",
        "citations": citations,
        "choices": [{
            "index": 0,
            "finish_reason": "stop",
            "message": {"role": "assistant", "content": content.to_string()}
        }],
        "usage": {"prompt_tokens": 120, "completion_tokens": 340, "total_tokens": 460}
    })
}
