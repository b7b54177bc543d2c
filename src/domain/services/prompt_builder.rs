// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::review::{ReviewMode, ReviewRequest};
use crate::domain::services::llm_service::ChatMessage;

/// 按模式区分的生成参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationProfile {
    pub temperature: f32,
    pub max_tokens: u32,
    /// 摘要篇幅要求
    pub summary_band: &'static str,
}

impl GenerationProfile {
    pub fn for_mode(mode: ReviewMode) -> Self {
        match mode {
            ReviewMode::Simple => Self {
                temperature: 0.3,
                max_tokens: 900,
                summary_band: "80-120 words",
            },
            ReviewMode::Detailed => Self {
                temperature: 0.7,
                max_tokens: 1800,
                summary_band: "150-200 words",
            },
        }
    }
}

/// 系统提示词：固定输出格式、语气与剧透策略
pub fn system_prompt(mode: ReviewMode, spoiler: bool) -> String {
    let profile = GenerationProfile::for_mode(mode);
    let tone = match mode {
        ReviewMode::Simple => {
            "You are a concise media critic. Keep sentences short, plain and factual."
        }
        ReviewMode::Detailed => {
            "You are a rigorous media critic. Be thorough and give a balanced critique \
             that weighs real strengths against real flaws. Include character insights."
        }
    };
    let spoiler_policy = if spoiler {
        "Put the ending and major twists in the \"spoilers\" field. Keep every other field spoiler-free."
    } else {
        "Do not reveal the ending or any twist anywhere. Set \"spoilers\" to an empty string."
    };

    format!(
        "{tone}\n\
         Return ONLY a JSON object matching the provided schema. No markdown, no code fences, no commentary.\n\
         The summary must be {band}.\n\
         The rating must be a formatted score with its source, for example \"8.5/10 IMDb\".\n\
         Always list at least two genuine weaknesses. Never claim the work has no flaws.\n\
         {spoiler_policy}",
        tone = tone,
        band = profile.summary_band,
        spoiler_policy = spoiler_policy,
    )
}

/// 用户提示词：嵌入标题、类型、实际模式与剧透开关
pub fn user_prompt(request: &ReviewRequest, mode: ReviewMode) -> String {
    format!(
        "Title: {}\nType: {}\nMode: {}\nSpoilers: {}\nProvide clean JSON as specified.",
        request.title.trim(),
        request.media_type,
        mode,
        if request.spoiler { "yes" } else { "no" },
    )
}

pub fn build_messages(request: &ReviewRequest, mode: ReviewMode) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt(mode, request.spoiler)),
        ChatMessage::user(user_prompt(request, mode)),
    ]
}
