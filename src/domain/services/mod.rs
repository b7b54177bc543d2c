// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 引用提取（citations）：合并正文与提供商元数据中的来源链接
/// - LLM服务（llm_service）：调用兼容 OpenAI 的补全接口
/// - 提示词构建（prompt_builder）：按模式生成提示词与生成参数
/// - 评论服务（review_service）：编排一次完整的评论生成
/// - 响应模式（review_schema）：约束模型输出的 JSON Schema
pub mod citations;
pub mod llm_service;
pub mod prompt_builder;
pub mod review_schema;
pub mod review_service;
