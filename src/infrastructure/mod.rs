// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 提供与外部系统相关的技术实现，目前只有 Prometheus 指标导出。
/// LLM 提供商的 HTTP 调用位于 `domain::services::llm_service`，通过 `CompletionProvider` 抽象注入。
pub mod metrics;
