// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：评论请求、模式门控与评论结果
/// - 服务（services）：响应模式、提示词构建、LLM 调用与结果整形
///
/// 领域层不依赖表示层，HTTP 相关的细节全部留在 presentation 中。
pub mod models;
pub mod services;
