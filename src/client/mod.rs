// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 客户端模块
///
/// 评论页面的提交状态机与访问 `/api/generate-review` 的传输层，不涉及界面渲染
pub mod review_client;
pub mod transport;
