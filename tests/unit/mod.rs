// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 单元测试
///
/// 针对公开接口的细粒度测试，模块内部细节的测试位于各源文件的 `#[cfg(test)]` 中
pub mod review_contract_test;
