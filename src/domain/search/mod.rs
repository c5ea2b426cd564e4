// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 搜索领域模块
///
/// 定义职位搜索服务的能力接口、单页请求/结果以及抓取错误分类
pub mod provider;
