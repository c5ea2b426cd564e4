// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 按配置的职位和地点组合批量执行搜索，并控制并发数
pub mod batch_search;

pub use batch_search::{BatchSearchRunner, BatchSummary};
