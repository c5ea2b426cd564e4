// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 职位（job_listing）：规范化并去重后持久化的职位记录
/// - 搜索参数（search_query）：一次搜索调用的输入
/// - 搜索元数据（search_metadata）：每次搜索的审计记录
pub mod job_listing;
pub mod search_metadata;
pub mod search_query;
