// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 职位搜索流水线的各个阶段：
/// - 抓取器（fetcher）：单页请求、重试与退避
/// - 分页器（paginator）：顺序驱动抓取器直到没有更多页面或达到页数上限
/// - 规范化器（normalizer）：原始记录 → `JobListing`
/// - 职位搜索服务（job_search_service）：编排以上阶段并写入搜索元数据
pub mod fetcher;
pub mod job_search_service;
pub mod normalizer;
pub mod paginator;

#[cfg(test)]
pub(crate) mod test_support;
