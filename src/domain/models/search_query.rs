// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 单次搜索允许的最大页数
pub const MAX_PAGE_DEPTH: u32 = 100;

/// 一次职位搜索的参数
///
/// 不单独持久化，只作为 `SearchMetadata` 的一部分保存
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct JobSearchQuery {
    #[validate(length(min = 1, message = "job_title cannot be empty"))]
    pub job_title: String,
    pub job_location: String,
    #[validate(range(min = 1, max = 100, message = "max_page_depth must be between 1 and 100"))]
    pub max_page_depth: u32,
}

impl JobSearchQuery {
    /// 创建查询，首尾空白会被去掉
    pub fn new(job_title: &str, job_location: &str, max_page_depth: u32) -> Self {
        Self {
            job_title: job_title.trim().to_string(),
            job_location: job_location.trim().to_string(),
            max_page_depth,
        }
    }

    /// 发送给搜索服务的查询文本
    pub fn search_text(&self) -> String {
        if self.job_location.is_empty() {
            self.job_title.clone()
        } else {
            format!("{} {}", self.job_title, self.job_location)
        }
    }
}
