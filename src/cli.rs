// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use clap::Parser;

/// 命令行参数
///
/// 不带参数时按配置批量搜索；给出职位名称时只执行一次搜索
#[derive(Debug, Parser)]
#[command(name = "jobfocus")]
#[command(about = "Fetch, normalize and store job postings from the configured search provider")]
pub struct Args {
    /// Job title to search for; omit to run the configured batch
    pub job_title: Option<String>,

    /// Location appended to the query, e.g. "Palo Alto CA"
    pub job_location: Option<String>,

    /// Maximum number of result pages to fetch (defaults to workflow.max_page_depth)
    pub max_page_depth: Option<u32>,
}

/// 单次搜索请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleSearch {
    pub job_title: String,
    pub job_location: String,
    pub max_page_depth: u32,
}

impl Args {
    /// 给出职位名称时返回单次搜索，否则返回 `None`（执行批量搜索）
    pub fn single_search(&self, default_page_depth: u32) -> Option<SingleSearch> {
        let job_title = self.job_title.clone()?;
        Some(SingleSearch {
            job_title,
            job_location: self.job_location.clone().unwrap_or_default(),
            max_page_depth: self.max_page_depth.unwrap_or(default_page_depth),
        })
    }
}
