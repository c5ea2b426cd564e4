// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_query::JobSearchQuery;
use crate::domain::search::provider::{FetchError, RawRecord};
use crate::domain::services::fetcher::Fetcher;
use futures::stream::{self, BoxStream, StreamExt};
use std::sync::Arc;
use tracing::{info, warn};

/// 成功获取的一页
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub page_number: u32,
    pub records: Vec<RawRecord>,
}

/// 一次分页收集的结果
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// 按页序排列的原始记录
    pub records: Vec<RawRecord>,
    /// 成功获取的页数
    pub pages_fetched: u32,
    /// 第一页之后有页面失败
    pub partial: bool,
    /// 导致部分完成的错误
    pub last_error: Option<FetchError>,
}

/// 分页器
///
/// 顺序请求第 1、2、… 页，直到搜索服务表示没有更多页面或达到 `max_page_depth`。
/// 页面之间不并发，保证顺序确定。
pub struct Paginator {
    fetcher: Arc<Fetcher>,
}

struct PageCursor {
    next_page: u32,
    token: Option<String>,
    done: bool,
}

impl Paginator {
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        Self { fetcher }
    }

    /// 惰性页面流
    ///
    /// 每次调用都从第 1 页重新开始；遇到第一个错误后流结束
    pub fn pages<'a>(
        &'a self,
        query: &'a JobSearchQuery,
        max_page_depth: u32,
    ) -> BoxStream<'a, Result<FetchedPage, FetchError>> {
        let start = PageCursor {
            next_page: 1,
            token: None,
            done: false,
        };

        stream::unfold(start, move |mut cursor| async move {
            if cursor.done || cursor.next_page > max_page_depth {
                return None;
            }

            let page_number = cursor.next_page;
            match self
                .fetcher
                .fetch_page(query, page_number, cursor.token.as_deref())
                .await
            {
                Ok(page) => {
                    cursor.done = !page.has_more();
                    cursor.token = page.next_cursor;
                    cursor.next_page += 1;
                    Some((
                        Ok(FetchedPage {
                            page_number,
                            records: page.records,
                        }),
                        cursor,
                    ))
                }
                Err(e) => {
                    cursor.done = true;
                    Some((Err(e), cursor))
                }
            }
        })
        .boxed()
    }

    /// 收集所有页面的原始记录
    ///
    /// 第 1 页失败时返回错误；之后的页面失败时保留已获取的记录并标记为部分完成
    pub async fn collect(
        &self,
        query: &JobSearchQuery,
        max_page_depth: u32,
    ) -> Result<Collection, FetchError> {
        let mut pages = self.pages(query, max_page_depth);
        let mut collection = Collection::default();

        while let Some(result) = pages.next().await {
            match result {
                Ok(page) => {
                    collection.pages_fetched += 1;
                    collection.records.extend(page.records);
                }
                Err(e) if collection.pages_fetched == 0 => return Err(e),
                Err(e) => {
                    warn!(
                        job_title = %query.job_title,
                        pages_fetched = collection.pages_fetched,
                        error = %e,
                        "Pagination stopped early, keeping collected pages"
                    );
                    collection.partial = true;
                    collection.last_error = Some(e);
                }
            }
        }

        info!(
            job_title = %query.job_title,
            job_location = %query.job_location,
            pages = collection.pages_fetched,
            records = collection.records.len(),
            partial = collection.partial,
            "Pagination finished"
        );
        Ok(collection)
    }
}
