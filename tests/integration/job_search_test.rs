// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{build_service, job_page, setup_db, MockProvider};
use jobfocus::domain::models::search_metadata::SearchStatus;
use jobfocus::domain::repositories::job_listing_repository::JobListingRepository;
use jobfocus::domain::repositories::search_metadata_repository::SearchMetadataRepository;
use jobfocus::domain::search::provider::{FetchError, RawPage};
use jobfocus::domain::services::job_search_service::JobSearchError;
use jobfocus::infrastructure::repositories::job_listing_repo_impl::JobListingRepositoryImpl;
use jobfocus::infrastructure::repositories::search_metadata_repo_impl::SearchMetadataRepositoryImpl;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_successful_search_persists_listings_and_metadata() {
    let db = setup_db().await;
    let provider = Arc::new(MockProvider::new(vec![
        Ok(job_page("p1", 3, true)),
        Ok(job_page("p2", 2, false)),
    ]));
    let service = build_service(provider.clone(), db.clone());

    let metadata = service
        .process_job_search("AI Engineer", "Palo Alto CA", 3)
        .await
        .unwrap();

    assert_eq!(metadata.status, SearchStatus::Success);
    assert_eq!(metadata.pages_fetched, 2);
    assert_eq!(metadata.listings_found, 5);
    assert_eq!(metadata.listings_new, 5);
    assert_eq!(metadata.listings_skipped, 0);
    assert!(metadata.error.is_none());
    assert_eq!(provider.calls(), 2);

    let listings = JobListingRepositoryImpl::new(db.clone());
    assert_eq!(listings.count_listings().await.unwrap(), 5);
    let stored = listings
        .find_listing("mock_google_jobs", "https://careers.example.com/p1/0?ref=abc")
        .await
        .unwrap()
        .expect("normalized listing should be stored");
    assert_eq!(stored.title, "AI Engineer p1-0");
    assert_eq!(stored.first_search_id, Some(metadata.id));
    assert!(stored.posted_at.is_some());

    let recorded = SearchMetadataRepositoryImpl::new(db)
        .find_search_metadata(metadata.id)
        .await
        .unwrap()
        .expect("metadata should be recorded");
    assert_eq!(recorded.status, SearchStatus::Success);
    assert_eq!(recorded.listings_new, 5);
}

/// 第二次相同结果的搜索全部是重复
#[tokio::test]
async fn test_repeated_search_is_idempotent() {
    let db = setup_db().await;

    let first = build_service(
        Arc::new(MockProvider::new(vec![Ok(job_page("same", 4, false))])),
        db.clone(),
    )
    .process_job_search("AI Engineer", "Remote", 1)
    .await
    .unwrap();
    let second = build_service(
        Arc::new(MockProvider::new(vec![Ok(job_page("same", 4, false))])),
        db.clone(),
    )
    .process_job_search("AI Engineer", "Remote", 1)
    .await
    .unwrap();

    assert_eq!(first.listings_new, 4);
    assert_eq!(second.listings_found, 4);
    assert_eq!(second.listings_new, 0);
    assert_ne!(first.id, second.id);

    assert_eq!(
        JobListingRepositoryImpl::new(db.clone())
            .count_listings()
            .await
            .unwrap(),
        4
    );
    assert_eq!(
        SearchMetadataRepositoryImpl::new(db)
            .recent_searches(10)
            .await
            .unwrap()
            .len(),
        2
    );
}

/// 第 1、2 页成功，第 3 页失败
#[tokio::test]
async fn test_partial_search_keeps_earlier_pages() {
    let db = setup_db().await;
    let provider = Arc::new(MockProvider::new(vec![
        Ok(job_page("p1", 2, true)),
        Ok(job_page("p2", 2, true)),
        Err(FetchError::Server { status: 503 }),
        Err(FetchError::Server { status: 503 }),
        Err(FetchError::Server { status: 503 }),
    ]));
    let service = build_service(provider.clone(), db.clone());

    let metadata = service
        .process_job_search("AI Engineer", "Palo Alto CA", 3)
        .await
        .unwrap();

    assert_eq!(metadata.status, SearchStatus::Partial);
    assert_eq!(metadata.pages_fetched, 2);
    assert_eq!(metadata.listings_found, 4);
    assert_eq!(metadata.listings_new, 4);
    assert!(metadata.error.is_some());
    assert_eq!(provider.calls(), 5);
    assert_eq!(
        JobListingRepositoryImpl::new(db)
            .count_listings()
            .await
            .unwrap(),
        4
    );
}

#[tokio::test]
async fn test_first_page_failure_records_failed_search() {
    let db = setup_db().await;
    let provider = Arc::new(MockProvider::new(vec![Err(FetchError::Unauthorized(
        "invalid key".to_string(),
    ))]));
    let service = build_service(provider.clone(), db.clone());

    let metadata = service
        .process_job_search("AI Engineer", "Remote", 3)
        .await
        .unwrap();

    assert_eq!(metadata.status, SearchStatus::Failed);
    assert_eq!(metadata.pages_fetched, 0);
    assert_eq!(metadata.listings_found, 0);
    assert_eq!(metadata.listings_new, 0);
    assert_eq!(provider.calls(), 1);

    let recorded = SearchMetadataRepositoryImpl::new(db)
        .find_search_metadata(metadata.id)
        .await
        .unwrap()
        .expect("failed searches are recorded");
    assert_eq!(recorded.status, SearchStatus::Failed);
    assert!(recorded.error.unwrap().contains("invalid key"));
}

#[tokio::test]
async fn test_invalid_input_records_nothing() {
    let db = setup_db().await;
    let provider = Arc::new(MockProvider::new(vec![Ok(job_page("x", 1, false))]));
    let service = build_service(provider.clone(), db.clone());

    let blank_title = service.process_job_search("   ", "Remote", 3).await;
    assert!(matches!(blank_title, Err(JobSearchError::ValidationError(_))));

    let zero_depth = service.process_job_search("AI Engineer", "Remote", 0).await;
    assert!(matches!(zero_depth, Err(JobSearchError::ValidationError(_))));

    let too_deep = service
        .process_job_search("AI Engineer", "Remote", 3_000_000_000)
        .await;
    assert!(matches!(too_deep, Err(JobSearchError::ValidationError(_))));

    assert_eq!(provider.calls(), 0);
    assert!(SearchMetadataRepositoryImpl::new(db)
        .recent_searches(10)
        .await
        .unwrap()
        .is_empty());
}

/// 缺字段的记录被跳过，不影响其余记录
#[tokio::test]
async fn test_bad_records_are_skipped() {
    let db = setup_db().await;
    let mut page = job_page("ok", 2, false);
    page.records.push(json!({"company_name": "No Title Inc", "apply_link": "https://x.example.com/1"}));
    page.records.push(json!({"title": "No Link"}));
    page.records.push(json!({"title": "Bad Scheme", "apply_link": "ftp://x.example.com/file"}));
    let provider = Arc::new(MockProvider::new(vec![Ok(page)]));
    let service = build_service(provider, db);

    let metadata = service
        .process_job_search("AI Engineer", "", 1)
        .await
        .unwrap();

    assert_eq!(metadata.status, SearchStatus::Success);
    assert_eq!(metadata.listings_found, 5);
    assert_eq!(metadata.listings_new, 2);
    assert_eq!(metadata.listings_skipped, 3);
    assert!(metadata.listings_new <= metadata.listings_found);
}

/// 同一页里重复的职位只插入一次
#[tokio::test]
async fn test_duplicates_within_one_search() {
    let db = setup_db().await;
    let record = json!({"title": "AI Engineer", "apply_link": "https://Jobs.Example.com/1?utm_campaign=x"});
    let same_after_normalization = json!({"title": "AI Engineer", "apply_link": "https://jobs.example.com/1"});
    let provider = Arc::new(MockProvider::new(vec![Ok(RawPage {
        records: vec![record, same_after_normalization],
        next_cursor: None,
    })]));
    let service = build_service(provider, db);

    let metadata = service
        .process_job_search("AI Engineer", "Remote", 1)
        .await
        .unwrap();
    assert_eq!(metadata.listings_found, 2);
    assert_eq!(metadata.listings_new, 1);
}
