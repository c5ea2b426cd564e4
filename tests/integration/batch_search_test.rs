// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{build_service, job_page, setup_db, MockProvider};
use jobfocus::config::settings::WorkflowSettings;
use jobfocus::domain::repositories::search_metadata_repository::SearchMetadataRepository;
use jobfocus::domain::search::provider::FetchError;
use jobfocus::infrastructure::repositories::search_metadata_repo_impl::SearchMetadataRepositoryImpl;
use jobfocus::workers::{BatchSearchRunner, BatchSummary};
use std::sync::Arc;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn test_batch_runs_every_title_location_pair() {
    let db = setup_db().await;
    let provider = Arc::new(MockProvider::new(vec![
        Ok(job_page("a", 2, false)),
        Ok(job_page("b", 2, false)),
        Ok(job_page("c", 2, false)),
        Ok(job_page("d", 2, false)),
    ]));
    let service = Arc::new(build_service(provider.clone(), db.clone()));
    let settings = WorkflowSettings {
        job_titles: strings(&["AI Engineer", "ML Engineer", "   "]),
        locations: strings(&["Palo Alto CA", "Remote"]),
        max_page_depth: 2,
        max_concurrent: 2,
    };

    let runner = BatchSearchRunner::from_settings(service, &settings);
    let summary = runner.run(&settings.job_titles, &settings.locations).await;

    assert_eq!(
        summary,
        BatchSummary {
            searches: 6,
            succeeded: 4,
            partial: 0,
            failed: 0,
            rejected: 2,
            aborted: 0,
            listings_found: 8,
            listings_new: 8,
        }
    );
    assert_eq!(provider.calls(), 4);

    let recorded = SearchMetadataRepositoryImpl::new(db)
        .recent_searches(10)
        .await
        .unwrap();
    assert_eq!(recorded.len(), 4);
}

#[tokio::test]
async fn test_batch_counts_failed_searches() {
    let db = setup_db().await;
    let provider = Arc::new(MockProvider::new(vec![Err(FetchError::Unauthorized(
        "invalid key".to_string(),
    ))]));
    let service = Arc::new(build_service(provider, db));

    let summary = BatchSearchRunner::new(service, 3, 1)
        .run(&strings(&["AI Engineer"]), &[])
        .await;

    assert_eq!(summary.searches, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.listings_new, 0);
}
