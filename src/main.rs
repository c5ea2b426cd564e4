// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use jobfocus::cli::Args;
use jobfocus::config::settings::Settings;
use jobfocus::domain::services::fetcher::Fetcher;
use jobfocus::domain::services::job_search_service::JobSearchService;
use jobfocus::domain::services::normalizer::{NormalizationPolicy, Normalizer};
use jobfocus::infrastructure::database::connection;
use jobfocus::infrastructure::metrics;
use jobfocus::infrastructure::repositories::job_listing_repo_impl::JobListingRepositoryImpl;
use jobfocus::infrastructure::repositories::search_metadata_repo_impl::SearchMetadataRepositoryImpl;
use jobfocus::infrastructure::search::{RateLimitedProvider, SearchApiConfig, SearchApiProvider};
use jobfocus::utils::retry_policy::RetryPolicy;
use jobfocus::utils::telemetry;
use jobfocus::workers::BatchSearchRunner;
use std::sync::Arc;
use tracing::info;

/// 主函数
///
/// 不带参数时按配置批量搜索；`jobfocus <job_title> [job_location] [max_page_depth]` 执行单次搜索，`--help` 查看用法
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 1. Load configuration
    let settings = Settings::new()?;

    // 2. Initialize logging and metrics
    telemetry::init_telemetry(&settings.telemetry);
    info!(environment = %settings.environment, "Starting jobfocus...");
    if let Some(addr) = settings.telemetry.metrics_addr.as_deref() {
        metrics::init_metrics(addr);
    }

    // 3. Connect to database and run migrations
    let db = Arc::new(connection::connect_and_migrate(&settings.database).await?);
    info!("Database connection established");

    // 4. Initialize search provider
    let provider = SearchApiProvider::new(SearchApiConfig::from(&settings.search_provider))?;
    let provider = RateLimitedProvider::new(provider, settings.search_provider.calls_per_minute);
    let fetcher = Arc::new(Fetcher::new(
        Arc::new(provider),
        RetryPolicy::from(&settings.retry),
    ));

    // 5. Initialize pipeline
    let service = Arc::new(JobSearchService::new(
        fetcher,
        Normalizer::new(NormalizationPolicy::from(&settings.normalization)),
        Arc::new(JobListingRepositoryImpl::new(db.clone())),
        Arc::new(SearchMetadataRepositoryImpl::new(db.clone())),
    ));

    if let Some(search) = args.single_search(settings.workflow.max_page_depth) {
        let metadata = service
            .process_job_search(&search.job_title, &search.job_location, search.max_page_depth)
            .await?;
        info!(
            id = %metadata.id,
            status = %metadata.status,
            found = metadata.listings_found,
            new = metadata.listings_new,
            "Search recorded"
        );
        return Ok(());
    }

    // 6. Run batch workflow
    let runner = BatchSearchRunner::from_settings(service, &settings.workflow);
    let summary = runner
        .run(&settings.workflow.job_titles, &settings.workflow.locations)
        .await;
    info!(
        searches = summary.searches,
        new = summary.listings_new,
        "Batch completed"
    );

    Ok(())
}
