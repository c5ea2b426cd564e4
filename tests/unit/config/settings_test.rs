// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置设置测试模块
///
/// 测试默认值、配置文件加载以及到运行时策略的转换

#[cfg(test)]
mod tests {
    use jobfocus::config::settings::Settings;
    use jobfocus::domain::services::normalizer::{NormalizationPolicy, Normalizer};
    use jobfocus::infrastructure::search::SearchApiConfig;
    use jobfocus::utils::retry_policy::RetryPolicy;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_builtin_defaults() {
        let settings = Settings::defaults().unwrap();

        assert_eq!(settings.environment, "development");
        assert_eq!(settings.search_provider.engine, "google_jobs");
        assert_eq!(settings.search_provider.provider_name, "searchapi_google_jobs");
        assert!(settings.search_provider.api_key.is_none());
        assert_eq!(settings.retry.max_attempts, 3);
        assert_eq!(settings.workflow.max_page_depth, 3);
        assert!(settings.workflow.job_titles.is_empty());
        assert!(settings.normalization.strip_fragment);
        assert!(settings
            .normalization
            .tracking_param_prefixes
            .contains(&"utm_".to_string()));
        assert!(!settings.telemetry.json);
        assert!(settings.telemetry.metrics_addr.is_none());
    }

    #[test]
    fn test_default_toml_workflow() {
        let settings = Settings::new().unwrap();

        assert_eq!(settings.workflow.job_titles.len(), 5);
        assert!(settings
            .workflow
            .locations
            .contains(&"Remote".to_string()));
        assert_eq!(settings.workflow.max_concurrent, 3);
    }

    #[test]
    fn test_retry_policy_from_settings() {
        let settings = Settings::defaults().unwrap();
        let policy = RetryPolicy::from(&settings.retry);

        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_backoff, Duration::from_secs(4));
        assert_eq!(policy.max_backoff, Duration::from_secs(10));
        assert!(policy.enable_jitter);
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let mut settings = Settings::defaults().unwrap();
        settings.search_provider.api_key = Some("  ".to_string());

        let config = SearchApiConfig::from(&settings.search_provider);
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_custom_tracking_params() {
        let mut settings = Settings::defaults().unwrap();
        settings.normalization.tracking_params.push("ref".to_string());

        let normalizer = Normalizer::new(NormalizationPolicy::from(&settings.normalization));
        let listing = normalizer
            .normalize(
                &json!({"title": "AI Engineer", "apply_link": "https://a.example.com/1?ref=x&id=2#apply"}),
                "p",
            )
            .unwrap();
        assert_eq!(listing.source_url, "https://a.example.com/1?id=2");
    }
}
