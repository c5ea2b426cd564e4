// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::NormalizationSettings;
use crate::domain::models::job_listing::JobListing;
use crate::domain::search::provider::RawRecord;
use crate::utils::errors::NormalizationError;
use crate::utils::url_utils::{normalize_source_url, UrlNormalizationRules};
use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use uuid::Uuid;

static RELATIVE_POSTED_AT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+)\+?\s*(minute|min|hour|hr|day|week|month)s?\s+ago$")
        .expect("relative posted_at pattern is valid")
});

/// 规范化策略
#[derive(Debug, Clone, Default)]
pub struct NormalizationPolicy {
    pub url_rules: UrlNormalizationRules,
    /// 压缩地点字符串中的连续空白
    pub normalize_location: bool,
}

impl From<&NormalizationSettings> for NormalizationPolicy {
    fn from(settings: &NormalizationSettings) -> Self {
        Self {
            url_rules: UrlNormalizationRules::new(
                settings.tracking_params.iter().cloned(),
                settings.tracking_param_prefixes.iter().cloned(),
                settings.strip_fragment,
            ),
            normalize_location: settings.normalize_location,
        }
    }
}

/// 搜索服务返回的职位字段
#[derive(Debug, Default, Deserialize)]
struct ProviderJob {
    title: Option<String>,
    company_name: Option<String>,
    location: Option<String>,
    via: Option<String>,
    description: Option<String>,
    apply_link: Option<String>,
    #[serde(default)]
    apply_links: Vec<ApplyLink>,
    sharing_link: Option<String>,
    detected_extensions: Option<DetectedExtensions>,
}

#[derive(Debug, Deserialize)]
struct ApplyLink {
    link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DetectedExtensions {
    posted_at: Option<String>,
    schedule: Option<String>,
    salary: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// 职位规范化器
///
/// 把原始记录转换为 `JobListing`。缺少 `title` 或来源URL的记录返回错误，由调用方跳过。
pub struct Normalizer {
    policy: NormalizationPolicy,
}

impl Normalizer {
    pub fn new(policy: NormalizationPolicy) -> Self {
        Self { policy }
    }

    pub fn normalize(
        &self,
        raw: &RawRecord,
        provider: &str,
    ) -> Result<JobListing, NormalizationError> {
        self.normalize_at(raw, provider, Utc::now())
    }

    /// 以 `seen_at` 作为抓取时间进行规范化，相对发布时间据此换算
    pub fn normalize_at(
        &self,
        raw: &RawRecord,
        provider: &str,
        seen_at: DateTime<Utc>,
    ) -> Result<JobListing, NormalizationError> {
        if !raw.is_object() {
            return Err(NormalizationError::Malformed(
                "record is not a JSON object".to_string(),
            ));
        }
        let job = ProviderJob::deserialize(raw)
            .map_err(|e| NormalizationError::Malformed(e.to_string()))?;

        let title = non_blank(job.title.as_deref()).ok_or(NormalizationError::MissingField("title"))?;

        let raw_url = non_blank(job.apply_link.as_deref())
            .or_else(|| {
                job.apply_links
                    .iter()
                    .find_map(|l| non_blank(l.link.as_deref()))
            })
            .or_else(|| non_blank(job.sharing_link.as_deref()))
            .ok_or(NormalizationError::MissingField("source_url"))?;
        let source_url = normalize_source_url(&raw_url, &self.policy.url_rules)?;

        let location = non_blank(job.location.as_deref()).unwrap_or_default();
        let location = if self.policy.normalize_location {
            location.split_whitespace().collect::<Vec<_>>().join(" ")
        } else {
            location
        };

        let extensions = job.detected_extensions.unwrap_or_default();

        Ok(JobListing {
            id: Uuid::new_v4(),
            title,
            company: non_blank(job.company_name.as_deref()).unwrap_or_default(),
            location,
            description: non_blank(job.description.as_deref()),
            source_url,
            provider: provider.to_string(),
            via: non_blank(job.via.as_deref()),
            schedule: non_blank(extensions.schedule.as_deref()),
            salary: non_blank(extensions.salary.as_deref()),
            posted_at: extensions
                .posted_at
                .as_deref()
                .and_then(|p| parse_posted_at(p, seen_at)),
            raw_payload: raw.clone(),
            first_search_id: None,
            first_seen_at: seen_at,
            last_seen_at: seen_at,
        })
    }
}

/// 解析发布时间
///
/// 支持 RFC 3339 时间戳和 "3 days ago"、"30+ days ago" 这类相对描述
pub fn parse_posted_at(value: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }

    match value.to_ascii_lowercase().as_str() {
        "just now" | "today" => return Some(now),
        "yesterday" => return Some(now - Duration::days(1)),
        _ => {}
    }

    let caps = RELATIVE_POSTED_AT.captures(value)?;
    let amount: i64 = caps[1].parse().ok()?;
    let delta = match caps[2].to_ascii_lowercase().as_str() {
        "minute" | "min" => Duration::try_minutes(amount),
        "hour" | "hr" => Duration::try_hours(amount),
        "day" => Duration::try_days(amount),
        "week" => Duration::try_weeks(amount),
        "month" => Duration::try_days(amount.checked_mul(30)?),
        _ => None,
    }?;
    now.checked_sub_signed(delta)
}
