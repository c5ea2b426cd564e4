// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::NormalizationError;
use std::collections::HashSet;
use url::Url;

/// 默认视为跟踪参数的查询键
pub const DEFAULT_TRACKING_PARAMS: &[&str] = &[
    "gclid", "dclid", "fbclid", "msclkid", "yclid", "igshid", "srsltid", "mc_cid", "mc_eid",
    "_hsenc", "_hsmi",
];

/// 默认视为跟踪参数的查询键前缀
pub const DEFAULT_TRACKING_PREFIXES: &[&str] = &["utm_"];

/// URL 规范化规则
#[derive(Debug, Clone)]
pub struct UrlNormalizationRules {
    tracking_params: HashSet<String>,
    tracking_prefixes: Vec<String>,
    strip_fragment: bool,
}

impl Default for UrlNormalizationRules {
    fn default() -> Self {
        Self::new(
            DEFAULT_TRACKING_PARAMS.iter().map(|p| p.to_string()),
            DEFAULT_TRACKING_PREFIXES.iter().map(|p| p.to_string()),
            true,
        )
    }
}

impl UrlNormalizationRules {
    pub fn new(
        tracking_params: impl IntoIterator<Item = String>,
        tracking_prefixes: impl IntoIterator<Item = String>,
        strip_fragment: bool,
    ) -> Self {
        Self {
            tracking_params: tracking_params
                .into_iter()
                .map(|p| p.trim().to_ascii_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
            tracking_prefixes: tracking_prefixes
                .into_iter()
                .map(|p| p.trim().to_ascii_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
            strip_fragment,
        }
    }

    /// 判断查询键是否为跟踪参数（大小写不敏感）
    pub fn is_tracking_param(&self, key: &str) -> bool {
        let key = key.to_ascii_lowercase();
        self.tracking_params.contains(&key)
            || self.tracking_prefixes.iter().any(|p| key.starts_with(p.as_str()))
    }
}

/// 将来源 URL 规范化为可用作存储键的字符串
///
/// 保证的变换：去除首尾空白、scheme/host 小写、移除跟踪参数、
/// 对存储键不允许的字符做百分号编码。其余查询参数保持原有顺序。
pub fn normalize_source_url(
    raw: &str,
    rules: &UrlNormalizationRules,
) -> Result<String, NormalizationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NormalizationError::MissingField("source_url"));
    }

    let invalid = |reason: String| NormalizationError::InvalidUrl {
        url: trimmed.to_string(),
        reason,
    };

    let mut url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    if rules.strip_fragment {
        url.set_fragment(None);
    }

    if url.query().is_some() {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let kept: Vec<&(String, String)> = pairs
            .iter()
            .filter(|(k, _)| !rules.is_tracking_param(k))
            .collect();

        if kept.is_empty() {
            url.set_query(None);
        } else if kept.len() != pairs.len() {
            url.query_pairs_mut()
                .clear()
                .extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
    }

    Ok(url.into())
}
