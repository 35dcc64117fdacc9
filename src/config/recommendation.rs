//! Batch recommendation limits.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationConfig {
    /// Overseas prices per platform fed into the median.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    /// Domestic listings considered per platform and keyword.
    #[serde(default = "default_listings_per_platform")]
    pub listings_per_platform: usize,
    #[serde(default = "default_max_products_per_keyword")]
    pub max_products_per_keyword: usize,
    #[serde(default = "default_max_products_total")]
    pub max_products_total: usize,
    /// Profitable keywords reported.
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,
    /// How long a finished report is served from memory.
    #[serde(default = "default_report_ttl_secs")]
    pub cache_ttl_secs: u64,
}

const fn default_sample_size() -> usize {
    5
}

const fn default_listings_per_platform() -> usize {
    10
}

const fn default_max_products_per_keyword() -> usize {
    3
}

const fn default_max_products_total() -> usize {
    15
}

const fn default_max_keywords() -> usize {
    12
}

const fn default_report_ttl_secs() -> u64 {
    600
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            listings_per_platform: default_listings_per_platform(),
            max_products_per_keyword: default_max_products_per_keyword(),
            max_products_total: default_max_products_total(),
            max_keywords: default_max_keywords(),
            cache_ttl_secs: default_report_ttl_secs(),
        }
    }
}
