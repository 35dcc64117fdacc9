//! Market scanner replaying observations recorded in a TOML snapshot.
//!
//! ```toml
//! [[keywords]]
//! keyword = "pokemon card"
//! unavailable = ["Rakuma"]
//!
//! [[keywords.domestic]]
//! platform = "Mercari"
//! title = "Pikachu promo"
//! price_jpy = 3000
//!
//! [[keywords.overseas]]
//! platform = "eBay"
//! price = 60
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::domain::{
    Currency, DomesticListing, DomesticPlatform, ObservedPrice, OverseasPlatform, Price,
};
use crate::error::{DataError, Error, Result};
use crate::port::MarketScanner;

#[derive(Debug, Default, Deserialize)]
pub struct MarketSnapshot {
    #[serde(default)]
    pub keywords: Vec<KeywordSnapshot>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordSnapshot {
    pub keyword: String,
    #[serde(default)]
    pub domestic: Vec<DomesticListing>,
    #[serde(default)]
    pub overseas: Vec<OverseasObservation>,
    /// Platforms whose scan fails for this keyword.
    #[serde(default)]
    pub unavailable: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct OverseasObservation {
    pub platform: OverseasPlatform,
    pub price: Price,
    #[serde(default = "Currency::usd")]
    pub currency: Currency,
}

#[derive(Debug, Default)]
struct KeywordMarket {
    domestic: Vec<DomesticListing>,
    overseas: Vec<OverseasObservation>,
    unavailable: Vec<String>,
}

impl KeywordMarket {
    fn is_unavailable(&self, platform_name: &str) -> bool {
        self.unavailable
            .iter()
            .any(|name| name.eq_ignore_ascii_case(platform_name))
    }
}

/// [`MarketScanner`] over a recorded snapshot.
///
/// Unknown keywords scan as empty markets.
#[derive(Debug, Default)]
pub struct SnapshotScanner {
    keywords: Vec<String>,
    markets: HashMap<String, KeywordMarket>,
}

impl SnapshotScanner {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DataError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: MarketSnapshot =
            toml::from_str(&content).map_err(|source| DataError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let scanner = Self::from_snapshot(snapshot);
        info!(
            path = %path.display(),
            keywords = scanner.keywords.len(),
            "Market snapshot loaded"
        );
        Ok(scanner)
    }

    pub fn from_snapshot(snapshot: MarketSnapshot) -> Self {
        let mut scanner = Self::default();
        for entry in snapshot.keywords {
            if !scanner.markets.contains_key(&entry.keyword) {
                scanner.keywords.push(entry.keyword.clone());
            }
            let market = scanner.markets.entry(entry.keyword).or_default();
            market.domestic.extend(entry.domestic);
            market.overseas.extend(entry.overseas);
            market.unavailable.extend(entry.unavailable);
        }
        scanner
    }

    /// Keywords in snapshot order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn market(&self, keyword: &str) -> Option<&KeywordMarket> {
        self.markets.get(keyword)
    }
}

fn unavailable(platform: impl ToString) -> Error {
    Error::Scan {
        platform: platform.to_string(),
        reason: "marked unavailable in snapshot".into(),
    }
}

impl MarketScanner for SnapshotScanner {
    async fn domestic_listings(
        &self,
        platform: DomesticPlatform,
        keyword: &str,
    ) -> Result<Vec<DomesticListing>> {
        let Some(market) = self.market(keyword) else {
            return Ok(Vec::new());
        };
        if market.is_unavailable(platform.name()) {
            return Err(unavailable(platform));
        }
        Ok(market
            .domestic
            .iter()
            .filter(|listing| listing.platform == platform)
            .cloned()
            .collect())
    }

    async fn overseas_prices(
        &self,
        platform: OverseasPlatform,
        keyword: &str,
    ) -> Result<Vec<ObservedPrice>> {
        let Some(market) = self.market(keyword) else {
            return Ok(Vec::new());
        };
        if market.is_unavailable(platform.name()) {
            return Err(unavailable(platform));
        }
        Ok(market
            .overseas
            .iter()
            .filter(|observation| observation.platform == platform)
            .map(|observation| ObservedPrice {
                price: observation.price,
                currency: observation.currency.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SNAPSHOT: &str = r#"
        [[keywords]]
        keyword = "gameboy"
        unavailable = ["rakuma", "StockX"]

        [[keywords.domestic]]
        platform = "Mercari"
        title = "Game Boy Color"
        price_jpy = 8000

        [[keywords.domestic]]
        platform = "Yahoo Auctions"
        title = "Game Boy Pocket"
        price_jpy = 6500
        url = "https://page.auctions.yahoo.co.jp/jp/auction/x1"

        [[keywords.overseas]]
        platform = "eBay"
        price = 120

        [[keywords.overseas]]
        platform = "Amazon"
        price = 15000
        currency = "JPY"
    "#;

    fn scanner() -> SnapshotScanner {
        SnapshotScanner::from_snapshot(toml::from_str(SNAPSHOT).unwrap())
    }

    #[tokio::test]
    async fn test_filters_by_platform() {
        let s = scanner();
        let mercari = s
            .domestic_listings(DomesticPlatform::Mercari, "gameboy")
            .await
            .unwrap();
        assert_eq!(mercari.len(), 1);
        assert_eq!(mercari[0].price_jpy, dec!(8000));

        let ebay = s
            .overseas_prices(OverseasPlatform::Ebay, "gameboy")
            .await
            .unwrap();
        assert_eq!(ebay, vec![ObservedPrice::usd(dec!(120))]);

        let amazon = s
            .overseas_prices(OverseasPlatform::Amazon, "gameboy")
            .await
            .unwrap();
        assert_eq!(amazon[0].currency, Currency::jpy());
    }

    #[tokio::test]
    async fn test_unavailable_platform_errors() {
        let s = scanner();
        assert!(s
            .domestic_listings(DomesticPlatform::Rakuma, "gameboy")
            .await
            .is_err());
        assert!(s
            .overseas_prices(OverseasPlatform::StockX, "gameboy")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_unknown_keyword_is_empty() {
        let s = scanner();
        assert!(s
            .domestic_listings(DomesticPlatform::Mercari, "walkman")
            .await
            .unwrap()
            .is_empty());
        assert_eq!(s.keywords(), ["gameboy".to_string()]);
    }
}
