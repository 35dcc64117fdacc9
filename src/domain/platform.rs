//! Marketplaces and their fee schedules.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use url::Url;

use super::error::ProfitError;
use super::ids::Currency;
use super::money::{Price, Rate};

/// Japanese marketplace the product is bought on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DomesticPlatform {
    Mercari,
    YahooAuctions,
    Rakuma,
    PayPayFleamarket,
}

impl DomesticPlatform {
    pub const ALL: [DomesticPlatform; 4] = [
        Self::Mercari,
        Self::YahooAuctions,
        Self::Rakuma,
        Self::PayPayFleamarket,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mercari => "Mercari",
            Self::YahooAuctions => "Yahoo Auctions",
            Self::Rakuma => "Rakuma",
            Self::PayPayFleamarket => "PayPay Fleamarket",
        }
    }
}

/// Overseas marketplace the product is listed on.
///
/// Declaration order is the route tie-break priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OverseasPlatform {
    Ebay,
    Amazon,
    StockX,
    MercariUs,
}

impl OverseasPlatform {
    pub const ALL: [OverseasPlatform; 4] =
        [Self::Ebay, Self::Amazon, Self::StockX, Self::MercariUs];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Ebay => "eBay",
            Self::Amazon => "Amazon",
            Self::StockX => "StockX",
            Self::MercariUs => "Mercari US",
        }
    }

    /// Keyword search page on the marketplace.
    pub fn search_url(self, keyword: &str) -> String {
        let (base, param) = match self {
            Self::Ebay => ("https://www.ebay.com/sch/i.html", "_nkw"),
            Self::Amazon => ("https://www.amazon.com/s", "k"),
            Self::StockX => ("https://stockx.com/search", "s"),
            Self::MercariUs => ("https://www.mercari.com/search/", "keyword"),
        };
        Url::parse_with_params(base, &[(param, keyword)])
            .map(String::from)
            .unwrap_or_else(|_| base.to_string())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for DomesticPlatform {
    type Err = ProfitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "mercari" | "メルカリ" => Ok(Self::Mercari),
            "yahooauctions" | "yahoo" | "ヤフオク" => Ok(Self::YahooAuctions),
            "rakuma" | "ラクマ" => Ok(Self::Rakuma),
            "paypayfleamarket" | "paypay" | "paypayフリマ" => Ok(Self::PayPayFleamarket),
            _ => Err(ProfitError::PlatformNotConfigured {
                platform: s.to_string(),
            }),
        }
    }
}

impl FromStr for OverseasPlatform {
    type Err = ProfitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "ebay" => Ok(Self::Ebay),
            "amazon" => Ok(Self::Amazon),
            "stockx" => Ok(Self::StockX),
            "mercarius" => Ok(Self::MercariUs),
            _ => Err(ProfitError::PlatformNotConfigured {
                platform: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DomesticPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for OverseasPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for DomesticPlatform {
    type Error = ProfitError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for OverseasPlatform {
    type Error = ProfitError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DomesticPlatform> for String {
    fn from(p: DomesticPlatform) -> Self {
        p.name().to_string()
    }
}

impl From<OverseasPlatform> for String {
    fn from(p: OverseasPlatform) -> Self {
        p.name().to_string()
    }
}

/// Product category used to pick category-dependent referral fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Electronics,
    Jewelry,
    Footwear,
    Apparel,
    Books,
    Beauty,
    Sports,
    ToysGames,
    Watches,
    #[default]
    #[serde(other)]
    Other,
}

impl ProductCategory {
    /// Amazon referral fee for this category.
    pub fn amazon_referral_rate(self) -> Rate {
        match self {
            Self::Electronics => dec!(0.08),
            Self::Jewelry => dec!(0.20),
            Self::Footwear => dec!(0.15),
            Self::Apparel => dec!(0.17),
            Self::Books => dec!(0.15),
            Self::Beauty => dec!(0.08),
            Self::Sports => dec!(0.15),
            Self::ToysGames => dec!(0.15),
            Self::Watches => dec!(0.16),
            Self::Other => dec!(0.15),
        }
    }
}

/// Fee schedule of an overseas platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformFeeSchedule {
    pub platform: OverseasPlatform,
    pub currency: Currency,
    /// Percentage of the selling price, in [0, 1].
    pub base_fee_percentage: Rate,
    /// Flat per-transaction fee in the platform's currency.
    #[serde(default)]
    pub fixed_fee_local: Price,
}

impl PlatformFeeSchedule {
    /// Create a fee schedule, rejecting percentages outside [0, 1] and
    /// negative flat fees.
    pub fn try_new(
        platform: OverseasPlatform,
        currency: Currency,
        base_fee_percentage: Rate,
        fixed_fee_local: Price,
    ) -> Result<Self, String> {
        if base_fee_percentage < Decimal::ZERO || base_fee_percentage > Decimal::ONE {
            return Err(format!(
                "fee percentage for {platform} must be within [0, 1], got {base_fee_percentage}"
            ));
        }
        if fixed_fee_local < Decimal::ZERO {
            return Err(format!(
                "fixed fee for {platform} must not be negative, got {fixed_fee_local}"
            ));
        }
        Ok(Self {
            platform,
            currency,
            base_fee_percentage,
            fixed_fee_local,
        })
    }

    /// Percentage fee applicable to a product of the given category.
    ///
    /// Amazon charges by category; every other platform uses its base rate.
    pub fn fee_rate_for(&self, category: ProductCategory) -> Rate {
        match self.platform {
            OverseasPlatform::Amazon => category.amazon_referral_rate(),
            _ => self.base_fee_percentage,
        }
    }
}
