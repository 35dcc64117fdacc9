//! Reference-data lookup adapter backed by a TOML document.
//!
//! One file holds every table the pricing service reads: products, overseas
//! fee schedules, exchange rates, shipping zones, customs duties and known
//! competitor prices. Tables are validated once on load.

mod dto;

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info};

use crate::domain::{
    CompetitorPrice, CountryCode, Currency, CustomsDutyTable, ExchangeRate, HsCode, Jpy,
    OverseasPlatform, PlatformFeeSchedule, Product, Rate, ShippingTable, ShippingZone, Sku,
};
use crate::error::{DataError, Result};
use crate::port::{
    CompetitorPriceSource, CustomsDutySource, ExchangeRateSource, FeeScheduleSource,
    ProductCatalog, ShippingRateSource,
};

pub use dto::ReferenceDocument;

/// Largest relative disagreement allowed between a pair and its inverse.
const INVERSE_RATE_TOLERANCE: Decimal = dec!(0.01);

/// Validated in-memory reference tables.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    products: HashMap<Sku, Product>,
    fee_schedules: HashMap<OverseasPlatform, PlatformFeeSchedule>,
    exchange_rates: Vec<ExchangeRate>,
    shipping: ShippingTable,
    duties: CustomsDutyTable,
    competitor_prices: HashMap<(Sku, OverseasPlatform), Vec<CompetitorPrice>>,
}

fn invalid(table: &'static str, reason: impl Into<String>) -> DataError {
    DataError::Invalid {
        table,
        reason: reason.into(),
    }
}

impl ReferenceTables {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DataError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let document: ReferenceDocument =
            toml::from_str(&content).map_err(|source| DataError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let tables = Self::from_document(document)?;
        info!(
            path = %path.display(),
            products = tables.products.len(),
            fee_schedules = tables.fee_schedules.len(),
            "Reference data loaded"
        );
        Ok(tables)
    }

    pub fn from_document(document: ReferenceDocument) -> std::result::Result<Self, DataError> {
        let mut products = HashMap::with_capacity(document.products.len());
        for product in document.products {
            if product.sku.as_str().is_empty() {
                return Err(invalid("products", "empty sku"));
            }
            let sku = product.sku.clone();
            if products.insert(sku.clone(), product).is_some() {
                return Err(invalid("products", format!("duplicate sku {sku}")));
            }
        }

        let mut fee_schedules = HashMap::new();
        for record in document.fee_schedules {
            let platform: OverseasPlatform = record
                .platform
                .parse()
                .map_err(|e: crate::domain::ProfitError| invalid("fee_schedules", e.to_string()))?;
            let schedule = PlatformFeeSchedule::try_new(
                platform,
                record.currency,
                record.base_fee_percentage,
                record.fixed_fee_local,
            )
            .map_err(|reason| invalid("fee_schedules", reason))?;
            if fee_schedules.insert(platform, schedule).is_some() {
                return Err(invalid("fee_schedules", format!("duplicate platform {platform}")));
            }
        }

        let mut exchange_rates: Vec<ExchangeRate> = Vec::new();
        for record in document.exchange_rates {
            let rate = ExchangeRate::try_new(record.from, record.to, record.rate)
                .map_err(|reason| invalid("exchange_rates", reason))?;
            if let Some(conflict) = exchange_rates
                .iter()
                .find(|existing| !existing.is_consistent_with(&rate, INVERSE_RATE_TOLERANCE))
            {
                return Err(invalid(
                    "exchange_rates",
                    format!(
                        "{}->{} = {} is inconsistent with {}->{} = {}",
                        rate.from, rate.to, rate.rate, conflict.from, conflict.to, conflict.rate
                    ),
                ));
            }
            exchange_rates.push(rate);
        }

        let zones = document
            .shipping_zones
            .into_iter()
            .map(|record| {
                ShippingZone::try_new(record.name, record.countries, record.bands)
                    .map_err(|reason| invalid("shipping_zones", reason))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for rule in &document.customs_duties {
            rule.validate()
                .map_err(|reason| invalid("customs_duties", reason))?;
        }

        let mut competitor_prices: HashMap<_, Vec<CompetitorPrice>> = HashMap::new();
        for record in document.competitor_prices {
            let platform: OverseasPlatform = record.platform.parse().map_err(
                |e: crate::domain::ProfitError| invalid("competitor_prices", e.to_string()),
            )?;
            competitor_prices
                .entry((record.sku, platform))
                .or_default()
                .push(CompetitorPrice {
                    price: record.price,
                    currency: record.currency,
                    listing_url: record.listing_url,
                });
        }

        Ok(Self {
            products,
            fee_schedules,
            exchange_rates,
            shipping: ShippingTable::new(zones),
            duties: CustomsDutyTable::new(document.customs_duties),
            competitor_prices,
        })
    }

    /// Fee schedules in platform priority order.
    pub fn fee_schedules(&self) -> Vec<&PlatformFeeSchedule> {
        OverseasPlatform::ALL
            .iter()
            .filter_map(|platform| self.fee_schedules.get(platform))
            .collect()
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn shipping(&self) -> &ShippingTable {
        &self.shipping
    }
}

impl ProductCatalog for ReferenceTables {
    fn product(&self, sku: &Sku) -> Option<Product> {
        self.products.get(sku).cloned()
    }
}

impl FeeScheduleSource for ReferenceTables {
    fn fee_schedule(&self, platform: OverseasPlatform) -> Option<PlatformFeeSchedule> {
        self.fee_schedules.get(&platform).cloned()
    }
}

impl ExchangeRateSource for ReferenceTables {
    fn exchange_rate(&self, from: &Currency, to: &Currency) -> Option<Rate> {
        if from == to {
            return Some(Decimal::ONE);
        }
        if let Some(direct) = self.exchange_rates.iter().find(|r| r.matches(from, to)) {
            return Some(direct.rate);
        }
        let inverse = self.exchange_rates.iter().find(|r| r.matches(to, from))?;
        debug!(%from, %to, "Using inverse exchange rate");
        Some(inverse.inverse().rate)
    }
}

impl ShippingRateSource for ReferenceTables {
    fn shipping_cost(&self, weight_kg: Decimal, country: &CountryCode) -> Option<Jpy> {
        self.shipping.cost_for(weight_kg, country)
    }
}

impl CustomsDutySource for ReferenceTables {
    fn customs_duty_rate(
        &self,
        hs_code: &HsCode,
        country: &CountryCode,
        value_usd: Decimal,
    ) -> Rate {
        match self.duties.find(hs_code, country, value_usd) {
            Some(rule) => rule.duty_percentage,
            None => {
                debug!(%hs_code, %country, %value_usd, "No customs duty rule matched, using 0%");
                Decimal::ZERO
            }
        }
    }
}

impl CompetitorPriceSource for ReferenceTables {
    fn competitor_prices(&self, sku: &Sku, platform: OverseasPlatform) -> Vec<CompetitorPrice> {
        self.competitor_prices
            .get(&(sku.clone(), platform))
            .cloned()
            .unwrap_or_default()
    }
}
