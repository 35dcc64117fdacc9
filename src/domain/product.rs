//! Product metadata as registered in the product catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ProfitError;
use super::ids::{HsCode, Sku};
use super::money::Jpy;
use super::platform::ProductCategory;

/// A product that can be sourced domestically and sold overseas.
///
/// Read-only to the pricing core; created and updated by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: Sku,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: ProductCategory,
    #[serde(default)]
    pub weight_kg: Option<Decimal>,
    #[serde(default)]
    pub hs_code: Option<HsCode>,
    /// Registered purchase price in yen.
    #[serde(default)]
    pub purchase_price: Option<Jpy>,
}

/// Data a product must carry for shipping and duty lookups.
#[derive(Debug, Clone, Copy)]
pub struct ShippableProduct<'a> {
    pub product: &'a Product,
    pub weight_kg: Decimal,
    pub hs_code: &'a HsCode,
}

impl Product {
    pub fn new(sku: impl Into<Sku>) -> Self {
        Self {
            sku: sku.into(),
            name: String::new(),
            category: ProductCategory::Other,
            weight_kg: None,
            hs_code: None,
            purchase_price: None,
        }
    }

    #[must_use]
    pub fn with_weight_kg(mut self, weight_kg: Decimal) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    #[must_use]
    pub fn with_hs_code(mut self, hs_code: impl Into<HsCode>) -> Self {
        self.hs_code = Some(hs_code.into());
        self
    }

    #[must_use]
    pub fn with_purchase_price(mut self, price: Jpy) -> Self {
        self.purchase_price = Some(price);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: ProductCategory) -> Self {
        self.category = category;
        self
    }

    /// Check that weight and HS code are present.
    pub fn shippable(&self) -> Result<ShippableProduct<'_>, ProfitError> {
        let weight_kg = self
            .weight_kg
            .filter(|w| *w > Decimal::ZERO)
            .ok_or_else(|| ProfitError::MissingProductData {
                sku: self.sku.clone(),
                field: "weight_kg",
            })?;
        let hs_code = self
            .hs_code
            .as_ref()
            .filter(|code| !code.is_empty())
            .ok_or_else(|| ProfitError::MissingProductData {
                sku: self.sku.clone(),
                field: "hs_code",
            })?;
        Ok(ShippableProduct {
            product: self,
            weight_kg,
            hs_code,
        })
    }

    /// Resolve the purchase price: caller override first, then the
    /// registered price. The result must be positive.
    pub fn purchase_price_or(&self, override_price: Option<Jpy>) -> Result<Jpy, ProfitError> {
        let price = override_price
            .or(self.purchase_price)
            .ok_or_else(|| ProfitError::MissingPurchasePrice {
                sku: self.sku.clone(),
            })?;
        if price <= Decimal::ZERO {
            return Err(ProfitError::InvalidPurchasePrice {
                sku: self.sku.clone(),
                price,
            });
        }
        Ok(price)
    }
}
