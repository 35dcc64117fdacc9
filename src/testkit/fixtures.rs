//! Reference data and market observations shared by tests.
//!
//! The reference tables reproduce a small but complete catalog:
//!
//! | SKU           | weight | HS code | purchase |
//! |---------------|--------|---------|----------|
//! | `GAME-9504`   | 1.0 kg | 9504.50 | ¥15,000  |
//! | `WATCH-9102`  | 0.3 kg | 9102.11 | ¥80,000  |
//! | `HEAVY-8471`  | 12 kg  | 8471.30 | ¥40,000  |
//! | `NOWEIGHT-1`  | none   | 9504.50 | ¥5,000   |
//!
//! eBay, Amazon and StockX carry fee schedules; Mercari US deliberately has
//! none. USD/JPY is 150.

use rust_decimal::Decimal;

use crate::adapter::reference::ReferenceTables;
use crate::domain::{Currency, DomesticListing, DomesticPlatform, ObservedPrice};

pub const GAME_SKU: &str = "GAME-9504";
pub const WATCH_SKU: &str = "WATCH-9102";
pub const HEAVY_SKU: &str = "HEAVY-8471";
pub const NO_WEIGHT_SKU: &str = "NOWEIGHT-1";

pub const REFERENCE_TOML: &str = r#"
[[products]]
sku = "GAME-9504"
name = "Retro handheld console"
category = "toys_games"
weight_kg = 1.0
hs_code = "9504.50"
purchase_price = 15000

[[products]]
sku = "WATCH-9102"
name = "Automatic wristwatch"
category = "watches"
weight_kg = 0.3
hs_code = "9102.11"
purchase_price = 80000

[[products]]
sku = "HEAVY-8471"
name = "Workstation tower"
category = "electronics"
weight_kg = 12
hs_code = "8471.30"
purchase_price = 40000

[[products]]
sku = "NOWEIGHT-1"
name = "Unmeasured cartridge"
category = "toys_games"
hs_code = "9504.50"
purchase_price = 5000

[[fee_schedules]]
platform = "eBay"
currency = "USD"
base_fee_percentage = 0.129
fixed_fee_local = 0.30

[[fee_schedules]]
platform = "Amazon"
currency = "USD"
base_fee_percentage = 0.15
fixed_fee_local = 0

[[fee_schedules]]
platform = "StockX"
currency = "USD"
base_fee_percentage = 0.12
fixed_fee_local = 0

[[exchange_rates]]
from = "USD"
to = "JPY"
rate = 150

[[shipping_zones]]
name = "USA"
countries = ["US"]
bands = [
    { min_weight_kg = 0, max_weight_kg = 0.5, cost_jpy = 2000 },
    { min_weight_kg = 0.5, max_weight_kg = 2, cost_jpy = 3500 },
    { min_weight_kg = 2, cost_jpy = 6000 },
]

[[shipping_zones]]
name = "Europe"
countries = ["GB", "DE", "FR"]
bands = [
    { min_weight_kg = 0, max_weight_kg = 2, cost_jpy = 4200 },
    { min_weight_kg = 2, max_weight_kg = 10, cost_jpy = 7800 },
]

[[customs_duties]]
hs_code_prefix = "9504"
country_code = "US"
duty_percentage = 0.05
min_value_usd = 800

[[customs_duties]]
hs_code_prefix = "9102"
country_code = "US"
duty_percentage = 0.064

[[competitor_prices]]
sku = "GAME-9504"
platform = "eBay"
price = 200
currency = "USD"
listing_url = "https://www.ebay.com/itm/1001"

[[competitor_prices]]
sku = "GAME-9504"
platform = "eBay"
price = 180
currency = "EUR"
"#;

/// Tables parsed from [`REFERENCE_TOML`].
pub fn reference_tables() -> ReferenceTables {
    let document = toml::from_str(REFERENCE_TOML).expect("fixture reference data parses");
    ReferenceTables::from_document(document).expect("fixture reference data is valid")
}

pub fn listing(platform: DomesticPlatform, title: &str, price_jpy: Decimal) -> DomesticListing {
    DomesticListing {
        platform,
        title: title.to_string(),
        price_jpy,
        url: None,
        image_url: None,
    }
}

pub fn usd_prices(prices: &[Decimal]) -> Vec<ObservedPrice> {
    prices.iter().copied().map(ObservedPrice::usd).collect()
}

pub fn jpy_price(price: Decimal) -> ObservedPrice {
    ObservedPrice {
        price,
        currency: Currency::jpy(),
    }
}
