//! Monetary types for price and rate representation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Amount in Japanese yen.
pub type Jpy = Decimal;

/// Price in a platform's local currency.
pub type Price = Decimal;

/// Fractional rate (fee, duty, margin, exchange).
pub type Rate = Decimal;

/// Decimal places of a final listing price in its local currency.
pub const MINOR_UNIT_DP: u32 = 2;

/// One minor currency unit (one cent).
pub const MINOR_UNIT: Decimal = Decimal::from_parts(1, 0, 0, false, MINOR_UNIT_DP);

/// Round a local-currency price up to the next minor unit.
///
/// Used for solved minimum prices: rounding down could push the price under
/// the margin floor.
pub fn ceil_to_minor_unit(price: Price) -> Price {
    price.round_dp_with_strategy(MINOR_UNIT_DP, RoundingStrategy::ToPositiveInfinity)
}

/// Truncate a local-currency price to the minor unit.
pub fn floor_to_minor_unit(price: Price) -> Price {
    price.round_dp_with_strategy(MINOR_UNIT_DP, RoundingStrategy::ToZero)
}
