//! Shipping zones and weight-banded international shipping rates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::CountryCode;
use super::money::Jpy;

/// Zone used for countries no zone lists explicitly.
pub const DEFAULT_ZONE: &str = "USA";

/// One weight band of a zone: `[min_weight_kg, max_weight_kg)`.
///
/// A missing upper bound marks the open-ended top band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingBand {
    pub min_weight_kg: Decimal,
    #[serde(default)]
    pub max_weight_kg: Option<Decimal>,
    pub cost_jpy: Jpy,
}

impl ShippingBand {
    pub fn contains(&self, weight_kg: Decimal) -> bool {
        weight_kg >= self.min_weight_kg && self.max_weight_kg.map_or(true, |max| weight_kg < max)
    }
}

/// A named zone with the countries it serves and its rate bands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippingZone {
    pub name: String,
    pub countries: Vec<CountryCode>,
    bands: Vec<ShippingBand>,
}

impl ShippingZone {
    /// Create a zone. Bands are sorted by lower bound and must not overlap;
    /// only the last band may be unbounded.
    pub fn try_new(
        name: impl Into<String>,
        countries: Vec<CountryCode>,
        mut bands: Vec<ShippingBand>,
    ) -> Result<Self, String> {
        let name = name.into();
        bands.sort_by(|a, b| a.min_weight_kg.cmp(&b.min_weight_kg));

        for band in &bands {
            if band.min_weight_kg < Decimal::ZERO {
                return Err(format!("zone {name}: negative band lower bound"));
            }
            if band.cost_jpy < Decimal::ZERO {
                return Err(format!("zone {name}: negative shipping cost"));
            }
            if let Some(max) = band.max_weight_kg {
                if max <= band.min_weight_kg {
                    return Err(format!(
                        "zone {name}: band [{}, {max}) is empty",
                        band.min_weight_kg
                    ));
                }
            }
        }

        for pair in bands.windows(2) {
            match pair[0].max_weight_kg {
                None => {
                    return Err(format!(
                        "zone {name}: unbounded band at {} is not the top band",
                        pair[0].min_weight_kg
                    ))
                }
                Some(max) if max > pair[1].min_weight_kg => {
                    return Err(format!(
                        "zone {name}: bands starting at {} and {} overlap",
                        pair[0].min_weight_kg, pair[1].min_weight_kg
                    ))
                }
                Some(_) => {}
            }
        }

        Ok(Self {
            name,
            countries,
            bands,
        })
    }

    pub fn bands(&self) -> &[ShippingBand] {
        &self.bands
    }

    pub fn serves(&self, country: &CountryCode) -> bool {
        self.countries.contains(country)
    }

    /// Cost of the single band containing `weight_kg`.
    pub fn cost_for(&self, weight_kg: Decimal) -> Option<Jpy> {
        self.bands
            .iter()
            .find(|band| band.contains(weight_kg))
            .map(|band| band.cost_jpy)
    }
}

/// All shipping zones, with the fallback zone for unmapped countries.
#[derive(Debug, Clone, Default)]
pub struct ShippingTable {
    zones: Vec<ShippingZone>,
}

impl ShippingTable {
    pub fn new(zones: Vec<ShippingZone>) -> Self {
        Self { zones }
    }

    pub fn zones(&self) -> &[ShippingZone] {
        &self.zones
    }

    /// Zone serving `country`, falling back to [`DEFAULT_ZONE`].
    pub fn zone_for(&self, country: &CountryCode) -> Option<&ShippingZone> {
        self.zones
            .iter()
            .find(|zone| zone.serves(country))
            .or_else(|| self.zones.iter().find(|zone| zone.name == DEFAULT_ZONE))
    }

    pub fn cost_for(&self, weight_kg: Decimal, country: &CountryCode) -> Option<Jpy> {
        self.zone_for(country)?.cost_for(weight_kg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn band(min: Decimal, max: Option<Decimal>, cost: Decimal) -> ShippingBand {
        ShippingBand {
            min_weight_kg: min,
            max_weight_kg: max,
            cost_jpy: cost,
        }
    }

    fn table() -> ShippingTable {
        let usa = ShippingZone::try_new(
            "USA",
            vec![CountryCode::new("US")],
            vec![
                band(dec!(0), Some(dec!(1)), dec!(2000)),
                band(dec!(1), Some(dec!(2)), dec!(3500)),
                band(dec!(2), None, dec!(6000)),
            ],
        )
        .unwrap();
        let europe = ShippingZone::try_new(
            "Europe",
            vec![CountryCode::new("GB"), CountryCode::new("DE"), CountryCode::new("FR")],
            vec![band(dec!(0), Some(dec!(5)), dec!(4200))],
        )
        .unwrap();
        ShippingTable::new(vec![usa, europe])
    }

    #[test]
    fn band_lower_bound_inclusive_upper_exclusive() {
        let t = table();
        let us = CountryCode::new("US");
        assert_eq!(t.cost_for(dec!(0.99), &us), Some(dec!(2000)));
        assert_eq!(t.cost_for(dec!(1.0), &us), Some(dec!(3500)));
        assert_eq!(t.cost_for(dec!(2.0), &us), Some(dec!(6000)));
        assert_eq!(t.cost_for(dec!(250), &us), Some(dec!(6000)));
    }

    #[test]
    fn unmapped_country_uses_default_zone() {
        let t = table();
        assert_eq!(t.zone_for(&CountryCode::new("AU")).unwrap().name, "USA");
        assert_eq!(t.zone_for(&CountryCode::new("DE")).unwrap().name, "Europe");
    }

    #[test]
    fn weight_beyond_bounded_zone_has_no_rate() {
        let t = table();
        assert_eq!(t.cost_for(dec!(5), &CountryCode::new("FR")), None);
    }

    #[test]
    fn rejects_overlapping_bands() {
        let err = ShippingZone::try_new(
            "X",
            vec![],
            vec![
                band(dec!(0), Some(dec!(2)), dec!(1)),
                band(dec!(1), Some(dec!(3)), dec!(2)),
            ],
        );
        assert!(err.is_err());
    }

    #[test]
    fn rejects_unbounded_band_below_top() {
        let err = ShippingZone::try_new(
            "X",
            vec![],
            vec![band(dec!(0), None, dec!(1)), band(dec!(1), Some(dec!(3)), dec!(2))],
        );
        assert!(err.is_err());
    }
}
