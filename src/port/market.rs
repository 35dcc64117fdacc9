//! Marketplace scanning port for batch screening.

use std::future::Future;

use crate::domain::{DomesticListing, DomesticPlatform, ObservedPrice, OverseasPlatform};
use crate::error::Result;

/// Keyword search across marketplaces.
///
/// A failed call only removes that platform from the keyword's evaluation.
pub trait MarketScanner: Send + Sync {
    /// Listings currently for sale on a domestic marketplace.
    fn domestic_listings(
        &self,
        platform: DomesticPlatform,
        keyword: &str,
    ) -> impl Future<Output = Result<Vec<DomesticListing>>> + Send;

    /// Prices observed on an overseas marketplace, in observation order.
    fn overseas_prices(
        &self,
        platform: OverseasPlatform,
        keyword: &str,
    ) -> impl Future<Output = Result<Vec<ObservedPrice>>> + Send;
}
