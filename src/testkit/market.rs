//! Scripted in-memory market scanner.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{DomesticListing, DomesticPlatform, ObservedPrice, OverseasPlatform};
use crate::error::{Error, Result};
use crate::port::MarketScanner;

/// [`MarketScanner`] returning canned observations.
///
/// Platforms registered with [`failing`](Self::failing) return
/// [`Error::Scan`] for every keyword.
#[derive(Debug, Default)]
pub struct ScriptedScanner {
    domestic: HashMap<(String, DomesticPlatform), Vec<DomesticListing>>,
    overseas: HashMap<(String, OverseasPlatform), Vec<ObservedPrice>>,
    failing: HashSet<String>,
    calls: AtomicUsize,
}

impl ScriptedScanner {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_listing(mut self, keyword: &str, listing: DomesticListing) -> Self {
        self.domestic
            .entry((keyword.to_string(), listing.platform))
            .or_default()
            .push(listing);
        self
    }

    #[must_use]
    pub fn with_prices(
        mut self,
        keyword: &str,
        platform: OverseasPlatform,
        prices: Vec<ObservedPrice>,
    ) -> Self {
        self.overseas
            .entry((keyword.to_string(), platform))
            .or_default()
            .extend(prices);
        self
    }

    /// Make every scan of `platform` fail.
    #[must_use]
    pub fn failing(mut self, platform: impl ToString) -> Self {
        self.failing.insert(platform.to_string());
        self
    }

    /// Total scans served, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self, platform: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(platform) {
            return Err(Error::Scan {
                platform: platform.to_string(),
                reason: "scripted failure".into(),
            });
        }
        Ok(())
    }
}

impl MarketScanner for ScriptedScanner {
    async fn domestic_listings(
        &self,
        platform: DomesticPlatform,
        keyword: &str,
    ) -> Result<Vec<DomesticListing>> {
        self.check(platform.name())?;
        Ok(self
            .domestic
            .get(&(keyword.to_string(), platform))
            .cloned()
            .unwrap_or_default())
    }

    async fn overseas_prices(
        &self,
        platform: OverseasPlatform,
        keyword: &str,
    ) -> Result<Vec<ObservedPrice>> {
        self.check(platform.name())?;
        Ok(self
            .overseas
            .get(&(keyword.to_string(), platform))
            .cloned()
            .unwrap_or_default())
    }
}
