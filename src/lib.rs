//! Sedori - pricing engine for reselling Japanese marketplace goods abroad.
//!
//! Given a product bought on a domestic marketplace (Mercari, Yahoo
//! Auctions, Rakuma, PayPay Fleamarket), the crate answers three questions:
//! how much profit a given overseas listing price yields, the lowest price
//! that still meets a margin floor, and which price to list at given what
//! competitors charge. Batch screening ranks keyword searches by the most
//! profitable overseas platform for every sourcing candidate.
//!
//! # Modules
//!
//! - [`domain`] - Money types, platforms, cost model and pricing math. No I/O.
//! - [`port`] - Lookup traits for reference data and the async market scanner.
//! - [`adapter`] - TOML reference tables and recorded market snapshots.
//! - [`application`] - Pricing and recommendation services, TTL caching.
//! - [`config`] - Configuration loading from TOML files.
//! - [`cli`] - Command-line front-end.
//! - [`error`] - Error types for the crate.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use rust_decimal_macros::dec;
//! use sedori::adapter::reference::ReferenceTables;
//! use sedori::application::{PricingRequest, PricingService};
//! use sedori::domain::{CountryCode, DomesticPlatform, OverseasPlatform};
//!
//! # fn main() -> sedori::error::Result<()> {
//! let tables = Arc::new(ReferenceTables::load("reference.toml")?);
//! let service = PricingService::new(Arc::clone(&tables), tables);
//! let request = PricingRequest::new(
//!     "GAME-9504",
//!     DomesticPlatform::Mercari,
//!     OverseasPlatform::Ebay,
//!     CountryCode::new("US"),
//! );
//! let floor = service.solve_min_selling_price(&request, dec!(0.10))?;
//! println!("list at no less than {}", floor.min_selling_price_local);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
