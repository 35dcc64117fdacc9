//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`fixtures`] — Reference data, products and market observations.
//! - [`market`] — `ScriptedScanner`, an in-memory [`MarketScanner`](crate::port::MarketScanner).
//! - [`clock`] — `ManualClock` for driving cache expiry.
//! - [`config`] — Canonical test configurations.

pub mod clock;
pub mod config;
pub mod fixtures;
pub mod market;
