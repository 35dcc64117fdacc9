//! Implementations of ports (hexagonal adapters).

pub mod reference;
pub mod snapshot;
