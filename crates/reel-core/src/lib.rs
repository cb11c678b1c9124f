//! # Reel Core
//!
//! The domain layer of the Reel movie review forum.
//! Entities, ports, validation and the headless view flows live here; the
//! crate performs no network or storage I/O of its own.

pub mod domain;
pub mod error;
pub mod flows;
pub mod ports;
pub mod store;
pub mod validation;

#[cfg(test)]
mod testing;

pub use error::DomainError;
pub use store::ReviewStore;
