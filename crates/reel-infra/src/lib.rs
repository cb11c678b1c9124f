//! # Reel Infrastructure
//!
//! Concrete implementations of the ports defined in `reel-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `remote` - PostgREST row store and TMDB movie lookup over HTTP

pub mod movies;
pub mod store;

pub use movies::TmdbConfig;
pub use store::{InMemoryRowStore, PostgrestConfig};

#[cfg(feature = "remote")]
pub use movies::TmdbClient;
#[cfg(feature = "remote")]
pub use store::PostgrestStore;
