//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod movie_lookup;
mod row_store;

pub use movie_lookup::MovieLookup;
pub use row_store::{Filter, Order, Query, Row, RowStore, Table};
