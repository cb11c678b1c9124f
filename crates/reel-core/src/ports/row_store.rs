use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::RepoError;

/// A single row as exchanged with the store.
pub type Row = Map<String, Value>;

/// Tables held by the forum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Posts,
    Comments,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Posts => "posts",
            Table::Comments => "comments",
        }
    }
}

/// Equality predicate on one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

/// Single-column ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// Row selection: every filter must match; rows come back in `order` if set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
}

impl Query {
    /// Matches every row.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.into(),
            ascending,
        });
        self
    }
}

/// Generic row-level CRUD surface of the hosted backend.
///
/// No transactions, locks or version checks are offered: every call stands
/// alone and concurrent updates to the same row overwrite each other.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Read the rows matching `query`.
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Row>, RepoError>;

    /// Append rows. The store assigns `id` and `created_at`.
    async fn insert(&self, table: Table, rows: Vec<Row>) -> Result<(), RepoError>;

    /// Overwrite the columns in `patch` on every matching row.
    async fn update(&self, table: Table, patch: Row, query: &Query) -> Result<(), RepoError>;

    /// Remove every matching row.
    async fn delete(&self, table: Table, query: &Query) -> Result<(), RepoError>;
}
