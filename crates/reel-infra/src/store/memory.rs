//! In-memory row store - used as fallback when no backend is configured.

use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tokio::sync::RwLock;

use reel_core::error::RepoError;
use reel_core::ports::{Query, Row, RowStore, Table};

use super::value_text;

/// Row store holding both tables in a HashMap behind an async RwLock.
///
/// Assigns integer ids and RFC 3339 `created_at` stamps on insert, like the
/// hosted backend does. Data is lost on process restart.
pub struct InMemoryRowStore {
    tables: RwLock<HashMap<Table, Vec<Row>>>,
    next_id: AtomicI64,
}

impl InMemoryRowStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn matches(row: &Row, query: &Query) -> bool {
        query.filters.iter().all(|filter| {
            row.get(&filter.column)
                .is_some_and(|v| value_text(v) == value_text(&filter.value))
        })
    }

    fn compare(a: Option<&Value>, b: Option<&Value>) -> CmpOrdering {
        match (a, b) {
            (Some(Value::Number(x)), Some(Value::Number(y))) => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(CmpOrdering::Equal),
            (Some(x), Some(y)) => value_text(x).cmp(&value_text(y)),
            (None, Some(_)) => CmpOrdering::Less,
            (Some(_), None) => CmpOrdering::Greater,
            (None, None) => CmpOrdering::Equal,
        }
    }
}

impl Default for InMemoryRowStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RowStore for InMemoryRowStore {
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Row>, RepoError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Row> = tables
            .get(&table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| Self::matches(row, query))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ord = Self::compare(a.get(&order.column), b.get(&order.column));
                if order.ascending { ord } else { ord.reverse() }
            });
        }

        Ok(rows)
    }

    async fn insert(&self, table: Table, rows: Vec<Row>) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let stored = tables.entry(table).or_default();

        for mut row in rows {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            row.insert("id".to_string(), Value::from(id));
            row.insert(
                "created_at".to_string(),
                Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
            );
            stored.push(row);
        }

        tracing::debug!(table = table.name(), rows = stored.len(), "Rows inserted");
        Ok(())
    }

    async fn update(&self, table: Table, patch: Row, query: &Query) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        for row in tables.entry(table).or_default().iter_mut() {
            if Self::matches(row, query) {
                row.extend(patch.clone());
            }
        }
        Ok(())
    }

    async fn delete(&self, table: Table, query: &Query) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables
            .entry(table)
            .or_default()
            .retain(|row| !Self::matches(row, query));
        Ok(())
    }
}
