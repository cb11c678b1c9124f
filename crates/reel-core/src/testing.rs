//! Test doubles for the row store and the movie lookup.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

use crate::domain::{MovieDetails, MovieSummary};
use crate::error::{LookupError, RepoError};
use crate::ports::{MovieLookup, Query, Row, RowStore, Table};

/// Row store double with failure injection and query recording.
#[derive(Default)]
pub struct FakeRows {
    tables: Mutex<HashMap<Table, Vec<Row>>>,
    next_id: AtomicI64,
    failing_selects: Mutex<HashSet<Table>>,
    fail_writes: AtomicBool,
    queries: Mutex<Vec<(Table, Query)>>,
    writes: AtomicUsize,
}

impl FakeRows {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicI64::new(100),
            ..Default::default()
        })
    }

    pub fn seed(&self, table: Table, rows: Vec<Row>) {
        self.tables
            .lock()
            .unwrap()
            .entry(table)
            .or_default()
            .extend(rows);
    }

    pub fn rows(&self, table: Table) -> Vec<Row> {
        self.tables
            .lock()
            .unwrap()
            .get(&table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn fail_selects_on(&self, table: Table) {
        self.failing_selects.lock().unwrap().insert(table);
    }

    pub fn heal(&self) {
        self.failing_selects.lock().unwrap().clear();
        self.fail_writes.store(false, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn last_query(&self, table: Table) -> Option<Query> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(t, _)| *t == table)
            .map(|(_, q)| q.clone())
    }

    fn check_write(&self) -> Result<(), RepoError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepoError::Connection("store offline".to_string()));
        }
        Ok(())
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn matches(row: &Row, query: &Query) -> bool {
    query.filters.iter().all(|f| {
        row.get(&f.column)
            .map(|v| text(v) == text(&f.value))
            .unwrap_or(false)
    })
}

#[async_trait]
impl RowStore for FakeRows {
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Row>, RepoError> {
        self.queries.lock().unwrap().push((table, query.clone()));
        if self.failing_selects.lock().unwrap().contains(&table) {
            return Err(RepoError::Query(format!("{} unavailable", table.name())));
        }

        let mut rows: Vec<Row> = self
            .rows(table)
            .into_iter()
            .filter(|row| matches(row, query))
            .collect();
        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ord = text(&a[&order.column]).cmp(&text(&b[&order.column]));
                if order.ascending { ord } else { ord.reverse() }
            });
        }
        Ok(rows)
    }

    async fn insert(&self, table: Table, rows: Vec<Row>) -> Result<(), RepoError> {
        self.check_write()?;
        let stamped = rows
            .into_iter()
            .map(|mut row| {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                row.insert("id".to_string(), json!(id));
                row.insert("created_at".to_string(), json!(timestamp(id)));
                row
            })
            .collect();
        self.seed(table, stamped);
        Ok(())
    }

    async fn update(&self, table: Table, patch: Row, query: &Query) -> Result<(), RepoError> {
        self.check_write()?;
        let mut tables = self.tables.lock().unwrap();
        for row in tables.entry(table).or_default().iter_mut() {
            if matches(row, query) {
                row.extend(patch.clone());
            }
        }
        Ok(())
    }

    async fn delete(&self, table: Table, query: &Query) -> Result<(), RepoError> {
        self.check_write()?;
        let mut tables = self.tables.lock().unwrap();
        tables
            .entry(table)
            .or_default()
            .retain(|row| !matches(row, query));
        Ok(())
    }
}

/// RFC 3339 timestamp `offset` seconds after a fixed epoch.
pub fn timestamp(offset: i64) -> String {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (base + chrono::Duration::seconds(offset)).to_rfc3339()
}

/// A stored post row.
pub fn post_row(id: &str, title: &str, username: &str, upvotes: u32, created: i64) -> Row {
    let value = json!({
        "id": id,
        "movie_id": "603",
        "movie_title": "The Matrix",
        "genres": "Action",
        "title": title,
        "content": "",
        "username": username,
        "password": "secret",
        "rating": 4,
        "url": null,
        "upvotes": upvotes,
        "created_at": timestamp(created),
    });
    match value {
        Value::Object(row) => row,
        _ => unreachable!(),
    }
}

/// A stored comment row.
pub fn comment_row(id: &str, post_id: &str, content: &str, created: i64) -> Row {
    let value = json!({
        "id": id,
        "post_id": post_id,
        "username": "viewer",
        "content": content,
        "created_at": timestamp(created),
    });
    match value {
        Value::Object(row) => row,
        _ => unreachable!(),
    }
}

/// Movie lookup double. Searches answer after a per-query delay.
#[derive(Default)]
pub struct FakeLookup {
    results: HashMap<String, (Duration, Vec<MovieSummary>)>,
    failing: bool,
    searches: Mutex<Vec<String>>,
}

impl FakeLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn with_results(mut self, query: &str, delay_ms: u64, titles: &[&str]) -> Self {
        let movies = titles
            .iter()
            .enumerate()
            .map(|(i, title)| movie(i as u64 + 1, title))
            .collect();
        self.results.insert(
            query.to_string(),
            (Duration::from_millis(delay_ms), movies),
        );
        self
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }
}

pub fn movie(id: u64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        release_date: Some("1999-03-31".to_string()),
        poster_path: Some(format!("/{id}.jpg")),
    }
}

#[async_trait]
impl MovieLookup for FakeLookup {
    async fn search_by_title(&self, query: &str) -> Result<Vec<MovieSummary>, LookupError> {
        self.searches.lock().unwrap().push(query.to_string());
        if self.failing {
            return Err(LookupError::Status(500));
        }
        let (delay, movies) = self.results.get(query).cloned().unwrap_or_default();
        tokio::time::sleep(delay).await;
        Ok(movies)
    }

    async fn details(&self, movie_id: u64) -> Result<MovieDetails, LookupError> {
        if self.failing {
            return Err(LookupError::Status(500));
        }
        Ok(MovieDetails {
            id: movie_id,
            title: format!("Movie {movie_id}"),
            genre_names: vec!["Drama".to_string(), "Thriller".to_string()],
            poster_path: None,
        })
    }
}
