//! Hosted row store over the PostgREST protocol (as served by Supabase).

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};

use reel_core::error::RepoError;
use reel_core::ports::{Query, Row, RowStore, Table};

use super::{PostgrestConfig, value_text};

/// PostgREST-backed row store.
///
/// Calls carry no timeout and are never retried.
pub struct PostgrestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PostgrestStore {
    pub fn new(config: &PostgrestConfig) -> Self {
        tracing::info!(url = %config.url, "Using hosted row store");
        Self {
            client: Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table.name())
    }

    fn request(&self, method: Method, table: Table, query: &Query) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&query_params(query))
    }

    async fn send(&self, request: RequestBuilder, table: Table) -> Result<Response, RepoError> {
        let response = request
            .send()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(table = table.name(), status = %status, "Row store rejected request");
        Err(RepoError::Query(format!("{status}: {body}")))
    }
}

/// PostgREST query string for a row selection: `col=eq.value` per filter,
/// `order=col.asc|desc` for ordering.
pub(crate) fn query_params(query: &Query) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = query
        .filters
        .iter()
        .map(|f| (f.column.clone(), format!("eq.{}", value_text(&f.value))))
        .collect();

    if let Some(order) = &query.order {
        let direction = if order.ascending { "asc" } else { "desc" };
        params.push(("order".to_string(), format!("{}.{direction}", order.column)));
    }

    params
}

#[async_trait]
impl RowStore for PostgrestStore {
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Row>, RepoError> {
        let request = self
            .request(Method::GET, table, query)
            .query(&[("select", "*")]);
        let response = self.send(request, table).await?;

        response
            .json::<Vec<Row>>()
            .await
            .map_err(|e| RepoError::Decode(e.to_string()))
    }

    async fn insert(&self, table: Table, rows: Vec<Row>) -> Result<(), RepoError> {
        let request = self
            .request(Method::POST, table, &Query::all())
            .header("Prefer", "return=minimal")
            .json(&rows);
        self.send(request, table).await?;
        Ok(())
    }

    async fn update(&self, table: Table, patch: Row, query: &Query) -> Result<(), RepoError> {
        let request = self
            .request(Method::PATCH, table, query)
            .header("Prefer", "return=minimal")
            .json(&patch);
        self.send(request, table).await?;
        Ok(())
    }

    async fn delete(&self, table: Table, query: &Query) -> Result<(), RepoError> {
        let request = self.request(Method::DELETE, table, query);
        self.send(request, table).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_table_urls() {
        let store = PostgrestStore::new(&PostgrestConfig {
            url: "https://demo.supabase.co/".to_string(),
            api_key: "anon".to_string(),
        });
        assert_eq!(
            store.table_url(Table::Comments),
            "https://demo.supabase.co/rest/v1/comments"
        );
    }

    #[test]
    fn encodes_filters_and_order() {
        let query = Query::all()
            .eq("post_id", 12)
            .eq("username", "ripley")
            .order_by("created_at", true);

        assert_eq!(
            query_params(&query),
            vec![
                ("post_id".to_string(), "eq.12".to_string()),
                ("username".to_string(), "eq.ripley".to_string()),
                ("order".to_string(), "created_at.asc".to_string()),
            ]
        );
        assert!(query_params(&Query::all()).is_empty());
    }
}
