//! Typed access to the `posts` and `comments` tables.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{Comment, NewComment, NewPost, Post, PostEdit, RowId};
use crate::error::RepoError;
use crate::ports::{Query, Row, RowStore, Table};

/// Review store built on the generic row store.
#[derive(Clone)]
pub struct ReviewStore {
    rows: Arc<dyn RowStore>,
}

impl ReviewStore {
    pub fn new(rows: Arc<dyn RowStore>) -> Self {
        Self { rows }
    }

    /// Every post, in store order.
    pub async fn posts(&self) -> Result<Vec<Post>, RepoError> {
        let rows = self.rows.select(Table::Posts, &Query::all()).await?;
        Ok(decode_rows(rows))
    }

    /// A single post; `RepoError::NotFound` when no row matches.
    pub async fn post(&self, id: &RowId) -> Result<Post, RepoError> {
        let rows = self.rows.select(Table::Posts, &by_id(id)).await?;
        let row = rows.into_iter().next().ok_or(RepoError::NotFound)?;
        decode(row)
    }

    pub async fn insert_post(&self, post: &NewPost) -> Result<(), RepoError> {
        self.rows.insert(Table::Posts, vec![encode(post)?]).await
    }

    /// Write an absolute upvote count. There is no atomic increment.
    pub async fn set_upvotes(&self, id: &RowId, upvotes: u32) -> Result<(), RepoError> {
        let mut patch = Row::new();
        patch.insert("upvotes".to_string(), Value::from(upvotes));
        self.rows.update(Table::Posts, patch, &by_id(id)).await
    }

    pub async fn update_post(&self, id: &RowId, edit: &PostEdit) -> Result<(), RepoError> {
        self.rows.update(Table::Posts, encode(edit)?, &by_id(id)).await
    }

    pub async fn delete_post(&self, id: &RowId) -> Result<(), RepoError> {
        self.rows.delete(Table::Posts, &by_id(id)).await
    }

    /// Every comment on every post.
    pub async fn comments(&self) -> Result<Vec<Comment>, RepoError> {
        let rows = self.rows.select(Table::Comments, &Query::all()).await?;
        Ok(decode_rows(rows))
    }

    /// Comments on one post, oldest first.
    pub async fn comments_for(&self, post_id: &RowId) -> Result<Vec<Comment>, RepoError> {
        let query = Query::all()
            .eq("post_id", post_id.as_str())
            .order_by("created_at", true);
        let rows = self.rows.select(Table::Comments, &query).await?;
        Ok(decode_rows(rows))
    }

    pub async fn insert_comment(&self, comment: &NewComment) -> Result<(), RepoError> {
        self.rows.insert(Table::Comments, vec![encode(comment)?]).await
    }
}

fn by_id(id: &RowId) -> Query {
    Query::all().eq("id", id.as_str())
}

fn encode<T: Serialize>(value: &T) -> Result<Row, RepoError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(row)) => Ok(row),
        Ok(other) => Err(RepoError::Decode(format!("expected an object, got {other}"))),
        Err(e) => Err(RepoError::Decode(e.to_string())),
    }
}

fn decode<T: DeserializeOwned>(row: Row) -> Result<T, RepoError> {
    serde_json::from_value(Value::Object(row)).map_err(|e| RepoError::Decode(e.to_string()))
}

/// Rows that fail to decode are logged and skipped so one bad record
/// cannot blank a whole table read.
fn decode_rows<T: DeserializeOwned>(rows: Vec<Row>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.get("id").cloned().unwrap_or(Value::Null);
            match decode(row) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "Skipping undecodable row");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeRows, post_row};

    #[tokio::test]
    async fn comments_for_filters_and_orders() {
        let rows = FakeRows::new();
        let store = ReviewStore::new(rows.clone());

        store
            .insert_comment(&NewComment {
                post_id: RowId::from("1"),
                username: "ripley".to_string(),
                content: "first".to_string(),
            })
            .await
            .unwrap();
        store
            .insert_comment(&NewComment {
                post_id: RowId::from("2"),
                username: "dallas".to_string(),
                content: "elsewhere".to_string(),
            })
            .await
            .unwrap();

        let comments = store.comments_for(&RowId::from("1")).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].content, "first");

        let last = rows.last_query(Table::Comments).unwrap();
        assert_eq!(last.order.unwrap().column, "created_at");
    }

    #[tokio::test]
    async fn malformed_rows_are_skipped() {
        let rows = FakeRows::new();
        let mut broken = post_row("2", "Aliens", "hicks", 0, 10);
        broken.insert("title".to_string(), Value::Null);
        let mut naive = post_row("3", "Alien 3", "bishop", 0, 20);
        naive.insert(
            "created_at".to_string(),
            Value::String("2024-05-01T12:00:00".to_string()),
        );
        rows.seed(
            Table::Posts,
            vec![post_row("1", "Alien", "ripley", 0, 0), broken, naive],
        );
        let store = ReviewStore::new(rows);

        let posts = store.posts().await.unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Alien");
    }

    #[tokio::test]
    async fn missing_post_is_not_found() {
        let rows = FakeRows::new();
        rows.seed(Table::Posts, vec![post_row("1", "Alien", "ripley", 0, 0)]);
        let store = ReviewStore::new(rows);

        assert!(store.post(&RowId::from("1")).await.is_ok());
        assert!(matches!(
            store.post(&RowId::from("9")).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn upvote_patch_touches_only_the_counter() {
        let rows = FakeRows::new();
        rows.seed(Table::Posts, vec![post_row("1", "Alien", "ripley", 4, 0)]);
        let store = ReviewStore::new(rows.clone());

        store.set_upvotes(&RowId::from("1"), 5).await.unwrap();

        let post = store.post(&RowId::from("1")).await.unwrap();
        assert_eq!(post.upvotes, 5);
        assert_eq!(post.title, "Alien");
    }
}
