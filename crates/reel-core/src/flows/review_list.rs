//! The home screen: every review with filtering, sorting and upvotes.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::domain::{Comment, Post, RowId};
use crate::error::DomainError;
use crate::store::ReviewStore;

/// Display order of the review list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Newest `created_at` first.
    #[default]
    MostRecent,
    LeastRecent,
    MostUpvotes,
    LeastUpvotes,
}

/// Posts whose title, username or movie id contains `search`,
/// ignoring case. An empty search keeps everything.
pub fn filter_posts<'a>(posts: &'a [Post], search: &str) -> Vec<&'a Post> {
    let needle = search.to_lowercase();
    posts
        .iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&needle)
                || post.username.to_lowercase().contains(&needle)
                || post.movie_id.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Stable sort: ties keep their input order.
pub fn sort_posts(posts: &mut [&Post], order: SortOrder) {
    match order {
        SortOrder::MostRecent => posts.sort_by_key(|p| Reverse(p.created_at)),
        SortOrder::LeastRecent => posts.sort_by_key(|p| p.created_at),
        SortOrder::MostUpvotes => posts.sort_by_key(|p| Reverse(p.upvotes)),
        SortOrder::LeastUpvotes => posts.sort_by_key(|p| p.upvotes),
    }
}

/// One entry of the rendered list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostCard<'a> {
    pub post: &'a Post,
    pub comment_count: usize,
}

/// List view state. Holds full snapshots of both tables.
pub struct ReviewListView {
    store: ReviewStore,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    loading: bool,
    pub search: String,
    pub sort: SortOrder,
}

impl ReviewListView {
    pub fn new(store: ReviewStore) -> Self {
        Self {
            store,
            posts: Vec::new(),
            comments: Vec::new(),
            loading: true,
            search: String::new(),
            sort: SortOrder::default(),
        }
    }

    /// True until the first load has resolved.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Re-read both tables. A failed read is logged and leaves its half of the
    /// state as it was; the other half is still refreshed.
    pub async fn load(&mut self) {
        let _ = self.try_load().await;
    }

    /// Like `load`, but hands back the error of a failed posts read.
    pub async fn try_load(&mut self) -> Result<(), DomainError> {
        let (posts, comments) = tokio::join!(self.store.posts(), self.store.comments());

        match comments {
            Ok(comments) => self.comments = comments,
            Err(e) => tracing::error!(error = %e, "Error fetching comments"),
        }
        self.loading = false;

        match posts {
            Ok(posts) => {
                self.posts = posts;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching posts");
                Err(e.into())
            }
        }
    }

    pub fn comment_count(&self, post_id: &RowId) -> usize {
        self.comments.iter().filter(|c| &c.post_id == post_id).count()
    }

    /// Filtered and sorted cards for the current search box and sort order.
    pub fn cards(&self) -> Vec<PostCard<'_>> {
        let mut visible = filter_posts(&self.posts, &self.search);
        sort_posts(&mut visible, self.sort);
        visible
            .into_iter()
            .map(|post| PostCard {
                post,
                comment_count: self.comment_count(&post.id),
            })
            .collect()
    }

    /// Write the loaded count plus one, then reload both tables.
    ///
    /// The count is read from local state and written back as an absolute
    /// value: two upvotes racing from the same snapshot count once.
    pub async fn upvote(&mut self, id: &RowId) -> Result<(), DomainError> {
        let current = self
            .posts
            .iter()
            .find(|post| &post.id == id)
            .map(|post| post.upvotes)
            .ok_or_else(|| DomainError::NotFound {
                entity_type: "Post",
                id: id.to_string(),
            })?;

        if let Err(e) = self.store.set_upvotes(id, current.saturating_add(1)).await {
            tracing::error!(post_id = %id, error = %e, "Error upvoting");
            return Err(e.into());
        }

        self.load().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Table;
    use crate::testing::{FakeRows, comment_row, post_row};

    fn seeded() -> std::sync::Arc<FakeRows> {
        let rows = FakeRows::new();
        rows.seed(
            Table::Posts,
            vec![
                post_row("1", "Dune is a masterpiece", "paul", 10, 30),
                post_row("2", "Overrated", "feyd", 2, 10),
                post_row("3", "Spice must flow", "jessica", 7, 20),
            ],
        );
        rows.seed(
            Table::Comments,
            vec![
                comment_row("c1", "1", "agreed", 40),
                comment_row("c2", "1", "same", 41),
                comment_row("c3", "3", "yes", 42),
            ],
        );
        rows
    }

    fn ids(cards: &[PostCard<'_>]) -> Vec<String> {
        cards.iter().map(|c| c.post.id.to_string()).collect()
    }

    #[tokio::test]
    async fn load_counts_comments_per_post() {
        let mut view = ReviewListView::new(ReviewStore::new(seeded()));
        assert!(view.is_loading());

        view.load().await;

        assert!(!view.is_loading());
        assert_eq!(view.comment_count(&RowId::from("1")), 2);
        assert_eq!(view.comment_count(&RowId::from("2")), 0);
        assert_eq!(view.comment_count(&RowId::from("3")), 1);
    }

    #[tokio::test]
    async fn default_order_is_newest_first() {
        let mut view = ReviewListView::new(ReviewStore::new(seeded()));
        view.load().await;

        assert_eq!(ids(&view.cards()), vec!["1", "3", "2"]);

        view.sort = SortOrder::LeastRecent;
        assert_eq!(ids(&view.cards()), vec!["2", "3", "1"]);
    }

    #[tokio::test]
    async fn search_matches_title_username_or_movie_id() {
        let mut view = ReviewListView::new(ReviewStore::new(seeded()));
        view.load().await;

        view.search = "SPICE".to_string();
        assert_eq!(ids(&view.cards()), vec!["3"]);

        view.search = "feyd".to_string();
        assert_eq!(ids(&view.cards()), vec!["2"]);

        view.search = "603".to_string();
        assert_eq!(view.cards().len(), 3);

        view.search = "harkonnen".to_string();
        assert!(view.cards().is_empty());
    }

    #[tokio::test]
    async fn failed_comment_read_still_renders_posts() {
        let rows = seeded();
        rows.fail_selects_on(Table::Comments);
        let mut view = ReviewListView::new(ReviewStore::new(rows.clone()));

        view.load().await;

        assert!(!view.is_loading());
        assert_eq!(view.posts().len(), 3);
        assert!(view.comments().is_empty());

        rows.heal();
        view.load().await;
        assert_eq!(view.comments().len(), 3);

        rows.fail_selects_on(Table::Posts);
        view.load().await;
        assert_eq!(view.posts().len(), 3, "stale posts are kept");
    }

    #[tokio::test]
    async fn upvote_reloads_with_incremented_count() {
        let mut view = ReviewListView::new(ReviewStore::new(seeded()));
        view.load().await;

        view.upvote(&RowId::from("2")).await.unwrap();

        let post = view.posts().iter().find(|p| p.id.as_str() == "2").unwrap();
        assert_eq!(post.upvotes, 3);
    }

    #[tokio::test]
    async fn upvotes_from_the_same_snapshot_collapse() {
        let rows = seeded();
        let mut first = ReviewListView::new(ReviewStore::new(rows.clone()));
        let mut second = ReviewListView::new(ReviewStore::new(rows.clone()));
        first.load().await;
        second.load().await;

        first.upvote(&RowId::from("2")).await.unwrap();
        second.upvote(&RowId::from("2")).await.unwrap();

        let post = second.posts().iter().find(|p| p.id.as_str() == "2").unwrap();
        assert_eq!(post.upvotes, 3);
    }

    #[tokio::test]
    async fn try_load_reports_a_failed_posts_read() {
        let rows = seeded();
        rows.fail_selects_on(Table::Posts);
        let mut view = ReviewListView::new(ReviewStore::new(rows.clone()));

        assert!(matches!(view.try_load().await, Err(DomainError::Store(_))));
        assert!(view.posts().is_empty());
        assert_eq!(view.comments().len(), 3);

        rows.heal();
        assert!(view.try_load().await.is_ok());
        assert_eq!(view.posts().len(), 3);
    }

    #[tokio::test]
    async fn upvote_unknown_post_writes_nothing() {
        let rows = seeded();
        let mut view = ReviewListView::new(ReviewStore::new(rows.clone()));
        view.load().await;

        let result = view.upvote(&RowId::from("99")).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert_eq!(rows.write_count(), 0);
    }

    #[test]
    fn most_and_least_upvotes_are_mirror_images() {
        let rows: Vec<Post> = [("a", 5), ("b", 1), ("c", 9), ("d", 3)]
            .into_iter()
            .enumerate()
            .map(|(i, (id, upvotes))| {
                serde_json::from_value(serde_json::Value::Object(post_row(
                    id, "t", "u", upvotes, i as i64,
                )))
                .unwrap()
            })
            .collect();

        let mut most = filter_posts(&rows, "");
        sort_posts(&mut most, SortOrder::MostUpvotes);
        let mut least = filter_posts(&rows, "");
        sort_posts(&mut least, SortOrder::LeastUpvotes);

        let most: Vec<_> = most.iter().map(|p| p.id.as_str()).collect();
        let mut least: Vec<_> = least.iter().map(|p| p.id.as_str()).collect();
        least.reverse();
        assert_eq!(most, vec!["c", "a", "d", "b"]);
        assert_eq!(most, least);
    }

    #[test]
    fn ties_keep_input_order() {
        let rows: Vec<Post> = ["x", "y", "z"]
            .into_iter()
            .map(|id| {
                serde_json::from_value(serde_json::Value::Object(post_row(id, "t", "u", 4, 0)))
                    .unwrap()
            })
            .collect();

        for order in [
            SortOrder::MostRecent,
            SortOrder::LeastRecent,
            SortOrder::MostUpvotes,
            SortOrder::LeastUpvotes,
        ] {
            let mut sorted = filter_posts(&rows, "");
            sort_posts(&mut sorted, order);
            let ids: Vec<_> = sorted.iter().map(|p| p.id.as_str()).collect();
            assert_eq!(ids, vec!["x", "y", "z"]);
        }
    }
}
