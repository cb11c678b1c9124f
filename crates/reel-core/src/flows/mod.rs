//! Headless view flows.
//!
//! Each flow owns the state of one screen and drives the ports in response to
//! user events. Every remote call is awaited in place; nothing is retried and a
//! failure is contained to the action that triggered it.

mod create_review;
mod review_detail;
mod review_list;
mod search;

pub use create_review::CreateReviewFlow;
pub use review_detail::{DeleteOutcome, ReviewDetailFlow};
pub use review_list::{PostCard, ReviewListView, SortOrder, filter_posts, sort_posts};
pub use search::{MAX_SUGGESTIONS, MovieSearch, SEARCH_DEBOUNCE, suggest};

use std::fmt;

/// Confirmation shown to the user after a successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    PostSubmitted,
    PostUpdated,
    PostDeleted,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::PostSubmitted => write!(f, "Post submitted successfully!"),
            Notice::PostUpdated => write!(f, "Post updated successfully!"),
            Notice::PostDeleted => write!(f, "Review deleted successfully."),
        }
    }
}
