use async_trait::async_trait;

use crate::{Article, Comment};

/// Persistence seam for article documents.
///
/// Articles are seeded out of band; implementations only read and mutate
/// existing documents. Both mutations must execute as a single conditional
/// operation on the store side, never as a read-check-then-write sequence
/// in application code.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn fetch_article(&self, name: &str) -> anyhow::Result<Option<Article>>;

    /// Increment the upvote counter and record `uid`, in one conditional
    /// mutation that is a no-op when `uid` has already upvoted. Returns the
    /// article's state after the (possibly skipped) mutation, or `None`
    /// when no article has this name.
    async fn record_upvote(&self, name: &str, uid: &str) -> anyhow::Result<Option<Article>>;

    /// Append `comment` to the article's comment sequence, or return `None`
    /// when no article has this name.
    async fn append_comment(&self, name: &str, comment: Comment)
        -> anyhow::Result<Option<Article>>;
}
