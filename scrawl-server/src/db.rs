use anyhow::Context;
use async_trait::async_trait;
use scrawl_api::{Article, ArticleStore, Comment};
use sqlx::{types::Json, Row};

/// Postgres rendition of the article document store: one row per article,
/// keyed by name, with the upvote-id set as a text array and the comment
/// sequence as a jsonb array.
pub struct PgStore {
    pool: sqlx::PgPool,
}

impl PgStore {
    pub fn new(pool: sqlx::PgPool) -> PgStore {
        PgStore { pool }
    }

    async fn fetch(&self, name: &str) -> anyhow::Result<Option<Article>> {
        sqlx::query("SELECT name, upvotes, upvote_ids, comments FROM articles WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .context("querying articles table")?
            .map(|row| {
                let Json(comments): Json<Vec<Comment>> =
                    row.try_get("comments").context("decoding comments column")?;
                Ok(Article {
                    name: row.try_get("name").context("decoding name column")?,
                    upvotes: row.try_get("upvotes").context("decoding upvotes column")?,
                    upvote_ids: row
                        .try_get("upvote_ids")
                        .context("decoding upvote_ids column")?,
                    comments,
                })
            })
            .transpose()
    }
}

#[async_trait]
impl ArticleStore for PgStore {
    async fn fetch_article(&self, name: &str) -> anyhow::Result<Option<Article>> {
        self.fetch(name).await
    }

    async fn record_upvote(&self, name: &str, uid: &str) -> anyhow::Result<Option<Article>> {
        // One conditional statement: the counter bump and the membership
        // check must not be separable, or two near-simultaneous requests
        // from the same identity could double-count.
        sqlx::query(
            "
                UPDATE articles
                SET upvotes = upvotes + 1,
                    upvote_ids = array_append(upvote_ids, $2)
                WHERE name = $1
                AND NOT ($2 = ANY(upvote_ids))
            ",
        )
        .bind(name)
        .bind(uid)
        .execute(&self.pool)
        .await
        .context("recording upvote")?;
        self.fetch(name).await
    }

    async fn append_comment(
        &self,
        name: &str,
        comment: Comment,
    ) -> anyhow::Result<Option<Article>> {
        let updated = sqlx::query("UPDATE articles SET comments = comments || $2 WHERE name = $1")
            .bind(name)
            .bind(Json(vec![comment]))
            .execute(&self.pool)
            .await
            .context("appending comment")?;
        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch(name).await
    }
}
