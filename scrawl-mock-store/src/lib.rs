use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use scrawl_api::{Article, ArticleStore, Comment};

/// In-memory stand-in for the article document store.
///
/// Each mutation runs its membership check and its write under the same
/// lock guard, matching the one-atomic-conditional-mutation contract of the
/// real store.
pub struct MemStore(Mutex<HashMap<String, Article>>);

impl MemStore {
    pub fn new() -> MemStore {
        MemStore(Mutex::new(HashMap::new()))
    }

    /// Pre-load an article, as the service itself never creates any.
    pub fn seed(&self, article: Article) {
        self.lock().insert(article.name.clone(), article);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Article>> {
        self.0
            .lock()
            .unwrap_or_else(|e| panic!("mock store lock poisoned: {e}"))
    }
}

#[async_trait]
impl ArticleStore for MemStore {
    async fn fetch_article(&self, name: &str) -> anyhow::Result<Option<Article>> {
        Ok(self.lock().get(name).cloned())
    }

    async fn record_upvote(&self, name: &str, uid: &str) -> anyhow::Result<Option<Article>> {
        let mut articles = self.lock();
        let article = match articles.get_mut(name) {
            None => return Ok(None),
            Some(article) => article,
        };
        if !article.upvote_ids.iter().any(|id| id == uid) {
            article.upvotes += 1;
            article.upvote_ids.push(String::from(uid));
        }
        Ok(Some(article.clone()))
    }

    async fn append_comment(
        &self,
        name: &str,
        comment: Comment,
    ) -> anyhow::Result<Option<Article>> {
        let mut articles = self.lock();
        let article = match articles.get_mut(name) {
            None => return Ok(None),
            Some(article) => article,
        };
        article.comments.push(comment);
        Ok(Some(article.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> MemStore {
        let store = MemStore::new();
        store.seed(Article {
            name: String::from("react"),
            upvotes: 3,
            upvote_ids: vec![String::from("u1")],
            comments: vec![],
        });
        store
    }

    #[tokio::test]
    async fn duplicate_upvote_is_a_noop() {
        let store = seeded();
        let article = store
            .record_upvote("react", "u1")
            .await
            .expect("recording upvote")
            .expect("article exists");
        assert_eq!(article.upvotes, 3);
        assert_eq!(article.upvote_ids, vec![String::from("u1")]);
    }

    #[tokio::test]
    async fn fresh_upvote_bumps_counter_and_set_together() {
        let store = seeded();
        let article = store
            .record_upvote("react", "u2")
            .await
            .expect("recording upvote")
            .expect("article exists");
        assert_eq!(article.upvotes, 4);
        assert_eq!(
            article.upvote_ids,
            vec![String::from("u1"), String::from("u2")]
        );
    }

    #[tokio::test]
    async fn mutations_on_missing_articles_return_none() {
        let store = seeded();
        assert!(store
            .record_upvote("vue", "u1")
            .await
            .expect("recording upvote")
            .is_none());
        assert!(store
            .append_comment(
                "vue",
                Comment {
                    posted_by: String::from("a@x.com"),
                    text: String::from("nice"),
                },
            )
            .await
            .expect("appending comment")
            .is_none());
    }
}
