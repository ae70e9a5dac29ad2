use crate::IdentityClaim;

/// Article document as stored, with the legacy camelCase wire names.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub name: String,
    pub upvotes: i64,

    /// Identities that have already upvoted. Conceptually a set: the store
    /// mutates it together with `upvotes`, so the two never diverge.
    pub upvote_ids: Vec<String>,

    /// Append-only, insertion order preserved.
    pub comments: Vec<Comment>,
}

impl Article {
    /// Whether this caller could cast a new upvote right now. Anonymous
    /// callers never can.
    pub fn can_upvote(&self, claim: &IdentityClaim) -> bool {
        match &claim.uid {
            None => false,
            Some(uid) => !self.upvote_ids.iter().any(|id| id == uid),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub posted_by: String,
    pub text: String,
}

/// Article plus the read-time `canUpvote` projection. Never stored.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
    #[serde(flatten)]
    pub article: Article,
    pub can_upvote: bool,
}

impl ArticleView {
    pub fn project(article: Article, claim: &IdentityClaim) -> ArticleView {
        let can_upvote = article.can_upvote(claim);
        ArticleView {
            article,
            can_upvote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        Article {
            name: String::from("react"),
            upvotes: 3,
            upvote_ids: vec![String::from("u1")],
            comments: vec![],
        }
    }

    fn claim(uid: Option<&str>) -> IdentityClaim {
        IdentityClaim {
            uid: uid.map(String::from),
            email: None,
        }
    }

    #[test]
    fn anonymous_caller_never_can_upvote() {
        assert!(!article().can_upvote(&claim(None)));
    }

    #[test]
    fn previous_voter_cannot_upvote_again() {
        assert!(!article().can_upvote(&claim(Some("u1"))));
    }

    #[test]
    fn fresh_identity_can_upvote() {
        assert!(article().can_upvote(&claim(Some("u2"))));
    }

    #[test]
    fn view_serializes_with_wire_names() {
        let view = ArticleView::project(article(), &claim(Some("u2")));
        let json = serde_json::to_value(&view).expect("serializing view");
        assert_eq!(
            json,
            serde_json::json!({
                "name": "react",
                "upvotes": 3,
                "upvoteIds": ["u1"],
                "comments": [],
                "canUpvote": true,
            })
        );
    }
}
