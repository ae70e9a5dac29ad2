use anyhow::{anyhow, Context};
use serde_json::json;

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("No article named {0:?}")]
    ArticleNotFound(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid auth token")]
    InvalidToken,

    #[error("Comment text must not be empty")]
    MissingCommentText,
}

impl Error {
    pub fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::ArticleNotFound(_) => StatusCode::NOT_FOUND,
            Error::Unauthenticated => StatusCode::UNAUTHORIZED,
            Error::InvalidToken => StatusCode::BAD_REQUEST,
            Error::MissingCommentText => StatusCode::BAD_REQUEST,
        }
    }

    pub fn contents(&self) -> Vec<u8> {
        serde_json::to_vec(&match self {
            Error::Unknown(msg) => json!({
                "message": msg,
                "type": "unknown",
            }),
            Error::ArticleNotFound(name) => json!({
                "message": "that article doesn't exist",
                "type": "article-not-found",
                "name": name,
            }),
            Error::Unauthenticated => json!({
                "message": "authentication required",
                "type": "unauthenticated",
            }),
            Error::InvalidToken => json!({
                "message": "invalid auth token",
                "type": "invalid-token",
            }),
            Error::MissingCommentText => json!({
                "message": "comment text is required",
                "type": "missing-comment-text",
            }),
        })
        .expect("serializing error contents")
    }

    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value =
            serde_json::from_slice(body).context("parsing error contents")?;
        Ok(
            match data
                .get("type")
                .and_then(|t| t.as_str())
                .ok_or_else(|| anyhow!("error type is not a string"))?
            {
                "unknown" => Error::Unknown(String::from(
                    data.get("message")
                        .and_then(|msg| msg.as_str())
                        .unwrap_or(""),
                )),
                "article-not-found" => Error::ArticleNotFound(String::from(
                    data.get("name").and_then(|n| n.as_str()).ok_or_else(|| {
                        anyhow!("error is an article-not-found without a name")
                    })?,
                )),
                "unauthenticated" => Error::Unauthenticated,
                "invalid-token" => Error::InvalidToken,
                "missing-comment-text" => Error::MissingCommentText,
                _ => return Err(anyhow!("error contents has unknown type")),
            },
        )
    }
}
