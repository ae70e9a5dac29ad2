use anyhow::Context;
use axum::{
    extract::{Path, State},
    Json,
};
use scrawl_api::{ArticleView, Comment, NewComment};

use crate::{extractors::*, Error};

pub async fn get_article(
    MaybeClaim(claim): MaybeClaim,
    State(store): State<Store>,
    Path(name): Path<String>,
) -> Result<Json<ArticleView>, Error> {
    let article = store
        .fetch_article(&name)
        .await
        .with_context(|| format!("fetching article {:?}", name))?
        .ok_or_else(|| Error::article_not_found(&name))?;
    Ok(Json(ArticleView::project(article, &claim)))
}

pub async fn upvote_article(
    Auth(claim): Auth,
    State(store): State<Store>,
    Path(name): Path<String>,
) -> Result<Json<ArticleView>, Error> {
    // An identity without a uid has nothing to record the vote under.
    let uid = claim.uid.as_deref().ok_or_else(Error::unauthenticated)?;
    let article = store
        .record_upvote(&name, uid)
        .await
        .with_context(|| format!("recording upvote on {:?} for {:?}", name, uid))?
        .ok_or_else(|| Error::article_not_found(&name))?;
    Ok(Json(ArticleView::project(article, &claim)))
}

pub async fn add_comment(
    Auth(claim): Auth,
    State(store): State<Store>,
    Path(name): Path<String>,
    Json(data): Json<NewComment>,
) -> Result<Json<ArticleView>, Error> {
    data.validate()?;
    let posted_by = claim.posted_by().ok_or_else(Error::unauthenticated)?;
    let comment = Comment {
        posted_by: String::from(posted_by),
        text: data.text,
    };
    let article = store
        .append_comment(&name, comment)
        .await
        .with_context(|| format!("appending comment to {:?}", name))?
        .ok_or_else(|| Error::article_not_found(&name))?;
    Ok(Json(ArticleView::project(article, &claim)))
}
