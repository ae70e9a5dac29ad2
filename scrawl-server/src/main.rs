use anyhow::Context;
use axum::{
    http::{self, HeaderValue},
    routing::{get, post, put},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

mod db;
mod error;
mod extractors;
mod handlers;
mod verify;

pub use error::Error;
use extractors::{AppState, Store, Verifier};

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let db_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = create_sqlx_pool(&db_url).await?;
    MIGRATOR
        .run(&pool)
        .await
        .context("running store migrations")?;

    let verifier_url = std::env::var("VERIFIER_URL").context("VERIFIER_URL must be set")?;
    let verifier_key = std::env::var("VERIFIER_KEY").context("VERIFIER_KEY must be set")?;

    let store = Store::new(Arc::new(db::PgStore::new(pool)));
    let verifier = Verifier::new(Arc::new(verify::HttpVerifier::new(
        verifier_url,
        verifier_key,
    )));
    let app = app(store, verifier).layer(cors_layer()?);

    let addr = SocketAddr::from(([0, 0, 0, 0], port()?));
    tracing::info!("listening on {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .context("serving axum webserver")
}

pub async fn create_sqlx_pool(url: &str) -> anyhow::Result<sqlx::PgPool> {
    sqlx::postgres::PgPoolOptions::new()
        .connect(url)
        .await
        .with_context(|| format!("opening database {:?}", url))
}

fn port() -> anyhow::Result<u16> {
    match std::env::var("PORT") {
        Ok(port) => port.parse().context("parsing PORT"),
        Err(std::env::VarError::NotPresent) => Ok(8000),
        Err(e) => Err(e).context("reading PORT"),
    }
}

fn cors_layer() -> anyhow::Result<CorsLayer> {
    let origins = std::env::var("ALLOWED_ORIGINS").context("ALLOWED_ORIGINS must be set")?;
    let origins = origins
        .split(',')
        .map(|origin| {
            let origin = origin.trim();
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("parsing allowed origin {:?}", origin))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([http::Method::GET, http::Method::PUT, http::Method::POST])
        .allow_headers([http::header::AUTHORIZATION, http::header::CONTENT_TYPE]))
}

pub fn app(store: Store, verifier: Verifier) -> Router {
    Router::new()
        .route("/api/articles/:name", get(handlers::get_article))
        .route("/api/articles/:name/upvote", put(handlers::upvote_article))
        .route("/api/articles/:name/comments", post(handlers::add_comment))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { store, verifier })
}
