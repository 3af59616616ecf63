use anyhow::Result;
use axum::{routing::get, Router};
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::{env, net::SocketAddr, path::PathBuf};

mod extraction;
mod labs;
mod models;
mod routes;
mod schedule;
mod scoring;
mod streak;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    let upload_dir = PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()));
    let extraction = extraction::ExtractionClient::from_env()?;

    let app = Router::new()
        .merge(routes::profile::routes(pool.clone()))
        .merge(routes::checkin::routes(pool.clone()))
        .merge(routes::test_results::routes(pool.clone(), extraction))
        .merge(routes::articles::routes(pool.clone()))
        .merge(routes::files::routes(upload_dir))
        .route("/health", get(|| async { "✅ Backend up" }));

    let addr = SocketAddr::from(([0, 0, 0, 0], 3060));
    tracing::info!("🧠 Server running at {}", addr);

    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service(),
    )
    .await?;

    Ok(())
}
