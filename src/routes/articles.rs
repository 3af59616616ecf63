use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use sqlx::PgPool;

use crate::models::Article;

#[derive(Deserialize)]
struct ArticleQuery {
    category: Option<String>,
}

pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route("/articles", get(get_articles))
        .with_state(pool)
}

async fn get_articles(
    State(pool): State<PgPool>,
    Query(params): Query<ArticleQuery>,
) -> Result<Json<Vec<Article>>, StatusCode> {
    let articles = sqlx::query_as::<_, Article>(
        r#"
        SELECT * FROM articles
        WHERE $1::text IS NULL OR category = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(params.category)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("❌ Failed to fetch articles: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(articles))
}
