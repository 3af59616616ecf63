use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::DailyLog;
use crate::streak::{apply_check_in, StreakCounters};

#[derive(Deserialize)]
pub struct CheckInRequest {
    pub user_id: Uuid,
    pub masturbation_count: Option<i32>,
    pub diet_quality: Option<String>,
    pub sleep_hours: Option<f64>,
    pub sleep_quality: Option<String>,
    pub stress_level: Option<String>,
    pub exercise_minutes: Option<i32>,
    pub electrolytes: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct CheckInResponse {
    pub log: DailyLog,
    pub streak: Option<StreakCounters>,
    pub streak_extended: bool,
}

#[derive(Deserialize)]
struct UserQuery {
    user_id: Uuid,
}

pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route("/checkin", post(submit_check_in))
        .route("/checkin/today", get(get_today_log))
        .route("/checkins", get(get_log_history))
        .with_state(pool)
}

/// Upserts today's log. The streak only moves on the insert path; resubmitting
/// the form the same day rewrites the log without touching the counters. Log
/// write and streak update share one transaction.
async fn submit_check_in(
    State(pool): State<PgPool>,
    Json(body): Json<CheckInRequest>,
) -> Result<Json<CheckInResponse>, StatusCode> {
    let today = Utc::now().date_naive();

    let mut tx = pool.begin().await.map_err(|e| {
        tracing::error!("❌ Failed to open transaction: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let existing = sqlx::query_as::<_, DailyLog>(
        "SELECT * FROM daily_logs WHERE user_id = $1 AND log_date = $2",
    )
    .bind(body.user_id)
    .bind(today)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("❌ DB error loading today's log: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let is_first_check_in = existing.is_none();

    let log = match existing {
        Some(log) => sqlx::query_as::<_, DailyLog>(
            r#"
            UPDATE daily_logs
            SET masturbation_count = $2, diet_quality = $3, sleep_hours = $4,
                sleep_quality = $5, stress_level = $6, exercise_minutes = $7,
                electrolytes = $8, notes = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(log.id)
        .bind(body.masturbation_count)
        .bind(&body.diet_quality)
        .bind(body.sleep_hours)
        .bind(&body.sleep_quality)
        .bind(&body.stress_level)
        .bind(body.exercise_minutes)
        .bind(body.electrolytes)
        .bind(&body.notes)
        .fetch_one(&mut *tx)
        .await,
        None => sqlx::query_as::<_, DailyLog>(
            r#"
            INSERT INTO daily_logs
                (user_id, log_date, masturbation_count, diet_quality, sleep_hours,
                 sleep_quality, stress_level, exercise_minutes, electrolytes, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(body.user_id)
        .bind(today)
        .bind(body.masturbation_count)
        .bind(&body.diet_quality)
        .bind(body.sleep_hours)
        .bind(&body.sleep_quality)
        .bind(&body.stress_level)
        .bind(body.exercise_minutes)
        .bind(body.electrolytes)
        .bind(&body.notes)
        .fetch_one(&mut *tx)
        .await,
    }
    .map_err(|e| {
        tracing::error!("❌ DB error writing daily log: {:?}", e);
        StatusCode::UNPROCESSABLE_ENTITY
    })?;

    let counters = sqlx::query_as::<_, (i32, i32)>(
        "SELECT current_streak, longest_streak FROM user_profiles WHERE user_id = $1 FOR UPDATE",
    )
    .bind(body.user_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("❌ DB error loading streaks: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?
    .map(|(current_streak, longest_streak)| StreakCounters {
        current_streak,
        longest_streak,
    });

    let streak_extended = is_first_check_in && counters.is_some();

    let streak = match counters {
        Some(counters) if is_first_check_in => {
            let updated = apply_check_in(counters, false);
            sqlx::query(
                "UPDATE user_profiles SET current_streak = $2, longest_streak = $3 WHERE user_id = $1",
            )
            .bind(body.user_id)
            .bind(updated.current_streak)
            .bind(updated.longest_streak)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("❌ DB error updating streaks: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?;
            Some(updated)
        }
        other => other,
    };

    tx.commit().await.map_err(|e| {
        tracing::error!("❌ Failed to commit check-in: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(CheckInResponse {
        log,
        streak,
        streak_extended,
    }))
}

async fn get_today_log(
    State(pool): State<PgPool>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Option<DailyLog>>, StatusCode> {
    let today = Utc::now().date_naive();

    let log = sqlx::query_as::<_, DailyLog>(
        "SELECT * FROM daily_logs WHERE user_id = $1 AND log_date = $2",
    )
    .bind(params.user_id)
    .bind(today)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("❌ DB error in get_today_log: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(log))
}

async fn get_log_history(
    State(pool): State<PgPool>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Vec<DailyLog>>, StatusCode> {
    let logs = sqlx::query_as::<_, DailyLog>(
        "SELECT * FROM daily_logs WHERE user_id = $1 ORDER BY log_date DESC",
    )
    .bind(params.user_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("❌ Failed to fetch log history: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(logs))
}
