use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::UserProfile;
use crate::scoring::{compute_sperm_value, LifestyleAnswers};

#[derive(Deserialize)]
pub struct OnboardingRequest {
    pub user_id: Uuid,
    pub age: i64,
    pub height_feet: Option<i32>,
    pub height_inches: Option<i32>,
    pub weight: Option<f64>,
    pub profile_photo: Option<String>,
    pub fertility_goal: Option<String>,
    pub lifestyle: LifestyleAnswers,
}

#[derive(Deserialize)]
pub struct ProfileUpdate {
    pub user_id: Uuid,
    pub profile_photo: Option<String>,
    pub sperm_level: Option<i32>,
}

#[derive(Deserialize)]
struct UserQuery {
    user_id: Uuid,
}

/// Explicit "no profile yet" state instead of an empty query result.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProfileLookup {
    Onboarded { profile: UserProfile },
    NotOnboarded,
}

pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route(
            "/profile",
            post(complete_onboarding)
                .get(get_profile)
                .patch(update_profile),
        )
        .with_state(pool)
}

/// Finalizes onboarding: scores the quiz once and persists the profile.
/// The score is never recomputed afterwards.
async fn complete_onboarding(
    State(pool): State<PgPool>,
    Json(body): Json<OnboardingRequest>,
) -> Result<(StatusCode, Json<UserProfile>), (StatusCode, String)> {
    // Intake rule; the scoring engine itself tolerates any age.
    if !(18..=100).contains(&body.age) {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "Age must be between 18 and 100".into(),
        ));
    }

    let sperm_value = compute_sperm_value(body.age, &body.lifestyle);

    let profile = sqlx::query_as::<_, UserProfile>(
        r#"
        INSERT INTO user_profiles
            (user_id, age, height_feet, height_inches, weight, profile_photo,
             fertility_goal, lifestyle, sperm_value, sperm_level,
             current_streak, longest_streak, onboarding_completed)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 1, 0, 0, TRUE)
        RETURNING *
        "#,
    )
    .bind(body.user_id)
    .bind(body.age as i32)
    .bind(body.height_feet)
    .bind(body.height_inches)
    .bind(body.weight)
    .bind(&body.profile_photo)
    .bind(&body.fertility_goal)
    .bind(sqlx::types::Json(&body.lifestyle))
    .bind(sperm_value as i32)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        if let Some(db_err) = e.as_database_error() {
            tracing::error!("❌ DB insert failed: {}", db_err.message());

            if let Some(constraint) = db_err.constraint() {
                tracing::info!("🔒 Constraint violated: {}", constraint);
                if constraint == "user_profiles_user_id_key" {
                    return (
                        StatusCode::CONFLICT,
                        "Profile already exists for this user".into(),
                    );
                }
            }
        } else {
            tracing::error!("❌ Unknown DB error: {}", e);
        }

        (
            StatusCode::UNPROCESSABLE_ENTITY,
            "Could not create profile".into(),
        )
    })?;

    Ok((StatusCode::CREATED, Json(profile)))
}

async fn get_profile(
    State(pool): State<PgPool>,
    Query(params): Query<UserQuery>,
) -> Result<Json<ProfileLookup>, StatusCode> {
    let profile = sqlx::query_as::<_, UserProfile>(
        "SELECT * FROM user_profiles WHERE user_id = $1",
    )
    .bind(params.user_id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("❌ DB error in get_profile: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(match profile {
        Some(profile) => ProfileLookup::Onboarded { profile },
        None => ProfileLookup::NotOnboarded,
    }))
}

async fn update_profile(
    State(pool): State<PgPool>,
    Json(body): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>, StatusCode> {
    let profile = sqlx::query_as::<_, UserProfile>(
        r#"
        UPDATE user_profiles
        SET profile_photo = COALESCE($2, profile_photo),
            sperm_level = COALESCE($3, sperm_level)
        WHERE user_id = $1
        RETURNING *
        "#,
    )
    .bind(body.user_id)
    .bind(&body.profile_photo)
    .bind(body.sperm_level)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("❌ DB error in update_profile: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    profile.map(Json).ok_or(StatusCode::NOT_FOUND)
}
