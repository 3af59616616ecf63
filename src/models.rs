use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::types::Json;
use uuid::Uuid;

use crate::scoring::LifestyleAnswers;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub age: i32,
    pub height_feet: Option<i32>,
    pub height_inches: Option<i32>,
    pub weight: Option<f64>,
    pub profile_photo: Option<String>,
    pub fertility_goal: Option<String>,
    pub lifestyle: Json<LifestyleAnswers>,
    pub sperm_value: i32,
    pub sperm_level: i32,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub onboarding_completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct DailyLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub log_date: NaiveDate,
    pub masturbation_count: Option<i32>,
    pub diet_quality: Option<String>,
    pub sleep_hours: Option<f64>,
    pub sleep_quality: Option<String>,
    pub stress_level: Option<String>,
    pub exercise_minutes: Option<i32>,
    pub electrolytes: Option<bool>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct TestResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub test_date: NaiveDate,
    pub provider: String,
    pub concentration: Option<f64>,
    pub motility: Option<f64>,
    pub progressive_motility: Option<f64>,
    pub motile_sperm_concentration: Option<f64>,
    pub progressive_motile_sperm_concentration: Option<f64>,
    pub morphology: Option<f64>,
    pub volume: Option<f64>,
    pub file_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub summary: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
