use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::extraction::{ExtractionClient, ExtractionStatus};
use crate::labs::{status_for, LabMetric, MetricStatus};
use crate::models::TestResult;
use crate::schedule::{next_test_info, NextTestInfo};

#[derive(Clone)]
pub struct TestResultsState {
    pub pool: PgPool,
    pub extraction: ExtractionClient,
}

#[derive(Deserialize)]
pub struct NewTestResult {
    pub user_id: Uuid,
    pub test_date: NaiveDate,
    pub provider: Option<String>,
    pub file_url: String,
}

#[derive(Serialize)]
pub struct MetricStatuses {
    pub concentration: MetricStatus,
    pub motility: MetricStatus,
    pub progressive_motility: MetricStatus,
    pub motile_sperm_concentration: MetricStatus,
    pub progressive_motile_sperm_concentration: MetricStatus,
    pub morphology: MetricStatus,
}

#[derive(Serialize)]
pub struct TestResultView {
    #[serde(flatten)]
    pub result: TestResult,
    pub statuses: MetricStatuses,
}

#[derive(Deserialize)]
struct UserQuery {
    user_id: Uuid,
}

pub fn routes(pool: PgPool, extraction: ExtractionClient) -> Router {
    Router::new()
        .route(
            "/test-results",
            get(get_test_results).post(create_test_result),
        )
        .route("/test-schedule", get(get_test_schedule))
        .with_state(TestResultsState { pool, extraction })
}

/// Runs the uploaded lab report through the extraction service and stores
/// the structured result. An extraction failure creates no record.
async fn create_test_result(
    State(state): State<TestResultsState>,
    Json(body): Json<NewTestResult>,
) -> Result<(StatusCode, Json<TestResultView>), (StatusCode, String)> {
    let extracted = state
        .extraction
        .extract_lab_report(&body.file_url)
        .await
        .map_err(|e| {
            tracing::error!("❌ Extraction call failed: {:?}", e);
            (
                StatusCode::BAD_GATEWAY,
                "Extraction service unavailable".into(),
            )
        })?;

    if extracted.status == ExtractionStatus::Error {
        let details = extracted.details.unwrap_or_else(|| "unknown".into());
        tracing::warn!("⚠️ Extraction rejected report: {}", details);
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Could not read lab report: {details}"),
        ));
    }

    let metrics = extracted.output.unwrap_or_default();

    let result = sqlx::query_as::<_, TestResult>(
        r#"
        INSERT INTO test_results
            (user_id, test_date, provider, concentration, motility,
             progressive_motility, motile_sperm_concentration,
             progressive_motile_sperm_concentration, morphology, volume, file_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(body.user_id)
    .bind(body.test_date)
    .bind(body.provider.unwrap_or_else(|| "yo".into()))
    .bind(metrics.concentration)
    .bind(metrics.motility)
    .bind(metrics.progressive_motility)
    .bind(metrics.motile_sperm_concentration)
    .bind(metrics.progressive_motile_sperm_concentration)
    .bind(metrics.morphology)
    .bind(metrics.volume)
    .bind(&body.file_url)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!("❌ DB insert failed: {:?}", e);
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            "Could not store test result".into(),
        )
    })?;

    Ok((StatusCode::CREATED, Json(with_statuses(result))))
}

async fn get_test_results(
    State(state): State<TestResultsState>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Vec<TestResultView>>, StatusCode> {
    let results = sqlx::query_as::<_, TestResult>(
        "SELECT * FROM test_results WHERE user_id = $1 ORDER BY test_date DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!("❌ Failed to fetch test results: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(results.into_iter().map(with_statuses).collect()))
}

async fn get_test_schedule(
    State(state): State<TestResultsState>,
    Query(params): Query<UserQuery>,
) -> Result<Json<NextTestInfo>, StatusCode> {
    let last_test_date = sqlx::query_scalar::<_, NaiveDate>(
        "SELECT test_date FROM test_results WHERE user_id = $1 ORDER BY test_date DESC LIMIT 1",
    )
    .bind(params.user_id)
    .fetch_optional(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!("❌ DB error in get_test_schedule: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(next_test_info(last_test_date, Utc::now().date_naive())))
}

fn with_statuses(result: TestResult) -> TestResultView {
    let statuses = MetricStatuses {
        concentration: status_for(LabMetric::Concentration, result.concentration),
        motility: status_for(LabMetric::Motility, result.motility),
        progressive_motility: status_for(
            LabMetric::ProgressiveMotility,
            result.progressive_motility,
        ),
        motile_sperm_concentration: status_for(
            LabMetric::MotileSpermConcentration,
            result.motile_sperm_concentration,
        ),
        progressive_motile_sperm_concentration: status_for(
            LabMetric::ProgressiveMotileSpermConcentration,
            result.progressive_motile_sperm_concentration,
        ),
        morphology: status_for(LabMetric::Morphology, result.morphology),
    };
    TestResultView { result, statuses }
}
