// src/handlers/result.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    handlers::quiz::score_submission,
    models::test_result::{CreateResultRequest, NewTestResult},
    scoring::TypeProfile,
    store::Store,
    utils::response::ok,
};

/// Records a completed attempt.
///
/// * Validates the payload.
/// * Resolves the selected options and derives type and percentage.
/// * Attaches the narrative profile of the derived type and stores the result.
pub async fn create_result(
    State(store): State<Store>,
    Json(payload): Json<CreateResultRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let aggregation = score_submission(&store, payload.test, &payload.answers).await?;

    let profile = TypeProfile::for_type(aggregation.mbti_type);
    if profile.is_default() {
        tracing::debug!(mbti_type = %aggregation.mbti_type, "No written profile, using default");
    }

    let result = store
        .insert_result(NewTestResult {
            test_id: payload.test,
            mbti_type: aggregation.mbti_type,
            title: profile.title.to_string(),
            description: profile.description.to_string(),
            characteristics: json!(profile.characteristics),
            strengths: json!(profile.strengths),
            weaknesses: json!(profile.weaknesses),
            compatibility: json!(profile.compatibility),
            percentage: aggregation.percentage,
            answers: payload.answers,
            time_spent: payload.time_spent,
        })
        .await?;

    tracing::info!(
        result_id = result.id,
        test_id = result.test.id,
        mbti_type = %result.mbti_type,
        "Stored test result"
    );

    Ok((StatusCode::CREATED, ok(result)))
}

/// Lists stored results, newest first.
pub async fn list_results(State(store): State<Store>) -> Result<impl IntoResponse, AppError> {
    let results = store.list_results().await?;
    Ok(ok(results))
}

/// Retrieves a single result by ID.
pub async fn get_result(
    State(store): State<Store>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = store
        .get_result(id)
        .await?
        .ok_or(AppError::NotFound("Result not found".to_string()))?;

    Ok(ok(result))
}
