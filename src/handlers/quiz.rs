// src/handlers/quiz.rs

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Serialize;

use crate::{
    catalog::{self, ValidationReport},
    config::POPULAR_TESTS_LIMIT,
    error::AppError,
    models::{question::AnswerSelection, quiz::TestDetail, test_result::ScoreRequest},
    scoring::{self, Aggregation, AxisOutcome, MbtiType, ScoreVector, TraitLetter},
    store::Store,
    utils::response::ok,
};

/// Aggregation outcome as returned to clients.
#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub test_id: i64,
    pub mbti_type: MbtiType,
    pub percentage: u8,
    pub axes: Vec<AxisOutcome>,
    pub totals: ScoreVector,
    /// Each letter's share of its axis.
    pub letter_percentages: BTreeMap<TraitLetter, u8>,
}

impl ScoreResponse {
    fn new(test_id: i64, aggregation: Aggregation) -> Self {
        let letter_percentages = aggregation.letter_percentages();
        Self {
            test_id,
            mbti_type: aggregation.mbti_type,
            percentage: aggregation.percentage,
            axes: aggregation.axes,
            totals: aggregation.totals,
            letter_percentages,
        }
    }
}

async fn fetch_test(store: &Store, id: i64) -> Result<TestDetail, AppError> {
    store
        .get_test(id)
        .await?
        .ok_or(AppError::NotFound("Test not found".to_string()))
}

/// Resolves the selections against the test tree and runs the engine.
pub(crate) async fn score_submission(
    store: &Store,
    test_id: i64,
    answers: &[AnswerSelection],
) -> Result<Aggregation, AppError> {
    let test = fetch_test(store, test_id).await?;
    let vectors = catalog::resolve_answers(&test.questions, answers)?;
    let aggregation = scoring::aggregate(&vectors)?;

    tracing::debug!(
        test_id,
        answered = vectors.len(),
        mbti_type = %aggregation.mbti_type,
        percentage = aggregation.percentage,
        "Scored submission"
    );

    Ok(aggregation)
}

/// Lists all tests, newest first (no questions).
pub async fn list_tests(State(store): State<Store>) -> Result<impl IntoResponse, AppError> {
    let tests = store.list_tests(None, None).await?;
    Ok(ok(tests))
}

/// Popular tests: the most recently created ones.
pub async fn popular_tests(State(store): State<Store>) -> Result<impl IntoResponse, AppError> {
    let tests = store.list_tests(None, Some(POPULAR_TESTS_LIMIT)).await?;
    Ok(ok(tests))
}

/// Retrieves a test with its ordered questions and options.
pub async fn get_test(
    State(store): State<Store>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let test = fetch_test(&store, id).await?;
    Ok(ok(test))
}

/// Runs the catalog validator over a stored test.
pub async fn validate_test(
    State(store): State<Store>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let test = fetch_test(&store, id).await?;
    let report: ValidationReport = catalog::validate(&test.questions);

    if !report.publishable {
        tracing::warn!(test_id = id, issues = report.issues.len(), "Test is not publishable");
    }

    Ok(ok(report))
}

/// Scores a set of selections without storing anything.
pub async fn score_answers(
    State(store): State<Store>,
    Path(id): Path<i64>,
    Json(req): Json<ScoreRequest>,
) -> Result<impl IntoResponse, AppError> {
    let aggregation = score_submission(&store, id, &req.answers).await?;
    Ok(ok(ScoreResponse::new(id, aggregation)))
}
