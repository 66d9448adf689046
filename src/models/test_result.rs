// src/models/test_result.rs

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use validator::Validate;

use crate::models::{question::AnswerSelection, quiz::TestSummary};
use crate::scoring::MbtiType;

/// Represents the 'test_results' table in the database.
/// Written once per completed attempt, never updated.
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub id: i64,
    pub test: TestSummary,
    pub mbti_type: MbtiType,
    pub title: String,
    pub description: String,
    pub characteristics: serde_json::Value,
    pub strengths: serde_json::Value,
    pub weaknesses: serde_json::Value,
    pub compatibility: serde_json::Value,
    /// Overall confidence, 0..=100.
    pub percentage: u8,
    /// Raw selections; opaque after creation and not echoed to clients.
    #[serde(skip_serializing)]
    pub answers: Vec<AnswerSelection>,
    /// Seconds spent on the attempt.
    pub time_spent: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Raw 'test_results' row, before the test summary is attached.
#[derive(Debug, FromRow)]
pub struct TestResultRow {
    pub id: i64,
    pub test_id: i64,
    pub mbti_type: String,
    pub title: String,
    pub description: String,
    pub characteristics: Json<serde_json::Value>,
    pub strengths: Json<serde_json::Value>,
    pub weaknesses: Json<serde_json::Value>,
    pub compatibility: Json<serde_json::Value>,
    pub percentage: i16,
    pub answers: Json<Vec<AnswerSelection>>,
    pub time_spent: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A fully derived result, ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewTestResult {
    pub test_id: i64,
    pub mbti_type: MbtiType,
    pub title: String,
    pub description: String,
    pub characteristics: serde_json::Value,
    pub strengths: serde_json::Value,
    pub weaknesses: serde_json::Value,
    pub compatibility: serde_json::Value,
    pub percentage: u8,
    pub answers: Vec<AnswerSelection>,
    pub time_spent: i32,
}

impl NewTestResult {
    /// Attaches the storage-assigned id and timestamp.
    pub fn into_result(
        self,
        id: i64,
        test: TestSummary,
        created_at: chrono::DateTime<chrono::Utc>,
    ) -> TestResult {
        TestResult {
            id,
            test,
            mbti_type: self.mbti_type,
            title: self.title,
            description: self.description,
            characteristics: self.characteristics,
            strengths: self.strengths,
            weaknesses: self.weaknesses,
            compatibility: self.compatibility,
            percentage: self.percentage,
            answers: self.answers,
            time_spent: self.time_spent,
            created_at,
        }
    }
}

/// DTO for submitting a completed attempt.
///
/// The type code, percentage and narrative are all derived server-side
/// from `answers`; narrative fields sent by the client are ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateResultRequest {
    /// Id of the test that was taken.
    pub test: i64,

    #[serde(default)]
    pub answers: Vec<AnswerSelection>,

    #[serde(default)]
    #[validate(range(min = 0, max = 86400))]
    pub time_spent: i32,
}

/// DTO for scoring without persisting.
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub answers: Vec<AnswerSelection>,
}
