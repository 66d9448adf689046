// src/models/quiz.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::{
    category::Category,
    question::{NewQuestion, Question},
};

/// Difficulty label of a test. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown difficulty '{0}'")]
pub struct UnknownDifficulty(String);

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(UnknownDifficulty(other.to_string())),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = UnknownDifficulty;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Flat row of `tests JOIN categories`.
#[derive(Debug, FromRow)]
pub struct TestRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: i32,
    #[sqlx(try_from = "String")]
    pub difficulty: Difficulty,
    pub thumbnail: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub category_id: i64,
    pub category_name: String,
    pub category_emoji: String,
    pub category_description: String,
    pub category_color: String,
    pub category_created_at: chrono::DateTime<chrono::Utc>,
    pub category_updated_at: chrono::DateTime<chrono::Utc>,
}

/// Test as shown in listings: no questions.
#[derive(Debug, Clone, Serialize)]
pub struct TestSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: Category,
    /// Estimated duration in minutes.
    pub estimated_time: i32,
    pub difficulty: Difficulty,
    pub thumbnail: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<TestRow> for TestSummary {
    fn from(row: TestRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            category: Category {
                id: row.category_id,
                name: row.category_name,
                emoji: row.category_emoji,
                description: row.category_description,
                color: row.category_color,
                created_at: row.category_created_at,
                updated_at: row.category_updated_at,
            },
            estimated_time: row.estimated_time,
            difficulty: row.difficulty,
            thumbnail: row.thumbnail,
            created_at: row.created_at,
        }
    }
}

/// Test with its full question/option tree, questions and options in order.
#[derive(Debug, Clone, Serialize)]
pub struct TestDetail {
    #[serde(flatten)]
    pub summary: TestSummary,
    pub questions: Vec<Question>,
}

/// Authoring draft of a test, used by seeding.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTest {
    pub title: String,
    pub description: String,
    pub estimated_time: i32,
    pub difficulty: Difficulty,
    pub thumbnail: String,
    pub questions: Vec<NewQuestion>,
}
