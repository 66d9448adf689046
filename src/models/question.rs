// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};

use crate::catalog::OrderedQuestion;
use crate::scoring::ScoreVector;

/// Represents the 'questions' table, with its options attached.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: i64,

    #[serde(skip_serializing)]
    pub test_id: i64,

    pub text: String,

    /// Presentation position within the test. Unique per test.
    pub order: i32,

    pub options: Vec<QuestionOption>,
}

/// Represents the 'question_options' table.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionOption {
    pub id: i64,

    #[serde(skip_serializing)]
    pub question_id: i64,

    pub text: String,

    /// Presentation position within the question. Unique per question.
    pub order: i32,

    /// Contribution of this option to the trait totals.
    pub scores: ScoreVector,
}

/// Raw 'questions' row. `order` is a keyword in SQL, so the column is
/// `order_index`.
#[derive(Debug, FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub test_id: i64,
    pub text: String,
    pub order_index: i32,
}

/// Raw 'question_options' row; `scores` is a JSONB object.
#[derive(Debug, FromRow)]
pub struct OptionRow {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
    pub order_index: i32,
    pub scores: Json<ScoreVector>,
}

impl From<OptionRow> for QuestionOption {
    fn from(row: OptionRow) -> Self {
        Self {
            id: row.id,
            question_id: row.question_id,
            text: row.text,
            order: row.order_index,
            scores: row.scores.0,
        }
    }
}

/// One answered question: which option was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSelection {
    pub question_id: i64,
    pub option_id: i64,
}

/// Authoring draft of a question.
#[derive(Debug, Clone, Deserialize)]
pub struct NewQuestion {
    pub text: String,
    pub order: i32,
    pub options: Vec<NewOption>,
}

/// Authoring draft of an option.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOption {
    pub text: String,
    pub order: i32,
    pub scores: ScoreVector,
}

impl OrderedQuestion for Question {
    fn order(&self) -> i32 {
        self.order
    }

    fn option_orders(&self) -> Vec<i32> {
        self.options.iter().map(|o| o.order).collect()
    }
}

impl OrderedQuestion for NewQuestion {
    fn order(&self) -> i32 {
        self.order
    }

    fn option_orders(&self) -> Vec<i32> {
        self.options.iter().map(|o| o.order).collect()
    }
}
