// src/store/postgres.rs

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, types::Json};

use super::{ContentStore, ResultStore};
use crate::{
    error::AppError,
    models::{
        category::{Category, NewCategory},
        question::{OptionRow, Question, QuestionOption, QuestionRow},
        quiz::{NewTest, TestDetail, TestRow, TestSummary},
        test_result::{NewTestResult, TestResult, TestResultRow},
    },
};

const TEST_SELECT: &str = r#"
    SELECT
        t.id, t.title, t.description, t.estimated_time, t.difficulty, t.thumbnail, t.created_at,
        c.id AS category_id,
        c.name AS category_name,
        c.emoji AS category_emoji,
        c.description AS category_description,
        c.color AS category_color,
        c.created_at AS category_created_at,
        c.updated_at AS category_updated_at
    FROM tests t
    JOIN categories c ON c.id = t.category_id
"#;

const RESULT_COLUMNS: &str = r#"
    id, test_id, mbti_type, title, description,
    characteristics, strengths, weaknesses, compatibility,
    percentage, answers, time_spent, created_at
"#;

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn test_summary(&self, id: i64) -> Result<Option<TestSummary>, AppError> {
        let mut query_builder = QueryBuilder::<Postgres>::new(TEST_SELECT);
        query_builder.push(" WHERE t.id = ").push_bind(id);

        let row: Option<TestRow> = query_builder
            .build_query_as()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(TestSummary::from))
    }

    async fn test_summaries(&self, ids: Vec<i64>) -> Result<HashMap<i64, TestSummary>, AppError> {
        let mut query_builder = QueryBuilder::<Postgres>::new(TEST_SELECT);
        query_builder.push(" WHERE t.id = ANY(").push_bind(ids).push(")");

        let rows: Vec<TestRow> = query_builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.id, TestSummary::from(row)))
            .collect())
    }

    async fn hydrate_results(&self, rows: Vec<TestResultRow>) -> Result<Vec<TestResult>, AppError> {
        let mut test_ids: Vec<i64> = rows.iter().map(|r| r.test_id).collect();
        test_ids.sort_unstable();
        test_ids.dedup();
        let summaries = self.test_summaries(test_ids).await?;

        rows.into_iter()
            .map(|row| {
                let test = summaries.get(&row.test_id).cloned().ok_or_else(|| {
                    AppError::InternalServerError(format!(
                        "Result {} references missing test {}",
                        row.id, row.test_id
                    ))
                })?;
                hydrate(row, test)
            })
            .collect()
    }
}

fn hydrate(row: TestResultRow, test: TestSummary) -> Result<TestResult, AppError> {
    let mbti_type = row.mbti_type.parse().map_err(|e| {
        AppError::InternalServerError(format!("Result {} has a corrupt type code: {}", row.id, e))
    })?;
    let percentage = u8::try_from(row.percentage).map_err(|_| {
        AppError::InternalServerError(format!(
            "Result {} has an out-of-range percentage {}",
            row.id, row.percentage
        ))
    })?;

    Ok(TestResult {
        id: row.id,
        test,
        mbti_type,
        title: row.title,
        description: row.description,
        characteristics: row.characteristics.0,
        strengths: row.strengths.0,
        weaknesses: row.weaknesses.0,
        compatibility: row.compatibility.0,
        percentage,
        answers: row.answers.0,
        time_spent: row.time_spent,
        created_at: row.created_at,
    })
}

#[async_trait]
impl ContentStore for PgStore {
    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, emoji, description, color, created_at, updated_at
            FROM categories
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(categories)
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, emoji, description, color, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn list_tests(
        &self,
        category_id: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<TestSummary>, AppError> {
        let mut query_builder = QueryBuilder::<Postgres>::new(TEST_SELECT);
        if let Some(category_id) = category_id {
            query_builder
                .push(" WHERE t.category_id = ")
                .push_bind(category_id);
        }
        query_builder.push(" ORDER BY t.created_at DESC, t.id DESC");
        if let Some(limit) = limit {
            query_builder.push(" LIMIT ").push_bind(limit);
        }

        let rows: Vec<TestRow> = query_builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list tests: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?;

        Ok(rows.into_iter().map(TestSummary::from).collect())
    }

    async fn get_test(&self, id: i64) -> Result<Option<TestDetail>, AppError> {
        let Some(summary) = self.test_summary(id).await? else {
            return Ok(None);
        };

        let question_rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, test_id, text, order_index
            FROM questions
            WHERE test_id = $1
            ORDER BY order_index, id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let option_rows = sqlx::query_as::<_, OptionRow>(
            r#"
            SELECT o.id, o.question_id, o.text, o.order_index, o.scores
            FROM question_options o
            JOIN questions q ON q.id = o.question_id
            WHERE q.test_id = $1
            ORDER BY o.question_id, o.order_index, o.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let mut options_by_question: HashMap<i64, Vec<QuestionOption>> = HashMap::new();
        for row in option_rows {
            options_by_question
                .entry(row.question_id)
                .or_default()
                .push(QuestionOption::from(row));
        }

        let questions = question_rows
            .into_iter()
            .map(|row| Question {
                options: options_by_question.remove(&row.id).unwrap_or_default(),
                id: row.id,
                test_id: row.test_id,
                text: row.text,
                order: row.order_index,
            })
            .collect();

        Ok(Some(TestDetail { summary, questions }))
    }

    async fn upsert_category(&self, new: NewCategory) -> Result<Category, AppError> {
        sqlx::query(
            r#"
            INSERT INTO categories (name, emoji, description, color)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(&new.name)
        .bind(&new.emoji)
        .bind(&new.description)
        .bind(&new.color)
        .execute(&self.pool)
        .await?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, emoji, description, color, created_at, updated_at
            FROM categories
            WHERE name = $1
            "#,
        )
        .bind(&new.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    async fn create_test(
        &self,
        category_id: i64,
        new: NewTest,
    ) -> Result<(TestDetail, bool), AppError> {
        let mut tx = self.pool.begin().await?;

        // Concurrent writers of the same title serialize on the unique key;
        // the loser sees no row and falls through to the existing test.
        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO tests (title, description, category_id, estimated_time, difficulty, thumbnail)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (title) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(category_id)
        .bind(new.estimated_time)
        .bind(new.difficulty.as_str())
        .bind(&new.thumbnail)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(test_id) = inserted else {
            tx.rollback().await?;

            let id = sqlx::query_scalar::<_, i64>("SELECT id FROM tests WHERE title = $1")
                .bind(&new.title)
                .fetch_one(&self.pool)
                .await?;
            let detail = self
                .get_test(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Test {} not found", id)))?;
            return Ok((detail, false));
        };

        for question in &new.questions {
            let question_id = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO questions (test_id, text, order_index)
                VALUES ($1, $2, $3)
                RETURNING id
                "#,
            )
            .bind(test_id)
            .bind(&question.text)
            .bind(question.order)
            .fetch_one(&mut *tx)
            .await?;

            for option in &question.options {
                sqlx::query(
                    r#"
                    INSERT INTO question_options (question_id, text, order_index, scores)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(question_id)
                .bind(&option.text)
                .bind(option.order)
                .bind(Json(&option.scores))
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        let detail = self.get_test(test_id).await?.ok_or_else(|| {
            AppError::InternalServerError(format!("Test {} vanished after insert", test_id))
        })?;

        Ok((detail, true))
    }
}

#[async_trait]
impl ResultStore for PgStore {
    async fn insert_result(&self, new: NewTestResult) -> Result<TestResult, AppError> {
        let test = self
            .test_summary(new.test_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Test {} not found", new.test_id)))?;

        let (id, created_at) = sqlx::query_as::<_, (i64, chrono::DateTime<chrono::Utc>)>(
            r#"
            INSERT INTO test_results (
                test_id, mbti_type, title, description,
                characteristics, strengths, weaknesses, compatibility,
                percentage, answers, time_spent
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, created_at
            "#,
        )
        .bind(new.test_id)
        .bind(new.mbti_type.to_string())
        .bind(&new.title)
        .bind(&new.description)
        .bind(Json(&new.characteristics))
        .bind(Json(&new.strengths))
        .bind(Json(&new.weaknesses))
        .bind(Json(&new.compatibility))
        .bind(i16::from(new.percentage))
        .bind(Json(&new.answers))
        .bind(new.time_spent)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert test result: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(new.into_result(id, test, created_at))
    }

    async fn list_results(&self) -> Result<Vec<TestResult>, AppError> {
        let rows = sqlx::query_as::<_, TestResultRow>(&format!(
            "SELECT {} FROM test_results ORDER BY created_at DESC, id DESC",
            RESULT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        self.hydrate_results(rows).await
    }

    async fn get_result(&self, id: i64) -> Result<Option<TestResult>, AppError> {
        let row = sqlx::query_as::<_, TestResultRow>(&format!(
            "SELECT {} FROM test_results WHERE id = $1",
            RESULT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.hydrate_results(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}
