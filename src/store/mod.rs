// src/store/mod.rs

//! Storage seams. Handlers only see these traits; `PgStore` backs them with
//! Postgres and `MemoryStore` keeps everything in process.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        category::{Category, NewCategory},
        quiz::{NewTest, TestDetail, TestSummary},
        test_result::{NewTestResult, TestResult},
    },
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Authored content: categories and their test trees.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All categories, ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, AppError>;

    async fn get_category(&self, id: i64) -> Result<Option<Category>, AppError>;

    /// Test summaries, newest first, optionally restricted to one category
    /// and truncated to `limit`.
    async fn list_tests(
        &self,
        category_id: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<TestSummary>, AppError>;

    /// Full test tree with questions and options in order.
    async fn get_test(&self, id: i64) -> Result<Option<TestDetail>, AppError>;

    /// Returns the category with this name, creating it if absent.
    async fn upsert_category(&self, new: NewCategory) -> Result<Category, AppError>;

    /// Returns the test with this title, creating it (with its questions and
    /// options) under `category_id` if absent. The flag is true on creation.
    async fn create_test(
        &self,
        category_id: i64,
        new: NewTest,
    ) -> Result<(TestDetail, bool), AppError>;
}

/// Persisted quiz outcomes.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Stores a result. Fails with NotFound if the test does not exist.
    async fn insert_result(&self, new: NewTestResult) -> Result<TestResult, AppError>;

    /// All results, newest first.
    async fn list_results(&self) -> Result<Vec<TestResult>, AppError>;

    async fn get_result(&self, id: i64) -> Result<Option<TestResult>, AppError>;
}

pub trait QuizStore: ContentStore + ResultStore {}

impl<T: ContentStore + ResultStore> QuizStore for T {}

/// Shared handle held in application state.
pub type Store = Arc<dyn QuizStore>;
