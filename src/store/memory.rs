// src/store/memory.rs

use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{ContentStore, ResultStore};
use crate::{
    error::AppError,
    models::{
        category::{Category, NewCategory},
        question::{Question, QuestionOption},
        quiz::{NewTest, TestDetail, TestSummary},
        test_result::{NewTestResult, TestResult},
    },
};

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    /// Tests are kept as full trees; the category inside is a snapshot.
    tests: Vec<TestDetail>,
    results: Vec<TestResult>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-process store for running without a database and for tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(tests: &mut [TestSummary]) {
    tests.sort_by_key(|t| Reverse((t.created_at, t.id)));
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let tables = self.tables.read().await;
        let mut categories = tables.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(categories)
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn list_tests(
        &self,
        category_id: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<TestSummary>, AppError> {
        let tables = self.tables.read().await;
        let mut tests: Vec<TestSummary> = tables
            .tests
            .iter()
            .filter(|t| category_id.is_none_or(|id| t.summary.category.id == id))
            .map(|t| t.summary.clone())
            .collect();
        newest_first(&mut tests);
        if let Some(limit) = limit {
            tests.truncate(usize::try_from(limit).unwrap_or(0));
        }
        Ok(tests)
    }

    async fn get_test(&self, id: i64) -> Result<Option<TestDetail>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.tests.iter().find(|t| t.summary.id == id).cloned())
    }

    async fn upsert_category(&self, new: NewCategory) -> Result<Category, AppError> {
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.categories.iter().find(|c| c.name == new.name) {
            return Ok(existing.clone());
        }

        let now = Utc::now();
        let category = Category {
            id: tables.next_id(),
            name: new.name,
            emoji: new.emoji,
            description: new.description,
            color: new.color,
            created_at: now,
            updated_at: now,
        };
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn create_test(
        &self,
        category_id: i64,
        new: NewTest,
    ) -> Result<(TestDetail, bool), AppError> {
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.tests.iter().find(|t| t.summary.title == new.title) {
            return Ok((existing.clone(), false));
        }

        let category = tables
            .categories
            .iter()
            .find(|c| c.id == category_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", category_id)))?;

        let test_id = tables.next_id();
        let mut questions = Vec::with_capacity(new.questions.len());
        for q in new.questions {
            let question_id = tables.next_id();
            let mut options = Vec::with_capacity(q.options.len());
            for o in q.options {
                options.push(QuestionOption {
                    id: tables.next_id(),
                    question_id,
                    text: o.text,
                    order: o.order,
                    scores: o.scores,
                });
            }
            options.sort_by_key(|o| (o.order, o.id));
            questions.push(Question {
                id: question_id,
                test_id,
                text: q.text,
                order: q.order,
                options,
            });
        }
        questions.sort_by_key(|q| (q.order, q.id));

        let detail = TestDetail {
            summary: TestSummary {
                id: test_id,
                title: new.title,
                description: new.description,
                category,
                estimated_time: new.estimated_time,
                difficulty: new.difficulty,
                thumbnail: new.thumbnail,
                created_at: Utc::now(),
            },
            questions,
        };
        tables.tests.push(detail.clone());
        Ok((detail, true))
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn insert_result(&self, new: NewTestResult) -> Result<TestResult, AppError> {
        let mut tables = self.tables.write().await;
        let test = tables
            .tests
            .iter()
            .find(|t| t.summary.id == new.test_id)
            .map(|t| t.summary.clone())
            .ok_or_else(|| AppError::NotFound(format!("Test {} not found", new.test_id)))?;

        let id = tables.next_id();
        let result = new.into_result(id, test, Utc::now());
        tables.results.push(result.clone());
        Ok(result)
    }

    async fn list_results(&self) -> Result<Vec<TestResult>, AppError> {
        let tables = self.tables.read().await;
        let mut results = tables.results.clone();
        results.sort_by_key(|r| Reverse((r.created_at, r.id)));
        Ok(results)
    }

    async fn get_result(&self, id: i64) -> Result<Option<TestResult>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.results.iter().find(|r| r.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        question::{NewOption, NewQuestion},
        quiz::Difficulty,
    };
    use crate::scoring::{ScoreVector, TraitLetter};

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            emoji: "*".to_string(),
            description: String::new(),
            color: "bg-blue-500".to_string(),
        }
    }

    fn new_test(title: &str) -> NewTest {
        NewTest {
            title: title.to_string(),
            description: String::new(),
            estimated_time: 5,
            difficulty: Difficulty::Easy,
            thumbnail: String::new(),
            questions: vec![
                NewQuestion {
                    text: "second".to_string(),
                    order: 2,
                    options: vec![NewOption {
                        text: "only".to_string(),
                        order: 1,
                        scores: ScoreVector::new([(TraitLetter::T, 1)]),
                    }],
                },
                NewQuestion {
                    text: "first".to_string(),
                    order: 1,
                    options: vec![
                        NewOption {
                            text: "b".to_string(),
                            order: 2,
                            scores: ScoreVector::new([(TraitLetter::E, 1)]),
                        },
                        NewOption {
                            text: "a".to_string(),
                            order: 1,
                            scores: ScoreVector::new([(TraitLetter::I, 1)]),
                        },
                    ],
                },
            ],
        }
    }

    #[tokio::test]
    async fn categories_are_unique_by_name_and_sorted() {
        let store = MemoryStore::new();
        let b = store.upsert_category(new_category("b")).await.unwrap();
        store.upsert_category(new_category("a")).await.unwrap();
        let again = store.upsert_category(new_category("b")).await.unwrap();

        assert_eq!(b.id, again.id);
        let names: Vec<String> = store
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_tree_is_stored_in_order() {
        let store = MemoryStore::new();
        let category = store.upsert_category(new_category("c")).await.unwrap();
        let (detail, created) = store.create_test(category.id, new_test("t")).await.unwrap();

        assert!(created);
        let texts: Vec<&str> = detail.questions.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        let options: Vec<&str> = detail.questions[0]
            .options
            .iter()
            .map(|o| o.text.as_str())
            .collect();
        assert_eq!(options, vec!["a", "b"]);

        let (_, created_again) = store.create_test(category.id, new_test("t")).await.unwrap();
        assert!(!created_again);
    }

    #[tokio::test]
    async fn listing_is_newest_first_and_limited() {
        let store = MemoryStore::new();
        let category = store.upsert_category(new_category("c")).await.unwrap();
        for title in ["one", "two", "three"] {
            store.create_test(category.id, new_test(title)).await.unwrap();
        }

        let titles: Vec<String> = store
            .list_tests(Some(category.id), Some(2))
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["three", "two"]);
    }

    #[tokio::test]
    async fn result_for_unknown_test_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .insert_result(NewTestResult {
                test_id: 42,
                mbti_type: "ISTJ".parse().unwrap(),
                title: String::new(),
                description: String::new(),
                characteristics: serde_json::Value::Null,
                strengths: serde_json::Value::Null,
                weaknesses: serde_json::Value::Null,
                compatibility: serde_json::Value::Null,
                percentage: 50,
                answers: vec![],
                time_spent: 0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
