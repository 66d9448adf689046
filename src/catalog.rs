// src/catalog.rs

//! Authoring-time checks over a test's question/option tree, plus the
//! resolution of submitted selections into score vectors.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::models::question::{AnswerSelection, Question};
use crate::scoring::ScoreVector;

/// A question as seen by the validator: its order and the orders of its
/// options. Implemented for stored questions and for authoring drafts.
pub trait OrderedQuestion {
    fn order(&self) -> i32;
    fn option_orders(&self) -> Vec<i32>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks publishing.
    Error,
    /// Reported but does not block publishing.
    Advisory,
}

/// One violation found by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogIssue {
    /// The test has no questions, so no submission can ever be scored.
    NoQuestions,
    /// Two siblings share an order: questions of the test when
    /// `question_order` is None, otherwise options of that question.
    OrderingConflict {
        question_order: Option<i32>,
        order: i32,
    },
    /// A question has no options at all.
    MissingOptions { question_order: i32 },
    /// A question has a single option and cannot discriminate on any axis.
    InsufficientOptions { question_order: i32, option_count: usize },
}

impl CatalogIssue {
    pub fn severity(&self) -> Severity {
        match self {
            CatalogIssue::NoQuestions
            | CatalogIssue::OrderingConflict { .. }
            | CatalogIssue::MissingOptions { .. } => Severity::Error,
            CatalogIssue::InsufficientOptions { .. } => Severity::Advisory,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub publishable: bool,
    pub issues: Vec<CatalogIssue>,
}

impl ValidationReport {
    fn from_issues(issues: Vec<CatalogIssue>) -> Self {
        let publishable = issues.iter().all(|i| i.severity() != Severity::Error);
        Self {
            publishable,
            issues,
        }
    }

    pub fn advisories(&self) -> impl Iterator<Item = &CatalogIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Advisory)
    }
}

/// Validates one test's question tree. Every violation is collected; the
/// pass never stops at the first one.
pub fn validate<Q: OrderedQuestion>(questions: &[Q]) -> ValidationReport {
    let mut issues = Vec::new();

    if questions.is_empty() {
        issues.push(CatalogIssue::NoQuestions);
    }

    for order in duplicates(questions.iter().map(|q| q.order())) {
        issues.push(CatalogIssue::OrderingConflict {
            question_order: None,
            order,
        });
    }

    for question in questions {
        let option_orders = question.option_orders();
        match option_orders.len() {
            0 => issues.push(CatalogIssue::MissingOptions {
                question_order: question.order(),
            }),
            1 => issues.push(CatalogIssue::InsufficientOptions {
                question_order: question.order(),
                option_count: 1,
            }),
            _ => {}
        }

        for order in duplicates(option_orders) {
            issues.push(CatalogIssue::OrderingConflict {
                question_order: Some(question.order()),
                order,
            });
        }
    }

    ValidationReport::from_issues(issues)
}

/// Orders that appear more than once, each reported once, ascending.
fn duplicates(orders: impl IntoIterator<Item = i32>) -> Vec<i32> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for order in orders {
        *counts.entry(order).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(order, _)| order)
        .collect()
}

/// Why a set of selections could not be matched against a test.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("question {0} does not belong to this test")]
    UnknownQuestion(i64),

    #[error("option {option_id} does not belong to question {question_id}")]
    UnknownOption { question_id: i64, option_id: i64 },

    #[error("question {0} was answered more than once")]
    DuplicateAnswer(i64),

    #[error("{given} answers submitted for a test with {questions} questions")]
    TooManyAnswers { given: usize, questions: usize },
}

/// Maps each selection to its option's score vector, in question order.
///
/// An empty selection list resolves to an empty sequence; the caller's
/// aggregation step is what rejects it.
pub fn resolve_answers(
    questions: &[Question],
    answers: &[AnswerSelection],
) -> Result<Vec<ScoreVector>, SubmissionError> {
    if answers.len() > questions.len() {
        return Err(SubmissionError::TooManyAnswers {
            given: answers.len(),
            questions: questions.len(),
        });
    }

    let mut seen = HashSet::new();
    let mut picked = Vec::with_capacity(answers.len());

    for answer in answers {
        if !seen.insert(answer.question_id) {
            return Err(SubmissionError::DuplicateAnswer(answer.question_id));
        }

        let question = questions
            .iter()
            .find(|q| q.id == answer.question_id)
            .ok_or(SubmissionError::UnknownQuestion(answer.question_id))?;

        let option = question
            .options
            .iter()
            .find(|o| o.id == answer.option_id)
            .ok_or(SubmissionError::UnknownOption {
                question_id: answer.question_id,
                option_id: answer.option_id,
            })?;

        picked.push((question.order, question.id, option.scores.clone()));
    }

    picked.sort_by_key(|(order, id, _)| (*order, *id));
    Ok(picked.into_iter().map(|(_, _, scores)| scores).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionOption;
    use crate::scoring::TraitLetter;

    struct Draft {
        order: i32,
        options: Vec<i32>,
    }

    impl OrderedQuestion for Draft {
        fn order(&self) -> i32 {
            self.order
        }

        fn option_orders(&self) -> Vec<i32> {
            self.options.clone()
        }
    }

    fn draft(order: i32, options: &[i32]) -> Draft {
        Draft {
            order,
            options: options.to_vec(),
        }
    }

    #[test]
    fn well_formed_tree_is_publishable_without_issues() {
        let report = validate(&[draft(1, &[1, 2]), draft(2, &[1, 2, 3])]);
        assert!(report.publishable);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn single_option_is_advisory_only() {
        let report = validate(&[draft(1, &[1]), draft(2, &[1, 2])]);

        assert!(report.publishable);
        assert_eq!(
            report.issues,
            vec![CatalogIssue::InsufficientOptions {
                question_order: 1,
                option_count: 1
            }]
        );
        assert_eq!(report.advisories().count(), 1);
    }

    #[test]
    fn collects_every_violation() {
        let report = validate(&[
            draft(1, &[1, 1, 2]),
            draft(1, &[]),
            draft(3, &[4, 4, 5, 5]),
        ]);

        assert!(!report.publishable);
        assert_eq!(
            report.issues,
            vec![
                CatalogIssue::OrderingConflict {
                    question_order: None,
                    order: 1
                },
                CatalogIssue::OrderingConflict {
                    question_order: Some(1),
                    order: 1
                },
                CatalogIssue::MissingOptions { question_order: 1 },
                CatalogIssue::OrderingConflict {
                    question_order: Some(3),
                    order: 4
                },
                CatalogIssue::OrderingConflict {
                    question_order: Some(3),
                    order: 5
                },
            ]
        );
    }

    #[test]
    fn empty_tree_is_not_publishable() {
        let report = validate::<Draft>(&[]);
        assert!(!report.publishable);
        assert_eq!(report.issues, vec![CatalogIssue::NoQuestions]);
        assert_eq!(
            serde_json::to_value(&report.issues[0]).unwrap(),
            serde_json::json!({ "kind": "no_questions" })
        );
    }

    #[test]
    fn gaps_and_zero_start_are_allowed() {
        let report = validate(&[draft(0, &[0, 5]), draft(10, &[3, 7])]);
        assert!(report.publishable);
        assert!(report.issues.is_empty());
    }

    fn question(id: i64, order: i32, options: Vec<(i64, ScoreVector)>) -> Question {
        Question {
            id,
            test_id: 1,
            text: format!("Question {id}"),
            order,
            options: options
                .into_iter()
                .enumerate()
                .map(|(i, (option_id, scores))| QuestionOption {
                    id: option_id,
                    question_id: id,
                    text: format!("Option {option_id}"),
                    order: i as i32 + 1,
                    scores,
                })
                .collect(),
        }
    }

    fn sample_questions() -> Vec<Question> {
        vec![
            question(
                10,
                2,
                vec![
                    (100, ScoreVector::new([(TraitLetter::T, 2)])),
                    (101, ScoreVector::new([(TraitLetter::F, 2)])),
                ],
            ),
            question(
                11,
                1,
                vec![
                    (110, ScoreVector::new([(TraitLetter::I, 2)])),
                    (111, ScoreVector::new([(TraitLetter::E, 2)])),
                ],
            ),
        ]
    }

    fn pick(question_id: i64, option_id: i64) -> AnswerSelection {
        AnswerSelection {
            question_id,
            option_id,
        }
    }

    #[test]
    fn resolves_in_question_order() {
        let vectors = resolve_answers(&sample_questions(), &[pick(10, 101), pick(11, 110)]).unwrap();
        assert_eq!(
            vectors,
            vec![
                ScoreVector::new([(TraitLetter::I, 2)]),
                ScoreVector::new([(TraitLetter::F, 2)]),
            ]
        );
    }

    #[test]
    fn empty_selection_resolves_to_nothing() {
        assert!(resolve_answers(&sample_questions(), &[]).unwrap().is_empty());
    }

    #[test]
    fn rejects_foreign_and_duplicate_selections() {
        let questions = sample_questions();

        assert_eq!(
            resolve_answers(&questions, &[pick(99, 100)]),
            Err(SubmissionError::UnknownQuestion(99))
        );
        assert_eq!(
            resolve_answers(&questions, &[pick(10, 110)]),
            Err(SubmissionError::UnknownOption {
                question_id: 10,
                option_id: 110
            })
        );
        assert_eq!(
            resolve_answers(&questions, &[pick(10, 100), pick(10, 101)]),
            Err(SubmissionError::DuplicateAnswer(10))
        );
        assert_eq!(
            resolve_answers(&questions, &[pick(10, 100), pick(11, 110), pick(10, 101)]),
            Err(SubmissionError::TooManyAnswers {
                given: 3,
                questions: 2
            })
        );
    }
}
