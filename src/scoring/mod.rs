// src/scoring/mod.rs

//! Typed score vectors and the aggregation engine that turns a set of
//! selected answers into a four-letter type plus a confidence percentage.

pub mod alphabet;
pub mod engine;
pub mod profiles;
pub mod vector;

pub use alphabet::{Axis, MbtiType, TraitLetter};
pub use engine::{Aggregation, AxisOutcome, aggregate};
pub use profiles::{Compatibility, TypeProfile};
pub use vector::ScoreVector;

/// Errors raised by the scoring core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("invalid trait key '{0}': expected one of I, E, S, N, T, F, J, P")]
    InvalidTraitKey(String),

    #[error("invalid type code '{0}'")]
    InvalidTypeCode(String),

    #[error("no answers provided")]
    NoAnswersProvided,

    #[error("score for trait '{0}' is out of range")]
    ScoreOverflow(TraitLetter),
}
