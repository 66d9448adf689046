// src/scoring/engine.rs

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Axis, MbtiType, ScoreVector, ScoringError, TraitLetter};

/// Confidence reported for an axis where neither letter scored.
pub const NEUTRAL_CONFIDENCE: u8 = 50;

/// Result of one axis comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisOutcome {
    pub axis: Axis,
    pub winner: TraitLetter,
    pub winning_total: i64,
    pub losing_total: i64,
    /// Winner's share of the axis, 0..=100.
    pub confidence: u8,
}

/// Final trait profile plus the type derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    pub mbti_type: MbtiType,
    /// Mean of the four axis confidences.
    pub percentage: u8,
    pub totals: ScoreVector,
    pub axes: Vec<AxisOutcome>,
}

impl Aggregation {
    /// Share of its axis for each of the eight letters.
    pub fn letter_percentages(&self) -> BTreeMap<TraitLetter, u8> {
        let mut shares = BTreeMap::new();
        for outcome in &self.axes {
            shares.insert(outcome.winner, outcome.confidence);
            shares.insert(outcome.winner.opposite(), 100 - outcome.confidence);
        }
        shares
    }
}

/// Folds the selected score vectors into a type and confidence.
///
/// Pure and deterministic. Ties on an axis go to the first letter of the
/// pair (I, S, T, J). Halves round to the nearest even integer, both for
/// axis confidences and for the overall mean.
pub fn aggregate(answers: &[ScoreVector]) -> Result<Aggregation, ScoringError> {
    if answers.is_empty() {
        return Err(ScoringError::NoAnswersProvided);
    }

    let totals = ScoreVector::checked_sum(answers)?;

    let axes: Vec<AxisOutcome> = Axis::ALL
        .iter()
        .map(|axis| compare_axis(*axis, &totals))
        .collect();

    let letters = [axes[0].winner, axes[1].winner, axes[2].winner, axes[3].winner];
    let mbti_type = MbtiType::from_letters(letters)?;

    let confidence_sum: i128 = axes.iter().map(|a| i128::from(a.confidence)).sum();
    let percentage = to_percent(round_half_even(confidence_sum, Axis::ALL.len() as i128));

    Ok(Aggregation {
        mbti_type,
        percentage,
        totals,
        axes,
    })
}

fn compare_axis(axis: Axis, totals: &ScoreVector) -> AxisOutcome {
    let (first, second) = axis.pair();
    let (first_total, second_total) = (totals.get(first), totals.get(second));

    let (winner, winning_total, losing_total) = if second_total > first_total {
        (second, second_total, first_total)
    } else {
        (first, first_total, second_total)
    };

    AxisOutcome {
        axis,
        winner,
        winning_total,
        losing_total,
        confidence: axis_confidence(winning_total, losing_total),
    }
}

/// `winning / (winning + losing) * 100`, clamped to 0..=100.
///
/// A non-positive axis sum (all zero, or dominated by negative deltas)
/// carries no signal and reports the neutral confidence. Computed in
/// `i128` so that no pair of `i64` totals can overflow.
fn axis_confidence(winning: i64, losing: i64) -> u8 {
    let (winning, losing) = (i128::from(winning), i128::from(losing));
    let sum = winning + losing;
    if sum <= 0 {
        return NEUTRAL_CONFIDENCE;
    }
    if winning <= 0 {
        return 0;
    }
    if winning >= sum {
        return 100;
    }
    to_percent(round_half_even(winning * 100, sum))
}

fn to_percent(value: i128) -> u8 {
    u8::try_from(value.clamp(0, 100)).unwrap_or(100)
}

/// Rounds `num / den` to the nearest integer, halves to even.
/// Expects `num >= 0` and `den > 0`.
fn round_half_even(num: i128, den: i128) -> i128 {
    let quotient = num / den;
    let twice_remainder = (num % den) * 2;
    if twice_remainder > den || (twice_remainder == den && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TraitLetter::*;

    fn confidences(result: &Aggregation) -> Vec<u8> {
        result.axes.iter().map(|a| a.confidence).collect()
    }

    #[test]
    fn mixed_answers_yield_istj_with_tie_on_jp() {
        let answers = vec![
            ScoreVector::new([(I, 4), (E, 1)]),
            ScoreVector::new([(S, 3), (N, 2)]),
            ScoreVector::new([(T, 5), (F, 0)]),
            ScoreVector::new([(J, 2), (P, 2)]),
        ];

        let result = aggregate(&answers).unwrap();

        assert_eq!(result.mbti_type.to_string(), "ISTJ");
        assert_eq!(confidences(&result), vec![80, 60, 100, 50]);
        assert_eq!(result.percentage, 72);
    }

    #[test]
    fn all_zero_answers_fall_through_every_tie_break() {
        let answers = vec![
            ScoreVector::new([(I, 0), (E, 0), (S, 0), (N, 0)]),
            ScoreVector::new([(T, 0), (F, 0), (J, 0), (P, 0)]),
        ];

        let result = aggregate(&answers).unwrap();

        assert_eq!(result.mbti_type.to_string(), "ISTJ");
        assert_eq!(confidences(&result), vec![50, 50, 50, 50]);
        assert_eq!(result.percentage, 50);
    }

    #[test]
    fn empty_vectors_still_aggregate() {
        let result = aggregate(&[ScoreVector::default()]).unwrap();
        assert_eq!(result.mbti_type.to_string(), "ISTJ");
        assert_eq!(result.percentage, 50);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(aggregate(&[]), Err(ScoringError::NoAnswersProvided));
    }

    #[test]
    fn strictly_greater_second_letter_wins() {
        let answers = vec![ScoreVector::new([(E, 3), (N, 1), (F, 2), (P, 7), (J, 1)])];

        let result = aggregate(&answers).unwrap();

        assert_eq!(result.mbti_type.to_string(), "ENFP");
        assert_eq!(confidences(&result), vec![100, 100, 100, 88]);
        assert_eq!(result.percentage, 97);
    }

    #[test]
    fn answer_order_does_not_change_result() {
        let a = ScoreVector::new([(I, 2), (T, 1)]);
        let b = ScoreVector::new([(E, 1), (S, 2), (P, 1)]);
        let c = ScoreVector::new([(N, 1), (F, 2), (J, 3)]);

        let forward = aggregate(&[a.clone(), b.clone(), c.clone()]).unwrap();
        let reversed = aggregate(&[c, b, a]).unwrap();

        assert_eq!(forward, reversed);
    }

    #[test]
    fn repeated_calls_serialize_identically() {
        let answers = vec![
            ScoreVector::new([(E, 2)]),
            ScoreVector::new([(S, 1), (N, 1)]),
            ScoreVector::new([(F, 3), (T, 1)]),
        ];

        let first = serde_json::to_vec(&aggregate(&answers).unwrap()).unwrap();
        let second = serde_json::to_vec(&aggregate(&answers).unwrap()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn negative_deltas_stay_within_bounds() {
        let answers = vec![ScoreVector::new([(I, 3), (E, -1), (S, -2), (N, -4)])];

        let result = aggregate(&answers).unwrap();

        assert_eq!(result.axes[0].winner, I);
        assert_eq!(result.axes[0].confidence, 100);
        // S/N sum is negative: no usable signal
        assert_eq!(result.axes[1].winner, S);
        assert_eq!(result.axes[1].confidence, NEUTRAL_CONFIDENCE);
    }

    #[test]
    fn letter_percentages_split_each_axis() {
        let answers = vec![ScoreVector::new([(I, 4), (E, 1), (S, 3), (N, 2)])];

        let shares = aggregate(&answers).unwrap().letter_percentages();

        assert_eq!(shares[&I], 80);
        assert_eq!(shares[&E], 20);
        assert_eq!(shares[&S], 60);
        assert_eq!(shares[&N], 40);
        assert_eq!(shares[&T], 50);
        assert_eq!(shares[&F], 50);
        assert_eq!(shares.len(), 8);
    }

    #[test]
    fn extreme_totals_keep_confidence_in_range() {
        let answers = vec![ScoreVector::new([
            (I, 100_000_000_000_000_000),
            (E, 1),
            (S, i64::MAX),
            (N, i64::MAX - 1),
            (F, i64::MAX),
            (P, i64::MIN),
            (J, i64::MIN),
        ])];

        let result = aggregate(&answers).unwrap();

        assert_eq!(result.mbti_type.to_string(), "ISFJ");
        assert_eq!(confidences(&result), vec![100, 50, 100, NEUTRAL_CONFIDENCE]);
        assert!(result.percentage <= 100);
        assert_eq!(result.percentage, 75);
    }

    #[test]
    fn overflowing_totals_are_an_error() {
        let answers = vec![ScoreVector::new([(I, i64::MAX)]), ScoreVector::new([(I, 1)])];
        assert_eq!(aggregate(&answers), Err(ScoringError::ScoreOverflow(I)));
    }

    #[test]
    fn halves_round_to_even() {
        assert_eq!(round_half_even(290, 4), 72);
        assert_eq!(round_half_even(294, 4), 74);
        assert_eq!(round_half_even(250, 4), 62);
        assert_eq!(round_half_even(251, 4), 63);
        assert_eq!(round_half_even(100, 3), 33);
        assert_eq!(round_half_even(200, 3), 67);
    }
}
