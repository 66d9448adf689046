// src/scoring/vector.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ScoringError, TraitLetter};

/// Per-option contribution to the trait totals.
///
/// Keys are restricted to the trait alphabet; axes an option does not
/// affect are simply absent and read as zero. Once built a vector is never
/// mutated, addition always produces a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, i64>")]
pub struct ScoreVector(BTreeMap<TraitLetter, i64>);

impl ScoreVector {
    /// Repeated letters accumulate, saturating at the `i64` bounds.
    /// Use [`ScoreVector::try_new`] where overflow must be reported.
    pub fn new(entries: impl IntoIterator<Item = (TraitLetter, i64)>) -> Self {
        let mut map: BTreeMap<TraitLetter, i64> = BTreeMap::new();
        for (letter, delta) in entries {
            let total = map.entry(letter).or_insert(0);
            *total = total.saturating_add(delta);
        }
        Self(map)
    }

    /// Like [`ScoreVector::new`], but fails when a letter's total leaves
    /// the `i64` range.
    pub fn try_new(
        entries: impl IntoIterator<Item = (TraitLetter, i64)>,
    ) -> Result<Self, ScoringError> {
        let mut map: BTreeMap<TraitLetter, i64> = BTreeMap::new();
        for (letter, delta) in entries {
            let total = map.entry(letter).or_insert(0);
            *total = total
                .checked_add(delta)
                .ok_or(ScoringError::ScoreOverflow(letter))?;
        }
        Ok(Self(map))
    }

    /// Builds a vector from raw string keys, as they arrive in JSON.
    pub fn from_raw<K: AsRef<str>>(
        entries: impl IntoIterator<Item = (K, i64)>,
    ) -> Result<Self, ScoringError> {
        let mut parsed = Vec::new();
        for (key, delta) in entries {
            parsed.push((key.as_ref().parse::<TraitLetter>()?, delta));
        }
        Self::try_new(parsed)
    }

    /// Pointwise sum of two vectors.
    pub fn checked_add(&self, other: &ScoreVector) -> Result<ScoreVector, ScoringError> {
        Self::try_new(self.iter().chain(other.iter()))
    }

    /// Pointwise sum of any number of vectors; empty input sums to the
    /// empty vector.
    pub fn checked_sum<'a>(
        vectors: impl IntoIterator<Item = &'a ScoreVector>,
    ) -> Result<ScoreVector, ScoringError> {
        vectors
            .into_iter()
            .try_fold(ScoreVector::default(), |acc, v| acc.checked_add(v))
    }

    pub fn get(&self, letter: TraitLetter) -> i64 {
        self.0.get(&letter).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TraitLetter, i64)> + '_ {
        self.0.iter().map(|(letter, delta)| (*letter, *delta))
    }
}

impl TryFrom<BTreeMap<String, i64>> for ScoreVector {
    type Error = ScoringError;

    fn try_from(raw: BTreeMap<String, i64>) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TraitLetter::*;

    #[test]
    fn absent_keys_read_as_zero() {
        let v = ScoreVector::new([(I, 2)]);
        assert_eq!(v.get(I), 2);
        assert_eq!(v.get(E), 0);
    }

    #[test]
    fn addition_is_pointwise() {
        let a = ScoreVector::new([(I, 2), (T, 1)]);
        let b = ScoreVector::new([(E, 3), (T, 4)]);
        let sum = a.checked_add(&b).unwrap();
        assert_eq!(sum.get(I), 2);
        assert_eq!(sum.get(E), 3);
        assert_eq!(sum.get(T), 5);
        assert_eq!(sum.get(F), 0);
        // inputs are untouched
        assert_eq!(a, ScoreVector::new([(I, 2), (T, 1)]));
    }

    #[test]
    fn summation_ignores_order_and_grouping() {
        let a = ScoreVector::new([(I, 1), (S, 2)]);
        let b = ScoreVector::new([(E, 4), (J, -1)]);
        let c = ScoreVector::new([(I, 3), (P, 5), (N, 1)]);

        let forward = ScoreVector::checked_sum([&a, &b, &c]).unwrap();
        let backward = ScoreVector::checked_sum([&c, &b, &a]).unwrap();
        let regrouped = a.checked_add(&b.checked_add(&c).unwrap()).unwrap();

        assert_eq!(forward, backward);
        assert_eq!(forward, regrouped);
    }

    #[test]
    fn raw_keys_outside_alphabet_are_rejected() {
        let err = ScoreVector::from_raw([("I", 1), ("Q", 2)]).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidTraitKey(k) if k == "Q"));
    }

    #[test]
    fn deserializes_from_json_object() {
        let v: ScoreVector = serde_json::from_str(r#"{"E": 2, "I": 0}"#).unwrap();
        assert_eq!(v.get(E), 2);
        assert_eq!(v.get(I), 0);

        let bad = serde_json::from_str::<ScoreVector>(r#"{"Z": 1}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn sums_past_i64_are_reported_not_wrapped() {
        let max = ScoreVector::new([(I, i64::MAX)]);
        let one = ScoreVector::new([(I, 1)]);
        assert_eq!(max.checked_add(&one), Err(ScoringError::ScoreOverflow(I)));

        let min = ScoreVector::new([(N, i64::MIN)]);
        let minus_one = ScoreVector::new([(N, -1)]);
        assert_eq!(
            ScoreVector::checked_sum([&min, &minus_one]),
            Err(ScoringError::ScoreOverflow(N))
        );

        assert_eq!(
            ScoreVector::try_new([(T, i64::MAX), (T, 1)]),
            Err(ScoringError::ScoreOverflow(T))
        );
        assert_eq!(ScoreVector::new([(T, i64::MAX), (T, 1)]).get(T), i64::MAX);
    }

    #[test]
    fn serializes_as_letter_keyed_object() {
        let v = ScoreVector::new([(P, 1), (J, 2)]);
        assert_eq!(serde_json::to_value(&v).unwrap(), serde_json::json!({"J": 2, "P": 1}));
    }
}
