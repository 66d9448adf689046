// src/scoring/alphabet.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ScoringError;

/// One letter of the trait alphabet.
///
/// Declaration order follows the canonical axis ordering, so the derived
/// `Ord` sorts I before E, S before N, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TraitLetter {
    I,
    E,
    S,
    N,
    T,
    F,
    J,
    P,
}

impl TraitLetter {
    pub const ALL: [TraitLetter; 8] = [
        TraitLetter::I,
        TraitLetter::E,
        TraitLetter::S,
        TraitLetter::N,
        TraitLetter::T,
        TraitLetter::F,
        TraitLetter::J,
        TraitLetter::P,
    ];

    pub fn as_char(self) -> char {
        match self {
            TraitLetter::I => 'I',
            TraitLetter::E => 'E',
            TraitLetter::S => 'S',
            TraitLetter::N => 'N',
            TraitLetter::T => 'T',
            TraitLetter::F => 'F',
            TraitLetter::J => 'J',
            TraitLetter::P => 'P',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|letter| letter.as_char() == c)
    }

    /// The axis this letter sits on.
    pub fn axis(self) -> Axis {
        match self {
            TraitLetter::I | TraitLetter::E => Axis::IE,
            TraitLetter::S | TraitLetter::N => Axis::SN,
            TraitLetter::T | TraitLetter::F => Axis::TF,
            TraitLetter::J | TraitLetter::P => Axis::JP,
        }
    }

    /// The opposing letter on the same axis.
    pub fn opposite(self) -> Self {
        let (first, second) = self.axis().pair();
        if self == first { second } else { first }
    }
}

impl fmt::Display for TraitLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for TraitLetter {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_char(c).ok_or_else(|| ScoringError::InvalidTraitKey(s.to_string()))
            }
            _ => Err(ScoringError::InvalidTraitKey(s.to_string())),
        }
    }
}

/// One of the four opposing letter pairs, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Axis {
    IE,
    SN,
    TF,
    JP,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::IE, Axis::SN, Axis::TF, Axis::JP];

    /// The pair in canonical order. The first letter wins ties.
    pub fn pair(self) -> (TraitLetter, TraitLetter) {
        match self {
            Axis::IE => (TraitLetter::I, TraitLetter::E),
            Axis::SN => (TraitLetter::S, TraitLetter::N),
            Axis::TF => (TraitLetter::T, TraitLetter::F),
            Axis::JP => (TraitLetter::J, TraitLetter::P),
        }
    }

    pub fn contains(self, letter: TraitLetter) -> bool {
        letter.axis() == self
    }
}

/// A four-letter type code such as `ISTJ`.
///
/// Position `i` always holds a letter of `Axis::ALL[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MbtiType([TraitLetter; 4]);

impl MbtiType {
    pub fn from_letters(letters: [TraitLetter; 4]) -> Result<Self, ScoringError> {
        for (axis, letter) in Axis::ALL.iter().zip(letters.iter()) {
            if !axis.contains(*letter) {
                return Err(ScoringError::InvalidTypeCode(
                    letters.iter().map(|l| l.as_char()).collect(),
                ));
            }
        }
        Ok(Self(letters))
    }

    pub fn letters(&self) -> [TraitLetter; 4] {
        self.0
    }
}

impl fmt::Display for MbtiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.0 {
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}

impl FromStr for MbtiType {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters: Vec<TraitLetter> = s
            .chars()
            .map(|c| TraitLetter::from_char(c.to_ascii_uppercase()))
            .collect::<Option<_>>()
            .ok_or_else(|| ScoringError::InvalidTypeCode(s.to_string()))?;

        let letters: [TraitLetter; 4] = letters
            .try_into()
            .map_err(|_| ScoringError::InvalidTypeCode(s.to_string()))?;

        Self::from_letters(letters).map_err(|_| ScoringError::InvalidTypeCode(s.to_string()))
    }
}

impl Serialize for MbtiType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MbtiType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
