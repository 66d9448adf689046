// src/scoring/profiles.rs

//! Narrative profiles attached to a derived type. Types without a written
//! profile fall back to a generic one.

use serde::Serialize;

use super::MbtiType;
use super::TraitLetter::{E, F, I, J, N, P, T};

/// Types that pair well, reasonably, or poorly with a profile's type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Compatibility {
    pub best: &'static [&'static str],
    pub good: &'static [&'static str],
    pub challenging: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeProfile {
    pub title: &'static str,
    pub description: &'static str,
    pub characteristics: &'static [&'static str],
    pub strengths: &'static [&'static str],
    pub weaknesses: &'static [&'static str],
    pub compatibility: Compatibility,
}

static ENFP: TypeProfile = TypeProfile {
    title: "Passionate Inspirer",
    description: "You are a creative and enthusiastic inspirer. You love new ideas and enjoy connecting with people.",
    characteristics: &[
        "Creative and innovative thinking",
        "Enjoys communicating with people",
        "Seeks out new experiences",
        "Optimistic and upbeat",
    ],
    strengths: &[
        "Creativity and innovation",
        "Easy rapport with people",
        "Adaptability and flexibility",
        "Motivating others",
    ],
    weaknesses: &[
        "Bored by routine work",
        "Easily swayed by emotion",
        "Struggles with long-term planning",
        "Tends to avoid conflict",
    ],
    compatibility: Compatibility {
        best: &["INFJ", "INTJ"],
        good: &["ENFJ", "ENTJ"],
        challenging: &["ISTJ", "ESTJ"],
    },
};

static INTJ: TypeProfile = TypeProfile {
    title: "Strategic Thinker",
    description: "You are a strategic and analytical thinker. You enjoy solving complex problems and value your independence.",
    characteristics: &[
        "Strategic thinking and planning",
        "Independent and analytical",
        "High standards and perfectionism",
        "Strong intellectual curiosity",
    ],
    strengths: &[
        "Strategic thinking",
        "Analytical problem solving",
        "Independent judgement",
        "Long-term vision",
    ],
    weaknesses: &[
        "Difficulty expressing emotions",
        "Limited communication with others",
        "Perfectionist streak",
        "Lack of flexibility",
    ],
    compatibility: Compatibility {
        best: &["ENFP", "ENTP"],
        good: &["INFJ", "INTP"],
        challenging: &["ESFP", "ESTP"],
    },
};

static DEFAULT: TypeProfile = TypeProfile {
    title: "Your Type Result",
    description: "This is the result for your personality type.",
    characteristics: &["Analytical thinking", "Independent nature"],
    strengths: &["Logical thinking", "Independence"],
    weaknesses: &["Reserved with emotions", "Communication can be hard"],
    compatibility: Compatibility {
        best: &["ENFP"],
        good: &["INFJ"],
        challenging: &["ESFP"],
    },
};

impl TypeProfile {
    /// Profile for `mbti_type`, or the generic profile when none is written.
    pub fn for_type(mbti_type: MbtiType) -> &'static TypeProfile {
        match mbti_type.letters() {
            [E, N, F, P] => &ENFP,
            [I, N, T, J] => &INTJ,
            _ => &DEFAULT,
        }
    }

    pub fn is_default(&self) -> bool {
        self == &DEFAULT
    }
}
