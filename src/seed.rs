// src/seed.rs

//! Sample catalog written at startup when `SEED_SAMPLE_DATA` is enabled.
//! Get-or-create semantics: running it twice changes nothing.

use crate::{
    catalog,
    error::AppError,
    models::{
        category::NewCategory,
        question::{NewOption, NewQuestion},
        quiz::{Difficulty, NewTest},
    },
    scoring::{ScoreVector, TraitLetter},
    store::ContentStore,
};

/// (name, emoji, description, color)
const CATEGORIES: [(&str, &str, &str, &str); 4] = [
    ("Personality", "🧠", "Classic personality type tests", "bg-blue-500"),
    ("Romance", "💕", "How your type shows up in relationships", "bg-pink-500"),
    ("Career", "💼", "Find work that suits your type", "bg-green-500"),
    ("Hobbies", "🎨", "Pastimes that fit your type", "bg-purple-500"),
];

/// (title, description, category index, minutes, difficulty, thumbnail)
const TESTS: [(&str, &str, usize, i32, Difficulty, &str); 6] = [
    ("Basic Personality Type Test", "Discover your basic personality type", 0, 10, Difficulty::Easy, "🧠"),
    ("Dating Style Test", "Find out your dating style", 1, 8, Difficulty::Medium, "💕"),
    ("Career Aptitude Test", "Find the career that fits you", 2, 12, Difficulty::Medium, "💼"),
    ("Hobby Match Test", "Find the hobby that fits you", 3, 6, Difficulty::Easy, "🎨"),
    ("Animated Character Test", "Which animated character are you most like?", 0, 15, Difficulty::Hard, "🏰"),
    ("Energy Style Test", "A quick take on how you recharge", 0, 10, Difficulty::Medium, "⚡"),
];

/// One question per axis: (text, first option, second option).
const QUESTIONS: [(&str, (&str, TraitLetter), (&str, TraitLetter)); 4] = [
    (
        "Where do you feel most at ease?",
        ("Time on my own", TraitLetter::I),
        ("Time with other people", TraitLetter::E),
    ),
    (
        "What do you notice first in a new place?",
        ("Concrete details", TraitLetter::S),
        ("The overall impression", TraitLetter::N),
    ),
    (
        "How do you prefer to solve a problem?",
        ("Logical analysis", TraitLetter::T),
        ("Gut feeling and values", TraitLetter::F),
    ),
    (
        "How do you approach a weekend trip?",
        ("Plan it in detail", TraitLetter::J),
        ("Decide as I go", TraitLetter::P),
    ),
];

fn option(order: i32, text: &str, letter: TraitLetter) -> NewOption {
    NewOption {
        text: text.to_string(),
        order,
        scores: ScoreVector::new([(letter, 2), (letter.opposite(), 0)]),
    }
}

fn sample_questions() -> Vec<NewQuestion> {
    QUESTIONS
        .iter()
        .enumerate()
        .map(|(i, (text, (first, first_letter), (second, second_letter)))| NewQuestion {
            text: text.to_string(),
            order: i as i32 + 1,
            options: vec![
                option(1, first, *first_letter),
                option(2, second, *second_letter),
            ],
        })
        .collect()
}

/// Writes the sample catalog. Returns how many tests were newly created.
pub async fn seed_sample_data<S: ContentStore + ?Sized>(store: &S) -> Result<usize, AppError> {
    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for (name, emoji, description, color) in CATEGORIES {
        let category = store
            .upsert_category(NewCategory {
                name: name.to_string(),
                emoji: emoji.to_string(),
                description: description.to_string(),
                color: color.to_string(),
            })
            .await?;
        category_ids.push(category.id);
    }

    let mut created_count = 0;
    for (title, description, category_index, minutes, difficulty, thumbnail) in TESTS {
        let draft = NewTest {
            title: title.to_string(),
            description: description.to_string(),
            estimated_time: minutes,
            difficulty,
            thumbnail: thumbnail.to_string(),
            questions: sample_questions(),
        };

        let report = catalog::validate(&draft.questions);
        if !report.publishable {
            tracing::warn!("Skipping unpublishable sample test '{}': {:?}", title, report.issues);
            continue;
        }

        let (test, created) = store
            .create_test(category_ids[category_index], draft)
            .await?;
        if created {
            tracing::info!("Seeded test: {}", test.summary.title);
            created_count += 1;
        }
    }

    Ok(created_count)
}
