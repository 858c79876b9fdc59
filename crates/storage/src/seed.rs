//! Default categories and a starter question set.

use trivia_core::model::{Category, CategoryId};

use crate::repository::{NewQuestionRecord, Storage, StorageError};

/// The six categories the trivia frontend ships icons for.
pub const DEFAULT_CATEGORIES: [(u64, &str); 6] = [
    (1, "Science"),
    (2, "Art"),
    (3, "Geography"),
    (4, "History"),
    (5, "Entertainment"),
    (6, "Sports"),
];

/// (question, answer, category, difficulty)
const SAMPLE_QUESTIONS: [(&str, &str, u64, u8); 19] = [
    ("What is the heaviest organ in the human body?", "The Liver", 1, 4),
    ("Who discovered penicillin?", "Alexander Fleming", 1, 3),
    ("Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
    ("What is the chemical symbol for gold?", "Au", 1, 2),
    ("La Giaconda is better known as what?", "Mona Lisa", 2, 3),
    ("How many paintings did Van Gogh sell in his lifetime?", "One", 2, 4),
    (
        "Which American artist was a pioneer of Abstract Expressionism, and a leading exponent of action painting?",
        "Jackson Pollock",
        2,
        2,
    ),
    ("Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
    ("What is the largest lake in Africa?", "Lake Victoria", 3, 2),
    ("In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
    ("The Taj Mahal is located in which Indian city?", "Agra", 3, 2),
    ("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
    ("What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
    ("Who invented Peanut Butter?", "George Washington Carver", 4, 2),
    (
        "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?",
        "Apollo 13",
        5,
        4,
    ),
    (
        "What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?",
        "Tom Cruise",
        5,
        4,
    ),
    ("Which is the only team to play in every soccer World Cup tournament?", "Brazil", 6, 3),
    ("Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
    (
        "What was the title of the 1990 fantasy directed by Tim Burton about a young man with multi-bladed appendages?",
        "Edward Scissorhands",
        5,
        3,
    ),
];

/// Counts of what a seeding run wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub questions: usize,
}

/// Ensure the default categories exist and, if the bank is empty, add the
/// sample questions. Safe to run repeatedly.
///
/// # Errors
///
/// Returns `StorageError` if any read or write fails.
pub async fn seed_defaults(storage: &Storage) -> Result<SeedReport, StorageError> {
    let mut report = SeedReport::default();

    for (id, name) in DEFAULT_CATEGORIES {
        let category = Category::new(CategoryId::new(id), name)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        storage.categories.upsert_category(&category).await?;
        report.categories += 1;
    }

    if !storage.questions.list_questions().await?.is_empty() {
        return Ok(report);
    }

    for (question, answer, category, difficulty) in SAMPLE_QUESTIONS {
        storage
            .questions
            .insert_new_question(NewQuestionRecord {
                question: question.to_string(),
                answer: answer.to_string(),
                category: CategoryId::new(category),
                difficulty,
            })
            .await?;
        report.questions += 1;
    }

    Ok(report)
}
