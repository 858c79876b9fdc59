use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CategoryId, QuestionId};

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty rating of a question. Zero is a legitimate rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Difficulty(u8);

impl Difficulty {
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = QuestionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map(Self)
            .map_err(|_| QuestionError::DifficultyOutOfRange(value))
    }
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated input for a new question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: Difficulty,
}

impl QuestionDraft {
    /// Check the draft and produce a question that only lacks an id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyQuestion` or `QuestionError::EmptyAnswer`
    /// when the respective text is blank.
    pub fn validate(self) -> Result<ValidatedQuestion, QuestionError> {
        if self.question.trim().is_empty() {
            return Err(QuestionError::EmptyQuestion);
        }
        if self.answer.trim().is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }

        Ok(ValidatedQuestion {
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    question: String,
    answer: String,
    category: CategoryId,
    difficulty: Difficulty,
}

impl ValidatedQuestion {
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn category(&self) -> CategoryId {
        self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn assign_id(self, id: QuestionId) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// A trivia question as held by the question store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    question: String,
    answer: String,
    category: CategoryId,
    difficulty: Difficulty,
}

impl Question {
    /// Rehydrate a question loaded from storage.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the persisted text is blank.
    pub fn from_persisted(
        id: QuestionId,
        question: String,
        answer: String,
        category: CategoryId,
        difficulty: Difficulty,
    ) -> Result<Self, QuestionError> {
        let draft = QuestionDraft {
            question,
            answer,
            category,
            difficulty,
        };
        Ok(draft.validate()?.assign_id(id))
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn category(&self) -> CategoryId {
        self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

//
// ─── QUESTION ERRORS ───────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyQuestion,

    #[error("answer text cannot be empty")]
    EmptyAnswer,

    #[error("difficulty must be between 0 and 255, got {0}")]
    DifficultyOutOfRange(i64),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(question: &str, answer: &str) -> QuestionDraft {
        QuestionDraft {
            question: question.to_string(),
            answer: answer.to_string(),
            category: CategoryId::new(1),
            difficulty: Difficulty::new(2),
        }
    }

    #[test]
    fn question_fails_if_text_blank() {
        let err = draft("   ", "Paris").validate().unwrap_err();
        assert_eq!(err, QuestionError::EmptyQuestion);
    }

    #[test]
    fn question_fails_if_answer_blank() {
        let err = draft("Capital of France?", "").validate().unwrap_err();
        assert_eq!(err, QuestionError::EmptyAnswer);
    }

    #[test]
    fn zero_difficulty_is_accepted() {
        let mut d = draft("Capital of France?", "Paris");
        d.difficulty = Difficulty::new(0);
        let question = d.validate().unwrap().assign_id(QuestionId::new(9));
        assert_eq!(question.difficulty().value(), 0);
    }

    #[test]
    fn difficulty_conversion_rejects_out_of_range() {
        assert_eq!(
            Difficulty::try_from(-1),
            Err(QuestionError::DifficultyOutOfRange(-1))
        );
        assert_eq!(
            Difficulty::try_from(256),
            Err(QuestionError::DifficultyOutOfRange(256))
        );
        assert_eq!(Difficulty::try_from(5), Ok(Difficulty::new(5)));
    }

    #[test]
    fn valid_draft_validates_and_assigns_id() {
        let question = draft("Capital of France?", "Paris")
            .validate()
            .unwrap()
            .assign_id(QuestionId::new(42));

        assert_eq!(question.id(), QuestionId::new(42));
        assert_eq!(question.category(), CategoryId::new(1));
        assert_eq!(question.question(), "Capital of France?");
        assert_eq!(question.answer(), "Paris");
    }
}
