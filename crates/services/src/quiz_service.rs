use std::collections::HashSet;
use std::sync::Arc;

use storage::repository::QuestionRepository;
use tracing::debug;
use trivia_core::model::{Question, QuestionId};
use trivia_core::{CategoryFilter, Picker, select_next};

use crate::error::QuizServiceError;

/// One "next question" request of a running quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizRequest {
    /// Ids already asked in this quiz session.
    pub previous: HashSet<QuestionId>,
    pub category: CategoryFilter,
}

/// Draws quiz questions at random, never repeating within a session.
#[derive(Clone)]
pub struct QuizService {
    questions: Arc<dyn QuestionRepository>,
    picker: Arc<dyn Picker>,
}

impl QuizService {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionRepository>, picker: Arc<dyn Picker>) -> Self {
        Self { questions, picker }
    }

    /// Pick the next question, or `None` once every eligible question has
    /// been asked.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if repository access fails.
    pub async fn next_question(
        &self,
        request: &QuizRequest,
    ) -> Result<Option<Question>, QuizServiceError> {
        let candidates = match request.category {
            CategoryFilter::Any => self.questions.list_questions().await?,
            CategoryFilter::Only(category) => self.questions.list_by_category(category).await?,
        };

        let next = select_next(
            &candidates,
            &request.previous,
            request.category,
            self.picker.as_ref(),
        )
        .cloned();

        debug!(
            previous = request.previous.len(),
            candidates = candidates.len(),
            picked = next.as_ref().map(|q| q.id().value()),
            "selected next quiz question"
        );
        Ok(next)
    }
}
