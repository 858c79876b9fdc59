use std::sync::Arc;

use storage::repository::{NewQuestionRecord, QuestionRepository, StorageError};
use tracing::{debug, info};
use trivia_core::model::{CategoryId, Question, QuestionDraft, QuestionId};
use trivia_core::{Page, PageNumber, paginate};

use crate::error::QuestionServiceError;

/// Browsing, searching, creating and deleting questions.
#[derive(Clone)]
pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    /// One page of the whole bank, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn list_questions(
        &self,
        page: PageNumber,
    ) -> Result<Page<Question>, QuestionServiceError> {
        let all = self.questions.list_questions().await?;
        let page_items = paginate(page, all);
        debug!(
            page = page.value(),
            returned = page_items.items.len(),
            total = page_items.total,
            "listed questions"
        );
        Ok(page_items)
    }

    /// One page of the questions in `category`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn list_by_category(
        &self,
        category: CategoryId,
        page: PageNumber,
    ) -> Result<Page<Question>, QuestionServiceError> {
        let matching = self.questions.list_by_category(category).await?;
        let page_items = paginate(page, matching);
        debug!(
            category = category.value(),
            page = page.value(),
            total = page_items.total,
            "listed questions by category"
        );
        Ok(page_items)
    }

    /// One page of the questions whose text contains `term`.
    ///
    /// `term` should already be known to be non-blank.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn search(
        &self,
        term: &str,
        page: PageNumber,
    ) -> Result<Page<Question>, QuestionServiceError> {
        let matching = self.questions.search_questions(term).await?;
        let page_items = paginate(page, matching);
        debug!(term, total = page_items.total, "searched questions");
        Ok(page_items)
    }

    /// Validate and persist a new question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Question` for validation failures.
    /// Returns `QuestionServiceError::Storage` if persistence fails.
    pub async fn create_question(
        &self,
        draft: QuestionDraft,
    ) -> Result<QuestionId, QuestionServiceError> {
        let validated = draft.validate()?;
        let id = self
            .questions
            .insert_new_question(NewQuestionRecord::from_validated(&validated))
            .await?;
        info!(
            question_id = id.value(),
            category = validated.category().value(),
            "created question"
        );
        Ok(id)
    }

    /// Delete a question by id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::NotFound` if the question does not exist.
    /// Returns `QuestionServiceError::Storage` if the delete fails.
    pub async fn delete_question(&self, id: QuestionId) -> Result<(), QuestionServiceError> {
        if self.questions.get_question(id).await?.is_none() {
            return Err(QuestionServiceError::NotFound(id));
        }

        match self.questions.delete_question(id).await {
            Ok(()) => {
                info!(question_id = id.value(), "deleted question");
                Ok(())
            }
            // Removed between the lookup and the delete.
            Err(StorageError::NotFound) => Err(QuestionServiceError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }
}
