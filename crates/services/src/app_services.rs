use std::sync::Arc;

use storage::repository::Storage;
use storage::seed::{SeedReport, seed_defaults};
use trivia_core::Picker;

use crate::category_service::CategoryService;
use crate::error::AppServicesError;
use crate::question_service::QuestionService;
use crate::quiz_service::QuizService;

/// Assembles the services the HTTP layer needs over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    storage: Storage,
    questions: Arc<QuestionService>,
    categories: Arc<CategoryService>,
    quizzes: Arc<QuizService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        picker: Arc<dyn Picker>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(storage, picker))
    }

    #[must_use]
    pub fn from_storage(storage: Storage, picker: Arc<dyn Picker>) -> Self {
        let questions = Arc::new(QuestionService::new(Arc::clone(&storage.questions)));
        let categories = Arc::new(CategoryService::new(Arc::clone(&storage.categories)));
        let quizzes = Arc::new(QuizService::new(Arc::clone(&storage.questions), picker));

        Self {
            storage,
            questions,
            categories,
            quizzes,
        }
    }

    /// Insert the default categories and, into an empty bank, the sample questions.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Storage` if seeding fails.
    pub async fn seed_defaults(&self) -> Result<SeedReport, AppServicesError> {
        Ok(seed_defaults(&self.storage).await?)
    }

    #[must_use]
    pub fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn categories(&self) -> Arc<CategoryService> {
        Arc::clone(&self.categories)
    }

    #[must_use]
    pub fn quizzes(&self) -> Arc<QuizService> {
        Arc::clone(&self.quizzes)
    }
}
