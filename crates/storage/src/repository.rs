use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use trivia_core::model::{Category, CategoryId, Question, QuestionId, ValidatedQuestion};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Insert payload for a question whose id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewQuestionRecord {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: u8,
}

impl NewQuestionRecord {
    #[must_use]
    pub fn from_validated(question: &ValidatedQuestion) -> Self {
        Self {
            question: question.question().to_owned(),
            answer: question.answer().to_owned(),
            category: question.category(),
            difficulty: question.difficulty().value(),
        }
    }
}

/// Repository contract for the question bank.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// All questions ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError>;

    /// Questions of one category ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn list_by_category(&self, category: CategoryId) -> Result<Vec<Question>, StorageError>;

    /// Questions whose text contains `term`, case-insensitively, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StorageError>;

    /// Fetch a question by id.
    ///
    /// Returns `Ok(None)` when no such question exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError>;

    /// Persist a new question and return its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Constraint` if the category does not exist, or
    /// other storage errors.
    async fn insert_new_question(
        &self,
        record: NewQuestionRecord,
    ) -> Result<QuestionId, StorageError>;

    /// Delete a question by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no question had this id, or other
    /// storage errors.
    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError>;
}

/// Repository contract for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError>;

    /// Persist or rename a category.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the category cannot be stored.
    async fn upsert_category(&self, category: &Category) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<BTreeMap<QuestionId, Question>>>,
    categories: Arc<Mutex<BTreeMap<CategoryId, Category>>>,
    next_question_id: Arc<Mutex<u64>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            questions: Arc::new(Mutex::new(BTreeMap::new())),
            categories: Arc::new(Mutex::new(BTreeMap::new())),
            next_question_id: Arc::new(Mutex::new(1)),
        }
    }

    fn snapshot(&self) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.values().cloned().collect())
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        self.snapshot()
    }

    async fn list_by_category(&self, category: CategoryId) -> Result<Vec<Question>, StorageError> {
        let mut questions = self.snapshot()?;
        questions.retain(|q| q.category() == category);
        Ok(questions)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StorageError> {
        Ok(trivia_core::search(term, self.snapshot()?))
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id).cloned())
    }

    async fn insert_new_question(
        &self,
        record: NewQuestionRecord,
    ) -> Result<QuestionId, StorageError> {
        let category_known = self
            .categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?
            .contains_key(&record.category);
        if !category_known {
            return Err(StorageError::Constraint(format!(
                "unknown category {}",
                record.category
            )));
        }

        let mut next = self
            .next_question_id
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let id = QuestionId::new(*next);
        let question = Question::from_persisted(
            id,
            record.question,
            record.answer,
            record.category,
            trivia_core::model::Difficulty::new(record.difficulty),
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(id, question);
        *next += 1;
        Ok(id)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(&id).map(|_| ()).ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let guard = self
            .categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.values().cloned().collect())
    }

    async fn upsert_category(&self, category: &Category) -> Result<(), StorageError> {
        let mut guard = self
            .categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(category.id(), category.clone());
        Ok(())
    }
}

/// Aggregates the question and category repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
    pub categories: Arc<dyn CategoryRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryRepository::new())
    }

    /// Wrap an existing in-memory repository so tests can keep a handle to it.
    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo.clone());
        let categories: Arc<dyn CategoryRepository> = Arc::new(repo);
        Self {
            questions,
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::model::{Difficulty, QuestionDraft};

    fn record(text: &str, category: u64) -> NewQuestionRecord {
        let validated = QuestionDraft {
            question: text.to_string(),
            answer: "A".to_string(),
            category: CategoryId::new(category),
            difficulty: Difficulty::new(1),
        }
        .validate()
        .unwrap();
        NewQuestionRecord::from_validated(&validated)
    }

    async fn seeded_repo() -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        for (id, name) in [(1, "Science"), (2, "Art")] {
            let category = Category::new(CategoryId::new(id), name).unwrap();
            repo.upsert_category(&category).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn assigns_increasing_ids_and_lists_in_order() {
        let repo = seeded_repo().await;
        let a = repo.insert_new_question(record("First?", 1)).await.unwrap();
        let b = repo.insert_new_question(record("Second?", 2)).await.unwrap();
        assert!(a < b);

        let all = repo.list_questions().await.unwrap();
        let ids: Vec<_> = all.iter().map(Question::id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[tokio::test]
    async fn rejects_unknown_category() {
        let repo = seeded_repo().await;
        let err = repo
            .insert_new_question(record("Orphan?", 99))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Constraint(_)));
        assert!(repo.list_questions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let repo = seeded_repo().await;
        let a = repo.insert_new_question(record("First?", 1)).await.unwrap();
        repo.delete_question(a).await.unwrap();
        let b = repo.insert_new_question(record("Second?", 1)).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let repo = seeded_repo().await;
        let err = repo.delete_question(QuestionId::new(5)).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn filters_by_category_and_search_term() {
        let repo = seeded_repo().await;
        repo.insert_new_question(record("Why is the Sun hot?", 1))
            .await
            .unwrap();
        repo.insert_new_question(record("Who painted the Mona Lisa?", 2))
            .await
            .unwrap();

        let art = repo.list_by_category(CategoryId::new(2)).await.unwrap();
        assert_eq!(art.len(), 1);
        assert_eq!(art[0].question(), "Who painted the Mona Lisa?");

        let sun = repo.search_questions("sun").await.unwrap();
        assert_eq!(sun.len(), 1);
        assert_eq!(sun[0].category(), CategoryId::new(1));
    }
}
