use sqlx::error::ErrorKind;
use trivia_core::model::{CategoryId, Question, QuestionId};

use super::SqliteRepository;
use super::mapping::{
    category_id_to_i64, map_question_row, question_id_from_i64, question_id_to_i64,
};
use crate::repository::{NewQuestionRecord, QuestionRepository, StorageError};

fn map_write_error(e: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db) = &e {
        match db.kind() {
            ErrorKind::ForeignKeyViolation
            | ErrorKind::CheckViolation
            | ErrorKind::NotNullViolation => {
                return StorageError::Constraint(db.message().to_string());
            }
            ErrorKind::UniqueViolation => return StorageError::Conflict,
            _ if db.message().contains("constraint failed") => {
                return StorageError::Constraint(db.message().to_string());
            }
            _ => {}
        }
    }
    StorageError::Connection(e.to_string())
}

fn map_rows(rows: Vec<sqlx::sqlite::SqliteRow>) -> Result<Vec<Question>, StorageError> {
    let mut questions = Vec::with_capacity(rows.len());
    for row in rows {
        questions.push(map_question_row(&row)?);
    }
    Ok(questions)
}

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, question, answer, category, difficulty
            FROM questions
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        map_rows(rows)
    }

    async fn list_by_category(&self, category: CategoryId) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE category = ?1
            ORDER BY id ASC
            ",
        )
        .bind(category_id_to_i64(category)?)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        map_rows(rows)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StorageError> {
        // LIKE only folds ASCII; filter in Rust so case folding is Unicode-aware.
        let all = self.list_questions().await?;
        Ok(trivia_core::search(term, all))
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE id = ?1
            ",
        )
        .bind(question_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_question_row).transpose()
    }

    async fn insert_new_question(
        &self,
        record: NewQuestionRecord,
    ) -> Result<QuestionId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(record.question)
        .bind(record.answer)
        .bind(category_id_to_i64(record.category)?)
        .bind(i64::from(record.difficulty))
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        question_id_from_i64(res.last_insert_rowid())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(question_id_to_i64(id)?)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
