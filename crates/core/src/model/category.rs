use thiserror::Error;

use crate::model::ids::CategoryId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("category name cannot be empty")]
    EmptyName,
}

/// A question category, e.g. "Science".
///
/// Categories are read-only from the point of view of the quiz API; they are
/// created by seeding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    name: String,
}

impl Category {
    /// # Errors
    ///
    /// Returns `CategoryError::EmptyName` if the name is blank.
    pub fn new(id: CategoryId, name: impl Into<String>) -> Result<Self, CategoryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CategoryError::EmptyName);
        }
        Ok(Self { id, name })
    }

    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    /// Display name of the category (the `type` column in storage).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
