use std::sync::Arc;

use storage::repository::CategoryRepository;
use tracing::debug;
use trivia_core::{CategoryMap, format_categories};

use crate::error::CategoryServiceError;

/// Read access to categories in the shape clients consume.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    #[must_use]
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    /// All categories as an id -> name mapping.
    ///
    /// # Errors
    ///
    /// Returns `CategoryServiceError::Storage` if repository access fails.
    pub async fn categories(&self) -> Result<CategoryMap, CategoryServiceError> {
        let categories = self.categories.list_categories().await?;
        let map = format_categories(&categories);
        debug!(count = map.len(), "listed categories");
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use storage::repository::InMemoryRepository;
    use trivia_core::model::{Category, CategoryId};

    #[tokio::test]
    async fn empty_store_gives_empty_map() {
        let service = CategoryService::new(Arc::new(InMemoryRepository::new()));
        assert!(service.categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn maps_stored_categories() {
        let repo = InMemoryRepository::new();
        for (id, name) in [(2, "Art"), (1, "Science")] {
            repo.upsert_category(&Category::new(CategoryId::new(id), name).unwrap())
                .await
                .unwrap();
        }
        let service = CategoryService::new(Arc::new(repo));

        let map = service.categories().await.unwrap();
        let names: Vec<_> = map.values().map(String::as_str).collect();
        assert_eq!(names, vec!["Science", "Art"]);
    }
}
