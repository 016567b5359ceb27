use std::sync::Arc;

use core_config::catalog::CatalogConfig;
use tracing::instrument;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CategoryDto, CategorySortField};
use crate::pagination::{Page, PageLimits, PageRequest};
use crate::repository::CategoryRepository;

/// Read-only access to categories
pub struct CategoryService<C: CategoryRepository> {
    repository: Arc<C>,
    limits: PageLimits,
}

impl<C: CategoryRepository> Clone for CategoryService<C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            limits: self.limits,
        }
    }
}

impl<C: CategoryRepository> CategoryService<C> {
    pub fn new(repository: Arc<C>, config: &CatalogConfig) -> Self {
        Self {
            repository,
            limits: PageLimits::from(config),
        }
    }

    pub fn limits(&self) -> &PageLimits {
        &self.limits
    }

    #[instrument(skip(self))]
    pub async fn find_page(
        &self,
        page: PageRequest<CategorySortField>,
    ) -> CatalogResult<Page<CategoryDto>> {
        page.check_size(&self.limits)?;
        let categories = self.repository.scan_paged(page).await?;
        Ok(categories.map(CategoryDto::from))
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> CatalogResult<CategoryDto> {
        self.repository
            .get_by_id(id)
            .await?
            .map(CategoryDto::from)
            .ok_or_else(|| CatalogError::category_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::repository::MockCategoryRepository;

    #[tokio::test]
    async fn test_find_by_id_maps_missing_to_not_found() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_get_by_id().returning(|id| {
            Ok((id == 1).then(|| Category {
                id,
                name: "Books".to_string(),
            }))
        });

        let service = CategoryService::new(Arc::new(repo), &CatalogConfig::default());

        assert_eq!(service.find_by_id(1).await.unwrap().name, "Books");
        assert!(matches!(
            service.find_by_id(5).await,
            Err(CatalogError::NotFound { id: 5, .. })
        ));
    }

    #[tokio::test]
    async fn test_find_page_checks_size_before_store() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_scan_paged().never();

        let service = CategoryService::new(Arc::new(repo), &CatalogConfig::default());

        assert!(service.find_page(PageRequest::of(0, 0)).await.is_err());
    }
}
