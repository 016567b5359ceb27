use std::sync::Arc;

use core_config::catalog::CatalogConfig;
use tracing::instrument;

use crate::error::{CatalogError, CatalogResult, Resource};
use crate::mapper;
use crate::models::{Category, ProductDto, ProductSortField, ProductWriteDto};
use crate::pagination::{Page, PageLimits, PageRequest};
use crate::repository::{CategoryRepository, DeleteOutcome, ProductRepository};
use crate::validation;

/// Service layer for product queries and mutations
pub struct ProductService<P: ProductRepository, C: CategoryRepository> {
    products: Arc<P>,
    categories: Arc<C>,
    limits: PageLimits,
}

impl<P: ProductRepository, C: CategoryRepository> Clone for ProductService<P, C> {
    fn clone(&self) -> Self {
        Self {
            products: Arc::clone(&self.products),
            categories: Arc::clone(&self.categories),
            limits: self.limits,
        }
    }
}

impl<P: ProductRepository, C: CategoryRepository> ProductService<P, C> {
    pub fn new(products: Arc<P>, categories: Arc<C>, config: &CatalogConfig) -> Self {
        Self {
            products,
            categories,
            limits: PageLimits::from(config),
        }
    }

    pub fn limits(&self) -> &PageLimits {
        &self.limits
    }

    /// Page over products. A category id of 0 and a blank name mean "no filter".
    #[instrument(skip(self))]
    pub async fn find_page(
        &self,
        page: PageRequest<ProductSortField>,
        category_id: Option<i64>,
        name: Option<String>,
    ) -> CatalogResult<Page<ProductDto>> {
        page.check_size(&self.limits)?;

        let category_id = category_id.filter(|id| *id != 0);
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let products = if category_id.is_none() && name.is_none() {
            self.products.scan_paged(page).await?
        } else {
            self.products.scan_filtered(page, category_id, name).await?
        };

        Ok(products.map(ProductDto::from))
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> CatalogResult<ProductDto> {
        self.products
            .get_by_id(id)
            .await?
            .map(ProductDto::from)
            .ok_or_else(|| CatalogError::product_not_found(id))
    }

    #[instrument(skip(self, dto), fields(name = %dto.name))]
    pub async fn insert(&self, dto: ProductWriteDto) -> CatalogResult<ProductDto> {
        validation::validate_product(&dto)?;

        let mut draft = mapper::product_draft(&dto);
        draft.categories = self.resolve_categories(&dto.category_ids).await?;

        let product = self.products.insert(draft).await?;
        Ok(product.into())
    }

    #[instrument(skip(self, dto))]
    pub async fn update(&self, id: i64, dto: ProductWriteDto) -> CatalogResult<ProductDto> {
        if self.products.get_by_id(id).await?.is_none() {
            return Err(CatalogError::product_not_found(id));
        }
        validation::validate_product(&dto)?;

        let mut draft = mapper::product_draft(&dto);
        draft.categories = self.resolve_categories(&dto.category_ids).await?;

        let product = self.products.replace(id, draft).await?;
        Ok(product.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> CatalogResult<()> {
        match self.products.delete_by_id(id).await? {
            DeleteOutcome::Removed => Ok(()),
            DeleteOutcome::Absent => Err(CatalogError::product_not_found(id)),
            DeleteOutcome::Referenced => Err(CatalogError::referenced(Resource::Product, id)),
        }
    }

    /// Resolves ids in order, keeping the first occurrence of duplicates
    async fn resolve_categories(&self, ids: &[i64]) -> CatalogResult<Vec<Category>> {
        let mut resolved: Vec<Category> = Vec::with_capacity(ids.len());
        for &id in ids {
            if resolved.iter().any(|c| c.id == id) {
                continue;
            }
            let category = self
                .categories
                .get_by_id(id)
                .await?
                .ok_or_else(|| CatalogError::category_not_found(id))?;
            resolved.push(category);
        }
        Ok(resolved)
    }
}
