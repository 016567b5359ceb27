use std::sync::Arc;

use core_config::catalog::CatalogConfig;
use tracing::instrument;

use crate::error::{CatalogError, CatalogResult, Resource};
use crate::mapper;
use crate::models::{UserDto, UserSortField, UserWriteDto};
use crate::pagination::{Page, PageLimits, PageRequest};
use crate::password::hash_password;
use crate::repository::{DeleteOutcome, UserRepository};
use crate::validation::{Operation, PasswordPolicy, UserValidator};

/// Service layer for user accounts
pub struct UserService<U: UserRepository> {
    repository: Arc<U>,
    validator: UserValidator<U>,
    limits: PageLimits,
}

impl<U: UserRepository> Clone for UserService<U> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            validator: self.validator.clone(),
            limits: self.limits,
        }
    }
}

impl<U: UserRepository> UserService<U> {
    pub fn new(repository: Arc<U>, config: &CatalogConfig) -> Self {
        let validator = UserValidator::new(Arc::clone(&repository), PasswordPolicy::from(config));
        Self {
            repository,
            validator,
            limits: PageLimits::from(config),
        }
    }

    pub fn limits(&self) -> &PageLimits {
        &self.limits
    }

    #[instrument(skip(self))]
    pub async fn find_page(&self, page: PageRequest<UserSortField>) -> CatalogResult<Page<UserDto>> {
        page.check_size(&self.limits)?;
        let users = self.repository.scan_paged(page).await?;
        Ok(users.map(UserDto::from))
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> CatalogResult<UserDto> {
        self.repository
            .get_by_id(id)
            .await?
            .map(UserDto::from)
            .ok_or_else(|| CatalogError::user_not_found(id))
    }

    #[instrument(skip(self, dto), fields(email = %dto.email))]
    pub async fn insert(&self, dto: UserWriteDto) -> CatalogResult<UserDto> {
        self.validator.validate(Operation::Insert, &dto).await?;

        let password = dto
            .password
            .as_deref()
            .ok_or_else(|| CatalogError::invalid("password", "password is required"))?;
        let draft = mapper::user_draft(&dto, hash_password(password)?);

        let user = self.repository.insert(draft).await?;
        Ok(user.into())
    }

    /// Replaces the user's fields; the stored hash is kept when no password is given
    #[instrument(skip(self, dto), fields(email = %dto.email))]
    pub async fn update(&self, id: i64, dto: UserWriteDto) -> CatalogResult<UserDto> {
        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::user_not_found(id))?;
        self.validator.validate(Operation::Update(id), &dto).await?;

        let password_hash = match dto.password.as_deref() {
            Some(password) => hash_password(password)?,
            None => existing.password_hash,
        };
        let draft = mapper::user_draft(&dto, password_hash);

        let user = self.repository.replace(id, draft).await?;
        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> CatalogResult<()> {
        match self.repository.delete_by_id(id).await? {
            DeleteOutcome::Removed => Ok(()),
            DeleteOutcome::Absent => Err(CatalogError::user_not_found(id)),
            DeleteOutcome::Referenced => Err(CatalogError::referenced(Resource::User, id)),
        }
    }
}
