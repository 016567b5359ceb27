use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CatalogError, CatalogResult, Resource};
use crate::models::{
    Category, CategorySortField, Product, ProductDraft, ProductSortField, User, UserDraft,
    UserSortField,
};
use crate::pagination::{Page, PageRequest, paginate};
use crate::password::hash_password;
use crate::seed;

/// Result of a delete-by-id, decided in a single store call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    Absent,
    /// Dependent records still point at the row
    Referenced,
}

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Page over all products
    async fn scan_paged(&self, page: PageRequest<ProductSortField>) -> CatalogResult<Page<Product>>;

    /// Page over products matching every given filter. `name` matches as a
    /// case-insensitive substring.
    async fn scan_filtered(
        &self,
        page: PageRequest<ProductSortField>,
        category_id: Option<i64>,
        name: Option<String>,
    ) -> CatalogResult<Page<Product>>;

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Product>>;

    /// Persist a product together with its category associations
    async fn insert(&self, draft: ProductDraft) -> CatalogResult<Product>;

    /// Replace every field and the association set; `NotFound` if absent
    async fn replace(&self, id: i64, draft: ProductDraft) -> CatalogResult<Product>;

    async fn delete_by_id(&self, id: i64) -> CatalogResult<DeleteOutcome>;

    async fn count(&self) -> CatalogResult<u64>;
}

/// Repository trait for Category lookups
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Category>>;

    async fn scan_paged(
        &self,
        page: PageRequest<CategorySortField>,
    ) -> CatalogResult<Page<Category>>;
}

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn scan_paged(&self, page: PageRequest<UserSortField>) -> CatalogResult<Page<User>>;

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<User>>;

    /// Case-insensitive lookup by email
    async fn find_by_email(&self, email: &str) -> CatalogResult<Option<User>>;

    async fn email_exists(&self, email: &str) -> CatalogResult<bool>;

    /// Fails `ValidationFailed` on `email` if the address is taken
    async fn insert(&self, draft: UserDraft) -> CatalogResult<User>;

    async fn replace(&self, id: i64, draft: UserDraft) -> CatalogResult<User>;

    async fn delete_by_id(&self, id: i64) -> CatalogResult<DeleteOutcome>;
}

#[derive(Debug, Default)]
struct CatalogState {
    categories: BTreeMap<i64, Category>,
    products: BTreeMap<i64, Product>,
    users: BTreeMap<i64, User>,
    /// product id -> number of dependent records
    dependents: HashMap<i64, usize>,
    next_product_id: i64,
    next_user_id: i64,
}

impl CatalogState {
    fn check_categories(&self, draft: &ProductDraft) -> CatalogResult<()> {
        match draft
            .categories
            .iter()
            .find(|c| !self.categories.contains_key(&c.id))
        {
            Some(missing) => Err(CatalogError::category_not_found(missing.id)),
            None => Ok(()),
        }
    }

    fn email_owner(&self, email: &str) -> Option<&User> {
        self.users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
    }
}

fn email_taken() -> CatalogError {
    CatalogError::invalid("email", "email is already registered")
}

/// In-memory store implementing every catalog repository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalogStore {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with 3 categories, 25 products and 2 users
    pub fn seeded() -> CatalogResult<Self> {
        let mut state = CatalogState::default();

        for category in seed::categories() {
            state.categories.insert(category.id, category);
        }
        for product in seed::products() {
            state.next_product_id = state.next_product_id.max(product.id);
            state.products.insert(product.id, product);
        }
        for (id, (first_name, last_name, email, password, roles)) in (1_i64..).zip(seed::USERS) {
            let user = User {
                id,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: email.to_string(),
                password_hash: hash_password(password)?,
                roles: roles.to_vec(),
            };
            state.next_user_id = id;
            state.users.insert(id, user);
        }

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Record a dependent record (e.g. an order line) pointing at a product
    pub async fn add_dependent(&self, product_id: i64) -> CatalogResult<()> {
        let mut state = self.state.write().await;
        if !state.products.contains_key(&product_id) {
            return Err(CatalogError::product_not_found(product_id));
        }
        *state.dependents.entry(product_id).or_default() += 1;
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalogStore {
    async fn scan_paged(&self, page: PageRequest<ProductSortField>) -> CatalogResult<Page<Product>> {
        let state = self.state.read().await;
        let products = state.products.values().cloned().collect();
        Ok(paginate(products, &page, ProductSortField::compare, |p| p.id))
    }

    async fn scan_filtered(
        &self,
        page: PageRequest<ProductSortField>,
        category_id: Option<i64>,
        name: Option<String>,
    ) -> CatalogResult<Page<Product>> {
        let state = self.state.read().await;
        let needle = name.map(|n| n.to_lowercase());

        let products = state
            .products
            .values()
            .filter(|p| category_id.is_none_or(|id| p.has_category(id)))
            .filter(|p| {
                needle
                    .as_deref()
                    .is_none_or(|n| p.name.to_lowercase().contains(n))
            })
            .cloned()
            .collect();

        Ok(paginate(products, &page, ProductSortField::compare, |p| p.id))
    }

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.get(&id).cloned())
    }

    async fn insert(&self, draft: ProductDraft) -> CatalogResult<Product> {
        let mut state = self.state.write().await;
        state.check_categories(&draft)?;

        state.next_product_id += 1;
        let product = draft.into_product(state.next_product_id);
        state.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn replace(&self, id: i64, draft: ProductDraft) -> CatalogResult<Product> {
        let mut state = self.state.write().await;
        if !state.products.contains_key(&id) {
            return Err(CatalogError::product_not_found(id));
        }
        state.check_categories(&draft)?;

        let product = draft.into_product(id);
        state.products.insert(id, product.clone());

        tracing::info!(product_id = id, "Updated product");
        Ok(product)
    }

    async fn delete_by_id(&self, id: i64) -> CatalogResult<DeleteOutcome> {
        let mut state = self.state.write().await;

        if !state.products.contains_key(&id) {
            return Ok(DeleteOutcome::Absent);
        }
        if state.dependents.get(&id).is_some_and(|n| *n > 0) {
            return Ok(DeleteOutcome::Referenced);
        }

        state.products.remove(&id);
        tracing::info!(product_id = id, "Deleted product");
        Ok(DeleteOutcome::Removed)
    }

    async fn count(&self) -> CatalogResult<u64> {
        let state = self.state.read().await;
        Ok(state.products.len() as u64)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalogStore {
    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Category>> {
        let state = self.state.read().await;
        Ok(state.categories.get(&id).cloned())
    }

    async fn scan_paged(
        &self,
        page: PageRequest<CategorySortField>,
    ) -> CatalogResult<Page<Category>> {
        let state = self.state.read().await;
        let categories = state.categories.values().cloned().collect();
        Ok(paginate(categories, &page, CategorySortField::compare, |c| c.id))
    }
}

#[async_trait]
impl UserRepository for InMemoryCatalogStore {
    async fn scan_paged(&self, page: PageRequest<UserSortField>) -> CatalogResult<Page<User>> {
        let state = self.state.read().await;
        let users = state.users.values().cloned().collect();
        Ok(paginate(users, &page, UserSortField::compare, |u| u.id))
    }

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> CatalogResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.email_owner(email).cloned())
    }

    async fn email_exists(&self, email: &str) -> CatalogResult<bool> {
        let state = self.state.read().await;
        Ok(state.email_owner(email).is_some())
    }

    async fn insert(&self, draft: UserDraft) -> CatalogResult<User> {
        let mut state = self.state.write().await;
        if state.email_owner(&draft.email).is_some() {
            return Err(email_taken());
        }

        state.next_user_id += 1;
        let user = draft.into_user(state.next_user_id);
        state.users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn replace(&self, id: i64, draft: UserDraft) -> CatalogResult<User> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&id) {
            return Err(CatalogError::user_not_found(id));
        }
        if state.email_owner(&draft.email).is_some_and(|u| u.id != id) {
            return Err(email_taken());
        }

        let user = draft.into_user(id);
        state.users.insert(id, user.clone());

        tracing::info!(user_id = id, "Updated user");
        Ok(user)
    }

    async fn delete_by_id(&self, id: i64) -> CatalogResult<DeleteOutcome> {
        let mut state = self.state.write().await;
        match state.users.remove(&id) {
            Some(_) => {
                tracing::info!(user_id = id, "Deleted user");
                Ok(DeleteOutcome::Removed)
            }
            None => Ok(DeleteOutcome::Absent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Direction;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn draft(categories: Vec<Category>) -> ProductDraft {
        ProductDraft {
            name: "Phone".to_string(),
            description: "Good phone".to_string(),
            price: Decimal::new(80_000, 2),
            img_url: None,
            date: Utc::now(),
            categories,
        }
    }

    fn books() -> Category {
        Category {
            id: 1,
            name: "Books".to_string(),
        }
    }

    #[tokio::test]
    async fn test_seeded_store_contents() {
        let store = InMemoryCatalogStore::seeded().unwrap();

        assert_eq!(ProductRepository::count(&store).await.unwrap(), 25);
        let categories = CategoryRepository::scan_paged(&store, PageRequest::of(0, 10))
            .await
            .unwrap();
        assert_eq!(categories.total_elements, 3);
        assert!(store.email_exists("ALEX@gmail.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_assigns_next_id() {
        let store = InMemoryCatalogStore::seeded().unwrap();

        let product = ProductRepository::insert(&store, draft(vec![books()]))
            .await
            .unwrap();

        assert_eq!(product.id, 26);
        assert_eq!(ProductRepository::count(&store).await.unwrap(), 26);
    }

    #[tokio::test]
    async fn test_insert_rejects_unknown_category() {
        let store = InMemoryCatalogStore::new();

        let ghost = Category {
            id: 99,
            name: "Ghost".to_string(),
        };
        let err = ProductRepository::insert(&store, draft(vec![ghost]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CatalogError::NotFound {
                resource: Resource::Category,
                id: 99
            }
        ));
        assert_eq!(ProductRepository::count(&store).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_outcomes() {
        let store = InMemoryCatalogStore::seeded().unwrap();
        store.add_dependent(4).await.unwrap();

        assert_eq!(
            ProductRepository::delete_by_id(&store, 1).await.unwrap(),
            DeleteOutcome::Removed
        );
        assert_eq!(
            ProductRepository::delete_by_id(&store, 1000).await.unwrap(),
            DeleteOutcome::Absent
        );
        assert_eq!(
            ProductRepository::delete_by_id(&store, 4).await.unwrap(),
            DeleteOutcome::Referenced
        );
        assert_eq!(ProductRepository::count(&store).await.unwrap(), 24);
    }

    #[tokio::test]
    async fn test_filtered_scan_matches_name_case_insensitively() {
        let store = InMemoryCatalogStore::seeded().unwrap();

        let page = store
            .scan_filtered(
                PageRequest::of(0, 50).sorted_by(ProductSortField::Price, Direction::Desc),
                Some(3),
                Some("gamer a".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].name, "PC Gamer Alfa");
    }

    #[tokio::test]
    async fn test_user_email_is_unique() {
        let store = InMemoryCatalogStore::seeded().unwrap();

        let err = UserRepository::insert(
            &store,
            UserDraft {
                first_name: "Other".to_string(),
                last_name: "Alex".to_string(),
                email: "alex@GMAIL.com".to_string(),
                password_hash: "hash".to_string(),
                roles: vec![],
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CatalogError::ValidationFailed(e) if e.contains("email")));
    }

    #[test]
    fn test_referenced_message() {
        assert_eq!(
            CatalogError::referenced(Resource::Product, 4).to_string(),
            "Product 4 is referenced by other records"
        );
    }
}
