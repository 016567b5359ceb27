use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, SqlErr,
    TransactionTrait,
};
use std::collections::HashMap;

use crate::entity::{category, order_item, product, product_category, user};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CategorySortField, Product, ProductDraft, ProductSortField, User, UserDraft,
    UserSortField,
};
use crate::pagination::{Direction, Page, PageRequest};
use crate::repository::{CategoryRepository, DeleteOutcome, ProductRepository, UserRepository};

/// PostgreSQL-backed store implementing every catalog repository
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    db: DatabaseConnection,
}

impl PgCatalogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert an order line for `product_id`, blocking its deletion
    pub async fn add_dependent(&self, product_id: i64) -> CatalogResult<()> {
        order_item::ActiveModel {
            id: NotSet,
            product_id: Set(product_id),
            quantity: Set(1),
        }
        .insert(&self.db)
        .await
        .map_err(|err| match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                CatalogError::product_not_found(product_id)
            }
            _ => err.into(),
        })?;
        Ok(())
    }

    async fn product_page(
        &self,
        query: Select<product::Entity>,
        page: &PageRequest<ProductSortField>,
    ) -> CatalogResult<Page<Product>> {
        let total = query.clone().count(&self.db).await?;
        let models = ordered(query, &page.sort, product_column)
            .order_by_asc(product::Column::Id)
            .offset(page.offset())
            .limit(page.size)
            .all(&self.db)
            .await?;

        let content = hydrate(&self.db, models).await?;
        Ok(Page::new(content, page.page, page.size, total))
    }
}

fn order(direction: Direction) -> Order {
    match direction {
        Direction::Asc => Order::Asc,
        Direction::Desc => Order::Desc,
    }
}

fn ordered<E: EntityTrait, F: Copy, C: ColumnTrait>(
    mut query: Select<E>,
    keys: &[crate::pagination::SortKey<F>],
    column: impl Fn(F) -> C,
) -> Select<E> {
    for key in keys {
        query = query.order_by(column(key.field), order(key.direction));
    }
    query
}

fn product_column(field: ProductSortField) -> product::Column {
    match field {
        ProductSortField::Id => product::Column::Id,
        ProductSortField::Name => product::Column::Name,
        ProductSortField::Price => product::Column::Price,
        ProductSortField::Date => product::Column::Date,
    }
}

fn category_column(field: CategorySortField) -> category::Column {
    match field {
        CategorySortField::Id => category::Column::Id,
        CategorySortField::Name => category::Column::Name,
    }
}

fn user_column(field: UserSortField) -> user::Column {
    match field {
        UserSortField::Id => user::Column::Id,
        UserSortField::FirstName => user::Column::FirstName,
        UserSortField::LastName => user::Column::LastName,
        UserSortField::Email => user::Column::Email,
    }
}

fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Attach categories to product rows, keeping each product's association order
async fn hydrate<C: ConnectionTrait>(
    conn: &C,
    models: Vec<product::Model>,
) -> CatalogResult<Vec<Product>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
    let links = product_category::Entity::find()
        .filter(product_category::Column::ProductId.is_in(ids))
        .order_by_asc(product_category::Column::ProductId)
        .order_by_asc(product_category::Column::Position)
        .find_also_related(category::Entity)
        .all(conn)
        .await?;

    let mut by_product: HashMap<i64, Vec<Category>> = HashMap::new();
    for (link, category) in links {
        if let Some(category) = category {
            by_product
                .entry(link.product_id)
                .or_default()
                .push(category.into());
        }
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let categories = by_product.remove(&model.id).unwrap_or_default();
            model.into_product(categories)
        })
        .collect())
}

/// Share-locks the requested categories for the rest of the transaction and
/// reports the first id that no longer exists
async fn lock_categories<C: ConnectionTrait>(
    conn: &C,
    categories: &[Category],
) -> CatalogResult<()> {
    let ids: Vec<i64> = categories.iter().map(|c| c.id).collect();
    let found: Vec<i64> = category::Entity::find()
        .select_only()
        .column(category::Column::Id)
        .filter(category::Column::Id.is_in(ids.clone()))
        .lock_shared()
        .into_tuple()
        .all(conn)
        .await?;

    match ids.into_iter().find(|id| !found.contains(id)) {
        Some(missing) => Err(CatalogError::category_not_found(missing)),
        None => Ok(()),
    }
}

async fn write_links<C: ConnectionTrait>(
    conn: &C,
    product_id: i64,
    categories: &[Category],
) -> CatalogResult<()> {
    if categories.is_empty() {
        return Ok(());
    }
    lock_categories(conn, categories).await?;

    let links = categories
        .iter()
        .zip(0_i32..)
        .map(|(category, position)| product_category::ActiveModel {
            product_id: Set(product_id),
            category_id: Set(category.id),
            position: Set(position),
        });

    product_category::Entity::insert_many(links).exec(conn).await?;
    Ok(())
}

fn apply_draft(active: &mut product::ActiveModel, draft: &ProductDraft) {
    active.name = Set(draft.name.clone());
    active.description = Set(draft.description.clone());
    active.price = Set(draft.price);
    active.img_url = Set(draft.img_url.clone());
    active.date = Set(draft.date.into());
}

fn user_write_err(err: DbErr) -> CatalogError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            CatalogError::invalid("email", "email is already registered")
        }
        _ => err.into(),
    }
}

fn roles_json(draft: &UserDraft) -> CatalogResult<serde_json::Value> {
    serde_json::to_value(&draft.roles).map_err(|e| CatalogError::Store(e.to_string()))
}

#[async_trait]
impl ProductRepository for PgCatalogStore {
    async fn scan_paged(&self, page: PageRequest<ProductSortField>) -> CatalogResult<Page<Product>> {
        self.product_page(product::Entity::find(), &page).await
    }

    async fn scan_filtered(
        &self,
        page: PageRequest<ProductSortField>,
        category_id: Option<i64>,
        name: Option<String>,
    ) -> CatalogResult<Page<Product>> {
        let mut query = product::Entity::find();

        if let Some(category_id) = category_id {
            query = query.filter(
                product::Column::Id.in_subquery(
                    Query::select()
                        .column(product_category::Column::ProductId)
                        .from(product_category::Entity)
                        .and_where(product_category::Column::CategoryId.eq(category_id))
                        .to_owned(),
                ),
            );
        }

        if let Some(name) = name {
            query = query.filter(Expr::cust_with_values(
                r#"LOWER("products"."name") LIKE ?"#,
                [like_pattern(&name)],
            ));
        }

        self.product_page(query, &page).await
    }

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Product>> {
        let Some(model) = product::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(hydrate(&self.db, vec![model]).await?.pop())
    }

    async fn insert(&self, draft: ProductDraft) -> CatalogResult<Product> {
        let txn = self.db.begin().await?;

        let mut active = product::ActiveModel {
            id: NotSet,
            ..Default::default()
        };
        apply_draft(&mut active, &draft);
        let model = active.insert(&txn).await?;
        write_links(&txn, model.id, &draft.categories).await?;

        txn.commit().await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into_product(draft.categories))
    }

    async fn replace(&self, id: i64, draft: ProductDraft) -> CatalogResult<Product> {
        let txn = self.db.begin().await?;

        let existing = product::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| CatalogError::product_not_found(id))?;

        let mut active: product::ActiveModel = existing.into();
        apply_draft(&mut active, &draft);
        let model = active.update(&txn).await?;

        product_category::Entity::delete_many()
            .filter(product_category::Column::ProductId.eq(id))
            .exec(&txn)
            .await?;
        write_links(&txn, id, &draft.categories).await?;

        txn.commit().await?;

        tracing::info!(product_id = id, "Updated product");
        Ok(model.into_product(draft.categories))
    }

    async fn delete_by_id(&self, id: i64) -> CatalogResult<DeleteOutcome> {
        match product::Entity::delete_by_id(id).exec(&self.db).await {
            Ok(result) if result.rows_affected == 0 => Ok(DeleteOutcome::Absent),
            Ok(_) => {
                tracing::info!(product_id = id, "Deleted product");
                Ok(DeleteOutcome::Removed)
            }
            Err(err) => match err.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => Ok(DeleteOutcome::Referenced),
                _ => Err(err.into()),
            },
        }
    }

    async fn count(&self) -> CatalogResult<u64> {
        Ok(product::Entity::find().count(&self.db).await?)
    }
}

#[async_trait]
impl CategoryRepository for PgCatalogStore {
    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Category>> {
        let model = category::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn scan_paged(
        &self,
        page: PageRequest<CategorySortField>,
    ) -> CatalogResult<Page<Category>> {
        let query = category::Entity::find();
        let total = query.clone().count(&self.db).await?;
        let models = ordered(query, &page.sort, category_column)
            .order_by_asc(category::Column::Id)
            .offset(page.offset())
            .limit(page.size)
            .all(&self.db)
            .await?;

        let content = models.into_iter().map(Into::into).collect();
        Ok(Page::new(content, page.page, page.size, total))
    }
}

#[async_trait]
impl UserRepository for PgCatalogStore {
    async fn scan_paged(&self, page: PageRequest<UserSortField>) -> CatalogResult<Page<User>> {
        let query = user::Entity::find();
        let total = query.clone().count(&self.db).await?;
        let models = ordered(query, &page.sort, user_column)
            .order_by_asc(user::Column::Id)
            .offset(page.offset())
            .limit(page.size)
            .all(&self.db)
            .await?;

        let content = models
            .into_iter()
            .map(User::try_from)
            .collect::<CatalogResult<Vec<_>>>()?;
        Ok(Page::new(content, page.page, page.size, total))
    }

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<User>> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> CatalogResult<Option<User>> {
        user::Entity::find()
            .filter(Expr::cust_with_values(
                r#"LOWER("users"."email") = LOWER(?)"#,
                [email.to_string()],
            ))
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn email_exists(&self, email: &str) -> CatalogResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn insert(&self, draft: UserDraft) -> CatalogResult<User> {
        let model = user::ActiveModel {
            id: NotSet,
            first_name: Set(draft.first_name.clone()),
            last_name: Set(draft.last_name.clone()),
            email: Set(draft.email.clone()),
            password_hash: Set(draft.password_hash.clone()),
            roles: Set(roles_json(&draft)?),
        }
        .insert(&self.db)
        .await
        .map_err(user_write_err)?;

        tracing::info!(user_id = model.id, "Created user");
        Ok(draft.into_user(model.id))
    }

    async fn replace(&self, id: i64, draft: UserDraft) -> CatalogResult<User> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| CatalogError::user_not_found(id))?;

        let mut active: user::ActiveModel = existing.into();
        active.first_name = Set(draft.first_name.clone());
        active.last_name = Set(draft.last_name.clone());
        active.email = Set(draft.email.clone());
        active.password_hash = Set(draft.password_hash.clone());
        active.roles = Set(roles_json(&draft)?);
        active.update(&self.db).await.map_err(user_write_err)?;

        tracing::info!(user_id = id, "Updated user");
        Ok(draft.into_user(id))
    }

    async fn delete_by_id(&self, id: i64) -> CatalogResult<DeleteOutcome> {
        let result = user::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Ok(DeleteOutcome::Absent);
        }
        tracing::info!(user_id = id, "Deleted user");
        Ok(DeleteOutcome::Removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("PC Gamer"), "%pc gamer%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
