//! Service tests against the seeded in-memory store
//!
//! Fixture: 3 categories, 25 products (ids 1..=25), 2 users.

use chrono::Utc;
use core_config::catalog::CatalogConfig;
use domain_catalog::*;
use rust_decimal::Decimal;
use std::sync::Arc;

const EXISTING_ID: i64 = 1;
const NON_EXISTING_ID: i64 = 1000;
const DEPENDENT_ID: i64 = 4;
const TOTAL_PRODUCTS: u64 = 25;

struct Fixture {
    store: Arc<InMemoryCatalogStore>,
    products: ProductService<InMemoryCatalogStore, InMemoryCatalogStore>,
    users: UserService<InMemoryCatalogStore>,
}

fn fixture() -> Fixture {
    let store = Arc::new(InMemoryCatalogStore::seeded().unwrap());
    let config = CatalogConfig::default();
    Fixture {
        products: ProductService::new(store.clone(), store.clone(), &config),
        users: UserService::new(store.clone(), &config),
        store,
    }
}

fn product_write(category_ids: Vec<i64>) -> ProductWriteDto {
    ProductWriteDto {
        name: "Phone".to_string(),
        description: "Good phone".to_string(),
        price: Decimal::new(80_012, 2),
        img_url: Some("https://img.example.com/phone.png".to_string()),
        date: Utc::now(),
        category_ids,
    }
}

fn user_write(email: &str, password: Option<&str>) -> UserWriteDto {
    UserWriteDto {
        first_name: "Ana".to_string(),
        last_name: "White".to_string(),
        email: email.to_string(),
        roles: vec![Role::Operator],
        password: password.map(str::to_string),
    }
}

async fn product_count(store: &InMemoryCatalogStore) -> u64 {
    ProductRepository::count(store).await.unwrap()
}

#[tokio::test]
async fn test_find_page_respects_size_and_returns_empty_past_the_end() {
    let f = fixture();

    let first = f
        .products
        .find_page(PageRequest::of(0, 10), None, None)
        .await
        .unwrap();
    assert_eq!(first.content.len(), 10);
    assert_eq!(first.total_elements, TOTAL_PRODUCTS);
    assert_eq!(first.total_pages, 3);

    let last = f
        .products
        .find_page(PageRequest::of(2, 10), None, None)
        .await
        .unwrap();
    assert_eq!(last.content.len(), 5);

    let beyond = f
        .products
        .find_page(PageRequest::of(50, 10), None, None)
        .await
        .unwrap();
    assert!(beyond.is_empty());
    assert_eq!(beyond.total_elements, TOTAL_PRODUCTS);
}

#[tokio::test]
async fn test_find_page_sorted_by_name() {
    let f = fixture();

    let page = f
        .products
        .find_page(
            PageRequest::of(0, 12).sorted_by(ProductSortField::Name, Direction::Asc),
            None,
            None,
        )
        .await
        .unwrap();

    assert_eq!(page.total_elements, TOTAL_PRODUCTS);
    let names: Vec<&str> = page.content.iter().take(3).map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Macbook Pro", "PC Gamer", "PC Gamer Alfa"]);
}

#[tokio::test]
async fn test_find_page_sort_ties_break_by_id() {
    let f = fixture();

    let page = f
        .products
        .find_page(
            PageRequest::of(0, 25).sorted_by(ProductSortField::Price, Direction::Desc),
            None,
            None,
        )
        .await
        .unwrap();

    // "PC Gamer Alfa", "PC Gamer Card" and "PC Gamer Tu" share a price
    let tied: Vec<i64> = page
        .content
        .iter()
        .filter(|p| p.price == Decimal::new(185_000, 2))
        .map(|p| p.id)
        .collect();
    assert_eq!(tied, vec![8, 12, 22]);
    assert!(page
        .content
        .windows(2)
        .all(|w| w[0].price >= w[1].price));
}

#[tokio::test]
async fn test_find_page_by_category_only_returns_members() {
    let f = fixture();

    let page = f
        .products
        .find_page(PageRequest::of(0, 50), Some(1), None)
        .await
        .unwrap();

    assert_eq!(page.total_elements, 2);
    assert!(page
        .content
        .iter()
        .all(|p| p.categories.iter().any(|c| c.category_id == 1)));
}

#[tokio::test]
async fn test_find_page_filters_compose() {
    let f = fixture();

    let page = f
        .products
        .find_page(PageRequest::of(0, 50), Some(2), Some("PC".to_string()))
        .await
        .unwrap();
    assert!(page.is_empty());

    let page = f
        .products
        .find_page(PageRequest::of(0, 50), Some(3), Some("macbook".to_string()))
        .await
        .unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].name, "Macbook Pro");
}

#[tokio::test]
async fn test_find_by_id_existing_and_missing() {
    let f = fixture();

    let dto = f.products.find_by_id(EXISTING_ID).await.unwrap();
    assert_eq!(dto.id, EXISTING_ID);
    assert_eq!(dto.name, "The Lord of the Rings");
    assert_eq!(dto.price, Decimal::new(9_050, 2));

    let err = f.products.find_by_id(NON_EXISTING_ID).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::NotFound {
            resource: Resource::Product,
            id: NON_EXISTING_ID
        }
    ));
}

#[tokio::test]
async fn test_insert_then_find_returns_same_product() {
    let f = fixture();
    let input = product_write(vec![3, 2]);

    let created = f.products.insert(input.clone()).await.unwrap();
    let found = f.products.find_by_id(created.id).await.unwrap();

    assert_eq!(created.id, TOTAL_PRODUCTS as i64 + 1);
    assert_eq!(found, created);
    assert_eq!(found.name, input.name);
    assert_eq!(found.price, input.price);
    assert_eq!(found.date, input.date);

    let mut category_ids: Vec<i64> = found.categories.iter().map(|c| c.category_id).collect();
    category_ids.sort();
    assert_eq!(category_ids, vec![2, 3]);
    assert_eq!(product_count(&f.store).await, TOTAL_PRODUCTS + 1);
}

#[tokio::test]
async fn test_insert_with_unknown_category_fails_and_leaves_count() {
    let f = fixture();

    let err = f.products.insert(product_write(vec![1, 42])).await.unwrap_err();

    assert!(matches!(
        err,
        CatalogError::NotFound {
            resource: Resource::Category,
            id: 42
        }
    ));
    assert_eq!(product_count(&f.store).await, TOTAL_PRODUCTS);
}

#[tokio::test]
async fn test_update_replaces_scalars_and_categories() {
    let f = fixture();
    let mut input = product_write(vec![1]);
    input.name = "Smart TV 4K".to_string();

    let updated = f.products.update(2, input).await.unwrap();

    assert_eq!(updated.id, 2);
    assert_eq!(updated.name, "Smart TV 4K");
    assert_eq!(updated.categories.len(), 1);
    assert_eq!(updated.categories[0].category_name, "Books");
    assert_eq!(f.products.find_by_id(2).await.unwrap(), updated);
}

#[tokio::test]
async fn test_update_missing_product_fails_without_mutation() {
    let f = fixture();
    let before = f
        .products
        .find_page(PageRequest::of(0, 25), None, None)
        .await
        .unwrap();

    let err = f
        .products
        .update(NON_EXISTING_ID, product_write(vec![1]))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::NotFound { .. }));
    let after = f
        .products
        .find_page(PageRequest::of(0, 25), None, None)
        .await
        .unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_delete_existing_then_lookup_fails() {
    let f = fixture();

    f.products.delete(EXISTING_ID).await.unwrap();

    assert!(matches!(
        f.products.find_by_id(EXISTING_ID).await,
        Err(CatalogError::NotFound { .. })
    ));
    assert_eq!(product_count(&f.store).await, TOTAL_PRODUCTS - 1);
}

#[tokio::test]
async fn test_delete_missing_or_referenced_leaves_count() {
    let f = fixture();
    f.store.add_dependent(DEPENDENT_ID).await.unwrap();

    assert!(matches!(
        f.products.delete(NON_EXISTING_ID).await,
        Err(CatalogError::NotFound { .. })
    ));
    assert!(matches!(
        f.products.delete(DEPENDENT_ID).await,
        Err(CatalogError::Conflict(_))
    ));
    assert_eq!(product_count(&f.store).await, TOTAL_PRODUCTS);
}

#[tokio::test]
async fn test_user_insert_requires_password_but_update_does_not() {
    let f = fixture();

    let err = f
        .users
        .insert(user_write("ana@gmail.com", None))
        .await
        .unwrap_err();
    let CatalogError::ValidationFailed(errors) = err else {
        panic!("expected validation failure");
    };
    assert!(errors.contains("password"));

    let created = f
        .users
        .insert(user_write("ana@gmail.com", Some("catalog-123")))
        .await
        .unwrap();

    let mut change = user_write("ana@gmail.com", None);
    change.first_name = "Anna".to_string();
    let updated = f.users.update(created.id, change).await.unwrap();
    assert_eq!(updated.first_name, "Anna");
}

#[tokio::test]
async fn test_user_with_duplicate_email_is_rejected() {
    let f = fixture();

    f.users
        .insert(user_write("twice@gmail.com", Some("catalog-123")))
        .await
        .unwrap();
    let err = f
        .users
        .insert(user_write("twice@gmail.com", Some("catalog-456")))
        .await
        .unwrap_err();

    let CatalogError::ValidationFailed(errors) = err else {
        panic!("expected validation failure");
    };
    assert_eq!(errors.get("email").unwrap(), ["email is already registered"]);
}

#[tokio::test]
async fn test_user_cannot_take_another_users_email() {
    let f = fixture();

    // user 1 is alex@gmail.com, user 2 is maria@gmail.com
    let err = f
        .users
        .update(2, user_write("alex@gmail.com", None))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::ValidationFailed(e) if e.contains("email")));
}

#[tokio::test]
async fn test_user_reads_never_expose_password() {
    let f = fixture();

    let page = f.users.find_page(PageRequest::of(0, 10)).await.unwrap();
    let json = serde_json::to_string(&page).unwrap();

    assert_eq!(page.total_elements, 2);
    assert!(!json.contains("password"));
    assert!(!json.contains("argon2"));
}
