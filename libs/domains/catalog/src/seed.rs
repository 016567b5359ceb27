//! Fixture loaded by [`InMemoryCatalogStore::seeded`](crate::repository::InMemoryCatalogStore::seeded)
//! and mirrored by the seed migration.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::models::{Category, Product, Role};

pub const CATEGORIES: [(i64, &str); 3] = [(1, "Books"), (2, "Electronics"), (3, "Computers")];

const DESCRIPTION: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
     eiusmod tempor incididunt ut labore et dolore magna aliqua.";

/// name, price in cents, category ids
pub const PRODUCTS: [(&str, i64, &[i64]); 25] = [
    ("The Lord of the Rings", 9_050, &[1]),
    ("Smart TV", 219_000, &[2]),
    ("Macbook Pro", 125_000, &[2, 3]),
    ("PC Gamer", 120_000, &[3]),
    ("Rails for Dummies", 10_099, &[1]),
    ("PC Gamer Ex", 135_000, &[3]),
    ("PC Gamer X", 135_000, &[3]),
    ("PC Gamer Alfa", 185_000, &[3]),
    ("PC Gamer Tera", 195_000, &[3]),
    ("PC Gamer Y", 170_000, &[3]),
    ("PC Gamer Nitro", 145_000, &[3]),
    ("PC Gamer Card", 185_000, &[3]),
    ("PC Gamer Plus", 135_000, &[3]),
    ("PC Gamer Hera", 225_000, &[3]),
    ("PC Gamer Weed", 220_000, &[3]),
    ("PC Gamer Max", 235_000, &[3]),
    ("PC Gamer Turbo", 128_000, &[3]),
    ("PC Gamer Hot", 145_000, &[3]),
    ("PC Gamer Ez", 175_000, &[3]),
    ("PC Gamer Tr", 165_000, &[3]),
    ("PC Gamer Tx", 168_000, &[3]),
    ("PC Gamer Tu", 185_000, &[3]),
    ("PC Gamer Foo", 155_000, &[3]),
    ("PC Gamer Boo", 193_000, &[3]),
    ("PC Gamer Min", 222_500, &[3]),
];

/// first name, last name, email, plain password, roles
pub const USERS: [(&str, &str, &str, &str, &[Role]); 2] = [
    ("Alex", "Brown", "alex@gmail.com", "catalog-123", &[Role::Operator]),
    (
        "Maria",
        "Green",
        "maria@gmail.com",
        "catalog-123",
        &[Role::Operator, Role::Admin],
    ),
];

pub fn categories() -> Vec<Category> {
    CATEGORIES
        .iter()
        .map(|(id, name)| Category {
            id: *id,
            name: (*name).to_string(),
        })
        .collect()
}

fn release_date(id: i64) -> DateTime<Utc> {
    let base = Utc
        .with_ymd_and_hms(2020, 7, 13, 20, 50, 7)
        .single()
        .unwrap_or_default();
    base + Duration::days(id - 1)
}

pub fn products() -> Vec<Product> {
    let categories = categories();

    PRODUCTS
        .iter()
        .zip(1_i64..)
        .map(|((name, cents, category_ids), id)| Product {
            id,
            name: (*name).to_string(),
            description: DESCRIPTION.to_string(),
            price: Decimal::new(*cents, 2),
            img_url: Some(format!("https://img.example.com/products/{}-big.jpg", id)),
            date: release_date(id),
            categories: category_ids
                .iter()
                .filter_map(|cid| categories.iter().find(|c| c.id == *cid).cloned())
                .collect(),
        })
        .collect()
}
