//! sea-orm entities for the catalog tables.

pub mod category;
pub mod order_item;
pub mod product;
pub mod product_category;
pub mod user;
