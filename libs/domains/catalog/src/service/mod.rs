mod category;
mod product;
mod user;

pub use category::CategoryService;
pub use product::ProductService;
pub use user::UserService;
