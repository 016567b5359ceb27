//! Conversions between persisted entities and transfer shapes.

use crate::models::{
    Category, CategoryDto, Product, ProductCategoryDto, ProductDraft, ProductDto, ProductWriteDto,
    Role, User, UserDraft, UserDto, UserWriteDto,
};

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            img_url: product.img_url,
            date: product.date,
            categories: product
                .categories
                .into_iter()
                .map(|c| ProductCategoryDto {
                    category_id: c.id,
                    category_name: c.name,
                })
                .collect(),
        }
    }
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            roles: user.roles,
        }
    }
}

/// Copies the scalar fields; categories are resolved by the service
pub fn product_draft(dto: &ProductWriteDto) -> ProductDraft {
    ProductDraft {
        name: dto.name.clone(),
        description: dto.description.clone(),
        price: dto.price,
        img_url: dto.img_url.clone(),
        date: dto.date,
        categories: Vec::new(),
    }
}

/// Builds a user draft; an empty role list becomes `[operator]`
pub fn user_draft(dto: &UserWriteDto, password_hash: String) -> UserDraft {
    let mut roles = Vec::with_capacity(dto.roles.len().max(1));
    for role in &dto.roles {
        if !roles.contains(role) {
            roles.push(*role);
        }
    }
    if roles.is_empty() {
        roles.push(Role::default());
    }

    UserDraft {
        first_name: dto.first_name.clone(),
        last_name: dto.last_name.clone(),
        email: dto.email.clone(),
        password_hash,
        roles,
    }
}
