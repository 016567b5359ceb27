use sea_orm::entity::prelude::*;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Role, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    /// JSON array of role names
    pub roles: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for User {
    type Error = CatalogError;

    fn try_from(model: Model) -> CatalogResult<Self> {
        let roles: Vec<Role> = serde_json::from_value(model.roles)
            .map_err(|e| CatalogError::Store(format!("invalid roles for user {}: {}", model.id, e)))?;

        Ok(Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            password_hash: model.password_hash,
            roles,
        })
    }
}
