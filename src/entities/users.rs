use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,

    /// Salted scrypt hash, `<hex derived key>.<hex salt>`
    pub password: String,

    #[sea_orm(unique)]
    pub email: String,

    /// Display name
    pub name: String,

    pub avatar: Option<String>,

    /// Either "user" or "admin"
    pub role: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
