use sea_orm::entity::prelude::*;

/// Append-only log of state-changing actions. Rows are never updated or
/// deleted through the API.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_trails")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub description: String,

    /// Create, Delete, Update, Download, Login, Logout or Reset
    pub event: String,

    /// Entity type name, e.g. "Tenant" or "Hotspot User"
    pub category: String,

    pub performed_by: String,

    /// RFC 3339 UTC, fixed width so lexicographic order is chronological
    pub timestamp: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
