use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::db::now_timestamp;
use crate::entities::routers;

#[derive(Debug, Clone)]
pub struct NewRouter {
    pub name: String,
    pub identifier: String,
    pub online: bool,
}

/// Online vs total router counts for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterStats {
    pub online: u64,
    pub total: u64,
}

pub struct RouterRepository {
    conn: DatabaseConnection,
}

impl RouterRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<routers::Model>> {
        routers::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query router by ID")
    }

    pub async fn get_by_identifier(&self, identifier: &str) -> Result<Option<routers::Model>> {
        routers::Entity::find()
            .filter(routers::Column::Identifier.eq(identifier))
            .one(&self.conn)
            .await
            .context("Failed to query router by identifier")
    }

    pub async fn create(&self, new: NewRouter) -> Result<routers::Model> {
        routers::ActiveModel {
            name: Set(new.name),
            identifier: Set(new.identifier),
            online: Set(new.online),
            created_at: Set(now_timestamp()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert router")
    }

    pub async fn list(&self) -> Result<Vec<routers::Model>> {
        routers::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list routers")
    }

    pub async fn stats(&self) -> Result<RouterStats> {
        let total = routers::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count routers")?;

        let online = routers::Entity::find()
            .filter(routers::Column::Online.eq(true))
            .count(&self.conn)
            .await
            .context("Failed to count online routers")?;

        Ok(RouterStats { online, total })
    }
}
