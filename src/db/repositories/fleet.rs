use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};

use crate::db::now_timestamp;
use crate::entities::fleets;

#[derive(Debug, Clone)]
pub struct NewFleet {
    pub name: String,
}

pub struct FleetRepository {
    conn: DatabaseConnection,
}

impl FleetRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<fleets::Model>> {
        fleets::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query fleet by ID")
    }

    pub async fn create(&self, new: NewFleet) -> Result<fleets::Model> {
        fleets::ActiveModel {
            name: Set(new.name),
            created_at: Set(now_timestamp()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert fleet")
    }

    pub async fn list(&self) -> Result<Vec<fleets::Model>> {
        fleets::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list fleets")
    }

    pub async fn count(&self) -> Result<u64> {
        fleets::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count fleets")
    }
}
