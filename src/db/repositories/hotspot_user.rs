use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::db::now_timestamp;
use crate::entities::hotspot_users;

#[derive(Debug, Clone)]
pub struct NewHotspotUser {
    pub username: String,
    pub active: bool,
    pub router_id: i32,
}

/// Active vs total hotspot user counts for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotspotUserStats {
    pub active: u64,
    pub total: u64,
}

pub struct HotspotUserRepository {
    conn: DatabaseConnection,
}

impl HotspotUserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<hotspot_users::Model>> {
        hotspot_users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query hotspot user by ID")
    }

    pub async fn create(&self, new: NewHotspotUser) -> Result<hotspot_users::Model> {
        hotspot_users::ActiveModel {
            username: Set(new.username),
            active: Set(new.active),
            router_id: Set(new.router_id),
            created_at: Set(now_timestamp()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert hotspot user")
    }

    pub async fn list(&self) -> Result<Vec<hotspot_users::Model>> {
        hotspot_users::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list hotspot users")
    }

    pub async fn stats(&self) -> Result<HotspotUserStats> {
        let total = hotspot_users::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count hotspot users")?;

        let active = hotspot_users::Entity::find()
            .filter(hotspot_users::Column::Active.eq(true))
            .count(&self.conn)
            .await
            .context("Failed to count active hotspot users")?;

        Ok(HotspotUserStats { active, total })
    }
}
