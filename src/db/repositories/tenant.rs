use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set,
};

use crate::db::now_timestamp;
use crate::entities::tenants;

#[derive(Debug, Clone)]
pub struct NewTenant {
    pub name: String,
    pub data_usage: i64,
}

pub struct TenantRepository {
    conn: DatabaseConnection,
}

impl TenantRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<tenants::Model>> {
        tenants::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query tenant by ID")
    }

    pub async fn create(&self, new: NewTenant) -> Result<tenants::Model> {
        tenants::ActiveModel {
            name: Set(new.name),
            data_usage: Set(new.data_usage),
            created_at: Set(now_timestamp()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert tenant")
    }

    pub async fn list(&self) -> Result<Vec<tenants::Model>> {
        tenants::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list tenants")
    }

    /// Top tenants by cumulative data usage, descending.
    pub async fn top_by_data_usage(&self, limit: u64) -> Result<Vec<tenants::Model>> {
        tenants::Entity::find()
            .order_by_desc(tenants::Column::DataUsage)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to query top tenants")
    }

    pub async fn count(&self) -> Result<u64> {
        tenants::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count tenants")
    }

    /// Sum of data usage across all tenants.
    pub async fn total_data_usage(&self) -> Result<i64> {
        let rows = self.list().await?;
        Ok(rows.iter().map(|t| t.data_usage).sum())
    }
}
