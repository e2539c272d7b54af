use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::db::now_timestamp;
use crate::entities::firewall_templates;

#[derive(Debug, Clone)]
pub struct NewFirewallTemplate {
    pub name: String,
}

pub struct FirewallTemplateRepository {
    conn: DatabaseConnection,
}

impl FirewallTemplateRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<firewall_templates::Model>> {
        firewall_templates::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query firewall template by ID")
    }

    pub async fn create(&self, new: NewFirewallTemplate) -> Result<firewall_templates::Model> {
        firewall_templates::ActiveModel {
            name: Set(new.name),
            created_at: Set(now_timestamp()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert firewall template")
    }

    pub async fn list(&self) -> Result<Vec<firewall_templates::Model>> {
        firewall_templates::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list firewall templates")
    }
}
