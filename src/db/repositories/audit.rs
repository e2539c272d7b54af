use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::fmt;

use crate::db::now_timestamp;
use crate::entities::audit_trails;

/// Event kind recorded with every audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEvent {
    Create,
    Delete,
    Update,
    Download,
    Login,
    Logout,
    Reset,
}

impl AuditEvent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Delete => "Delete",
            Self::Update => "Update",
            Self::Download => "Download",
            Self::Login => "Login",
            Self::Logout => "Logout",
            Self::Reset => "Reset",
        }
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct NewAuditTrail {
    pub description: String,
    pub event: AuditEvent,
    pub category: String,
    pub performed_by: String,
}

/// Exact-match filters plus an inclusive timestamp range. Timestamps are
/// the fixed-width RFC 3339 strings produced by [`now_timestamp`], so the
/// range is applied with plain string comparison.
#[derive(Debug, Clone, Default)]
pub struct AuditTrailFilter {
    pub category: Option<String>,
    pub event: Option<String>,
    pub performed_by: Option<String>,
    pub start_timestamp: Option<String>,
    pub end_timestamp: Option<String>,
}

pub struct AuditRepository {
    conn: DatabaseConnection,
}

impl AuditRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<audit_trails::Model>> {
        audit_trails::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query audit trail by ID")
    }

    pub async fn create(&self, new: NewAuditTrail) -> Result<audit_trails::Model> {
        audit_trails::ActiveModel {
            description: Set(new.description),
            event: Set(new.event.as_str().to_string()),
            category: Set(new.category),
            performed_by: Set(new.performed_by),
            timestamp: Set(now_timestamp()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert audit trail entry")
    }

    /// All entries, newest first.
    pub async fn list(&self) -> Result<Vec<audit_trails::Model>> {
        audit_trails::Entity::find()
            .order_by_desc(audit_trails::Column::Timestamp)
            .all(&self.conn)
            .await
            .context("Failed to list audit trails")
    }

    /// Filtered entries, newest first.
    pub async fn filter(&self, filter: AuditTrailFilter) -> Result<Vec<audit_trails::Model>> {
        let mut query = audit_trails::Entity::find();

        if let Some(category) = filter.category {
            query = query.filter(audit_trails::Column::Category.eq(category));
        }
        if let Some(event) = filter.event {
            query = query.filter(audit_trails::Column::Event.eq(event));
        }
        if let Some(performed_by) = filter.performed_by {
            query = query.filter(audit_trails::Column::PerformedBy.eq(performed_by));
        }
        if let Some(start) = filter.start_timestamp {
            query = query.filter(audit_trails::Column::Timestamp.gte(start));
        }
        if let Some(end) = filter.end_timestamp {
            query = query.filter(audit_trails::Column::Timestamp.lte(end));
        }

        query
            .order_by_desc(audit_trails::Column::Timestamp)
            .all(&self.conn)
            .await
            .context("Failed to filter audit trails")
    }
}
