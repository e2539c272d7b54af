use crate::entities::audit_trails;
use crate::entities::prelude::AuditTrails;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// The audit trail is read newest-first and filtered by category/event, so
/// it gets covering indexes even though every other table is tiny.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_audit_trails_timestamp")
                    .table(AuditTrails)
                    .col(audit_trails::Column::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_audit_trails_category_event")
                    .table(AuditTrails)
                    .col(audit_trails::Column::Category)
                    .col(audit_trails::Column::Event)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_audit_trails_category_event")
                    .table(AuditTrails)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_audit_trails_timestamp")
                    .table(AuditTrails)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
