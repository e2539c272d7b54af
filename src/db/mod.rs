use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::entities::{audit_trails, firewall_templates, fleets, hotspot_users, routers, tenants};

pub mod migrator;
pub mod repositories;

pub use repositories::audit::{AuditEvent, AuditTrailFilter, NewAuditTrail};
pub use repositories::firewall_template::NewFirewallTemplate;
pub use repositories::fleet::NewFleet;
pub use repositories::hotspot_user::{HotspotUserStats, NewHotspotUser};
pub use repositories::router::{NewRouter, RouterStats};
pub use repositories::tenant::NewTenant;
pub use repositories::user::{NewUser, User};

/// Current time as a fixed-width RFC 3339 UTC string (millisecond
/// precision). Lexicographic order on these strings is chronological, which
/// the audit trail relies on for ordering and range filters.
#[must_use]
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Everything the dashboard landing page needs in one bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_data_exchanged: i64,
    pub hotspot_users: HotspotUserStats,
    pub online_routers: RouterStats,
    pub total_tenants: u64,
    pub total_fleets: u64,
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        // A pooled in-memory sqlite would give every connection its own
        // empty database, so it always runs on a single connection.
        let (max_connections, min_connections) = if db_url.contains(":memory:") {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn tenant_repo(&self) -> repositories::tenant::TenantRepository {
        repositories::tenant::TenantRepository::new(self.conn.clone())
    }

    fn fleet_repo(&self) -> repositories::fleet::FleetRepository {
        repositories::fleet::FleetRepository::new(self.conn.clone())
    }

    fn router_repo(&self) -> repositories::router::RouterRepository {
        repositories::router::RouterRepository::new(self.conn.clone())
    }

    fn hotspot_user_repo(&self) -> repositories::hotspot_user::HotspotUserRepository {
        repositories::hotspot_user::HotspotUserRepository::new(self.conn.clone())
    }

    fn firewall_template_repo(
        &self,
    ) -> repositories::firewall_template::FirewallTemplateRepository {
        repositories::firewall_template::FirewallTemplateRepository::new(self.conn.clone())
    }

    fn audit_repo(&self) -> repositories::audit::AuditRepository {
        repositories::audit::AuditRepository::new(self.conn.clone())
    }

    // Users

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn create_user(&self, new: NewUser, security: &SecurityConfig) -> Result<User> {
        self.user_repo().create(new, security).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list().await
    }

    pub async fn verify_user_password(
        &self,
        email: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<bool> {
        self.user_repo()
            .verify_password(email, password, security)
            .await
    }

    // Tenants

    pub async fn get_tenant(&self, id: i32) -> Result<Option<tenants::Model>> {
        self.tenant_repo().get(id).await
    }

    pub async fn create_tenant(&self, new: NewTenant) -> Result<tenants::Model> {
        self.tenant_repo().create(new).await
    }

    pub async fn list_tenants(&self) -> Result<Vec<tenants::Model>> {
        self.tenant_repo().list().await
    }

    pub async fn top_tenants(&self, limit: u64) -> Result<Vec<tenants::Model>> {
        self.tenant_repo().top_by_data_usage(limit).await
    }

    pub async fn count_tenants(&self) -> Result<u64> {
        self.tenant_repo().count().await
    }

    // Fleets

    pub async fn get_fleet(&self, id: i32) -> Result<Option<fleets::Model>> {
        self.fleet_repo().get(id).await
    }

    pub async fn create_fleet(&self, new: NewFleet) -> Result<fleets::Model> {
        self.fleet_repo().create(new).await
    }

    pub async fn list_fleets(&self) -> Result<Vec<fleets::Model>> {
        self.fleet_repo().list().await
    }

    pub async fn count_fleets(&self) -> Result<u64> {
        self.fleet_repo().count().await
    }

    // Routers

    pub async fn get_router(&self, id: i32) -> Result<Option<routers::Model>> {
        self.router_repo().get(id).await
    }

    pub async fn get_router_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<routers::Model>> {
        self.router_repo().get_by_identifier(identifier).await
    }

    pub async fn create_router(&self, new: NewRouter) -> Result<routers::Model> {
        self.router_repo().create(new).await
    }

    pub async fn list_routers(&self) -> Result<Vec<routers::Model>> {
        self.router_repo().list().await
    }

    pub async fn router_stats(&self) -> Result<RouterStats> {
        self.router_repo().stats().await
    }

    // Hotspot users

    pub async fn get_hotspot_user(&self, id: i32) -> Result<Option<hotspot_users::Model>> {
        self.hotspot_user_repo().get(id).await
    }

    pub async fn create_hotspot_user(&self, new: NewHotspotUser) -> Result<hotspot_users::Model> {
        self.hotspot_user_repo().create(new).await
    }

    pub async fn list_hotspot_users(&self) -> Result<Vec<hotspot_users::Model>> {
        self.hotspot_user_repo().list().await
    }

    pub async fn hotspot_user_stats(&self) -> Result<HotspotUserStats> {
        self.hotspot_user_repo().stats().await
    }

    // Firewall templates

    pub async fn get_firewall_template(
        &self,
        id: i32,
    ) -> Result<Option<firewall_templates::Model>> {
        self.firewall_template_repo().get(id).await
    }

    pub async fn create_firewall_template(
        &self,
        new: NewFirewallTemplate,
    ) -> Result<firewall_templates::Model> {
        self.firewall_template_repo().create(new).await
    }

    pub async fn list_firewall_templates(&self) -> Result<Vec<firewall_templates::Model>> {
        self.firewall_template_repo().list().await
    }

    // Audit trails

    pub async fn create_audit_trail(&self, new: NewAuditTrail) -> Result<audit_trails::Model> {
        self.audit_repo().create(new).await
    }

    pub async fn list_audit_trails(&self) -> Result<Vec<audit_trails::Model>> {
        self.audit_repo().list().await
    }

    pub async fn filter_audit_trails(
        &self,
        filter: AuditTrailFilter,
    ) -> Result<Vec<audit_trails::Model>> {
        self.audit_repo().filter(filter).await
    }

    // Dashboard

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let hotspot_users = self.hotspot_user_stats().await?;
        let online_routers = self.router_stats().await?;
        let total_tenants = self.count_tenants().await?;
        let total_fleets = self.count_fleets().await?;
        let total_data_exchanged = self.tenant_repo().total_data_usage().await?;

        Ok(DashboardStats {
            total_data_exchanged,
            hotspot_users,
            online_routers,
            total_tenants,
            total_fleets,
        })
    }
}
