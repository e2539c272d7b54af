pub use super::audit_trails::Entity as AuditTrails;
pub use super::firewall_templates::Entity as FirewallTemplates;
pub use super::fleets::Entity as Fleets;
pub use super::hotspot_users::Entity as HotspotUsers;
pub use super::routers::Entity as Routers;
pub use super::tenants::Entity as Tenants;
pub use super::users::Entity as Users;
