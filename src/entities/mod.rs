pub mod prelude;

pub mod audit_trails;
pub mod firewall_templates;
pub mod fleets;
pub mod hotspot_users;
pub mod routers;
pub mod tenants;
pub mod users;
