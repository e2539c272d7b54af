pub mod audit;
pub mod firewall_template;
pub mod fleet;
pub mod hotspot_user;
pub mod router;
pub mod tenant;
pub mod user;
