use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use time;

use crate::config::Config;
use crate::db::Store;

mod audit;
pub mod auth;
mod dashboard;
mod error;
mod firewall_templates;
mod fleets;
mod hotspot_users;
mod routers;
mod tenants;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

pub struct AppState {
    pub config: Config,
    pub store: Store,
}

impl AppState {
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }
}

pub async fn create_app_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_url,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    Ok(Arc::new(AppState { config, store }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();
    let web_root = state.config.server.web_root.clone();

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(state.config.server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(
            state.config.server.session_ttl_days,
        )));

    let api_router = Router::new()
        .merge(protected_router(state.clone()))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/user", get(auth::current_user))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/tenants", get(tenants::list_tenants))
        .route("/tenants/top", get(tenants::top_tenants))
        .route("/fleets", get(fleets::list_fleets))
        .route("/routers", get(routers::list_routers))
        .route("/routers/stats", get(routers::router_stats))
        .route("/hotspot-users", get(hotspot_users::list_hotspot_users))
        .route(
            "/hotspot-users/stats",
            get(hotspot_users::hotspot_user_stats),
        )
        .route(
            "/firewall-templates",
            get(firewall_templates::list_firewall_templates),
        )
        .route("/audit-trails", get(audit::list_audit_trails))
        .route("/audit-trails/filter", post(audit::filter_audit_trails))
        .route("/dashboard/stats", get(dashboard::dashboard_stats))
        .layer(session_layer)
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    // Client-side routing: unknown paths fall through to the SPA index.
    let spa = ServeDir::new(&web_root)
        .not_found_service(ServeFile::new(format!("{web_root}/index.html")));

    Router::new()
        .nest("/api", api_router)
        .fallback_service(spa)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

fn protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(auth::list_users))
        .route("/tenants", post(tenants::create_tenant))
        .route("/fleets", post(fleets::create_fleet))
        .route("/routers", post(routers::create_router))
        .route("/hotspot-users", post(hotspot_users::create_hotspot_user))
        .route(
            "/firewall-templates",
            post(firewall_templates::create_firewall_template),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::require_auth))
}
