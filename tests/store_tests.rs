use konnect::config::SecurityConfig;
use konnect::db::{
    AuditEvent, AuditTrailFilter, NewAuditTrail, NewFleet, NewHotspotUser, NewRouter, NewTenant,
    NewUser, Store,
};

async fn spawn_store() -> Store {
    Store::new("sqlite::memory:")
        .await
        .expect("Failed to create store")
}

fn fast_security() -> SecurityConfig {
    SecurityConfig {
        scrypt_log_n: 4,
        scrypt_r: 8,
        scrypt_p: 1,
    }
}

#[tokio::test]
async fn test_user_create_and_verify() {
    let store = spawn_store().await;
    let security = fast_security();

    let user = store
        .create_user(
            NewUser {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "hunter22".to_string(),
                name: "Alice".to_string(),
            },
            &security,
        )
        .await
        .unwrap();

    assert_eq!(user.role, "user");
    assert!(user.avatar.is_none());

    assert!(
        store
            .verify_user_password("alice@example.com", "hunter22", &security)
            .await
            .unwrap()
    );
    assert!(
        !store
            .verify_user_password("alice@example.com", "wrong", &security)
            .await
            .unwrap()
    );
    assert!(
        !store
            .verify_user_password("nobody@example.com", "hunter22", &security)
            .await
            .unwrap()
    );

    // Unique columns back up the proactive duplicate checks
    let duplicate = store
        .create_user(
            NewUser {
                username: "alice".to_string(),
                email: "alice2@example.com".to_string(),
                password: "hunter22".to_string(),
                name: "Alice".to_string(),
            },
            &security,
        )
        .await;
    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_top_tenants_ordering_and_truncation() {
    let store = spawn_store().await;

    for (name, usage) in [("a", 5_i64), ("b", 500), ("c", 50), ("d", 5000)] {
        store
            .create_tenant(NewTenant {
                name: name.to_string(),
                data_usage: usage,
            })
            .await
            .unwrap();
    }

    let top = store.top_tenants(3).await.unwrap();
    let names: Vec<&str> = top.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["d", "b", "c"]);

    let all = store.top_tenants(10).await.unwrap();
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn test_router_and_hotspot_stats() {
    let store = spawn_store().await;

    for (identifier, online) in [("r1", true), ("r2", false), ("r3", true)] {
        store
            .create_router(NewRouter {
                name: format!("Router {identifier}"),
                identifier: identifier.to_string(),
                online,
            })
            .await
            .unwrap();
    }

    let stats = store.router_stats().await.unwrap();
    assert_eq!(stats.online, 2);
    assert_eq!(stats.total, 3);

    let router = store.get_router_by_identifier("r1").await.unwrap().unwrap();

    for (username, active) in [("g1", true), ("g2", false)] {
        store
            .create_hotspot_user(NewHotspotUser {
                username: username.to_string(),
                active,
                router_id: router.id,
            })
            .await
            .unwrap();
    }

    let stats = store.hotspot_user_stats().await.unwrap();
    assert_eq!(stats.active, 1);
    assert_eq!(stats.total, 2);
}

#[tokio::test]
async fn test_dashboard_stats_aggregation() {
    let store = spawn_store().await;

    store
        .create_tenant(NewTenant {
            name: "t1".to_string(),
            data_usage: 300,
        })
        .await
        .unwrap();
    store
        .create_tenant(NewTenant {
            name: "t2".to_string(),
            data_usage: 700,
        })
        .await
        .unwrap();
    store
        .create_fleet(NewFleet {
            name: "f1".to_string(),
        })
        .await
        .unwrap();
    store
        .create_router(NewRouter {
            name: "r1".to_string(),
            identifier: "r1".to_string(),
            online: true,
        })
        .await
        .unwrap();

    let stats = store.dashboard_stats().await.unwrap();
    assert_eq!(stats.total_data_exchanged, 1000);
    assert_eq!(stats.total_tenants, 2);
    assert_eq!(stats.total_fleets, 1);
    assert_eq!(stats.online_routers.online, 1);
    assert_eq!(stats.online_routers.total, 1);
    assert_eq!(stats.hotspot_users.total, 0);
}

#[tokio::test]
async fn test_audit_trail_list_is_newest_first() {
    let store = spawn_store().await;

    for i in 0..3 {
        store
            .create_audit_trail(NewAuditTrail {
                description: format!("entry {i}"),
                event: AuditEvent::Create,
                category: "Tenant".to_string(),
                performed_by: "tester".to_string(),
            })
            .await
            .unwrap();
    }

    let trails = store.list_audit_trails().await.unwrap();
    assert_eq!(trails.len(), 3);
    for pair in trails.windows(2) {
        assert!(pair[0].timestamp >= pair[1].timestamp);
    }
}

#[tokio::test]
async fn test_audit_filter_exact_matches() {
    let store = spawn_store().await;

    store
        .create_audit_trail(NewAuditTrail {
            description: "Tenant Acme was created".to_string(),
            event: AuditEvent::Create,
            category: "Tenant".to_string(),
            performed_by: "alice".to_string(),
        })
        .await
        .unwrap();
    store
        .create_audit_trail(NewAuditTrail {
            description: "User bob logged in".to_string(),
            event: AuditEvent::Login,
            category: "User".to_string(),
            performed_by: "bob".to_string(),
        })
        .await
        .unwrap();

    let trails = store
        .filter_audit_trails(AuditTrailFilter {
            category: Some("Tenant".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(trails.len(), 1);
    assert_eq!(trails[0].performed_by, "alice");

    let trails = store
        .filter_audit_trails(AuditTrailFilter {
            event: Some("Login".to_string()),
            performed_by: Some("bob".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(trails.len(), 1);

    let trails = store
        .filter_audit_trails(AuditTrailFilter {
            event: Some("Login".to_string()),
            performed_by: Some("alice".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(trails.is_empty());
}

#[tokio::test]
async fn test_audit_filter_date_range_constrains_results() {
    use konnect::entities::audit_trails;
    use sea_orm::{ActiveModelTrait, ActiveValue::Set};

    let store = spawn_store().await;

    // Rows at known instants, inserted out of order
    for (day, description) in [
        ("2025-03-10", "middle"),
        ("2025-03-01", "early"),
        ("2025-03-20", "late"),
    ] {
        audit_trails::ActiveModel {
            description: Set(description.to_string()),
            event: Set("Create".to_string()),
            category: Set("Tenant".to_string()),
            performed_by: Set("tester".to_string()),
            timestamp: Set(format!("{day}T12:00:00.000Z")),
            ..Default::default()
        }
        .insert(&store.conn)
        .await
        .unwrap();
    }

    let trails = store
        .filter_audit_trails(AuditTrailFilter {
            start_timestamp: Some("2025-03-05T00:00:00.000Z".to_string()),
            end_timestamp: Some("2025-03-15T23:59:59.999Z".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(trails.len(), 1);
    assert_eq!(trails[0].description, "middle");

    // Inclusive lower bound
    let trails = store
        .filter_audit_trails(AuditTrailFilter {
            start_timestamp: Some("2025-03-10T12:00:00.000Z".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let descriptions: Vec<&str> = trails.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descriptions, vec!["late", "middle"]);

    // Open-ended upper bound only
    let trails = store
        .filter_audit_trails(AuditTrailFilter {
            end_timestamp: Some("2025-03-01T12:00:00.000Z".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(trails.len(), 1);
    assert_eq!(trails[0].description, "early");
}

#[tokio::test]
async fn test_firewall_template_roundtrip() {
    let store = spawn_store().await;

    let template = store
        .create_firewall_template(konnect::db::NewFirewallTemplate {
            name: "Default deny".to_string(),
        })
        .await
        .unwrap();

    let fetched = store
        .get_firewall_template(template.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.name, "Default deny");
    assert_eq!(store.list_firewall_templates().await.unwrap().len(), 1);
}
