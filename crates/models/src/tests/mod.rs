//! Database-backed entity tests; run only when `DATABASE_URL` is set.

use chrono::Utc;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{booking, db, provider_request, service, user, RequestStatus, Role};

/// Connect and migrate, or `None` when no database is configured.
async fn setup_test_db() -> anyhow::Result<Option<DatabaseConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(None);
    }
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("skip: DATABASE_URL not set");
        return Ok(None);
    };
    let cfg = DatabaseConfig { url, ..DatabaseConfig::default() };
    let db = db::connect(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Some(db))
}

#[tokio::test]
async fn user_role_is_stored_as_text() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let email = format!("entity_{}@example.com", Uuid::new_v4());
    let created = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.clone()),
        role: Set(Role::Provider),
        extra: Set(serde_json::json!({"name": "Ada"})),
        created_at: Set(Utc::now().into()),
    }
    .insert(&db)
    .await?;

    let found = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(&db)
        .await?
        .expect("user row");
    assert_eq!(found.role, Role::Provider);
    assert_eq!(found.extra["name"], "Ada");

    user::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn other_collections_insert_and_delete() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };
    let now = Utc::now();

    let req = provider_request::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set("applicant@example.com".into()),
        status: Set(RequestStatus::Pending),
        extra: Set(serde_json::json!({})),
        created_at: Set(now.into()),
    }
    .insert(&db)
    .await?;
    assert_eq!(req.status, RequestStatus::Pending);

    let svc = service::ActiveModel {
        id: Set(Uuid::new_v4()),
        provider_email: Set(Some("pro@example.com".into())),
        service_name: Set("Deep clean".into()),
        description: Set(None),
        category: Set("Cleaning".into()),
        price: Set(42.5),
        ratings: Set(4.0),
        extra: Set(serde_json::json!({})),
        created_at: Set(now.into()),
    }
    .insert(&db)
    .await?;
    assert_eq!(svc.price, 42.5);

    let booking = booking::ActiveModel {
        id: Set(Uuid::new_v4()),
        customer_email: Set(Some("c@example.com".into())),
        service_id: Set(Some(svc.id.to_string())),
        extra: Set(serde_json::json!({"note": "ring twice"})),
        booked_at: Set(now.into()),
    }
    .insert(&db)
    .await?;

    booking::Entity::delete_by_id(booking.id).exec(&db).await?;
    service::Entity::delete_by_id(svc.id).exec(&db).await?;
    provider_request::Entity::delete_by_id(req.id).exec(&db).await?;
    Ok(())
}
