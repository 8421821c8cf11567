use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Migrations run once per test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn test_config() -> Option<DatabaseConfig> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(DatabaseConfig { url, max_connections: 5, min_connections: 1, ..DatabaseConfig::default() })
}

/// Fresh connection to a migrated database, or `None` when no database is configured.
pub async fn get_db() -> anyhow::Result<Option<DatabaseConnection>> {
    let Some(cfg) = test_config() else {
        eprintln!("skip: DATABASE_URL not set");
        return Ok(None);
    };
    MIGRATED
        .get_or_try_init(|| async {
            let db = models::db::connect(&cfg).await?;
            migration::Migrator::up(&db, None).await?;
            anyhow::Ok(())
        })
        .await?;
    Ok(Some(models::db::connect(&cfg).await?))
}
