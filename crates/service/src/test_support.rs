use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_config() -> Option<DatabaseConfig> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(DatabaseConfig { url, min_connections: 1, ..DatabaseConfig::default() })
}

/// A migrated Postgres connection, or `None` when no database is configured.
pub async fn get_db() -> anyhow::Result<Option<DatabaseConnection>> {
    let Some(cfg) = test_config() else {
        eprintln!("skip: DATABASE_URL missing or SKIP_DB_TESTS set");
        return Ok(None);
    };
    let migrated = MIGRATED
        .get_or_init(|| async {
            match connect_with_config(&cfg).await {
                Ok(db) => migration::Migrator::up(&db, None).await.is_ok(),
                Err(_) => false,
            }
        })
        .await;
    if !*migrated {
        anyhow::bail!("could not migrate test database");
    }
    // Fresh connection for the current test's runtime
    Ok(Some(connect_with_config(&cfg).await?))
}

pub fn unique_codigo() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("S{}", &id[..7]).to_uppercase()
}

pub fn unique_email() -> String {
    format!("svc-{}@example.com", uuid::Uuid::new_v4().simple())
}
