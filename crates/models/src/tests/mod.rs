use sea_orm::DatabaseConnection;
use migration::MigratorTrait;

/// Database connection tests
pub mod db_tests;


/// Connect and migrate, or `None` when no Postgres is configured for tests.
pub(crate) async fn setup_test_db() -> anyhow::Result<Option<DatabaseConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        eprintln!("skip: DATABASE_URL missing or SKIP_DB_TESTS set");
        return Ok(None);
    }
    let db = crate::db::connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Some(db))
}

/// An 8-character code unlikely to collide across concurrent test runs.
pub(crate) fn unique_codigo() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("T{}", &id[..7]).to_uppercase()
}
