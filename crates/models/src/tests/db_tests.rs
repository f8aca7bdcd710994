use crate::db::{connect_with_config, DatabaseConfig};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use anyhow::Result;

/// Test connection with custom pool configuration
#[tokio::test]
async fn test_custom_config_connection() -> Result<()> {
    if super::setup_test_db().await?.is_none() {
        return Ok(());
    }

    let config = DatabaseConfig {
        url: crate::db::DATABASE_URL.clone(),
        max_connections: 5,
        min_connections: 1,
        connect_timeout_secs: 10,
        ..DatabaseConfig::default()
    };

    let db = connect_with_config(&config).await?;

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1 as test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let test_value: i32 = row.try_get("", "test")?;
    assert_eq!(test_value, 1);
    Ok(())
}
