//! Creates a superuser account.
//!
//! The password comes from `--password`, then `SUPERUSER_PASSWORD`; with
//! neither (or `--no-password`) the account gets an unusable password.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tracing::info;

use service::users::{repo::seaorm::SeaOrmUserRepository, UserManager};

#[derive(Parser, Debug)]
#[command(name = "create_superuser")]
#[command(about = "Creates a superuser account", long_about = None)]
struct Args {
    /// Email address for the superuser
    #[arg(long, value_name = "EMAIL", env = "SUPERUSER_EMAIL")]
    email: String,

    /// Password for the superuser
    #[arg(long, value_name = "PASSWORD", env = "SUPERUSER_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Store an unusable password even if one is configured
    #[arg(long)]
    no_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    let args = Args::parse();

    // only the database section matters here; no token secret is needed
    let mut database = configs::load_default().unwrap_or_default().database;
    database.normalize_from_env();
    database.validate()?;
    let db = models::db::connect_with_config(&database).await?;
    migration::Migrator::up(&db, None).await?;

    let manager = UserManager::new(Arc::new(SeaOrmUserRepository { db }));
    let password = if args.no_password { None } else { args.password.as_deref() };
    let user = manager
        .create_superuser(&args.email, password)
        .await
        .with_context(|| format!("creating superuser {}", args.email))?;

    info!(user_id = user.id, email = %user.email, "superuser created");
    println!("Superuser created successfully: {}", user.email);
    Ok(())
}
