//! Demo data seed script
//!
//! Seeds the demo user with two sample weeks (last week and this week),
//! each with its bullets and generated insight. Weeks that already have an
//! entry are skipped, so running it twice is harmless.
//!
//! Usage:
//!   DATABASE_URL=sqlite://bullet_journal.db ./seed-demo
//!
//! Environment variables:
//!   DATABASE_URL  — SQLite database (default: sqlite://bullet_journal.db)
//!   DEMO_USER_ID  — User to seed (default: test-user)

use anyhow::{Context, Result};

use bullet_journal_api::config::Config;
use bullet_journal_api::db::{create_pool, run_migrations, seed::seed_demo_data};
use bullet_journal_api::services::week;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bullet_journal_api=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url, 1)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await?;

    let created = seed_demo_data(&pool, &config.demo_user_id, week::today())
        .await
        .context("Failed to seed demo data")?;

    tracing::info!(created, user_id = %config.demo_user_id, "Demo data seeded");
    Ok(())
}
