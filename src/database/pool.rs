use crate::config::Config;
use crate::error::{Error, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};

pub async fn create_pool(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| Error::Config("Missing environment variable: DATABASE_URL".to_string()))?;
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
