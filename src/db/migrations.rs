use sqlx::{Pool, Postgres};
use tracing::info;

/// Create and seed the `jobs` table.
///
/// SQL files under `migrations/` are embedded at compile time; sqlx
/// records applied versions so running this on every start is safe.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await?;

    info!("Database migrations completed successfully");
    Ok(())
}
