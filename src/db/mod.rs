use sqlx::SqlitePool;

pub mod pool;

/// Applies the embedded schema migrations. Must run once before the pool
/// is handed to the application.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
  sqlx::migrate!("./migrations").run(pool).await
}
