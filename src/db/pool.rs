use std::str::FromStr;

use sqlx::{
  sqlite::{SqliteConnectOptions, SqlitePoolOptions},
  SqlitePool,
};

use crate::config::AppConfig;

pub async fn create_pool(config: &AppConfig) -> Result<SqlitePool, sqlx::Error> {
  connect(&config.database_url, config.database_max_connections).await
}

pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
  let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

  // An in-memory database lives only as long as one of its connections, so
  // keep exactly one connection open for the lifetime of the pool.
  let pool = if is_in_memory(database_url) {
    SqlitePoolOptions::new()
      .max_connections(1)
      .min_connections(1)
      .idle_timeout(None)
      .max_lifetime(None)
      .connect_with(options)
      .await?
  } else {
    SqlitePoolOptions::new()
      .max_connections(max_connections.max(1))
      .connect_with(options)
      .await?
  };

  tracing::debug!(database_url, "database pool ready");
  Ok(pool)
}

pub fn is_in_memory(database_url: &str) -> bool {
  database_url.contains(":memory:") || database_url.contains("mode=memory")
}
