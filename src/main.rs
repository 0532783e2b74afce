use anyhow::Context;
use tokio::signal;

use dotenvy::dotenv;

use account_directory_api::app::create_app;
use account_directory_api::config::AppConfig;
use account_directory_api::db::{self, pool::create_pool};
use account_directory_api::state::SharedAppState;
use account_directory_api::utils::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  let config = AppConfig::from_env()?;
  init_tracing(&config);

  let pool = create_pool(&config).await.context("Failed to create database pool")?;

  db::migrate(&pool).await.context("Failed to apply database migrations")?;

  tracing::info!("Database migrations applied successfully");

  let app_state = SharedAppState::new(pool);
  let app = create_app(app_state);

  let addr = config.socket_addr()?;
  let listener = tokio::net::TcpListener::bind(addr)
    .await
    .with_context(|| format!("Failed to bind {}", addr))?;

  tracing::info!("Server running on http://{}", addr);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!(error = %e, "shutdown: Ctrl+C handler unavailable, waiting on other signals");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut stream) => {
        stream.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "shutdown: SIGTERM handler unavailable, waiting on other signals");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  tracing::info!("Received termination signal, shutting down gracefully...");
}
