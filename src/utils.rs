use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LogFormat};

pub mod error;
pub mod payload;

pub fn init_tracing(config: &AppConfig) {
  let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER));

  match config.log_format {
    LogFormat::Json => tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_target(false)
      .json()
      .init(),
    LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
  }
}
