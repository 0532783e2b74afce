use std::{env, net::SocketAddr, str::FromStr};

use anyhow::Context;

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
pub const DEFAULT_LOG_FILTER: &str = "account_directory_api=debug,tower_http=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
  Text,
  Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub host: String,
  pub port: u16,
  pub database_url: String,
  pub database_max_connections: u32,
  pub log_filter: String,
  pub log_format: LogFormat,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      host: "0.0.0.0".to_string(),
      port: 8080,
      database_url: DEFAULT_DATABASE_URL.to_string(),
      database_max_connections: 5,
      log_filter: DEFAULT_LOG_FILTER.to_string(),
      log_format: LogFormat::Text,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> anyhow::Result<Self> {
    let defaults = Self::default();

    Ok(Self {
      host: env::var("HOST").unwrap_or(defaults.host),
      port: parse_var("PORT")?.unwrap_or(defaults.port),
      database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
      database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS")?.unwrap_or(defaults.database_max_connections),
      log_filter: env::var("RUST_LOG").unwrap_or(defaults.log_filter),
      log_format: match env::var("LOG_FORMAT") {
        Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Text,
      },
    })
  }

  pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
    format!("{}:{}", self.host, self.port)
      .parse()
      .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
  }
}

fn parse_var<T>(key: &str) -> anyhow::Result<Option<T>>
where
  T: FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  match env::var(key) {
    Ok(raw) => raw
      .trim()
      .parse::<T>()
      .map(Some)
      .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
    Err(_) => Ok(None),
  }
}
