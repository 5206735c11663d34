use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub project_name: String,
    pub api_prefix: String,

    /// `*` admits any origin
    pub cors_origins: Vec<String>,

    pub debug: bool,
    pub log_dir: String,

    // Rate limiting
    pub rate_api_per_min: u32,

    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            server_addr: var_or("SERVER_ADDR", "0.0.0.0:8000"),
            project_name: var_or("PROJECT_NAME", "HRMS Backend"),
            api_prefix: var_or("API_PREFIX", "/api/v1"),
            cors_origins: parse_origins(&var_or("BACKEND_CORS_ORIGINS", "*")),
            debug: parse_var("DEBUG", true)?,
            log_dir: var_or("LOG_DIR", "logs"),
            rate_api_per_min: parse_var("RATE_API_PER_MIN", 1000)?,
            run_migrations: parse_var("RUN_MIGRATIONS", true)?,
        })
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }

    /// Replenish interval for the per-IP limiter. Never zero: rates above
    /// 60000/min would otherwise round down to it.
    pub fn rate_interval_ms(&self) -> u64 {
        (60_000 / u64::from(self.rate_api_per_min.max(1))).max(1)
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

/// Comma-separated origin list; an empty list falls back to `*`.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            database_url: "mysql://localhost/hrms_test".to_string(),
            server_addr: "127.0.0.1:0".to_string(),
            project_name: "HRMS Backend".to_string(),
            api_prefix: "/api/v1".to_string(),
            cors_origins: vec!["*".to_string()],
            debug: true,
            log_dir: "logs".to_string(),
            rate_api_per_min: 1000,
            run_migrations: false,
        }
    }
}
