use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder, PeerIpKeyExtractor};
use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::{Context, anyhow};
use dotenvy::dotenv;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod routes;
mod utils;

use config::Config;
use db::{HrStore, MySqlStore};

use tracing::info;
use tracing_appender::rolling;

fn build_cors(config: &Config) -> Cors {
    let cors = Cors::default().allow_any_method().allow_any_header();

    if config.allows_any_origin() {
        return cors.allow_any_origin();
    }

    config
        .cors_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
        .supports_credentials()
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(if config.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!(project = %config.project_name, "Server starting...");

    let mysql = MySqlStore::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    if config.run_migrations {
        mysql.migrate().await.context("Failed to run migrations")?;
    }

    let store: Arc<dyn HrStore> = Arc::new(mysql.clone());

    let limiter = GovernorConfigBuilder::default()
        .milliseconds_per_request(config.rate_interval_ms())
        .burst_size(config.rate_api_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow!("Invalid rate limit configuration"))?;

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&limiter))
            .wrap(build_cors(&config))
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .configure(docs::configure)
            .app_data(Data::from(store.clone()))
            .app_data(Data::new(config.clone()))
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run()
    .await?;

    mysql.close().await;
    Ok(())
}
