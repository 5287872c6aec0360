use actix_web::{App, HttpServer, web};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, filter::LevelFilter};

mod api;
mod cli;
mod config;
mod db;
mod error;
mod shutdown;

use crate::api::{
    health::health_config,
    job::{handlers::job_config, JobService},
    validation,
};
use crate::cli::{Cli, Command};
use crate::shutdown::ShutdownCoordinator;

/// Console output plus daily rotating files split by level
/// (logs/info.log.2024-12-22, logs/error.log.2024-12-22, ...)
fn init_tracing(log_dir: &str) -> std::io::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let info_layer = tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, "info.log"))
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);

    let warn_layer = tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, "warn.log"))
        .with_ansi(false)
        .with_filter(LevelFilter::WARN);

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, "error.log"))
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR);

    let debug_layer = tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, "debug.log"))
        .with_ansi(false)
        .with_filter(LevelFilter::DEBUG);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(info_layer)
        .with(warn_layer)
        .with(error_layer)
        .with(debug_layer)
        .init();

    Ok(())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let config = config::Config::from_env().map_err(std::io::Error::other)?;

    init_tracing(&config.log_dir)?;

    let pool = db::connection::get_connection(
        &config.database_url,
        config.max_db_connections,
        config.db_acquire_timeout,
    )
    .await
    .map_err(std::io::Error::other)?;

    info!("Database connection pool established");
    info!("  - Max database connections: {}", config.max_db_connections);

    db::migrations::run_migrations(&pool)
        .await
        .map_err(std::io::Error::other)?;

    if cli.command() == Command::Migrate {
        pool.close().await;
        return Ok(());
    }

    info!("Starting jobboard");
    info!("  - Max payload size: {} bytes", config.max_payload_size);

    let server_pool = pool.clone();
    let max_payload_size = config.max_payload_size;

    let server = HttpServer::new(move || {
        let job_service = web::Data::new(JobService::new(server_pool.clone()));

        App::new()
            .app_data(web::Data::new(server_pool.clone()))
            .app_data(job_service)
            .app_data(web::PayloadConfig::default().limit(max_payload_size))
            .app_data(validation::json_config().limit(max_payload_size))
            .app_data(validation::query_config())
            .configure(health_config)
            .configure(job_config)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    info!("Server listening on http://{}:{}", config.host, config.port);

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, pool)
        .wait_for_shutdown()
        .await
}
