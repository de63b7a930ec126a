use std::io;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use sqlx::{Pool, Postgres};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, filter::LevelFilter};

mod api;
mod cli;
mod config;
mod db;
mod listing;
mod shutdown;

use crate::api::application::ApplicationService;
use crate::api::auth::{CredentialVerifier, StaticCredentialVerifier};
use crate::api::job::JobService;
use crate::api::validation;
use crate::db::{JobRepository, PgJobRepository, StaticJobRepository};
use crate::listing::session::spawn_idle_sweeper;
use crate::listing::SessionStore;
use crate::shutdown::ShutdownCoordinator;

fn init_logging(log_dir: &str) -> io::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    // Log files will be created as: logs/info.log.2024-12-22, logs/error.log.2024-12-22, etc.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let info_file = tracing_appender::rolling::daily(log_dir, "info.log");
    let warn_file = tracing_appender::rolling::daily(log_dir, "warn.log");
    let error_file = tracing_appender::rolling::daily(log_dir, "error.log");
    let debug_file = tracing_appender::rolling::daily(log_dir, "debug.log");

    let info_layer = tracing_subscriber::fmt::layer()
        .with_writer(info_file)
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);

    let warn_layer = tracing_subscriber::fmt::layer()
        .with_writer(warn_file)
        .with_ansi(false)
        .with_filter(LevelFilter::WARN);

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(error_file)
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR);

    let debug_layer = tracing_subscriber::fmt::layer()
        .with_writer(debug_file)
        .with_ansi(false)
        .with_filter(LevelFilter::DEBUG);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
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

/// Postgres when DATABASE_URL is set, otherwise the JSON dataset
async fn open_repository(
    config: &config::Config,
) -> io::Result<(Arc<dyn JobRepository>, Option<Pool<Postgres>>)> {
    if let Some(database_url) = &config.database_url {
        let pool = db::connection::get_connection(database_url, config.max_db_connections)
            .await
            .map_err(|e| io::Error::other(format!("Failed to connect to database: {}", e)))?;
        info!("Database connection pool established");

        db::migrations::run_migrations(&pool)
            .await
            .map_err(|e| io::Error::other(format!("Failed to run database migrations: {}", e)))?;

        return Ok((Arc::new(PgJobRepository::new(pool.clone())), Some(pool)));
    }

    let repository = match &config.jobs_file {
        Some(path) => StaticJobRepository::from_file(path),
        None => StaticJobRepository::embedded(),
    }
    .map_err(|e| io::Error::other(format!("Failed to load job dataset: {}", e)))?;
    info!("Serving {} jobs from the static dataset", repository.job_count());

    Ok((Arc::new(repository), None))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let args = cli::parse();
    let config = config::Config::from_env()
        .map_err(|e| io::Error::other(format!("Failed to load configuration: {}", e)))?
        .with_overrides(args);

    init_logging(&config.log_dir)?;

    info!("Starting job-board application");
    info!("Configuration loaded successfully:");
    info!("  - Max payload size: {} bytes", config.max_payload_size);
    info!("  - Max resume size: {} bytes", config.max_resume_size);
    info!("  - Page size: {}", config.page_size);
    info!("  - Search debounce: {:?}", config.search_debounce);
    info!("  - Session idle TTL: {:?}", config.session_idle_ttl);

    let (repository, pool) = open_repository(&config).await?;

    let job_service = web::Data::new(JobService::new(
        repository,
        config.page_size,
        config.related_limit,
    ));
    let sessions = web::Data::new(SessionStore::new(
        config.page_size,
        config.search_debounce,
        config.session_idle_ttl,
    ));
    let sweeper = spawn_idle_sweeper(sessions.clone().into_inner(), config.session_sweep_interval);
    let applications = web::Data::new(ApplicationService::new(config.max_resume_size));
    let verifier: Arc<dyn CredentialVerifier> = Arc::new(StaticCredentialVerifier::new(
        config.auth_email.clone(),
        config.auth_password.clone(),
    ));
    let verifier = web::Data::from(verifier);

    let max_payload_size = config.max_payload_size;
    let server_sessions = sessions.clone();

    let server = HttpServer::new(move || {
        // Configure payload size limits globally
        let payload_config = web::PayloadConfig::default()
            .limit(max_payload_size);

        App::new()
            .app_data(job_service.clone())
            .app_data(server_sessions.clone())
            .app_data(applications.clone())
            .app_data(verifier.clone())
            .app_data(payload_config)
            .app_data(validation::multipart_config(max_payload_size))
            .app_data(validation::json_config())
            .configure(api::configure)
    });

    info!("Server starting on http://{}:{}", config.host, config.port);

    let server = server
        .bind((config.host.as_str(), config.port))?
        .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    let coordinator = ShutdownCoordinator::new(server_handle, server_task, sweeper, sessions, pool);

    coordinator.wait_for_shutdown().await
}
