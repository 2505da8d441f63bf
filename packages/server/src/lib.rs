#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the housing affordability map.
//!
//! Loads the district dataset and boundaries once at startup into an
//! immutable [`DataContext`], then serves the dashboard page and its JSON
//! API. Every request recomputes from the shared base data; nothing is
//! written after initialisation.

pub mod config;
mod handlers;
mod page;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use housing_map_affordability::{ContextError, DataContext};

pub use config::{Cli, ConfigError, ServerConfig};

/// Shared application state.
pub struct AppState {
    /// Base dataset and boundaries.
    pub context: DataContext,
}

/// Errors that abort server startup.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The dataset or boundaries failed to load.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// The HTTP server failed to bind or run.
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Initialises `pretty_env_logger` with a default filter for the configured
/// mode. `RUST_LOG`, when set, overrides the default.
pub fn init_logger(config: &ServerConfig) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.parse_filters(config.log_filter());
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    if builder.try_init().is_err() {
        log::debug!("Logger already initialised");
    }
}

/// Registers the dashboard routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/dashboard", web::get().to(handlers::dashboard)),
    )
    .route("/", web::get().to(handlers::index));
}

/// Starts the housing map server.
///
/// Loads the district dataset and boundaries, then runs the Actix-Web
/// HTTP server until it is stopped. The caller provides the async runtime
/// (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns [`ServerError`] if either data file fails to load or the HTTP
/// server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    log::info!(
        "Loading districts from {} and boundaries from {}...",
        config.districts_path.display(),
        config.boundaries_path.display()
    );
    let context = DataContext::load(
        &config.districts_path,
        &config.boundaries_path,
        &config.boundary_key,
    )?;

    let state = web::Data::new(AppState { context });

    log::info!(
        "Starting server on {}:{} ({} mode)",
        config.bind_addr,
        config.port,
        if config.debug { "debug" } else { "production" }
    );

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(routes)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
