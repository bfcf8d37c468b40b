//! Frameshop JSON API Server

use std::{process, time::Duration};

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use frameshop_app::{context::AppContext, database};

use crate::{
    config::ServerConfig,
    observability::{Observability, metrics_handler, request_logging},
    state::State,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod carts;
mod config;
mod errors;
mod extensions;
mod frames;
mod healthcheck;
mod observability;
mod orders;
mod principals;
mod requests;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod variants;

/// Frameshop JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "no subscriber is installed before configuration is read"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "the subscriber failed to install"
        )]
        {
            eprintln!("Logging setup error: {e}");
        }

        process::exit(1);
    });

    if config.database.run_migrations {
        if let Err(migrate_error) = run_migrations(&config.database.database_url).await {
            error!("failed to apply migrations: {migrate_error}");

            process::exit(1);
        }
    }

    let addr = config.socket_addr();

    info!(%addr, "starting frameshop server");

    let listener = TcpListener::new(addr).bind().await;

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        config.storage.media_root.clone(),
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .hoop(request_logging)
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(router::app_router());

    let doc = OpenApi::new("Frameshop API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let mut router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    if observability.metrics_enabled() {
        router = router.push(Router::with_path("metrics").get(metrics_handler));
    }

    let server = Server::new(listener);
    let handle = server.handle();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;

    info!("server stopped");
}

#[derive(Debug, thiserror::Error)]
enum MigrationError {
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

async fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let pool = database::connect(database_url)
        .await
        .map_err(MigrationError::Connect)?;

    database::migrate(&pool).await?;
    pool.close().await;

    info!("migrations applied");

    Ok(())
}
