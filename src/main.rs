//! Front-desk server binary.
//!
//! Resolves configuration from the environment, opens the store, applies the
//! idempotent schema and serves the HTTP surface. Seeding is never run from
//! here; use the `frontdesk` CLI for that.

use frontdesk_core::{config, store, CoreConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the front-desk server.
///
/// # Environment Variables
/// - `FRONTDESK_ADDR`: server address (default: "0.0.0.0:3000")
/// - `DATABASE_URL`: SQLite database URL (default: "sqlite://hospital.db")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the store cannot be opened or its schema cannot be applied, or
/// - the server address cannot be bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("frontdesk_run=info".parse()?)
                .add_directive("frontdesk_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("FRONTDESK_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let cfg = CoreConfig::new(config::database_url_from_env_value(
        std::env::var("DATABASE_URL").ok(),
    ))?;

    let pool = store::connect(cfg.database_url()).await?;
    store::run_migrations(&pool).await?;

    let app = frontdesk_run::app(pool).await?;

    tracing::info!("-- Starting front desk on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c().await.ok();
    };
    #[cfg(unix)]
    let term = async {
        if let Ok(mut s) = signal::unix::signal(signal::unix::SignalKind::terminate()) {
            s.recv().await;
        }
    };
    #[cfg(not(unix))]
    let term = std::future::pending::<()>();

    tokio::select! { _ = ctrl_c => {}, _ = term => {} }
}
