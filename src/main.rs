use std::net::SocketAddr;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use collegehub::config::Config;
use collegehub::seed::seed_colleges;
use collegehub::store::Stores;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let seed_only = std::env::args().nth(1).as_deref() == Some("seed");

    let pool = match config.database_url.as_deref() {
        Some(url) => Some(connect(url).await?),
        None => None,
    };

    if seed_only {
        let Some(pool) = pool else {
            return Err("DATABASE_URL is required for `collegehub seed`".into());
        };
        let stores = Stores::postgres(pool.clone());
        let count = seed_colleges(stores.colleges.as_ref()).await?;
        tracing::info!("Seed complete: {count} colleges");
        pool.close().await;
        return Ok(());
    }

    tracing::info!("Starting CollegeHub");

    let stores = match pool.clone() {
        Some(pool) => Stores::postgres(pool),
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store. Data is lost on exit");
            let stores = Stores::memory();
            seed_colleges(stores.colleges.as_ref()).await?;
            stores
        }
    };

    let addr = SocketAddr::new(config.host, config.port);
    let (app, state) = collegehub::build_app(stores, config);
    let janitor = collegehub::spawn_limiter_janitor(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    janitor.abort();
    if let Some(pool) = pool {
        pool.close().await;
    }

    Ok(())
}

async fn connect(url: &str) -> Result<PgPool, Box<dyn std::error::Error>> {
    let pool = PgPoolOptions::new().max_connections(10).connect(url).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
