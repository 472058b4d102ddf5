use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use zorgmatch_backend::{
    config::{init_config, StoreBackend},
    database::{
        pg_store::PgStore,
        pool::{create_pool, run_migrations},
    },
    middleware::cors::api_cors,
    routes,
    store::{memory::MemoryStore, Store},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = init_config()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("zorgmatch_backend=info,tower_http=info"));
    if config.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let store: Arc<dyn Store> = match config.store_backend {
        StoreBackend::Postgres => {
            let pool = create_pool(config).await?;
            run_migrations(&pool).await?;
            info!("Connected to Postgres, migrations applied");
            Arc::new(PgStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Running with the in-memory store; data is lost on restart");
            Arc::new(MemoryStore::seeded())
        }
    };

    tokio::fs::create_dir_all(&config.uploads_dir).await?;
    info!(uploads_dir = %config.uploads_dir, "Uploads directory ready");

    let app_state = AppState::new(config.clone(), store);

    let app = routes::router(app_state)
        .layer(api_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(12 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
