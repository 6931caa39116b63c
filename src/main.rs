use nearbox::http::{self, AppState};
use nearbox::{Config, Database, GeoStore, SearchService};
use std::io;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = Config::from_env();
    info!(
        db = %config.db_name,
        collection = %config.collection,
        default_radius_m = config.default_radius_m,
        "starting nearbox"
    );

    let db = Database::open(&config.db_name);
    db.create_collection(&config.collection)?;

    // A failed load is logged only; the service still starts and serves
    // whatever is in the collection (possibly nothing) until restart.
    if let Some(path) = &config.data_file {
        match db.load_records(path, &config.collection) {
            Ok(count) => info!(path = %path.display(), count, "data file ingested"),
            Err(err) => error!(path = %path.display(), %err, "failed to ingest data file"),
        }
    }

    let store = Arc::new(GeoStore::new(db, &config.collection));
    let service = Arc::new(SearchService::new(store, config.default_radius_m));
    let app = http::build_router(AppState { service });

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received ctrl-c, shutting down");
    }
}
