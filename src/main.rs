use breed_ballot::api::CatalogClient;
use breed_ballot::config::Config;
use breed_ballot::db::{self, BreedStore};
use breed_ballot::router::{BallotState, ballot_router};
use breed_ballot::service::Seeder;
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        port = cfg.port,
        local = cfg.local,
        catalog_url = %cfg.catalog_url,
        proxy = %cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        seed_concurrency = cfg.seed_concurrency,
        loglevel = %cfg.loglevel
    );

    let pool = db::connect(&cfg).await?;
    let store = BreedStore::new(pool);
    if cfg.bootstrap_schema {
        store.init_schema().await?;
    }

    let listener = TcpListener::bind(cfg.bind_addr()).await?;

    let catalog = CatalogClient::new(&cfg)?;
    match Seeder::new(store.clone(), catalog, cfg.seed_concurrency)
        .run()
        .await
    {
        Ok(report) if !report.failed().is_empty() => {
            warn!(
                inserted = report.inserted().len(),
                failed = report.failed().len(),
                "breed store partially seeded"
            );
        }
        Ok(_) => {}
        Err(e) => {
            error!(error = %e, "seeding aborted");
        }
    }

    let app = ballot_router(BallotState::new(store.clone()));
    info!("Server is up and running on {}", cfg.bind_addr());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
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
    info!("shutdown signal received");
}
