use divine_catalog::{CatalogState, Config, db, handlers::console};
use mimalloc::MiMalloc;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        download_dir = %cfg.download_dir.display(),
        seed_samples = cfg.seed_samples,
        loglevel = %cfg.loglevel
    );

    let store = db::spawn(&cfg.database_url).await?;
    let mut state = CatalogState::new(store.clone(), cfg.download_dir.clone());

    if cfg.seed_samples {
        match state.repository().seed_if_empty().await {
            Ok(0) => info!("store already populated; skipping sample models"),
            Ok(count) => info!(count, "seeded sample models"),
            Err(e) => warn!(error = %e, "failed to seed sample models"),
        }
    }

    state.reload().await?;

    let input = BufReader::new(tokio::io::stdin());
    let output = tokio::io::stdout();
    tokio::select! {
        res = console::run(&mut state, input, output) => res?,
        _ = tokio::signal::ctrl_c() => info!("interrupted"),
    }

    store.shutdown().await;
    Ok(())
}
