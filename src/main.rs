use credstore::UserStore;
use credstore::config::Config;
use mimalloc::MiMalloc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let (cfg, config_err) = Config::load_or_default();

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

    if let Some(e) = config_err {
        warn!(error = %e, "invalid configuration, using defaults");
    }

    info!(
        database_url = %cfg.database_url,
        max_connections = cfg.max_connections,
        loglevel = %cfg.loglevel
    );

    let pool = credstore::db::connect(&cfg).await?;
    let store = UserStore::with_tracing(pool);
    store.init_schema().await?;

    info!("user table ready");
    store.pool().close().await;
    Ok(())
}
