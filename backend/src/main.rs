use std::sync::Arc;

use shuttle_runtime::CustomError;
use sqlx::PgPool;
use tracing::{info, warn};
use vote_backend::{
    build_rocket,
    clock::SystemClock,
    config::AppConfig,
    ledger::PgLedger,
    queue::RedisQueue,
    routes::AppState,
};

#[shuttle_runtime::main]
async fn rocket(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secret_store: shuttle_runtime::SecretStore,
) -> shuttle_rocket::ShuttleRocket {
    info!("🚀 Starting vote server");

    let config = AppConfig::from_lookup(|key| {
        secret_store.get(key).or_else(|| std::env::var(key).ok())
    });
    info!("🗳️ Options: {} vs {}", config.option_a, config.option_b);

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(CustomError::new)?;

    info!("📋 Migrations complete");

    let queue = RedisQueue::open(&config.redis_url, config.queue_key.clone(), config.store_timeout)
        .map_err(CustomError::new)?;
    let ledger = PgLedger::new(pool, config.store_timeout);

    let state = AppState::new(config, Arc::new(queue), Arc::new(ledger), Arc::new(SystemClock::new()));

    let report = state.health.check().await;
    if !report.all_reachable() {
        warn!(
            "Starting degraded: queue reachable = {}, ledger reachable = {}",
            report.queue_reachable, report.ledger_reachable
        );
    }

    Ok(build_rocket(state).into())
}
