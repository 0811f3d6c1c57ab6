use std::sync::Arc;

use clap::Parser;
use indexer::app_state::AppState;
use indexer::config::AppConfig;
use indexer::services::db::PgStore;
use indexer::services::tendermint::{self as tendermint_service, TendermintRpc};
use indexer::sync::Syncer;
use orm::migrations::run_migrations;
use shared::crawler::{crawl, must_exit_handle};
use shared::error::{AsDbError, AsRpcError, MainError};
use shared::registry::MessageRegistry;

#[tokio::main]
async fn main() -> Result<(), MainError> {
    let config = AppConfig::parse();

    config.log.init();

    if config.from_block_height < 1 || config.rpc_pool_size == 0 {
        tracing::error!(
            from_block_height = config.from_block_height,
            rpc_pool_size = config.rpc_pool_size,
            "Invalid configuration"
        );
        return Err(MainError::Config);
    }

    let rpc_pool = tendermint_service::build_pool(
        &config.tendermint_url,
        config.rpc_pool_size,
    )
    .into_rpc_error()?;
    let rpc = Arc::new(TendermintRpc::new(rpc_pool));

    let app_state = AppState::new(config.database_url).into_db_error()?;
    let conn = app_state.get_db_connection().await.into_db_error()?;

    // Run migrations
    run_migrations(&conn).await.into_db_error()?;
    drop(conn);

    let store = Arc::new(PgStore::new(app_state));
    let registry = Arc::new(MessageRegistry::default());
    tracing::info!(message_kinds = registry.len(), "Message registry ready");

    let syncer = Syncer::new(config.chain_id, rpc, store, registry);
    syncer.onboard(config.from_block_height).await?;

    let must_exit = must_exit_handle();
    let result = crawl(
        || syncer.sync_next_height(),
        Some(config.crawl_interval_ms),
        must_exit,
    )
    .await;

    syncer.shutdown().await;

    result
}
