//! The bridge indexer binary: tails the L1 and L2 chains and maintains the
//! database of the cross-chain bridge lifecycle.

mod args;
use args::IndexerArgs;

use alloy_provider::ProviderBuilder;
use bridge_indexer_client::{PortalClient, RpcChainClient};
use bridge_indexer_db::Database;
use bridge_indexer_migration::{Migrator, MigratorTrait};
use bridge_indexer_processor::{
    L1Handler, L2Handler, Processor, ProcessorConfig, Supervisor,
};
use clap::Parser;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = IndexerArgs::parse();
    let config = args.config();

    let db = Arc::new(Database::new(&args.database_url).await?);
    Migrator::up(db.inner(), None).await?;

    let l1_provider = ProviderBuilder::new().connect(&args.l1_rpc_url).await?;
    let l2_provider = ProviderBuilder::new().connect(&args.l2_rpc_url).await?;

    let portal = PortalClient::new(l1_provider.clone(), config.l1_contracts.portal);
    let l1_processor = Processor::new(
        RpcChainClient::new(l1_provider),
        L1Handler::new(config.l1_contracts, portal),
        db.clone(),
        ProcessorConfig {
            start_height: config.l1_start_height,
            max_header_batch: config.max_header_batch,
            poll_interval: config.l1_poll_interval,
        },
    );
    let l2_processor = Processor::new(
        RpcChainClient::new(l2_provider),
        L2Handler::new(config.l2_contracts),
        db,
        ProcessorConfig {
            start_height: 0,
            max_header_batch: config.max_header_batch,
            poll_interval: config.l2_poll_interval,
        },
    );

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!(target: "indexer", "shutdown signal received");
            cancel.cancel();
        }
    });

    Supervisor::new(l1_processor, l2_processor).run(cancel).await?;

    Ok(())
}
