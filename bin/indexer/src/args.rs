use alloy_primitives::Address;
use bridge_indexer_primitives::{IndexerConfig, L1Contracts, L2Contracts};
use std::time::Duration;

/// The command line arguments of the bridge indexer.
#[derive(Debug, clap::Parser)]
#[command(name = "bridge-indexer", about = "Indexes the cross-chain lifecycle of bridge deposits and withdrawals")]
pub struct IndexerArgs {
    /// The RPC URL of an L1 execution node.
    #[arg(long, env = "INDEXER_L1_RPC_URL")]
    pub l1_rpc_url: String,
    /// The RPC URL of an L2 execution node.
    #[arg(long, env = "INDEXER_L2_RPC_URL")]
    pub l2_rpc_url: String,
    /// The database connection string.
    #[arg(long, env = "INDEXER_DATABASE_URL")]
    pub database_url: String,
    /// The L1 height the rollup was deployed at. The L1 processor starts
    /// here on a cold start.
    #[arg(long)]
    pub l1_start_height: u64,
    /// The poll interval of the L1 processor in milliseconds.
    #[arg(long, default_value_t = 6_000)]
    pub l1_poll_interval_ms: u64,
    /// The poll interval of the L2 processor in milliseconds.
    #[arg(long, default_value_t = 2_000)]
    pub l2_poll_interval_ms: u64,
    /// The maximum number of headers fetched per traversal batch.
    #[arg(long, default_value_t = IndexerConfig::DEFAULT_MAX_HEADER_BATCH)]
    pub max_header_batch: u64,
    /// The address of the portal on the L1.
    #[arg(long, default_value_t = L1Contracts::dev().portal)]
    pub portal: Address,
    /// The address of the output oracle on the L1.
    #[arg(long, default_value_t = L1Contracts::dev().output_oracle)]
    pub output_oracle: Address,
    /// The address of the cross-domain messenger on the L1.
    #[arg(long, default_value_t = L1Contracts::dev().cross_domain_messenger)]
    pub l1_cross_domain_messenger: Address,
    /// The address of the standard bridge on the L1.
    #[arg(long, default_value_t = L1Contracts::dev().standard_bridge)]
    pub l1_standard_bridge: Address,
    /// The address of the ERC721 bridge on the L1.
    #[arg(long, default_value_t = L1Contracts::dev().erc721_bridge)]
    pub l1_erc721_bridge: Address,
    /// The address of the cross-domain messenger on the L2.
    #[arg(long, default_value_t = L2Contracts::predeploys().cross_domain_messenger)]
    pub l2_cross_domain_messenger: Address,
    /// The address of the standard bridge on the L2.
    #[arg(long, default_value_t = L2Contracts::predeploys().standard_bridge)]
    pub l2_standard_bridge: Address,
    /// The address of the ERC721 bridge on the L2.
    #[arg(long, default_value_t = L2Contracts::predeploys().erc721_bridge)]
    pub l2_erc721_bridge: Address,
    /// The address of the message passer on the L2.
    #[arg(long, default_value_t = L2Contracts::predeploys().to_l1_message_passer)]
    pub l2_to_l1_message_passer: Address,
}

impl IndexerArgs {
    /// Builds the [`IndexerConfig`] from the parsed arguments.
    pub fn config(&self) -> IndexerConfig {
        IndexerConfig {
            l1_poll_interval: Duration::from_millis(self.l1_poll_interval_ms),
            l2_poll_interval: Duration::from_millis(self.l2_poll_interval_ms),
            max_header_batch: self.max_header_batch,
            l1_start_height: self.l1_start_height,
            l1_contracts: L1Contracts {
                portal: self.portal,
                output_oracle: self.output_oracle,
                cross_domain_messenger: self.l1_cross_domain_messenger,
                standard_bridge: self.l1_standard_bridge,
                erc721_bridge: self.l1_erc721_bridge,
            },
            l2_contracts: L2Contracts {
                cross_domain_messenger: self.l2_cross_domain_messenger,
                standard_bridge: self.l2_standard_bridge,
                erc721_bridge: self.l2_erc721_bridge,
                to_l1_message_passer: self.l2_to_l1_message_passer,
            },
        }
    }
}
