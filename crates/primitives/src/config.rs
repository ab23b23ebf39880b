use alloy_primitives::{address, Address};
use std::time::Duration;

/// The chain a processor is indexing. Used for logging and metric labels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Chain {
    /// The settlement chain.
    L1,
    /// The rollup chain.
    L2,
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::L1 => write!(f, "l1"),
            Self::L2 => write!(f, "l2"),
        }
    }
}

/// The set of indexed contracts on the L1.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct L1Contracts {
    /// The portal accepting deposits and withdrawal proofs/finalizations.
    pub portal: Address,
    /// The oracle recording L2 output proposals.
    pub output_oracle: Address,
    /// The L1 side of the cross-domain messenger pair.
    pub cross_domain_messenger: Address,
    /// The L1 standard bridge.
    pub standard_bridge: Address,
    /// The L1 ERC721 bridge.
    pub erc721_bridge: Address,
}

impl L1Contracts {
    /// The contract addresses of a dev deployment.
    pub const fn dev() -> Self {
        Self {
            portal: address!("6900000000000000000000000000000000000000"),
            output_oracle: address!("6900000000000000000000000000000000000001"),
            cross_domain_messenger: address!("6900000000000000000000000000000000000002"),
            standard_bridge: address!("6900000000000000000000000000000000000003"),
            erc721_bridge: address!("6900000000000000000000000000000000000004"),
        }
    }

    /// Returns the ordered list of indexed addresses, used to build log
    /// filters.
    pub fn addresses(&self) -> Vec<Address> {
        vec![
            self.portal,
            self.output_oracle,
            self.cross_domain_messenger,
            self.standard_bridge,
            self.erc721_bridge,
        ]
    }
}

/// The set of indexed contracts on the L2.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct L2Contracts {
    /// The L2 side of the cross-domain messenger pair.
    pub cross_domain_messenger: Address,
    /// The L2 standard bridge.
    pub standard_bridge: Address,
    /// The L2 ERC721 bridge.
    pub erc721_bridge: Address,
    /// The message passer recording withdrawals.
    pub to_l1_message_passer: Address,
}

impl L2Contracts {
    /// The predeploy addresses of the L2 contracts.
    pub const fn predeploys() -> Self {
        Self {
            cross_domain_messenger: address!("4200000000000000000000000000000000000007"),
            standard_bridge: address!("4200000000000000000000000000000000000010"),
            erc721_bridge: address!("4200000000000000000000000000000000000014"),
            to_l1_message_passer: address!("4200000000000000000000000000000000000016"),
        }
    }

    /// Returns the ordered list of indexed addresses, used to build log
    /// filters.
    pub fn addresses(&self) -> Vec<Address> {
        vec![
            self.cross_domain_messenger,
            self.standard_bridge,
            self.erc721_bridge,
            self.to_l1_message_passer,
        ]
    }
}

/// The indexer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerConfig {
    /// The poll interval of the L1 processor once it is synced to the head.
    pub l1_poll_interval: Duration,
    /// The poll interval of the L2 processor once it is synced to the head.
    pub l2_poll_interval: Duration,
    /// The maximum number of headers fetched per traversal batch.
    pub max_header_batch: u64,
    /// The L1 height at which the rollup was deployed. The L1 processor never
    /// starts below this height.
    pub l1_start_height: u64,
    /// The indexed L1 contracts.
    pub l1_contracts: L1Contracts,
    /// The indexed L2 contracts.
    pub l2_contracts: L2Contracts,
}

impl IndexerConfig {
    /// The default maximum traversal batch size.
    pub const DEFAULT_MAX_HEADER_BATCH: u64 = 500;
}
