use crate::ClientError;

use alloy_primitives::{Address, TxKind, B256, U256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{TransactionInput, TransactionRequest};
use alloy_sol_types::SolCall;
use bridge_indexer_contracts::portal::provenWithdrawalsCall;

/// The portal's record of a proven withdrawal.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ProvenWithdrawalView {
    /// The output root the withdrawal was proven against.
    pub output_root: B256,
    /// The timestamp the proof was submitted at.
    pub timestamp: u64,
    /// The index of the output proposal the proof anchors to.
    pub l2_output_index: U256,
}

impl ProvenWithdrawalView {
    /// Whether the portal has a proof recorded for the withdrawal.
    pub fn is_proven(&self) -> bool {
        self.output_root != B256::ZERO
    }
}

/// A view onto the portal's proven withdrawals mapping.
#[async_trait::async_trait]
pub trait PortalReader: Send + Sync {
    /// Queries the portal for the proof state of the provided withdrawal.
    async fn proven_withdrawal(
        &self,
        withdrawal_hash: B256,
    ) -> Result<ProvenWithdrawalView, ClientError>;
}

/// A [`PortalReader`] calling the deployed portal contract through an alloy
/// [`Provider`].
#[derive(Debug, Clone)]
pub struct PortalClient<P> {
    provider: P,
    portal: Address,
}

impl<P> PortalClient<P> {
    /// Returns a new [`PortalClient`] for the portal deployed at `portal`.
    pub const fn new(provider: P, portal: Address) -> Self {
        Self { provider, portal }
    }
}

#[async_trait::async_trait]
impl<P: Provider> PortalReader for PortalClient<P> {
    async fn proven_withdrawal(
        &self,
        withdrawal_hash: B256,
    ) -> Result<ProvenWithdrawalView, ClientError> {
        let call = provenWithdrawalsCall { withdrawalHash: withdrawal_hash };
        let request = TransactionRequest {
            to: Some(TxKind::Call(self.portal)),
            input: TransactionInput::new(call.abi_encode().into()),
            ..Default::default()
        };

        let output = self.provider.call(request).await?;
        let ret = provenWithdrawalsCall::abi_decode_returns(&output)?;

        Ok(ProvenWithdrawalView {
            output_root: ret.outputRoot,
            timestamp: ret.timestamp.try_into().unwrap_or(u64::MAX),
            l2_output_index: U256::from(ret.l2OutputIndex),
        })
    }
}
