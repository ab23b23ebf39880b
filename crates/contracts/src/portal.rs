//! The portal contract: deposits enter the rollup here and withdrawals are
//! proven and finalized against it.

use crate::DecodeError;
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::sol;

sol! {
    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug)]
    event TransactionDeposited(
        address indexed from,
        address indexed to,
        uint256 indexed version,
        bytes opaqueData
    );

    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug)]
    event WithdrawalProven(bytes32 indexed withdrawalHash, address indexed from, address indexed to);

    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug)]
    event WithdrawalFinalized(bytes32 indexed withdrawalHash, bool success);

    #[derive(Debug)]
    function provenWithdrawals(bytes32 withdrawalHash) external view returns (bytes32 outputRoot, uint128 timestamp, uint128 l2OutputIndex);
}

/// The byte length of the fixed prefix of the opaque data blob:
/// `mint (32) || value (32) || gasLimit (8) || isCreation (1)`.
const OPAQUE_DATA_PREFIX_LEN: usize = 73;

/// A deposit transaction derived from a [`TransactionDeposited`] log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositTransaction {
    /// The source hash uniquely identifying the deposit.
    pub source_hash: B256,
    /// The address the deposit transaction is sent from.
    pub from: Address,
    /// The address the deposit transaction is sent to.
    pub to: Address,
    /// The amount minted on the L2.
    pub mint: U256,
    /// The amount sent to the recipient.
    pub value: U256,
    /// The gas limit of the deposit transaction.
    pub gas_limit: u64,
    /// Whether the deposit creates a contract.
    pub is_creation: bool,
    /// The calldata of the deposit transaction.
    pub data: Bytes,
}

impl DepositTransaction {
    /// Derives the deposit transaction from a [`TransactionDeposited`] event
    /// and the position of its log.
    ///
    /// The opaque data blob is laid out as
    /// `mint (32) || value (32) || gasLimit (8) || isCreation (1) || data`.
    pub fn from_deposited_event(
        block_hash: B256,
        log_index: u64,
        event: &TransactionDeposited,
    ) -> Result<Self, DecodeError> {
        let opaque = &event.opaqueData;
        if opaque.len() < OPAQUE_DATA_PREFIX_LEN {
            return Err(DecodeError::OpaqueDataTooShort { len: opaque.len() });
        }

        let mint = U256::from_be_slice(&opaque[0..32]);
        let value = U256::from_be_slice(&opaque[32..64]);
        let gas_limit = u64::from_be_bytes(opaque[64..72].try_into().expect("8 byte slice"));
        let is_creation = opaque[72] != 0;
        let data = Bytes::copy_from_slice(&opaque[OPAQUE_DATA_PREFIX_LEN..]);

        Ok(Self {
            source_hash: user_deposit_source_hash(block_hash, log_index),
            from: event.from,
            to: event.to,
            mint,
            value,
            gas_limit,
            is_creation,
            data,
        })
    }
}

/// Computes the source hash of a user deposit: the deposit domain (zero)
/// hashed with the commitment to the initiating log's position.
pub fn user_deposit_source_hash(block_hash: B256, log_index: u64) -> B256 {
    let mut inner = [0u8; 64];
    inner[..32].copy_from_slice(block_hash.as_slice());
    inner[32..].copy_from_slice(U256::from(log_index).to_be_bytes::<32>().as_slice());
    let deposit_id_hash = keccak256(inner);

    let mut outer = [0u8; 64];
    outer[32..].copy_from_slice(deposit_id_hash.as_slice());
    keccak256(outer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256, bytes};

    #[test]
    fn test_should_derive_deposit_transaction() {
        let mut opaque = Vec::new();
        opaque.extend_from_slice(U256::from(1_000_000_000_000_000_000u128).to_be_bytes::<32>().as_slice());
        opaque.extend_from_slice(U256::from(1_000_000_000_000_000_000u128).to_be_bytes::<32>().as_slice());
        opaque.extend_from_slice(&200_000u64.to_be_bytes());
        opaque.push(0);
        opaque.extend_from_slice(&[0x01]);

        let event = TransactionDeposited {
            from: address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            to: address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"),
            version: U256::ZERO,
            opaqueData: opaque.into(),
        };

        let block_hash =
            b256!("1111111111111111111111111111111111111111111111111111111111111111");
        let deposit = DepositTransaction::from_deposited_event(block_hash, 7, &event).unwrap();

        assert_eq!(deposit.from, event.from);
        assert_eq!(deposit.to, event.to);
        assert_eq!(deposit.mint, U256::from(1_000_000_000_000_000_000u128));
        assert_eq!(deposit.value, U256::from(1_000_000_000_000_000_000u128));
        assert_eq!(deposit.gas_limit, 200_000);
        assert!(!deposit.is_creation);
        assert_eq!(deposit.data, bytes!("01"));
        assert_eq!(deposit.source_hash, user_deposit_source_hash(block_hash, 7));
    }

    #[test]
    fn test_should_reject_short_opaque_data() {
        let event = TransactionDeposited {
            from: Address::ZERO,
            to: Address::ZERO,
            version: U256::ZERO,
            opaqueData: bytes!("deadbeef"),
        };

        let err = DepositTransaction::from_deposited_event(B256::ZERO, 0, &event).unwrap_err();
        assert!(matches!(err, DecodeError::OpaqueDataTooShort { len: 4 }));
    }

    #[test]
    fn test_source_hash_commits_to_log_position() {
        let block_hash =
            b256!("2222222222222222222222222222222222222222222222222222222222222222");
        assert_ne!(
            user_deposit_source_hash(block_hash, 0),
            user_deposit_source_hash(block_hash, 1)
        );
        assert_ne!(
            user_deposit_source_hash(block_hash, 0),
            user_deposit_source_hash(B256::ZERO, 0)
        );
    }
}
