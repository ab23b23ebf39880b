//! The standard bridge contract pair: the token-level view on top of the
//! cross-domain messenger.
//!
//! The bridge events carry the messenger nonce of the underlying message.
//! A single bridge deployment is indexed, so the nonce identifies a message
//! within one direction.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::sol;

sol! {
    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug)]
    event DepositInitiated(
        uint256 indexed messageNonce,
        address indexed from,
        address indexed to,
        address l1Token,
        address l2Token,
        uint256 amount,
        bytes extraData
    );

    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug)]
    event DepositFinalized(
        uint256 indexed messageNonce,
        address indexed from,
        address indexed to,
        address l1Token,
        address l2Token,
        uint256 amount,
        bytes extraData
    );

    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug)]
    event WithdrawalInitiated(
        uint256 indexed messageNonce,
        address indexed from,
        address indexed to,
        address l1Token,
        address l2Token,
        uint256 amount,
        bytes extraData
    );

    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug)]
    event WithdrawalFinalized(
        uint256 indexed messageNonce,
        address indexed from,
        address indexed to,
        address l1Token,
        address l2Token,
        uint256 amount,
        bytes extraData
    );
}

/// A standard-bridge event normalized across its initiate/finalize variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardBridgeEvent {
    /// The nonce of the underlying cross-domain message.
    pub message_nonce: U256,
    /// The sender on the origin chain.
    pub from: Address,
    /// The recipient on the destination chain.
    pub to: Address,
    /// The token address on the L1.
    pub l1_token: Address,
    /// The token address on the L2.
    pub l2_token: Address,
    /// The transferred amount.
    pub amount: U256,
    /// The extra data relayed with the transfer.
    pub extra_data: Bytes,
}

macro_rules! impl_from_bridge_event {
    ($($event:ty),*) => {
        $(
            impl From<$event> for StandardBridgeEvent {
                fn from(value: $event) -> Self {
                    Self {
                        message_nonce: value.messageNonce,
                        from: value.from,
                        to: value.to,
                        l1_token: value.l1Token,
                        l2_token: value.l2Token,
                        amount: value.amount,
                        extra_data: value.extraData,
                    }
                }
            }
        )*
    };
}

impl_from_bridge_event!(DepositInitiated, DepositFinalized, WithdrawalInitiated, WithdrawalFinalized);
