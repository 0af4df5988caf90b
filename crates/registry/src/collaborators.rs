// registry/src/collaborators.rs

use registry_core::{AccountId, Amount, TokenId};

/// Result type for external collaborator calls
pub type CollaboratorResult<T> = Result<T, CollaboratorError>;

/// Failures raised by borrowed collaborators. Any such failure aborts the
/// enclosing registry operation; there is no retry and no timeout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    #[error("price feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error("stable token call failed: {0}")]
    TokenCallFailed(String),

    #[error("receiver raised a failure: {0}")]
    ReceiverFailed(String),
}

/// The 4-byte accept signal a transfer receiver must return. Anything
/// else aborts the safe transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiverAck([u8; 4]);

impl ReceiverAck {
    /// Canonical accept signal (the `onERC721Received` selector)
    pub const ACCEPT: ReceiverAck = ReceiverAck([0x15, 0x0b, 0x7a, 0x02]);

    pub fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub fn is_accept(&self) -> bool {
        *self == Self::ACCEPT
    }
}

/// External read-only exchange-rate source (native unit -> stable unit)
pub trait PriceFeed {
    /// Current exchange rate, scaled by `10^decimals()`. Read fresh on
    /// every pricing query; the registry never caches it.
    fn latest_rate(&self) -> CollaboratorResult<Amount>;

    /// Fixed decimal precision of the reported rate
    fn decimals(&self) -> u8;
}

/// External stable-value token the registry can pull pre-authorized
/// amounts from. Consulted call-only; the registry never owns it.
pub trait StableToken {
    fn balance_of(&self, account: AccountId) -> Amount;

    /// Amount `owner` has pre-authorized `spender` to pull
    fn allowance(&self, owner: AccountId, spender: AccountId) -> Amount;

    /// Spend `spender`'s allowance: move `amount` from `from` to `to`
    fn transfer_from(
        &self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: &Amount,
    ) -> CollaboratorResult<()>;

    /// Decimal precision, if the token exposes one. Probed once at
    /// configuration time; `None` is treated as precision zero.
    fn decimals(&self) -> Option<u8>;
}

/// Receiver hook for safe transfers into contract accounts. The receiver
/// must answer with [`ReceiverAck::ACCEPT`]; a different value or an
/// error aborts (and rolls back) the transfer.
pub trait TokenReceiver {
    fn on_token_received(
        &self,
        operator: AccountId,
        from: AccountId,
        token_id: TokenId,
        data: &[u8],
    ) -> CollaboratorResult<ReceiverAck>;
}
