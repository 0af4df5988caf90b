// registry/src/lib.rs

//! NFT registry engine
//!
//! This crate implements the token lifecycle and access-control engine on
//! top of `registry-core`:
//! - Supply & phase state machine (creators allocation, public allocation)
//! - Fee enforcement in the native unit and oraclized dollar pricing
//! - Collaborator interfaces (price feed, stable token, transfer receiver)
//! - The `TokenRegistry` orchestrator composing all of the above

pub mod collaborators;
pub mod config;
pub mod phases;
pub mod pricing;
pub mod registry;

pub use collaborators::{
    CollaboratorError, CollaboratorResult, PriceFeed, ReceiverAck, StableToken, TokenReceiver,
};
pub use config::RegistrySettings;
pub use phases::{MintSchedule, RegistryPhase};
pub use pricing::{DollarPricing, PricedOperation};
pub use registry::TokenRegistry;

pub use registry_core::{AccountId, Amount, LedgerError, RegistryEvent, TokenId};

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur in registry operations
///
/// Every failure aborts the triggering operation with zero side effects;
/// nothing is swallowed or retried internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Ledger violations (unknown token, zero-account misuse on reads)
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("recipient must not be the zero account")]
    InvalidRecipient,

    #[error("caller is not the registry owner")]
    NotOwner,

    #[error("caller is not the token owner nor an operator")]
    NotOwnerOrOperator,

    #[error("caller is not the owner, an operator nor the approved account")]
    NotAuthorized,

    #[error("`from` is not the owner of token {token}")]
    OwnerMismatch { token: TokenId },

    #[error("insufficient payment to {operation}: required {required}, tendered {tendered}")]
    InsufficientPayment {
        operation: PricedOperation,
        required: Amount,
        tendered: Amount,
    },

    #[error("insufficient stable-token approval: required {required}, approved {approved}")]
    InsufficientApproval { required: Amount, approved: Amount },

    #[error("recipient {0} did not acknowledge the transfer")]
    UnsafeRecipient(AccountId),

    #[error("mint for creators has not started yet")]
    CreatorsMintNotStarted,

    #[error("mint for creators has already ended")]
    CreatorsMintEnded,

    #[error("mint for users has not started yet")]
    UsersMintNotStarted,

    #[error("mint for users has already ended")]
    UsersMintEnded,

    #[error("pricing references cannot change once public minting has started")]
    PricingLocked,

    #[error("dollar pricing has not been configured")]
    DollarPricingNotConfigured,

    #[error("settings cannot change once minting has started")]
    ConfigurationLockedAfterLaunch,

    #[error("price feed returned a non-positive rate")]
    InvalidFeedRate,

    /// External collaborator call failed outright
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}
