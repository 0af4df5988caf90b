// registry-core/src/lib.rs

//! Foundation state for the NFT registry
//!
//! This crate provides:
//! - Token, amount and account identifier types
//! - The identity & balance ledger (token id -> owner, owner -> count)
//! - The authorization graph (single approvals and blanket operators)
//! - Observable registry events

pub mod approvals;
pub mod events;
pub mod ledger;
pub mod types;

pub use approvals::ApprovalBook;
pub use events::{EventLog, RegistryEvent};
pub use ledger::OwnershipLedger;
pub use types::{AccountId, Amount, TokenId};

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors that can occur in the ledger foundation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("token {0} does not exist")]
    UnknownToken(TokenId),

    #[error("the zero account cannot hold or query tokens")]
    InvalidAccount,

    #[error("malformed account id: {0}")]
    MalformedAccount(String),
}
