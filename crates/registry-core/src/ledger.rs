// registry-core/src/ledger.rs

use crate::types::{AccountId, TokenId};
use crate::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity & balance ledger
///
/// Maps token identifier -> owner and owner -> count of owned tokens.
/// A token exists iff it has a recorded owner; burning removes the
/// record entirely, so "exists" is an explicit lookup, not a sentinel
/// comparison.
///
/// The `record_*` primitives maintain the balance invariant atomically
/// with every ownership change. They are only called by the registry
/// orchestrator after all checks have passed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnershipLedger {
    /// token id -> current owner
    owners: HashMap<TokenId, AccountId>,
    /// owner -> number of tokens owned
    balances: HashMap<AccountId, u64>,
}

impl OwnershipLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current owner of `token_id`, or `UnknownToken` if it was never
    /// minted or has been burnt.
    pub fn owner_of(&self, token_id: TokenId) -> LedgerResult<AccountId> {
        self.owners
            .get(&token_id)
            .copied()
            .ok_or(LedgerError::UnknownToken(token_id))
    }

    pub fn exists(&self, token_id: TokenId) -> bool {
        self.owners.contains_key(&token_id)
    }

    /// Number of tokens owned by `account`. Never-seen accounts own 0;
    /// the zero account is rejected.
    pub fn balance_of(&self, account: AccountId) -> LedgerResult<u64> {
        if account.is_zero() {
            return Err(LedgerError::InvalidAccount);
        }
        Ok(self.balances.get(&account).copied().unwrap_or(0))
    }

    /// Number of tokens with a live owner
    pub fn live_count(&self) -> u64 {
        self.owners.len() as u64
    }

    /// Record a freshly minted token. Caller guarantees the id is unused
    /// and `to` is not the zero account.
    pub fn record_mint(&mut self, to: AccountId, token_id: TokenId) {
        debug_assert!(!to.is_zero());
        debug_assert!(!self.owners.contains_key(&token_id));

        self.owners.insert(token_id, to);
        *self.balances.entry(to).or_insert(0) += 1;
    }

    /// Record an ownership change. Caller guarantees `from` is the
    /// current owner and `to` is not the zero account.
    pub fn record_transfer(&mut self, from: AccountId, to: AccountId, token_id: TokenId) {
        debug_assert!(!to.is_zero());
        debug_assert_eq!(self.owners.get(&token_id), Some(&from));

        self.owners.insert(token_id, to);
        *self.balances.entry(from).or_insert(0) -= 1;
        *self.balances.entry(to).or_insert(0) += 1;
    }

    /// Revoke a token's existence. Caller guarantees `owner` is the
    /// current owner.
    pub fn record_burn(&mut self, owner: AccountId, token_id: TokenId) {
        debug_assert_eq!(self.owners.get(&token_id), Some(&owner));

        self.owners.remove(&token_id);
        *self.balances.entry(owner).or_insert(0) -= 1;
    }
}
