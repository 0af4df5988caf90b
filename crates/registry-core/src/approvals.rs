// registry-core/src/approvals.rs

use crate::types::{AccountId, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Authorization graph
///
/// Two independent relations:
/// - single-token approval: at most one approved account per existing
///   token, overwritten by every explicit approval and cleared whenever
///   the token's ownership changes;
/// - operator approval: a boolean per (owner, operator) pair that
///   persists across transfers and only changes by explicit owner action.
///
/// The book stores state only; phase and caller checks live in the
/// registry orchestrator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApprovalBook {
    /// token id -> single approved account
    token_approvals: HashMap<TokenId, AccountId>,
    /// (owner, operator) pairs with blanket approval
    operators: HashSet<(AccountId, AccountId)>,
}

impl ApprovalBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single approved account for `token_id`, if any
    pub fn approved_for(&self, token_id: TokenId) -> Option<AccountId> {
        self.token_approvals.get(&token_id).copied()
    }

    /// Overwrite the token's single-approval slot (no accumulation)
    pub fn set_token_approval(&mut self, token_id: TokenId, approved: AccountId) {
        self.token_approvals.insert(token_id, approved);
    }

    /// Clear the single-approval slot, returning the previous holder so
    /// the orchestrator can restore it when compensating a failed safe
    /// transfer.
    pub fn clear_token_approval(&mut self, token_id: TokenId) -> Option<AccountId> {
        self.token_approvals.remove(&token_id)
    }

    pub fn set_operator(&mut self, owner: AccountId, operator: AccountId, enabled: bool) {
        if enabled {
            self.operators.insert((owner, operator));
        } else {
            self.operators.remove(&(owner, operator));
        }
    }

    pub fn is_operator(&self, owner: AccountId, operator: AccountId) -> bool {
        self.operators.contains(&(owner, operator))
    }

    /// The three-way authorization check used by transfer and burn:
    /// `caller` may act on `token_id` owned by `owner` iff it is the
    /// owner, the single-approved account, or a blanket operator.
    /// Evaluated fresh on every mutating call, never cached.
    pub fn is_authorized(&self, caller: AccountId, owner: AccountId, token_id: TokenId) -> bool {
        caller == owner
            || self.approved_for(token_id) == Some(caller)
            || self.is_operator(owner, caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acc(tag: u8) -> AccountId {
        let mut bytes = [0u8; 20];
        bytes[19] = tag;
        AccountId::new(bytes)
    }

    #[test]
    fn test_single_approval_overwrites() {
        let mut book = ApprovalBook::new();
        assert_eq!(book.approved_for(0), None);

        book.set_token_approval(0, acc(1));
        assert_eq!(book.approved_for(0), Some(acc(1)));

        book.set_token_approval(0, acc(2));
        assert_eq!(book.approved_for(0), Some(acc(2)));
    }

    #[test]
    fn test_clear_returns_previous_holder() {
        let mut book = ApprovalBook::new();
        book.set_token_approval(3, acc(1));

        assert_eq!(book.clear_token_approval(3), Some(acc(1)));
        assert_eq!(book.approved_for(3), None);
        assert_eq!(book.clear_token_approval(3), None);
    }

    #[test]
    fn test_operator_toggling() {
        let mut book = ApprovalBook::new();
        assert!(!book.is_operator(acc(1), acc(2)));

        book.set_operator(acc(1), acc(2), true);
        assert!(book.is_operator(acc(1), acc(2)));
        // directional: operator of acc(1) says nothing about acc(2)'s tokens
        assert!(!book.is_operator(acc(2), acc(1)));

        book.set_operator(acc(1), acc(2), false);
        assert!(!book.is_operator(acc(1), acc(2)));
    }

    #[test]
    fn test_three_way_authorization() {
        let mut book = ApprovalBook::new();
        let owner = acc(1);

        assert!(book.is_authorized(owner, owner, 0));
        assert!(!book.is_authorized(acc(2), owner, 0));

        book.set_token_approval(0, acc(2));
        assert!(book.is_authorized(acc(2), owner, 0));
        assert!(!book.is_authorized(acc(2), owner, 1));

        book.set_operator(owner, acc(3), true);
        assert!(book.is_authorized(acc(3), owner, 0));
        assert!(book.is_authorized(acc(3), owner, 1));
    }
}
