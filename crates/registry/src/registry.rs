// registry/src/registry.rs

use crate::collaborators::{PriceFeed, StableToken, TokenReceiver};
use crate::config::RegistrySettings;
use crate::phases::{MintSchedule, RegistryPhase};
use crate::pricing::{require_payment, DollarPricing, PricedOperation};
use crate::{RegistryError, RegistryResult};
use registry_core::{
    AccountId, Amount, ApprovalBook, EventLog, OwnershipLedger, RegistryEvent, TokenId,
};
use std::sync::Arc;

/// Transfer/mint/burn orchestrator
///
/// Owns all token, approval, balance, supply and phase state exclusively;
/// the price feed and stable token are borrowed, call-only collaborators.
/// Every public operation is a single logical transaction: all checks run
/// before any mutation, and any failure leaves state exactly as it was.
pub struct TokenRegistry {
    /// The registry's own account (the allowance spender for stable pulls)
    account: AccountId,
    /// Privileged account for administrative operations
    owner: AccountId,
    settings: RegistrySettings,
    schedule: MintSchedule,
    ledger: OwnershipLedger,
    approvals: ApprovalBook,
    dollar: DollarPricing,
    /// Native value collected from priced operations, swept by
    /// `withdraw_all`. Dollar proceeds never pass through here.
    collected: Amount,
    events: EventLog,
    /// Next sequential token id
    next_id: TokenId,
}

impl TokenRegistry {
    /// Fixed variant: every setting is final and the creators allocation
    /// opens immediately.
    pub fn new(account: AccountId, owner: AccountId, settings: RegistrySettings) -> Self {
        let mut schedule = MintSchedule::new(settings.total_supply, settings.tokens_for_creators);
        schedule.start_creators_mint();
        tracing::info!(
            name = %settings.name,
            symbol = %settings.symbol,
            cap = settings.total_supply,
            "token registry created"
        );
        Self {
            account,
            owner,
            settings,
            schedule,
            ledger: OwnershipLedger::new(),
            approvals: ApprovalBook::new(),
            dollar: DollarPricing::new(),
            collected: Amount::zero(),
            events: EventLog::new(),
            next_id: 0,
        }
    }

    /// Changeable variant: supply and prices start at zero and the
    /// guarded setters may adjust them until a mint phase starts; the
    /// creators allocation needs an explicit `start_creators_mint`.
    pub fn unconfigured(
        account: AccountId,
        owner: AccountId,
        name: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        let settings = RegistrySettings::blank(name, symbol);
        tracing::info!(name = %settings.name, symbol = %settings.symbol, "token registry created (unconfigured)");
        Self {
            account,
            owner,
            schedule: MintSchedule::new(0, 0),
            settings,
            ledger: OwnershipLedger::new(),
            approvals: ApprovalBook::new(),
            dollar: DollarPricing::new(),
            collected: Amount::zero(),
            events: EventLog::new(),
            next_id: 0,
        }
    }

    // --------- metadata and state views ---------

    pub fn name(&self) -> &str {
        &self.settings.name
    }

    pub fn symbol(&self) -> &str {
        &self.settings.symbol
    }

    pub fn base_uri(&self) -> &str {
        &self.settings.base_uri
    }

    /// Metadata URI for an existing token: base URI + decimal id, or the
    /// empty string when no base URI is set
    pub fn token_uri(&self, token_id: TokenId) -> RegistryResult<String> {
        self.ledger.owner_of(token_id)?;
        if self.settings.base_uri.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{}{}", self.settings.base_uri, token_id))
    }

    pub fn registry_account(&self) -> AccountId {
        self.account
    }

    pub fn registry_owner(&self) -> AccountId {
        self.owner
    }

    pub fn total_supply(&self) -> u64 {
        self.schedule.total_supply()
    }

    pub fn tokens_for_creators(&self) -> u64 {
        self.schedule.tokens_for_creators()
    }

    pub fn mint_price(&self) -> &Amount {
        &self.settings.mint_price
    }

    pub fn transfer_fee(&self) -> &Amount {
        &self.settings.transfer_fee
    }

    pub fn burn_price(&self) -> &Amount {
        &self.settings.burn_price
    }

    pub fn how_many_not_minted(&self) -> u64 {
        self.schedule.not_minted()
    }

    pub fn how_many_burnt(&self) -> u64 {
        self.schedule.burnt()
    }

    pub fn phase(&self) -> RegistryPhase {
        self.schedule.phase()
    }

    pub fn creators_mint_started(&self) -> bool {
        self.schedule.creators_mint_started()
    }

    pub fn creators_mint_ended(&self) -> bool {
        self.schedule.creators_mint_ended()
    }

    pub fn users_mint_started(&self) -> bool {
        self.schedule.users_mint_started()
    }

    pub fn users_mint_ended(&self) -> bool {
        self.schedule.users_mint_ended()
    }

    /// Native value retained from priced operations so far
    pub fn collected_balance(&self) -> &Amount {
        &self.collected
    }

    pub fn owner_of(&self, token_id: TokenId) -> RegistryResult<AccountId> {
        Ok(self.ledger.owner_of(token_id)?)
    }

    pub fn balance_of(&self, account: AccountId) -> RegistryResult<u64> {
        Ok(self.ledger.balance_of(account)?)
    }

    pub fn get_approved(&self, token_id: TokenId) -> RegistryResult<Option<AccountId>> {
        self.ledger.owner_of(token_id)?;
        Ok(self.approvals.approved_for(token_id))
    }

    pub fn is_approved_for_all(&self, owner: AccountId, operator: AccountId) -> bool {
        self.approvals.is_operator(owner, operator)
    }

    pub fn events(&self) -> &[RegistryEvent] {
        self.events.all()
    }

    pub fn take_events(&mut self) -> Vec<RegistryEvent> {
        self.events.take()
    }

    // --------- approvals ---------

    /// Overwrite the token's single-approval slot. Only the token owner
    /// or one of its blanket operators may do this.
    pub fn approve(
        &mut self,
        caller: AccountId,
        approved: AccountId,
        token_id: TokenId,
    ) -> RegistryResult<()> {
        let owner = self.ledger.owner_of(token_id)?;
        if caller != owner && !self.approvals.is_operator(owner, caller) {
            return Err(RegistryError::NotOwnerOrOperator);
        }

        self.approvals.set_token_approval(token_id, approved);
        self.events.push(RegistryEvent::Approval {
            owner,
            approved,
            token_id,
        });
        Ok(())
    }

    /// Grant or revoke blanket-operator approval. Always succeeds, even
    /// when re-setting the current value.
    pub fn set_approval_for_all(
        &mut self,
        caller: AccountId,
        operator: AccountId,
        enabled: bool,
    ) -> RegistryResult<()> {
        self.approvals.set_operator(caller, operator, enabled);
        self.events.push(RegistryEvent::ApprovalForAll {
            owner: caller,
            operator,
            enabled,
        });
        Ok(())
    }

    // --------- transfers ---------

    /// Transfer `token_id` from `from` to `to`, tendering the transfer fee
    pub fn transfer_from(
        &mut self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        token_id: TokenId,
        tendered: Amount,
    ) -> RegistryResult<()> {
        self.check_transfer(caller, from, to, token_id, &tendered)?;
        self.apply_transfer(from, to, token_id);
        self.collect(tendered);
        self.events.push(RegistryEvent::Transfer { from, to, token_id });
        tracing::debug!(%from, %to, token_id, "token transferred");
        Ok(())
    }

    /// Like `transfer_from`, but when `to` is a contract account the
    /// recipient's receiver hook must acknowledge the transfer. A wrong
    /// signal or a raised failure rolls the applied mutation back and the
    /// whole operation fails with `UnsafeRecipient`.
    ///
    /// `receiver` is `None` for externally-owned recipients, which need
    /// no acknowledgment.
    pub fn safe_transfer_from(
        &mut self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        token_id: TokenId,
        tendered: Amount,
        data: &[u8],
        receiver: Option<&dyn TokenReceiver>,
    ) -> RegistryResult<()> {
        self.check_transfer(caller, from, to, token_id, &tendered)?;
        let prior_approval = self.apply_transfer(from, to, token_id);

        if let Some(receiver) = receiver {
            let acknowledged = matches!(
                receiver.on_token_received(caller, from, token_id, data),
                Ok(ack) if ack.is_accept()
            );
            if !acknowledged {
                // compensate: undo the ownership change and restore the
                // approval slot, then fail the whole operation
                self.ledger.record_transfer(to, from, token_id);
                if let Some(approved) = prior_approval {
                    self.approvals.set_token_approval(token_id, approved);
                }
                return Err(RegistryError::UnsafeRecipient(to));
            }
        }

        self.collect(tendered);
        self.events.push(RegistryEvent::Transfer { from, to, token_id });
        tracing::debug!(%from, %to, token_id, "token transferred (safe)");
        Ok(())
    }

    // --------- minting ---------

    /// Mint from the creators allocation. Privileged and never priced.
    pub fn mint_for_creators(&mut self, caller: AccountId, to: AccountId) -> RegistryResult<TokenId> {
        self.require_owner(caller)?;
        if to.is_zero() {
            return Err(RegistryError::InvalidRecipient);
        }
        self.schedule.record_creators_mint()?;
        Ok(self.apply_mint(to))
    }

    /// Public paid mint in the native unit. Anyone may mint; only the
    /// recipient and the tendered value matter.
    pub fn mint_for_users(&mut self, to: AccountId, tendered: Amount) -> RegistryResult<TokenId> {
        if to.is_zero() {
            return Err(RegistryError::InvalidRecipient);
        }
        self.schedule.ensure_users_mint_open()?;
        require_payment(PricedOperation::Mint, &self.settings.mint_price, &tendered)?;

        self.schedule.record_users_mint()?;
        self.collect(tendered);
        Ok(self.apply_mint(to))
    }

    /// Public paid mint priced in the stable unit. The required amount is
    /// computed from a fresh feed reading, pulled from the caller's
    /// pre-authorized allowance and paid straight to the privileged
    /// account, bypassing `withdraw_all` entirely.
    pub fn mint_for_users_in_dollars(
        &mut self,
        caller: AccountId,
        to: AccountId,
    ) -> RegistryResult<TokenId> {
        if to.is_zero() {
            return Err(RegistryError::InvalidRecipient);
        }
        self.schedule.ensure_users_mint_open()?;
        // capacity must be checked before the pull so a failure cannot
        // leave the caller's stable balance spent
        if self.schedule.not_minted() == 0 {
            return Err(RegistryError::UsersMintEnded);
        }

        let stable = self.dollar.stable_token()?;
        let required = self.dollar.required_stable_amount(&self.settings.mint_price)?;
        let approved = stable.allowance(caller, self.account);
        if approved < required {
            return Err(RegistryError::InsufficientApproval { required, approved });
        }
        stable.transfer_from(self.account, caller, self.owner, &required)?;

        self.schedule.record_users_mint()?;
        Ok(self.apply_mint(to))
    }

    // --------- burning ---------

    /// Destroy `token_id`, tendering the burn price. Legal in every
    /// phase, including after both mint phases have ended.
    pub fn burn(
        &mut self,
        caller: AccountId,
        from: AccountId,
        token_id: TokenId,
        tendered: Amount,
    ) -> RegistryResult<()> {
        let owner = self.ledger.owner_of(token_id)?;
        if from != owner {
            return Err(RegistryError::OwnerMismatch { token: token_id });
        }
        if !self.approvals.is_authorized(caller, owner, token_id) {
            return Err(RegistryError::NotAuthorized);
        }
        require_payment(PricedOperation::Burn, &self.settings.burn_price, &tendered)?;

        self.collect(tendered);
        self.approvals.clear_token_approval(token_id);
        self.ledger.record_burn(from, token_id);
        self.schedule.record_burn();
        self.events.push(RegistryEvent::Transfer {
            from,
            to: AccountId::zero(),
            token_id,
        });
        tracing::debug!(%from, token_id, "token burnt");
        Ok(())
    }

    // --------- privileged operations ---------

    /// Open the creators allocation (changeable variant; the fixed
    /// variant opens it at construction). Idempotent.
    pub fn start_creators_mint(&mut self, caller: AccountId) -> RegistryResult<()> {
        self.require_owner(caller)?;
        self.schedule.start_creators_mint();
        Ok(())
    }

    /// Open the public allocation, irrevocably closing the creators
    /// allocation. Idempotent.
    pub fn start_users_mint(&mut self, caller: AccountId) -> RegistryResult<()> {
        self.require_owner(caller)?;
        self.schedule.start_users_mint();
        Ok(())
    }

    /// Sweep the entire collected native balance to `recipient`. A no-op
    /// (not an error) on an empty balance.
    pub fn withdraw_all(
        &mut self,
        caller: AccountId,
        recipient: AccountId,
    ) -> RegistryResult<Amount> {
        self.require_owner(caller)?;
        let swept = std::mem::replace(&mut self.collected, Amount::zero());
        if !swept.is_zero() {
            tracing::info!(%recipient, amount = %swept, "collected balance withdrawn");
        }
        Ok(swept)
    }

    /// Hand the privileged account over to `new_owner`
    pub fn transfer_registry_ownership(
        &mut self,
        caller: AccountId,
        new_owner: AccountId,
    ) -> RegistryResult<()> {
        self.require_owner(caller)?;
        if new_owner.is_zero() {
            return Err(RegistryError::InvalidRecipient);
        }
        tracing::info!(from = %self.owner, to = %new_owner, "registry ownership transferred");
        self.owner = new_owner;
        Ok(())
    }

    // --------- pre-launch setters (changeable variant) ---------

    pub fn set_total_supply(&mut self, caller: AccountId, total_supply: u64) -> RegistryResult<()> {
        self.require_settable(caller)?;
        self.settings.total_supply = total_supply;
        self.schedule.set_total_supply(total_supply);
        Ok(())
    }

    pub fn set_tokens_for_creators(
        &mut self,
        caller: AccountId,
        tokens_for_creators: u64,
    ) -> RegistryResult<()> {
        self.require_settable(caller)?;
        self.settings.tokens_for_creators = tokens_for_creators;
        self.schedule.set_tokens_for_creators(tokens_for_creators);
        Ok(())
    }

    pub fn set_mint_price(&mut self, caller: AccountId, mint_price: Amount) -> RegistryResult<()> {
        self.require_settable(caller)?;
        self.settings.mint_price = mint_price;
        Ok(())
    }

    pub fn set_transfer_fee(
        &mut self,
        caller: AccountId,
        transfer_fee: Amount,
    ) -> RegistryResult<()> {
        self.require_settable(caller)?;
        self.settings.transfer_fee = transfer_fee;
        Ok(())
    }

    pub fn set_burn_price(&mut self, caller: AccountId, burn_price: Amount) -> RegistryResult<()> {
        self.require_settable(caller)?;
        self.settings.burn_price = burn_price;
        Ok(())
    }

    pub fn set_base_uri(
        &mut self,
        caller: AccountId,
        base_uri: impl Into<String>,
    ) -> RegistryResult<()> {
        self.require_settable(caller)?;
        self.settings.base_uri = base_uri.into();
        Ok(())
    }

    // --------- dollar pricing configuration and queries ---------

    /// Install the stable token. Only permitted before public minting
    /// starts.
    pub fn set_stable_token(
        &mut self,
        caller: AccountId,
        token: Arc<dyn StableToken>,
    ) -> RegistryResult<()> {
        self.require_owner(caller)?;
        if self.schedule.users_mint_started() {
            return Err(RegistryError::PricingLocked);
        }
        self.dollar.set_stable_token(token);
        Ok(())
    }

    /// Install the price feed. Only permitted before public minting
    /// starts.
    pub fn set_price_feed(
        &mut self,
        caller: AccountId,
        feed: Arc<dyn PriceFeed>,
    ) -> RegistryResult<()> {
        self.require_owner(caller)?;
        if self.schedule.users_mint_started() {
            return Err(RegistryError::PricingLocked);
        }
        self.dollar.set_price_feed(feed);
        Ok(())
    }

    /// The installed stable token; fails unless dollar pricing is fully
    /// configured
    pub fn stable_token(&self) -> RegistryResult<Arc<dyn StableToken>> {
        self.dollar.stable_token()
    }

    /// The installed price feed; fails unless dollar pricing is fully
    /// configured
    pub fn price_feed(&self) -> RegistryResult<Arc<dyn PriceFeed>> {
        self.dollar.price_feed()
    }

    /// Current whole-dollar mint price from a fresh feed reading
    pub fn mint_price_in_dollars(&self) -> RegistryResult<Amount> {
        self.dollar.price_in_dollars(&self.settings.mint_price)
    }

    // --------- internals ---------

    fn require_owner(&self, caller: AccountId) -> RegistryResult<()> {
        if caller != self.owner {
            return Err(RegistryError::NotOwner);
        }
        Ok(())
    }

    fn require_settable(&self, caller: AccountId) -> RegistryResult<()> {
        self.require_owner(caller)?;
        if self.schedule.launched() {
            return Err(RegistryError::ConfigurationLockedAfterLaunch);
        }
        Ok(())
    }

    /// The ordered transfer checks shared by both transfer flavours:
    /// existence, recipient, stale `from`, authorization, fee.
    fn check_transfer(
        &self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        token_id: TokenId,
        tendered: &Amount,
    ) -> RegistryResult<()> {
        let owner = self.ledger.owner_of(token_id)?;
        if to.is_zero() {
            return Err(RegistryError::InvalidRecipient);
        }
        if from != owner {
            return Err(RegistryError::OwnerMismatch { token: token_id });
        }
        if !self.approvals.is_authorized(caller, owner, token_id) {
            return Err(RegistryError::NotAuthorized);
        }
        require_payment(PricedOperation::Transfer, &self.settings.transfer_fee, tendered)
    }

    /// Clear the approval slot and move ownership; returns the prior
    /// approval holder for compensating rollbacks
    fn apply_transfer(&mut self, from: AccountId, to: AccountId, token_id: TokenId) -> Option<AccountId> {
        let prior = self.approvals.clear_token_approval(token_id);
        self.ledger.record_transfer(from, to, token_id);
        prior
    }

    /// Assign the next sequential id, record ownership and emit the
    /// canonical mint notification (zero-account sender)
    fn apply_mint(&mut self, to: AccountId) -> TokenId {
        let token_id = self.next_id;
        self.next_id += 1;
        self.ledger.record_mint(to, token_id);
        self.events.push(RegistryEvent::Transfer {
            from: AccountId::zero(),
            to,
            token_id,
        });
        tracing::debug!(%to, token_id, "token minted");
        token_id
    }

    fn collect(&mut self, tendered: Amount) {
        self.collected = self.collected.clone() + tendered;
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

    fn settings() -> RegistrySettings {
        RegistrySettings::new(
            "PoorjudeNFT",
            "PJNFT",
            "",
            10,
            3,
            Amount::from_u64(1_000),
            Amount::from_u64(100),
            Amount::from_u64(5_000),
        )
    }

    /// owner = acc(1), registry account = acc(9)
    fn registry() -> TokenRegistry {
        TokenRegistry::new(acc(9), acc(1), settings())
    }

    #[test]
    fn test_fixed_variant_opens_creators_mint() {
        let nft = registry();
        assert!(nft.creators_mint_started());
        assert!(!nft.creators_mint_ended());
        assert_eq!(nft.phase(), RegistryPhase::CreatorsMinting);
        assert_eq!(nft.name(), "PoorjudeNFT");
        assert_eq!(nft.symbol(), "PJNFT");
    }

    #[test]
    fn test_creators_mint_assigns_sequential_ids() {
        let mut nft = registry();
        assert_eq!(nft.mint_for_creators(acc(1), acc(2)).unwrap(), 0);
        assert_eq!(nft.mint_for_creators(acc(1), acc(2)).unwrap(), 1);

        assert_eq!(nft.owner_of(0).unwrap(), acc(2));
        assert_eq!(nft.balance_of(acc(2)).unwrap(), 2);
        assert_eq!(nft.how_many_not_minted(), 8);
    }

    #[test]
    fn test_creators_mint_is_privileged() {
        let mut nft = registry();
        assert!(matches!(
            nft.mint_for_creators(acc(2), acc(2)),
            Err(RegistryError::NotOwner)
        ));
    }

    #[test]
    fn test_mint_to_zero_account_rejected() {
        let mut nft = registry();
        assert!(matches!(
            nft.mint_for_creators(acc(1), AccountId::zero()),
            Err(RegistryError::InvalidRecipient)
        ));

        nft.start_users_mint(acc(1)).unwrap();
        assert!(matches!(
            nft.mint_for_users(AccountId::zero(), Amount::from_u64(1_000)),
            Err(RegistryError::InvalidRecipient)
        ));
    }

    #[test]
    fn test_users_mint_payment_boundary() {
        let mut nft = registry();
        nft.start_users_mint(acc(1)).unwrap();

        // one unit short fails
        assert!(matches!(
            nft.mint_for_users(acc(4), Amount::from_u64(999)),
            Err(RegistryError::InsufficientPayment {
                operation: PricedOperation::Mint,
                ..
            })
        ));
        assert_eq!(nft.how_many_not_minted(), 10);

        // exact payment succeeds and assigns id 0
        let id = nft.mint_for_users(acc(4), Amount::from_u64(1_000)).unwrap();
        assert_eq!(id, 0);
        assert_eq!(nft.owner_of(0).unwrap(), acc(4));
        assert_eq!(nft.balance_of(acc(4)).unwrap(), 1);

        // excess is retained, not refunded
        nft.mint_for_users(acc(5), Amount::from_u64(1_234)).unwrap();
        assert_eq!(nft.collected_balance(), &Amount::from_u64(2_234));
    }

    #[test]
    fn test_users_mint_requires_start() {
        let mut nft = registry();
        assert!(matches!(
            nft.mint_for_users(acc(4), Amount::from_u64(1_000)),
            Err(RegistryError::UsersMintNotStarted)
        ));
    }

    #[test]
    fn test_transfer_checks_in_order() {
        let mut nft = registry();
        let fee = Amount::from_u64(100);

        // unknown token first
        assert!(matches!(
            nft.transfer_from(acc(2), acc(2), acc(3), 0, fee.clone()),
            Err(RegistryError::Ledger(registry_core::LedgerError::UnknownToken(0)))
        ));

        nft.mint_for_creators(acc(1), acc(2)).unwrap();

        // zero recipient
        assert!(matches!(
            nft.transfer_from(acc(2), acc(2), AccountId::zero(), 0, fee.clone()),
            Err(RegistryError::InvalidRecipient)
        ));
        // stale `from`
        assert!(matches!(
            nft.transfer_from(acc(2), acc(3), acc(4), 0, fee.clone()),
            Err(RegistryError::OwnerMismatch { token: 0 })
        ));
        // unauthorized caller
        assert!(matches!(
            nft.transfer_from(acc(3), acc(2), acc(4), 0, fee.clone()),
            Err(RegistryError::NotAuthorized)
        ));
        // underpaid fee
        assert!(matches!(
            nft.transfer_from(acc(2), acc(2), acc(4), 0, Amount::from_u64(99)),
            Err(RegistryError::InsufficientPayment {
                operation: PricedOperation::Transfer,
                ..
            })
        ));

        // and the state is untouched throughout
        assert_eq!(nft.owner_of(0).unwrap(), acc(2));
        assert!(nft.collected_balance().is_zero());

        nft.transfer_from(acc(2), acc(2), acc(4), 0, fee).unwrap();
        assert_eq!(nft.owner_of(0).unwrap(), acc(4));
        assert_eq!(nft.balance_of(acc(2)).unwrap(), 0);
        assert_eq!(nft.balance_of(acc(4)).unwrap(), 1);
    }

    #[test]
    fn test_transfer_by_approved_and_operator() {
        let mut nft = registry();
        let fee = Amount::from_u64(100);
        nft.mint_for_creators(acc(1), acc(2)).unwrap();
        nft.mint_for_creators(acc(1), acc(2)).unwrap();

        // single approval
        nft.approve(acc(2), acc(3), 0).unwrap();
        nft.transfer_from(acc(3), acc(2), acc(5), 0, fee.clone()).unwrap();
        assert_eq!(nft.owner_of(0).unwrap(), acc(5));

        // blanket operator
        nft.set_approval_for_all(acc(2), acc(4), true).unwrap();
        nft.transfer_from(acc(4), acc(2), acc(5), 1, fee).unwrap();
        assert_eq!(nft.owner_of(1).unwrap(), acc(5));
    }

    #[test]
    fn test_transfer_clears_single_approval_only() {
        let mut nft = registry();
        nft.mint_for_creators(acc(1), acc(2)).unwrap();
        nft.approve(acc(2), acc(3), 0).unwrap();
        nft.set_approval_for_all(acc(2), acc(4), true).unwrap();

        nft.transfer_from(acc(2), acc(2), acc(5), 0, Amount::from_u64(100)).unwrap();

        assert_eq!(nft.get_approved(0).unwrap(), None);
        // operator approvals are unaffected by transfers
        assert!(nft.is_approved_for_all(acc(2), acc(4)));
    }

    #[test]
    fn test_approve_requires_owner_or_operator() {
        let mut nft = registry();
        nft.mint_for_creators(acc(1), acc(2)).unwrap();

        assert!(matches!(
            nft.approve(acc(3), acc(4), 0),
            Err(RegistryError::NotOwnerOrOperator)
        ));

        // the single-approved account still cannot re-approve
        nft.approve(acc(2), acc(3), 0).unwrap();
        assert!(matches!(
            nft.approve(acc(3), acc(4), 0),
            Err(RegistryError::NotOwnerOrOperator)
        ));

        // an operator can
        nft.set_approval_for_all(acc(2), acc(5), true).unwrap();
        nft.approve(acc(5), acc(4), 0).unwrap();
        assert_eq!(nft.get_approved(0).unwrap(), Some(acc(4)));
    }

    #[test]
    fn test_burn_revokes_and_counts() {
        let mut nft = registry();
        nft.mint_for_creators(acc(1), acc(2)).unwrap();

        // wrong owner in `from`
        assert!(matches!(
            nft.burn(acc(2), acc(3), 0, Amount::from_u64(5_000)),
            Err(RegistryError::OwnerMismatch { token: 0 })
        ));
        // unauthorized caller
        assert!(matches!(
            nft.burn(acc(3), acc(2), 0, Amount::from_u64(5_000)),
            Err(RegistryError::NotAuthorized)
        ));
        // underpayment
        assert!(matches!(
            nft.burn(acc(2), acc(2), 0, Amount::from_u64(4_999)),
            Err(RegistryError::InsufficientPayment {
                operation: PricedOperation::Burn,
                ..
            })
        ));
        assert_eq!(nft.how_many_burnt(), 0);

        nft.burn(acc(2), acc(2), 0, Amount::from_u64(5_000)).unwrap();
        assert_eq!(nft.how_many_burnt(), 1);
        assert!(matches!(
            nft.owner_of(0),
            Err(RegistryError::Ledger(registry_core::LedgerError::UnknownToken(0)))
        ));
        assert!(matches!(
            nft.burn(acc(2), acc(2), 0, Amount::from_u64(5_000)),
            Err(RegistryError::Ledger(registry_core::LedgerError::UnknownToken(0)))
        ));
    }

    #[test]
    fn test_burn_emits_canonical_signal() {
        let mut nft = registry();
        nft.mint_for_creators(acc(1), acc(2)).unwrap();
        nft.burn(acc(2), acc(2), 0, Amount::from_u64(5_000)).unwrap();

        assert_eq!(
            nft.events().last(),
            Some(&RegistryEvent::Transfer {
                from: acc(2),
                to: AccountId::zero(),
                token_id: 0,
            })
        );
    }

    #[test]
    fn test_withdraw_all_sweeps_and_is_idempotent() {
        let mut nft = registry();
        nft.start_users_mint(acc(1)).unwrap();
        nft.mint_for_users(acc(4), Amount::from_u64(1_100)).unwrap();

        assert!(matches!(
            nft.withdraw_all(acc(2), acc(2)),
            Err(RegistryError::NotOwner)
        ));

        let swept = nft.withdraw_all(acc(1), acc(6)).unwrap();
        assert_eq!(swept, Amount::from_u64(1_100));
        assert!(nft.collected_balance().is_zero());

        // empty sweep is a no-op, not an error
        let swept = nft.withdraw_all(acc(1), acc(6)).unwrap();
        assert!(swept.is_zero());
    }

    #[test]
    fn test_token_uri() {
        let mut nft = TokenRegistry::new(
            acc(9),
            acc(1),
            RegistrySettings::new(
                "PoorjudeNFT",
                "PJNFT",
                "example.com/nfts/",
                5,
                3,
                Amount::zero(),
                Amount::zero(),
                Amount::zero(),
            ),
        );

        assert!(matches!(
            nft.token_uri(0),
            Err(RegistryError::Ledger(registry_core::LedgerError::UnknownToken(0)))
        ));

        nft.mint_for_creators(acc(1), acc(2)).unwrap();
        nft.mint_for_creators(acc(1), acc(2)).unwrap();
        assert_eq!(nft.token_uri(0).unwrap(), "example.com/nfts/0");
        assert_eq!(nft.token_uri(1).unwrap(), "example.com/nfts/1");

        // empty base URI yields empty strings for existing tokens
        let mut blank = registry();
        blank.mint_for_creators(acc(1), acc(2)).unwrap();
        assert_eq!(blank.token_uri(0).unwrap(), "");
    }

    #[test]
    fn test_ownership_transfer() {
        let mut nft = registry();

        assert!(matches!(
            nft.transfer_registry_ownership(acc(2), acc(2)),
            Err(RegistryError::NotOwner)
        ));
        assert!(matches!(
            nft.transfer_registry_ownership(acc(1), AccountId::zero()),
            Err(RegistryError::InvalidRecipient)
        ));

        nft.transfer_registry_ownership(acc(1), acc(2)).unwrap();
        assert_eq!(nft.registry_owner(), acc(2));
        assert!(matches!(
            nft.mint_for_creators(acc(1), acc(1)),
            Err(RegistryError::NotOwner)
        ));
        nft.mint_for_creators(acc(2), acc(2)).unwrap();
    }

    #[test]
    fn test_changeable_variant_setters() {
        let mut nft = TokenRegistry::unconfigured(acc(9), acc(1), "PoorjudeNFT", "PJNFT");
        assert_eq!(nft.total_supply(), 0);
        assert_eq!(nft.phase(), RegistryPhase::Created);

        // setters are privileged
        assert!(matches!(
            nft.set_total_supply(acc(2), 100),
            Err(RegistryError::NotOwner)
        ));

        nft.set_total_supply(acc(1), 100).unwrap();
        nft.set_tokens_for_creators(acc(1), 15).unwrap();
        nft.set_mint_price(acc(1), Amount::from_u64(500)).unwrap();
        nft.set_transfer_fee(acc(1), Amount::from_u64(20)).unwrap();
        nft.set_burn_price(acc(1), Amount::from_u64(1_250)).unwrap();
        nft.set_base_uri(acc(1), "abcde.com/").unwrap();

        assert_eq!(nft.total_supply(), 100);
        assert_eq!(nft.tokens_for_creators(), 15);
        assert_eq!(nft.mint_price(), &Amount::from_u64(500));

        // creators mint needs an explicit start in this variant
        assert!(matches!(
            nft.mint_for_creators(acc(1), acc(2)),
            Err(RegistryError::CreatorsMintNotStarted)
        ));
        nft.start_creators_mint(acc(1)).unwrap();
        nft.mint_for_creators(acc(1), acc(2)).unwrap();
        assert_eq!(nft.token_uri(0).unwrap(), "abcde.com/0");

        // any started phase locks every setter
        assert!(matches!(
            nft.set_burn_price(acc(1), Amount::from_u64(5)),
            Err(RegistryError::ConfigurationLockedAfterLaunch)
        ));
        nft.start_users_mint(acc(1)).unwrap();
        assert!(matches!(
            nft.set_total_supply(acc(1), 150),
            Err(RegistryError::ConfigurationLockedAfterLaunch)
        ));
    }

    #[test]
    fn test_phase_reflects_closed_creators_allocation() {
        let mut nft = registry();
        for _ in 0..3 {
            nft.mint_for_creators(acc(1), acc(2)).unwrap();
        }

        // reserve exhausted, public allocation not yet open
        assert!(nft.creators_mint_ended());
        assert_eq!(nft.phase(), RegistryPhase::CreatorsClosed);

        nft.start_users_mint(acc(1)).unwrap();
        assert_eq!(nft.phase(), RegistryPhase::UsersMinting);
    }

    #[test]
    fn test_failed_mint_on_zero_cap_changes_nothing() {
        let mut nft = TokenRegistry::unconfigured(acc(9), acc(1), "PoorjudeNFT", "PJNFT");
        nft.start_creators_mint(acc(1)).unwrap();

        assert!(matches!(
            nft.mint_for_creators(acc(1), acc(2)),
            Err(RegistryError::CreatorsMintEnded)
        ));
        assert!(!nft.creators_mint_ended());
        assert_eq!(nft.phase(), RegistryPhase::CreatorsMinting);
        assert_eq!(nft.how_many_not_minted(), 0);
        assert!(nft.events().is_empty());
    }

    #[test]
    fn test_mint_events_use_zero_sender() {
        let mut nft = registry();
        nft.mint_for_creators(acc(1), acc(2)).unwrap();

        assert_eq!(
            nft.events().last(),
            Some(&RegistryEvent::Transfer {
                from: AccountId::zero(),
                to: acc(2),
                token_id: 0,
            })
        );
    }
}
