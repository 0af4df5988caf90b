// registry/src/phases.rs

use crate::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};

/// Registry lifecycle phase derived from the four latches. Monotonic:
/// the view only ever moves forward through the variants in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RegistryPhase {
    /// No mint phase has started
    Created,
    /// Creators allocation is open
    CreatorsMinting,
    /// Creators allocation is closed, public allocation not yet open
    CreatorsClosed,
    /// Public allocation is open
    UsersMinting,
    /// Both mint phases have ended (burning stays legal)
    Ended,
}

/// Supply & phase state machine
///
/// Tracks minted/burnt counts against the fixed cap and the creators
/// reserve, and the four phase latches. The latches are monotonic: once
/// set they are never reset, and they are only updated through the
/// transition functions here so the flags can never diverge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MintSchedule {
    /// Hard cap on mints
    total_supply: u64,
    /// Reserve for the creators phase
    tokens_for_creators: u64,
    /// Tokens minted so far (never exceeds `total_supply`)
    minted: u64,
    /// Running counter of creators-phase mints, checked against the reserve
    creators_minted: u64,
    /// Tokens burnt so far
    burnt: u64,
    creators_started: bool,
    creators_ended: bool,
    users_started: bool,
    users_ended: bool,
}

impl MintSchedule {
    pub fn new(total_supply: u64, tokens_for_creators: u64) -> Self {
        Self {
            total_supply,
            tokens_for_creators,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> RegistryPhase {
        if self.users_ended {
            RegistryPhase::Ended
        } else if self.users_started {
            RegistryPhase::UsersMinting
        } else if self.creators_ended {
            RegistryPhase::CreatorsClosed
        } else if self.creators_started {
            RegistryPhase::CreatorsMinting
        } else {
            RegistryPhase::Created
        }
    }

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    pub fn tokens_for_creators(&self) -> u64 {
        self.tokens_for_creators
    }

    pub fn minted(&self) -> u64 {
        self.minted
    }

    pub fn burnt(&self) -> u64 {
        self.burnt
    }

    /// Remaining mint capacity
    pub fn not_minted(&self) -> u64 {
        self.total_supply - self.minted
    }

    pub fn creators_mint_started(&self) -> bool {
        self.creators_started
    }

    pub fn creators_mint_ended(&self) -> bool {
        self.creators_ended
    }

    pub fn users_mint_started(&self) -> bool {
        self.users_started
    }

    pub fn users_mint_ended(&self) -> bool {
        self.users_ended
    }

    /// True once any mint phase has started; settings are frozen from
    /// this point on.
    pub fn launched(&self) -> bool {
        self.creators_started || self.users_started
    }

    /// Adjust the cap. Only legal before launch; the registry guards this.
    pub fn set_total_supply(&mut self, total_supply: u64) {
        debug_assert!(!self.launched());
        self.total_supply = total_supply;
    }

    /// Adjust the creators reserve. Only legal before launch.
    pub fn set_tokens_for_creators(&mut self, tokens_for_creators: u64) {
        debug_assert!(!self.launched());
        self.tokens_for_creators = tokens_for_creators;
    }

    /// Open the creators allocation. A no-op if it is already open (the
    /// latch is monotonic).
    pub fn start_creators_mint(&mut self) {
        if self.creators_started {
            return;
        }
        self.creators_started = true;
        tracing::info!(reserve = self.tokens_for_creators, "creators mint started");
    }

    /// Open the public allocation. Irrevocably closes the creators
    /// allocation as a side effect, even if its reserve was not
    /// exhausted. A no-op if public minting is already open.
    pub fn start_users_mint(&mut self) {
        if self.users_started {
            return;
        }
        self.creators_started = true;
        self.creators_ended = true;
        self.users_started = true;
        tracing::info!(
            cap = self.total_supply,
            minted = self.minted,
            "users mint started, creators allocation closed"
        );
    }

    /// Phase check for a creators-phase mint, without mutating anything
    pub fn ensure_creators_mint_open(&self) -> RegistryResult<()> {
        if !self.creators_started {
            return Err(RegistryError::CreatorsMintNotStarted);
        }
        if self.creators_ended {
            return Err(RegistryError::CreatorsMintEnded);
        }
        Ok(())
    }

    /// Phase check for a public mint, without mutating anything
    pub fn ensure_users_mint_open(&self) -> RegistryResult<()> {
        if !self.users_started {
            return Err(RegistryError::UsersMintNotStarted);
        }
        if self.users_ended {
            return Err(RegistryError::UsersMintEnded);
        }
        Ok(())
    }

    /// Count one creators-phase mint. Self-closes the allocation on the
    /// mint that exhausts the reserve (or the overall cap), without a
    /// separate call. A mint that cannot proceed fails with no state
    /// change; the latch is only ever set by a successful mint.
    pub fn record_creators_mint(&mut self) -> RegistryResult<()> {
        self.ensure_creators_mint_open()?;
        if self.minted == self.total_supply || self.creators_minted == self.tokens_for_creators {
            return Err(RegistryError::CreatorsMintEnded);
        }

        self.minted += 1;
        self.creators_minted += 1;
        if self.creators_minted == self.tokens_for_creators || self.minted == self.total_supply {
            self.creators_ended = true;
            tracing::info!(minted = self.creators_minted, "creators allocation exhausted");
        }
        Ok(())
    }

    /// Count one public mint. Self-closes the public allocation on the
    /// mint that reaches the cap; a mint that cannot proceed fails with
    /// no state change.
    pub fn record_users_mint(&mut self) -> RegistryResult<()> {
        self.ensure_users_mint_open()?;
        if self.minted == self.total_supply {
            return Err(RegistryError::UsersMintEnded);
        }

        self.minted += 1;
        if self.minted == self.total_supply {
            self.users_ended = true;
            tracing::info!(cap = self.total_supply, "users allocation exhausted");
        }
        Ok(())
    }

    /// Count one burn. Burning is independent of the mint phases and
    /// stays legal after both have ended.
    pub fn record_burn(&mut self) {
        debug_assert!(self.burnt < self.minted);
        self.burnt += 1;
    }
}
