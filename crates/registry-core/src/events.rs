// registry-core/src/events.rs

use crate::types::{AccountId, TokenId};
use serde::{Deserialize, Serialize};

/// Observable registry notifications
///
/// A `Transfer` with a zero `from` is the canonical mint signal; a zero
/// `to` is the canonical burn signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegistryEvent {
    /// Ownership change (mint, transfer or burn)
    Transfer {
        from: AccountId,
        to: AccountId,
        token_id: TokenId,
    },
    /// Single-approval change
    Approval {
        owner: AccountId,
        approved: AccountId,
        token_id: TokenId,
    },
    /// Blanket-operator change
    ApprovalForAll {
        owner: AccountId,
        operator: AccountId,
        enabled: bool,
    },
}

/// In-memory, append-only record of emitted notifications
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<RegistryEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: RegistryEvent) {
        self.events.push(event);
    }

    pub fn all(&self) -> &[RegistryEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&RegistryEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drain the log, handing the accumulated notifications to the caller
    pub fn take(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }
}
