// registry-core/src/types.rs

use crate::{LedgerError, LedgerResult};
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Token identifier, assigned sequentially at mint time starting at 0
/// and never reused.
pub type TokenId = u64;

/// Amount in the native value unit (using BigUint for arbitrary precision)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(BigUint);

impl Amount {
    /// Decimal places of the native unit (1 whole unit = 10^18 base units)
    pub const DECIMALS: u32 = 18;

    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn from_u64(value: u64) -> Self {
        Self(BigUint::from(value))
    }

    /// Whole native units scaled to base units
    pub fn from_units(units: u64) -> Self {
        Self(BigUint::from(units) * BigUint::from(10u64).pow(Self::DECIMALS))
    }

    pub fn inner(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(&self, other: &Amount) -> Option<Amount> {
        Some(Amount(&self.0 + &other.0))
    }

    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        if self.0 < other.0 {
            None
        } else {
            Some(Amount(&self.0 - &other.0))
        }
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, other: Amount) -> Amount {
        Amount(&self.0 + &other.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, other: Amount) -> Amount {
        Amount(&self.0 - &other.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account reference (20 opaque bytes, zero is the null account)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Ord, PartialOrd)]
pub struct AccountId([u8; 20]);

impl AccountId {
    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// The null account. It can never own tokens; it only appears as the
    /// canonical sender of mint notifications and receiver of burn
    /// notifications.
    pub fn zero() -> Self {
        Self([0u8; 20])
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn from_hex(s: &str) -> LedgerResult<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| LedgerError::MalformedAccount(e.to_string()))?;
        if bytes.len() != 20 {
            return Err(LedgerError::MalformedAccount(
                "expected 20 bytes".into(),
            ));
        }
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.to_hex())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
