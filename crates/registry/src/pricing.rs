// registry/src/pricing.rs

use crate::collaborators::{PriceFeed, StableToken};
use crate::{RegistryError, RegistryResult};
use num_bigint::BigUint;
use num_traits::One;
use registry_core::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Operations that require tendering native value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricedOperation {
    Mint,
    Transfer,
    Burn,
}

impl fmt::Display for PricedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PricedOperation::Mint => "mint",
            PricedOperation::Transfer => "transfer",
            PricedOperation::Burn => "burn",
        };
        write!(f, "{name}")
    }
}

/// Enforce the tendered amount for a priced operation. Tendering more
/// than required is accepted; the excess is retained, not refunded.
pub fn require_payment(
    operation: PricedOperation,
    required: &Amount,
    tendered: &Amount,
) -> RegistryResult<()> {
    if tendered < required {
        return Err(RegistryError::InsufficientPayment {
            operation,
            required: required.clone(),
            tendered: tendered.clone(),
        });
    }
    Ok(())
}

/// Stable-unit pricing extension
///
/// Holds the borrowed price-feed and stable-token collaborators. Both
/// must be set before any dollar-denominated query or mint is possible.
/// Decimal precisions are probed once, at configuration time; the
/// exchange rate itself is read fresh on every query because the feed
/// is expected to drift continuously.
#[derive(Clone, Default)]
pub struct DollarPricing {
    feed: Option<Arc<dyn PriceFeed>>,
    stable: Option<Arc<dyn StableToken>>,
    feed_decimals: u8,
    stable_decimals: u8,
}

impl DollarPricing {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once both the stable token and the price feed are set
    pub fn is_configured(&self) -> bool {
        self.feed.is_some() && self.stable.is_some()
    }

    /// Install the price feed, probing its decimal precision
    pub fn set_price_feed(&mut self, feed: Arc<dyn PriceFeed>) {
        self.feed_decimals = feed.decimals();
        self.feed = Some(feed);
    }

    /// Install the stable token, probing its decimal precision (tokens
    /// that expose none are treated as precision zero)
    pub fn set_stable_token(&mut self, token: Arc<dyn StableToken>) {
        self.stable_decimals = token.decimals().unwrap_or(0);
        self.stable = Some(token);
    }

    pub fn price_feed(&self) -> RegistryResult<Arc<dyn PriceFeed>> {
        match (&self.feed, &self.stable) {
            (Some(feed), Some(_)) => Ok(Arc::clone(feed)),
            _ => Err(RegistryError::DollarPricingNotConfigured),
        }
    }

    pub fn stable_token(&self) -> RegistryResult<Arc<dyn StableToken>> {
        match (&self.feed, &self.stable) {
            (Some(_), Some(stable)) => Ok(Arc::clone(stable)),
            _ => Err(RegistryError::DollarPricingNotConfigured),
        }
    }

    pub fn stable_decimals(&self) -> u8 {
        self.stable_decimals
    }

    /// Whole-dollar price of `native_price`, rounded upward so the
    /// registry never under-collects on fractional cents:
    /// `ceil(native_price * rate / 10^(feed decimals + native decimals))`.
    pub fn price_in_dollars(&self, native_price: &Amount) -> RegistryResult<Amount> {
        let feed = self.price_feed()?;
        let rate = feed.latest_rate()?;
        if rate.is_zero() {
            return Err(RegistryError::InvalidFeedRate);
        }

        let numerator = native_price.inner() * rate.inner();
        let denominator =
            BigUint::from(10u64).pow(u32::from(self.feed_decimals) + Amount::DECIMALS);
        Ok(Amount::new(ceil_div(numerator, &denominator)))
    }

    /// Stable-token base units required to cover `native_price`
    /// (the whole-dollar price scaled by the token's precision)
    pub fn required_stable_amount(&self, native_price: &Amount) -> RegistryResult<Amount> {
        let dollars = self.price_in_dollars(native_price)?;
        let scale = BigUint::from(10u64).pow(u32::from(self.stable_decimals));
        Ok(Amount::new(dollars.inner() * scale))
    }
}

impl fmt::Debug for DollarPricing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DollarPricing")
            .field("configured", &self.is_configured())
            .field("feed_decimals", &self.feed_decimals)
            .field("stable_decimals", &self.stable_decimals)
            .finish()
    }
}

fn ceil_div(numerator: BigUint, denominator: &BigUint) -> BigUint {
    (numerator + (denominator - BigUint::one())) / denominator
}
