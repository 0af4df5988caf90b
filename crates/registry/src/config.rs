// registry/src/config.rs

use registry_core::Amount;
use serde::{Deserialize, Serialize};

/// Registry construction settings
///
/// In the fixed variant every field is final at construction. In the
/// changeable variant (`TokenRegistry::unconfigured`) the numeric fields
/// start at zero and the guarded setters may adjust them until either
/// mint phase starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// Collection name
    pub name: String,
    /// Collection symbol
    pub symbol: String,
    /// Metadata URI prefix; token URI = base URI + decimal token id.
    /// Empty means every token URI is the empty string.
    pub base_uri: String,
    /// Hard cap on the number of tokens that can ever be minted
    pub total_supply: u64,
    /// Sub-allocation reserved for the creators phase
    pub tokens_for_creators: u64,
    /// Price of a public mint, in the native unit
    pub mint_price: Amount,
    /// Fee for every transfer, in the native unit
    pub transfer_fee: Amount,
    /// Price of a burn, in the native unit
    pub burn_price: Amount,
}

impl RegistrySettings {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        base_uri: impl Into<String>,
        total_supply: u64,
        tokens_for_creators: u64,
        mint_price: Amount,
        transfer_fee: Amount,
        burn_price: Amount,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            base_uri: base_uri.into(),
            total_supply,
            tokens_for_creators,
            mint_price,
            transfer_fee,
            burn_price,
        }
    }

    /// Blank settings for the changeable variant: everything zero or
    /// empty except the collection identity.
    pub fn blank(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self::new(
            name,
            symbol,
            String::new(),
            0,
            0,
            Amount::zero(),
            Amount::zero(),
            Amount::zero(),
        )
    }
}
