//! Settlement-asset price oracle.

use anchor_lang::prelude::*;

use crate::error::LaunchError;

/// Seeds: ["oracle", asset_mint]
#[account]
#[derive(InitSpace)]
pub struct PriceOracle {
    /// Key allowed to push price updates
    pub authority: Pubkey,

    /// Asset priced by this oracle
    pub asset_mint: Pubkey,

    /// Asset price in USD, fixed-point 1e6
    pub price: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl PriceOracle {
    pub const SEED: &'static [u8] = b"oracle";

    /// Current price; a zero quote means the feed is unusable.
    pub fn asset_price(&self) -> Result<u64> {
        require!(self.price > 0, LaunchError::InvalidAssetPrice);
        Ok(self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_price_is_rejected() {
        let oracle = PriceOracle {
            authority: Pubkey::new_unique(),
            asset_mint: Pubkey::new_unique(),
            price: 0,
            bump: 255,
        };
        assert_eq!(
            oracle.asset_price().unwrap_err(),
            error!(LaunchError::InvalidAssetPrice)
        );
    }
}
