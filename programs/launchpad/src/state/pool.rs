//! Real liquidity pool.
//!
//! Receives token and settlement-asset reserves at graduation and across
//! boost stages. Deposits mint LP shares: the opening deposit gets the
//! geometric mean of its legs, later deposits the proportional minimum.

use anchor_lang::prelude::*;

use crate::amm::sqrt;
use crate::error::LaunchError;

/// Seeds: ["pool", mint]
#[account]
#[derive(InitSpace)]
pub struct ExternalPool {
    /// Token side of the pool
    pub token_mint: Pubkey,

    /// Settlement asset side of the pool
    pub asset_mint: Pubkey,

    /// LP share mint, authority is this PDA
    pub lp_mint: Pubkey,

    /// Real token reserve
    pub reserve_token: u64,

    /// Real asset reserve
    pub reserve_asset: u64,

    /// Outstanding LP shares
    pub lp_supply: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl ExternalPool {
    pub const SEED: &'static [u8] = b"pool";

    /// LP shares a deposit of both legs would mint at current reserves.
    pub fn quote_deposit(&self, token_amount: u64, asset_amount: u64) -> Result<u64> {
        require!(token_amount > 0 && asset_amount > 0, LaunchError::InsufficientAmount);

        let shares = if self.lp_supply == 0 {
            sqrt((token_amount as u128) * (asset_amount as u128))
        } else {
            let by_token = (token_amount as u128)
                .checked_mul(self.lp_supply as u128)
                .ok_or(error!(LaunchError::InsufficientAmount))?
                / (self.reserve_token as u128);
            let by_asset = (asset_amount as u128)
                .checked_mul(self.lp_supply as u128)
                .ok_or(error!(LaunchError::InsufficientAmount))?
                / (self.reserve_asset as u128);
            by_token.min(by_asset)
        };

        require!(shares > 0, LaunchError::InsufficientAmount);
        u64::try_from(shares).map_err(|_| error!(LaunchError::InsufficientAmount))
    }

    /// Resolve desired deposit legs against the current reserve ratio.
    /// The oversized leg is scaled down to match; callers bound the
    /// scaled result with their minimums.
    pub fn plan_deposit(
        &self,
        token_desired: u64,
        asset_desired: u64,
        token_min: u64,
        asset_min: u64,
    ) -> Result<(u64, u64)> {
        require!(token_desired > 0 && asset_desired > 0, LaunchError::InsufficientAmount);

        if self.lp_supply == 0 {
            return Ok((token_desired, asset_desired));
        }

        let asset_optimal = ((token_desired as u128)
            .checked_mul(self.reserve_asset as u128)
            .ok_or(error!(LaunchError::InsufficientAmount))?
            / (self.reserve_token as u128)) as u64;

        if asset_optimal <= asset_desired {
            require!(asset_optimal >= asset_min, LaunchError::SlippageExceeded);
            Ok((token_desired, asset_optimal))
        } else {
            let token_optimal = ((asset_desired as u128)
                .checked_mul(self.reserve_token as u128)
                .ok_or(error!(LaunchError::InsufficientAmount))?
                / (self.reserve_asset as u128)) as u64;
            require!(token_optimal >= token_min, LaunchError::SlippageExceeded);
            Ok((token_optimal, asset_desired))
        }
    }

    /// Book a two-leg deposit and return the LP shares minted.
    pub fn deposit(&mut self, token_amount: u64, asset_amount: u64, min_shares: u64) -> Result<u64> {
        let shares = self.quote_deposit(token_amount, asset_amount)?;
        require!(shares >= min_shares, LaunchError::SlippageExceeded);

        self.reserve_token = self
            .reserve_token
            .checked_add(token_amount)
            .ok_or(error!(LaunchError::InsufficientAmount))?;
        self.reserve_asset = self
            .reserve_asset
            .checked_add(asset_amount)
            .ok_or(error!(LaunchError::InsufficientAmount))?;
        self.lp_supply = self
            .lp_supply
            .checked_add(shares)
            .ok_or(error!(LaunchError::InsufficientAmount))?;

        Ok(shares)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> ExternalPool {
        ExternalPool {
            token_mint: Pubkey::new_unique(),
            asset_mint: Pubkey::new_unique(),
            lp_mint: Pubkey::new_unique(),
            reserve_token: 0,
            reserve_asset: 0,
            lp_supply: 0,
            bump: 255,
        }
    }

    #[test]
    fn opening_deposit_mints_geometric_mean() {
        let mut p = pool();
        let shares = p.deposit(400, 100, 0).unwrap();
        assert_eq!(shares, 200); // sqrt(400 * 100)
        assert_eq!(p.lp_supply, 200);
    }

    #[test]
    fn later_deposits_mint_proportionally() {
        let mut p = pool();
        p.deposit(400, 100, 0).unwrap();

        // same ratio doubles the supply
        let shares = p.deposit(400, 100, 0).unwrap();
        assert_eq!(shares, 200);

        // an unbalanced deposit is priced off its short leg
        let shares = p.deposit(800, 100, 0).unwrap();
        assert_eq!(shares, 200);
    }

    #[test]
    fn deposit_honors_min_shares() {
        let mut p = pool();
        p.deposit(400, 100, 0).unwrap();

        assert_eq!(
            p.deposit(400, 100, 201).unwrap_err(),
            error!(LaunchError::SlippageExceeded)
        );
        assert!(p.deposit(400, 100, 200).is_ok());
    }

    #[test]
    fn plan_scales_the_oversized_leg() {
        let mut p = pool();
        p.deposit(400, 100, 0).unwrap();

        // token leg heavy: asset leg stays, token scales down
        let (t, a) = p.plan_deposit(800, 100, 0, 0).unwrap();
        assert_eq!((t, a), (400, 100));

        // asset leg heavy: token leg stays, asset scales down
        let (t, a) = p.plan_deposit(400, 300, 0, 0).unwrap();
        assert_eq!((t, a), (400, 100));

        // scaled leg below the caller's minimum
        assert_eq!(
            p.plan_deposit(800, 100, 500, 0).unwrap_err(),
            error!(LaunchError::SlippageExceeded)
        );
    }

    #[test]
    fn oversized_share_quote_is_rejected() {
        let p = ExternalPool {
            reserve_token: 1,
            reserve_asset: 1,
            lp_supply: u64::MAX,
            ..pool()
        };
        // proportional shares exceed u64; must error, not wrap
        assert!(p.quote_deposit(u64::MAX, u64::MAX).is_err());
    }

    #[test]
    fn zero_legs_rejected() {
        let p = pool();
        assert!(p.quote_deposit(0, 100).is_err());
        assert!(p.quote_deposit(100, 0).is_err());
    }
}
