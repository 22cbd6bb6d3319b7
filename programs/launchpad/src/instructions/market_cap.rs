//! Market-Cap View
//!
//! Values the full supply at the oracle price. Trading tokens are valued
//! off their virtual reserves; graduated and boosted tokens off the real
//! pool. The figure is discontinuous at graduation because the virtual
//! base disappears when reserves migrate.

use anchor_lang::prelude::*;

use crate::amm::VirtualCurve;
use crate::error::LaunchError;
use crate::state::{Config, ExternalPool, PriceOracle, TokenLaunch, VirtualPair};

/// Accounts for the market-cap computation
#[derive(Accounts)]
pub struct CalculateMarketCap<'info> {
    /// Engine configuration
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// Price feed bound in the configuration
    #[account(constraint = oracle.key() == config.oracle @ LaunchError::InvalidOracle)]
    pub oracle: Account<'info, PriceOracle>,

    /// Registry entry of the valued token
    #[account(
        seeds = [TokenLaunch::SEED, launch.mint.as_ref()],
        bump = launch.bump,
    )]
    pub launch: Account<'info, TokenLaunch>,

    /// Virtual pair (valued while trading)
    #[account(
        seeds = [VirtualPair::SEED, launch.mint.as_ref()],
        bump = pair.bump,
        constraint = pair.mint == launch.mint @ LaunchError::InvalidToken,
    )]
    pub pair: Account<'info, VirtualPair>,

    /// Real pool (valued after graduation or boost)
    #[account(
        seeds = [ExternalPool::SEED, launch.mint.as_ref()],
        bump = pool.bump,
        constraint = pool.token_mint == launch.mint @ LaunchError::InvalidToken,
    )]
    pub pool: Account<'info, ExternalPool>,
}

impl<'info> CalculateMarketCap<'info> {
    pub fn calculate_market_cap(&self) -> Result<u64> {
        let price = self.oracle.asset_price()?;

        let (reserve_asset, reserve_token) = if self.launch.is_trading() {
            (self.pair.reserve_asset, self.pair.reserve_token)
        } else {
            (self.pool.reserve_asset, self.pool.reserve_token)
        };

        VirtualCurve::market_cap(
            reserve_asset,
            reserve_token,
            self.config.initial_supply,
            price,
        )
    }
}
