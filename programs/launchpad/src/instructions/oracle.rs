//! Settlement-asset price feed management.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::error::LaunchError;
use crate::state::PriceOracle;

/// Accounts for creating a price feed
#[derive(Accounts)]
pub struct InitOracle<'info> {
    /// Feed authority (pays for the account, pushes updates)
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Oracle account (created)
    #[account(
        init,
        payer = authority,
        space = 8 + PriceOracle::INIT_SPACE,
        seeds = [PriceOracle::SEED, asset_mint.key().as_ref()],
        bump,
    )]
    pub oracle: Account<'info, PriceOracle>,

    /// Asset this feed prices
    pub asset_mint: InterfaceAccount<'info, Mint>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> InitOracle<'info> {
    pub fn init_oracle(&mut self, price: u64, bumps: &InitOracleBumps) -> Result<()> {
        require!(price > 0, LaunchError::InvalidAssetPrice);

        self.oracle.set_inner(PriceOracle {
            authority: self.authority.key(),
            asset_mint: self.asset_mint.key(),
            price,
            bump: bumps.oracle,
        });

        msg!("Oracle created for {} at {}", self.asset_mint.key(), price);
        Ok(())
    }
}

/// Accounts for pushing a price update
#[derive(Accounts)]
pub struct SetAssetPrice<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        has_one = authority @ LaunchError::Unauthorized,
        seeds = [PriceOracle::SEED, oracle.asset_mint.as_ref()],
        bump = oracle.bump,
    )]
    pub oracle: Account<'info, PriceOracle>,
}

impl<'info> SetAssetPrice<'info> {
    pub fn set_asset_price(&mut self, price: u64) -> Result<()> {
        require!(price > 0, LaunchError::InvalidAssetPrice);
        self.oracle.price = price;
        Ok(())
    }
}
