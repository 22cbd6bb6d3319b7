//! Engine Initialization
//!
//! Sets up the global configuration for the launch engine. Called once
//! during deployment; every parameter is adjustable afterwards through
//! the admin instructions.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::error::LaunchError;
use crate::state::{Config, PriceOracle, BOOST_STAGES};

/// Initialization parameters, mirrored into [`Config`].
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct InitializeParams {
    pub treasury: Pubkey,
    pub booster: Pubkey,
    pub launch_fee: u64,
    pub initial_supply: u64,
    pub buy_fee_bps: u64,
    pub sell_fee_bps: u64,
    pub treasury_fee_ratio: u64,
    pub locked_time: i64,
    pub initial_market_cap: u64,
    pub grad_market_cap: u64,
    pub boost_stage_thresholds: [u64; BOOST_STAGES],
}

/// Accounts required for engine initialization
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Engine administrator (becomes the admin)
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Global configuration account (created)
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [Config::SEED],
        bump,
    )]
    pub config: Account<'info, Config>,

    /// Settlement asset mint (e.g. USDC)
    pub asset_mint: InterfaceAccount<'info, Mint>,

    /// Price oracle for the settlement asset, created beforehand
    #[account(
        constraint = oracle.asset_mint == asset_mint.key() @ LaunchError::InvalidOracle,
        constraint = oracle.price > 0 @ LaunchError::InvalidOracle,
    )]
    pub oracle: Account<'info, PriceOracle>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    /// Populate the engine configuration
    pub fn initialize(&mut self, params: InitializeParams, bumps: &InitializeBumps) -> Result<()> {
        Config::validate_trade_fees(
            params.buy_fee_bps,
            params.sell_fee_bps,
            params.treasury_fee_ratio,
        )?;
        Config::validate_market_caps(params.initial_market_cap, params.grad_market_cap)?;
        Config::validate_locked_time(params.locked_time)?;

        self.config.set_inner(Config {
            admin: self.admin.key(),
            treasury: params.treasury,
            booster: params.booster,
            oracle: self.oracle.key(),
            asset_mint: self.asset_mint.key(),
            launch_fee: params.launch_fee,
            initial_supply: params.initial_supply,
            buy_fee_bps: params.buy_fee_bps,
            sell_fee_bps: params.sell_fee_bps,
            treasury_fee_ratio: params.treasury_fee_ratio,
            locked_time: params.locked_time,
            initial_market_cap: params.initial_market_cap,
            grad_market_cap: params.grad_market_cap,
            boost_stage_thresholds: [0; BOOST_STAGES],
            token_count: 0,
            boost_count: 0,
            bump: bumps.config,
        });
        self.config
            .set_stage_thresholds(&params.boost_stage_thresholds)?;

        msg!("Engine initialized");
        msg!("Admin: {}", self.admin.key());
        msg!("Asset: {}", self.asset_mint.key());
        msg!("Graduation cap: {}", params.grad_market_cap);

        Ok(())
    }
}
