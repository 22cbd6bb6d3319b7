//! Owner-only configuration updates.
//!
//! Every setter validates its field against the configuration invariants
//! before committing; a failed update leaves the config untouched.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::error::LaunchError;
use crate::state::{Config, PriceOracle};

/// Accounts shared by all scalar configuration setters
#[derive(Accounts)]
pub struct AdminUpdate<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        has_one = admin @ LaunchError::Unauthorized,
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,
}

impl<'info> AdminUpdate<'info> {
    pub fn set_launch_fee(&mut self, launch_fee: u64) -> Result<()> {
        self.config.launch_fee = launch_fee;
        Ok(())
    }

    pub fn set_treasury(&mut self, treasury: Pubkey) -> Result<()> {
        require!(treasury != Pubkey::default(), LaunchError::RecipientIsZeroAddress);
        self.config.treasury = treasury;
        Ok(())
    }

    pub fn set_booster(&mut self, booster: Pubkey) -> Result<()> {
        self.config.booster = booster;
        Ok(())
    }

    pub fn set_trade_fees(
        &mut self,
        buy_fee_bps: u64,
        sell_fee_bps: u64,
        treasury_fee_ratio: u64,
    ) -> Result<()> {
        Config::validate_trade_fees(buy_fee_bps, sell_fee_bps, treasury_fee_ratio)?;
        self.config.buy_fee_bps = buy_fee_bps;
        self.config.sell_fee_bps = sell_fee_bps;
        self.config.treasury_fee_ratio = treasury_fee_ratio;
        Ok(())
    }

    /// Applies to tokens launched after the update only.
    pub fn set_initial_supply(&mut self, initial_supply: u64) -> Result<()> {
        require!(initial_supply > 0, LaunchError::InsufficientAmount);
        self.config.initial_supply = initial_supply;
        Ok(())
    }

    pub fn set_initial_market_cap(&mut self, initial_market_cap: u64) -> Result<()> {
        Config::validate_market_caps(initial_market_cap, self.config.grad_market_cap)?;
        self.config.initial_market_cap = initial_market_cap;
        Ok(())
    }

    pub fn set_grad_market_cap(&mut self, grad_market_cap: u64) -> Result<()> {
        Config::validate_market_caps(self.config.initial_market_cap, grad_market_cap)?;
        self.config.grad_market_cap = grad_market_cap;
        Ok(())
    }

    pub fn set_locked_time(&mut self, locked_time: i64) -> Result<()> {
        Config::validate_locked_time(locked_time)?;
        self.config.locked_time = locked_time;
        Ok(())
    }

    pub fn set_boost_stage_threshold(&mut self, stage: u8, value: u64) -> Result<()> {
        self.config.set_stage_threshold(stage, value)
    }

    pub fn set_boost_stage_thresholds(&mut self, values: Vec<u64>) -> Result<()> {
        self.config.set_stage_thresholds(&values)
    }
}

/// Accounts for rebinding the price oracle
#[derive(Accounts)]
pub struct SetOracle<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        has_one = admin @ LaunchError::Unauthorized,
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// Replacement feed; a dead feed is rejected up front
    #[account(
        constraint = oracle.asset_mint == config.asset_mint @ LaunchError::InvalidOracle,
        constraint = oracle.price > 0 @ LaunchError::InvalidOracle,
    )]
    pub oracle: Account<'info, PriceOracle>,
}

impl<'info> SetOracle<'info> {
    pub fn set_oracle(&mut self) -> Result<()> {
        self.config.oracle = self.oracle.key();
        msg!("Oracle set to {}", self.oracle.key());
        Ok(())
    }
}

/// Accounts for rebinding the settlement asset
#[derive(Accounts)]
pub struct SetAssetToken<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        has_one = admin @ LaunchError::Unauthorized,
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    pub asset_mint: InterfaceAccount<'info, Mint>,
}

impl<'info> SetAssetToken<'info> {
    /// Applies to tokens launched after the update; existing pairs keep
    /// settling in the asset they were seeded with.
    pub fn set_asset_token(&mut self) -> Result<()> {
        self.config.asset_mint = self.asset_mint.key();
        Ok(())
    }
}
