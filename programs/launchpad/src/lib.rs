//! # Launchpad: Bonding-Curve Token Launches
//!
//! A token-launch and liquidity-bootstrapping engine on Solana.
//!
//! ## Overview
//!
//! Tokens launch onto a virtual constant-product curve and trade there
//! until their market cap crosses the graduation threshold, at which
//! point the accumulated reserves migrate into a real pool whose LP
//! shares sit in a one-year lock. A privileged boost path injects real
//! liquidity directly across three gated stages, producing tokens that
//! are born graduated.
//!
//! ## How it works
//! - The curve prices against a virtual asset offset, so the opening
//!   price equals `initial_market_cap / initial_supply`.
//! - Trade fees split between the treasury and a per-token lock that
//!   accrues for the creator.
//! - Graduation, boosts, and fee claims all settle atomically in a
//!   single instruction.

use anchor_lang::prelude::*;

pub mod amm;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

pub use amm::*;
pub use instructions::*;

declare_id!("GradLP7vTknD4mY2hQx5WJcR8pNbZsAeoKfU3CqiVmXy");

/// Main launchpad program
#[program]
pub mod launchpad {
    use super::*;

    /// Initialize the engine with global configuration
    pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
        ctx.accounts.initialize(params, &ctx.bumps)
    }

    /// Create a price feed for the settlement asset
    pub fn init_oracle(ctx: Context<InitOracle>, price: u64) -> Result<()> {
        ctx.accounts.init_oracle(price, &ctx.bumps)
    }

    /// Push a price update to the feed
    pub fn set_asset_price(ctx: Context<SetAssetPrice>, price: u64) -> Result<()> {
        ctx.accounts.set_asset_price(price)
    }

    // --- owner-only configuration ---

    pub fn set_launch_fee(ctx: Context<AdminUpdate>, launch_fee: u64) -> Result<()> {
        ctx.accounts.set_launch_fee(launch_fee)
    }

    pub fn set_treasury(ctx: Context<AdminUpdate>, treasury: Pubkey) -> Result<()> {
        ctx.accounts.set_treasury(treasury)
    }

    pub fn set_booster(ctx: Context<AdminUpdate>, booster: Pubkey) -> Result<()> {
        ctx.accounts.set_booster(booster)
    }

    pub fn set_trade_fees(
        ctx: Context<AdminUpdate>,
        buy_fee_bps: u64,
        sell_fee_bps: u64,
        treasury_fee_ratio: u64,
    ) -> Result<()> {
        ctx.accounts
            .set_trade_fees(buy_fee_bps, sell_fee_bps, treasury_fee_ratio)
    }

    pub fn set_initial_supply(ctx: Context<AdminUpdate>, initial_supply: u64) -> Result<()> {
        ctx.accounts.set_initial_supply(initial_supply)
    }

    pub fn set_initial_market_cap(ctx: Context<AdminUpdate>, initial_market_cap: u64) -> Result<()> {
        ctx.accounts.set_initial_market_cap(initial_market_cap)
    }

    pub fn set_grad_market_cap(ctx: Context<AdminUpdate>, grad_market_cap: u64) -> Result<()> {
        ctx.accounts.set_grad_market_cap(grad_market_cap)
    }

    pub fn set_locked_time(ctx: Context<AdminUpdate>, locked_time: i64) -> Result<()> {
        ctx.accounts.set_locked_time(locked_time)
    }

    pub fn set_boost_stage_threshold(ctx: Context<AdminUpdate>, stage: u8, value: u64) -> Result<()> {
        ctx.accounts.set_boost_stage_threshold(stage, value)
    }

    pub fn set_boost_stage_thresholds(ctx: Context<AdminUpdate>, values: Vec<u64>) -> Result<()> {
        ctx.accounts.set_boost_stage_thresholds(values)
    }

    /// Rebind the price oracle
    pub fn set_oracle(ctx: Context<SetOracle>) -> Result<()> {
        ctx.accounts.set_oracle()
    }

    /// Rebind the settlement asset for future launches
    pub fn set_asset_token(ctx: Context<SetAssetToken>) -> Result<()> {
        ctx.accounts.set_asset_token()
    }

    // --- launches and trading ---

    /// Launch a token onto the curve; `purchase_amount` covers the flat
    /// fee plus an optional first buy
    pub fn launch(ctx: Context<Launch>, params: LaunchParams, purchase_amount: u64) -> Result<()> {
        let creator = ctx.accounts.payer.key();
        ctx.accounts.launch(params, purchase_amount, creator, &ctx.bumps)
    }

    /// Launch on behalf of an explicit creator
    pub fn launch_for(
        ctx: Context<Launch>,
        params: LaunchParams,
        purchase_amount: u64,
        creator: Pubkey,
    ) -> Result<()> {
        ctx.accounts.launch(params, purchase_amount, creator, &ctx.bumps)
    }

    /// Buy tokens from the curve
    pub fn buy(ctx: Context<Trade>, amount: u64, min_tokens_out: u64, deadline: i64) -> Result<u64> {
        ctx.accounts.buy(amount, min_tokens_out, deadline)
    }

    /// Sell tokens back to the curve
    pub fn sell(ctx: Context<Trade>, amount: u64, min_asset_out: u64, deadline: i64) -> Result<u64> {
        ctx.accounts.sell(amount, min_asset_out, deadline)
    }

    /// Quote a buy without executing it
    pub fn quote_buy(ctx: Context<QuoteTrade>, amount: u64) -> Result<Quote> {
        ctx.accounts.quote_buy(amount)
    }

    /// Quote a sell without executing it
    pub fn quote_sell(ctx: Context<QuoteTrade>, amount: u64) -> Result<Quote> {
        ctx.accounts.quote_sell(amount)
    }

    /// Value the full supply at the oracle price
    pub fn calculate_market_cap(ctx: Context<CalculateMarketCap>) -> Result<u64> {
        ctx.accounts.calculate_market_cap()
    }

    // --- boost path ---

    /// Create an already-graduated token with stage-1 liquidity
    pub fn boost_stage1(
        ctx: Context<BoostLaunch>,
        params: LaunchParams,
        token_amount: u64,
        asset_amount_desired: u64,
        token_amount_min: u64,
        asset_amount_min: u64,
        deadline: i64,
    ) -> Result<()> {
        let creator = ctx.accounts.booster.key();
        ctx.accounts.boost_stage1(
            params,
            creator,
            token_amount,
            asset_amount_desired,
            token_amount_min,
            asset_amount_min,
            deadline,
            &ctx.bumps,
        )
    }

    /// Stage-1 boost on behalf of an explicit creator
    pub fn boost_stage1_for(
        ctx: Context<BoostLaunch>,
        params: LaunchParams,
        creator: Pubkey,
        token_amount: u64,
        asset_amount_desired: u64,
        token_amount_min: u64,
        asset_amount_min: u64,
        deadline: i64,
    ) -> Result<()> {
        ctx.accounts.boost_stage1(
            params,
            creator,
            token_amount,
            asset_amount_desired,
            token_amount_min,
            asset_amount_min,
            deadline,
            &ctx.bumps,
        )
    }

    /// Advance a boosted token to stage 2
    pub fn boost_stage2(
        ctx: Context<BoostNext>,
        token_amount_desired: u64,
        asset_amount_desired: u64,
        token_amount_min: u64,
        asset_amount_min: u64,
        deadline: i64,
    ) -> Result<()> {
        ctx.accounts.boost_next(
            2,
            token_amount_desired,
            asset_amount_desired,
            token_amount_min,
            asset_amount_min,
            deadline,
        )
    }

    /// Advance a boosted token to stage 3
    pub fn boost_stage3(
        ctx: Context<BoostNext>,
        token_amount_desired: u64,
        asset_amount_desired: u64,
        token_amount_min: u64,
        asset_amount_min: u64,
        deadline: i64,
    ) -> Result<()> {
        ctx.accounts.boost_next(
            3,
            token_amount_desired,
            asset_amount_desired,
            token_amount_min,
            asset_amount_min,
            deadline,
        )
    }

    // --- lock administration ---

    /// Grant a delegatee an allowance over matured locked shares
    pub fn delegate_lp_to(ctx: Context<DelegateLp>) -> Result<()> {
        ctx.accounts.delegate_lp_to()
    }

    /// Batch delegation over `[lock, lock_lp_vault, delegatee]` triples
    pub fn delegate_lp_to_batch<'info>(
        ctx: Context<'_, '_, 'info, 'info, DelegateLpBatch<'info>>,
        delegatees: Vec<Pubkey>,
    ) -> Result<()> {
        ctx.accounts
            .delegate_lp_to_batch(ctx.remaining_accounts, delegatees)
    }

    /// Pay a creator the fees accrued while their token was trading
    pub fn claim_for_token_creator(ctx: Context<ClaimForTokenCreator>) -> Result<u64> {
        ctx.accounts.claim_for_token_creator()
    }
}
