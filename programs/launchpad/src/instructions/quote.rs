//! Trade Quotes
//!
//! Non-mutating pricing of a prospective buy or sell, returning the
//! output amount together with the fee that would be charged. The
//! execution paths use the same formulas, so a quote is authoritative
//! at the reserves it was computed against.

use anchor_lang::prelude::*;

use crate::amm::{quote_buy, quote_sell};
use crate::error::LaunchError;
use crate::state::{Config, TokenLaunch, VirtualPair};

/// Quoted output and fee
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct Quote {
    pub amount_out: u64,
    pub fee: u64,
}

/// Accounts for quoting against a token's curve
#[derive(Accounts)]
pub struct QuoteTrade<'info> {
    /// Engine configuration
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// Registry entry of the quoted token
    #[account(
        seeds = [TokenLaunch::SEED, launch.mint.as_ref()],
        bump = launch.bump,
        constraint = launch.is_trading() @ LaunchError::NotTrading,
    )]
    pub launch: Account<'info, TokenLaunch>,

    /// Virtual pair holding the current reserves
    #[account(
        seeds = [VirtualPair::SEED, launch.mint.as_ref()],
        bump = pair.bump,
    )]
    pub pair: Account<'info, VirtualPair>,
}

impl<'info> QuoteTrade<'info> {
    /// Tokens received for `amount` gross settlement assets
    pub fn quote_buy(&self, amount: u64) -> Result<Quote> {
        let (amount_out, fees) = quote_buy(
            self.pair.reserve_asset,
            self.pair.reserve_token,
            amount,
            self.config.buy_fee_bps,
            self.config.treasury_fee_ratio,
        )?;
        Ok(Quote {
            amount_out,
            fee: fees.total,
        })
    }

    /// Net settlement assets received for `amount` tokens
    pub fn quote_sell(&self, amount: u64) -> Result<Quote> {
        let (amount_out, fees) = quote_sell(
            self.pair.reserve_asset,
            self.pair.reserve_token,
            amount,
            self.config.sell_fee_bps,
            self.config.treasury_fee_ratio,
        )?;
        Ok(Quote {
            amount_out,
            fee: fees.total,
        })
    }
}
