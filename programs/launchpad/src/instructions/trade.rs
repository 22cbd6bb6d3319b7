//! Curve Trading
//!
//! Buys and sells against a token's virtual pair while it is in the
//! trading phase. Fees split between the treasury and the token's lock.
//! A buy that lifts the market cap past the graduation threshold migrates
//! the reserves to the real pool in the same instruction.
//!
//! All registry and reserve state commits before any token movement, so
//! a failed transfer can never leave the books ahead of the vaults.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{
        mint_to, transfer_checked, Mint, MintTo, TokenAccount, TokenInterface, TransferChecked,
    },
};

use crate::amm::{quote_buy, quote_sell, VirtualCurve};
use crate::error::LaunchError;
use crate::events::{Graduated, TradeEvent, TradeSide};
use crate::state::{Config, ExternalPool, Lock, PriceOracle, TokenLaunch, VirtualPair};

/// Accounts for trading operations
#[derive(Accounts)]
pub struct Trade<'info> {
    /// Trader
    #[account(mut)]
    pub trader: Signer<'info>,

    /// Engine configuration
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// Price feed bound in the configuration
    #[account(constraint = oracle.key() == config.oracle @ LaunchError::InvalidOracle)]
    pub oracle: Account<'info, PriceOracle>,

    /// Launch registry entry for the traded token
    #[account(
        mut,
        seeds = [TokenLaunch::SEED, mint.key().as_ref()],
        bump = launch.bump,
        constraint = launch.mint == mint.key() @ LaunchError::InvalidToken,
    )]
    pub launch: Account<'info, TokenLaunch>,

    /// Virtual pair pricing the token
    #[account(
        mut,
        seeds = [VirtualPair::SEED, mint.key().as_ref()],
        bump = pair.bump,
    )]
    pub pair: Account<'info, VirtualPair>,

    /// Lock accruing the creator's fee share
    #[account(
        mut,
        seeds = [Lock::SEED, mint.key().as_ref()],
        bump = lock.bump,
    )]
    pub lock: Account<'info, Lock>,

    /// Real pool receiving the reserves at graduation
    #[account(
        mut,
        seeds = [ExternalPool::SEED, mint.key().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, ExternalPool>,

    /// Traded token mint
    pub mint: InterfaceAccount<'info, Mint>,

    /// Settlement asset mint
    #[account(constraint = asset_mint.key() == pair_asset_vault.mint @ LaunchError::InvalidToken)]
    pub asset_mint: InterfaceAccount<'info, Mint>,

    /// Trader's settlement account
    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = trader,
    )]
    pub trader_asset: InterfaceAccount<'info, TokenAccount>,

    /// Trader's token account
    #[account(
        init_if_needed,
        payer = trader,
        associated_token::mint = mint,
        associated_token::authority = trader,
    )]
    pub trader_token: InterfaceAccount<'info, TokenAccount>,

    /// Pair's settlement vault backing the virtual reserves
    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = pair,
    )]
    pub pair_asset_vault: InterfaceAccount<'info, TokenAccount>,

    /// Pair's custody holding the unsold supply
    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = pair,
    )]
    pub pair_token_vault: InterfaceAccount<'info, TokenAccount>,

    /// Treasury's settlement account
    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = config.treasury,
    )]
    pub treasury_vault: InterfaceAccount<'info, TokenAccount>,

    /// Lock's settlement vault accruing creator fees
    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = lock,
    )]
    pub lock_asset_vault: InterfaceAccount<'info, TokenAccount>,

    /// Pool's token vault
    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = pool,
    )]
    pub pool_token_vault: InterfaceAccount<'info, TokenAccount>,

    /// Pool's settlement vault
    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = pool,
    )]
    pub pool_asset_vault: InterfaceAccount<'info, TokenAccount>,

    /// LP share mint, authority is the pool PDA
    #[account(mut, constraint = lp_mint.key() == pool.lp_mint @ LaunchError::InvalidToken)]
    pub lp_mint: InterfaceAccount<'info, Mint>,

    /// Lock's LP vault receiving graduation shares
    #[account(
        mut,
        associated_token::mint = lp_mint,
        associated_token::authority = lock,
    )]
    pub lock_lp_vault: InterfaceAccount<'info, TokenAccount>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Trade<'info> {
    /// Buy tokens with settlement assets
    pub fn buy(&mut self, amount: u64, min_tokens_out: u64, deadline: i64) -> Result<u64> {
        let now = Clock::get()?.unix_timestamp;
        require!(now <= deadline, LaunchError::DeadlineExpired);
        require!(amount > 0, LaunchError::InsufficientAmount);
        require!(
            self.trader_asset.amount >= amount,
            LaunchError::InsufficientAmount
        );

        let routine = CurveBuyRoutine {
            config: &self.config,
            oracle: &self.oracle,
            launch: &mut self.launch,
            pair: &mut self.pair,
            lock: &mut self.lock,
            pool: &mut self.pool,
            mint: &self.mint,
            asset_mint: &self.asset_mint,
            buyer: self.trader.to_account_info(),
            buyer_asset: &self.trader_asset,
            buyer_token: &self.trader_token,
            pair_asset_vault: &self.pair_asset_vault,
            pair_token_vault: &self.pair_token_vault,
            treasury_vault: &self.treasury_vault,
            lock_asset_vault: &self.lock_asset_vault,
            pool_token_vault: &self.pool_token_vault,
            pool_asset_vault: &self.pool_asset_vault,
            lp_mint: &self.lp_mint,
            lock_lp_vault: &self.lock_lp_vault,
            token_program: &self.token_program,
        };

        routine.execute(amount, min_tokens_out, now)
    }

    /// Sell tokens back to the curve
    pub fn sell(&mut self, amount: u64, min_asset_out: u64, deadline: i64) -> Result<u64> {
        let now = Clock::get()?.unix_timestamp;
        require!(now <= deadline, LaunchError::DeadlineExpired);
        require!(amount > 0, LaunchError::InsufficientAmount);
        require!(self.launch.is_trading(), LaunchError::NotTrading);
        require!(
            self.trader_token.amount >= amount,
            LaunchError::InsufficientAmount
        );

        let engine = self.config.key();

        // reserve bookkeeping first
        let (net_out, fees) = quote_sell(
            self.pair.reserve_asset,
            self.pair.reserve_token,
            amount,
            self.config.sell_fee_bps,
            self.config.treasury_fee_ratio,
        )?;
        require!(net_out >= min_asset_out, LaunchError::SlippageExceeded);

        self.pair.swap_token_in(&engine, amount, fees.total + net_out)?;
        self.lock.accrue_trading_fee(&engine, fees.lock)?;

        // sold tokens return to the pair's custody
        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.trader_token.to_account_info(),
                    mint: self.mint.to_account_info(),
                    to: self.pair_token_vault.to_account_info(),
                    authority: self.trader.to_account_info(),
                },
            ),
            amount,
            self.mint.decimals,
        )?;

        // pay out of the pair vault
        let mint_key = self.mint.key();
        let pair_seeds = &[VirtualPair::SEED, mint_key.as_ref(), &[self.pair.bump]];
        let pair_signer = &[&pair_seeds[..]];

        for (to, value) in [
            (&self.trader_asset, net_out),
            (&self.treasury_vault, fees.treasury),
            (&self.lock_asset_vault, fees.lock),
        ] {
            if value > 0 {
                transfer_checked(
                    CpiContext::new_with_signer(
                        self.token_program.to_account_info(),
                        TransferChecked {
                            from: self.pair_asset_vault.to_account_info(),
                            mint: self.asset_mint.to_account_info(),
                            to: to.to_account_info(),
                            authority: self.pair.to_account_info(),
                        },
                        pair_signer,
                    ),
                    value,
                    self.asset_mint.decimals,
                )?;
            }
        }

        emit!(TradeEvent {
            mint: self.mint.key(),
            trader: self.trader.key(),
            side: TradeSide::Sell,
            asset_amount: net_out,
            token_amount: amount,
        });

        Ok(net_out)
    }
}

/// Buy execution shared by the trade path and the launch-time first
/// purchase. Registry, reserve, and lock state commit before the token
/// CPIs run.
pub(crate) struct CurveBuyRoutine<'a, 'info> {
    pub config: &'a Account<'info, Config>,
    pub oracle: &'a Account<'info, PriceOracle>,
    pub launch: &'a mut Account<'info, TokenLaunch>,
    pub pair: &'a mut Account<'info, VirtualPair>,
    pub lock: &'a mut Account<'info, Lock>,
    pub pool: &'a mut Account<'info, ExternalPool>,
    pub mint: &'a InterfaceAccount<'info, Mint>,
    pub asset_mint: &'a InterfaceAccount<'info, Mint>,
    pub buyer: AccountInfo<'info>,
    pub buyer_asset: &'a InterfaceAccount<'info, TokenAccount>,
    pub buyer_token: &'a InterfaceAccount<'info, TokenAccount>,
    pub pair_asset_vault: &'a InterfaceAccount<'info, TokenAccount>,
    pub pair_token_vault: &'a InterfaceAccount<'info, TokenAccount>,
    pub treasury_vault: &'a InterfaceAccount<'info, TokenAccount>,
    pub lock_asset_vault: &'a InterfaceAccount<'info, TokenAccount>,
    pub pool_token_vault: &'a InterfaceAccount<'info, TokenAccount>,
    pub pool_asset_vault: &'a InterfaceAccount<'info, TokenAccount>,
    pub lp_mint: &'a InterfaceAccount<'info, Mint>,
    pub lock_lp_vault: &'a InterfaceAccount<'info, TokenAccount>,
    pub token_program: &'a Interface<'info, TokenInterface>,
}

impl<'a, 'info> CurveBuyRoutine<'a, 'info> {
    pub fn execute(self, amount: u64, min_tokens_out: u64, now: i64) -> Result<u64> {
        require!(self.launch.is_trading(), LaunchError::NotTrading);

        let engine = self.config.key();
        let price = self.oracle.asset_price()?;

        let (_, fees) = quote_buy(
            self.pair.reserve_asset,
            self.pair.reserve_token,
            amount,
            self.config.buy_fee_bps,
            self.config.treasury_fee_ratio,
        )?;
        let net_in = amount - fees.total;
        require!(net_in > 0, LaunchError::InsufficientAmount);

        let tokens_out = self.pair.swap_asset_in(&engine, net_in, min_tokens_out)?;
        self.lock.accrue_trading_fee(&engine, fees.lock)?;

        // graduation check against the post-trade reserves
        let cap = VirtualCurve::market_cap(
            self.pair.reserve_asset,
            self.pair.reserve_token,
            self.config.initial_supply,
            price,
        )?;
        let graduating = cap >= self.config.grad_market_cap;

        // real assets backing the curve: vault balance plus this deposit
        let migrated_assets = self
            .pair_asset_vault
            .amount
            .checked_add(net_in)
            .ok_or(error!(LaunchError::InsufficientAmount))?;
        let migrated_tokens = self.pair.reserve_token;

        let mut lp_shares = 0u64;
        if graduating {
            self.launch.graduate()?;
            lp_shares = self.pool.deposit(migrated_tokens, migrated_assets, 0)?;
            self.lock.set_lp(&engine, self.lp_mint.key())?;
            self.lock
                .lock_lp(&engine, lp_shares, now, self.config.locked_time)?;
        }

        // fund the vaults
        for (to, value) in [
            (self.pair_asset_vault, net_in),
            (self.treasury_vault, fees.treasury),
            (self.lock_asset_vault, fees.lock),
        ] {
            if value > 0 {
                transfer_checked(
                    CpiContext::new(
                        self.token_program.to_account_info(),
                        TransferChecked {
                            from: self.buyer_asset.to_account_info(),
                            mint: self.asset_mint.to_account_info(),
                            to: to.to_account_info(),
                            authority: self.buyer.clone(),
                        },
                    ),
                    value,
                    self.asset_mint.decimals,
                )?;
            }
        }

        let mint_key = self.mint.key();
        let pair_seeds = &[VirtualPair::SEED, mint_key.as_ref(), &[self.pair.bump]];
        let pair_signer = &[&pair_seeds[..]];

        // bought tokens leave the pair's custody
        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.pair_token_vault.to_account_info(),
                    mint: self.mint.to_account_info(),
                    to: self.buyer_token.to_account_info(),
                    authority: self.pair.to_account_info(),
                },
                pair_signer,
            ),
            tokens_out,
            self.mint.decimals,
        )?;

        emit!(TradeEvent {
            mint: mint_key,
            trader: self.buyer.key(),
            side: TradeSide::Buy,
            asset_amount: amount,
            token_amount: tokens_out,
        });

        if graduating {
            // migrate the curve into the real pool
            transfer_checked(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    TransferChecked {
                        from: self.pair_asset_vault.to_account_info(),
                        mint: self.asset_mint.to_account_info(),
                        to: self.pool_asset_vault.to_account_info(),
                        authority: self.pair.to_account_info(),
                    },
                    pair_signer,
                ),
                migrated_assets,
                self.asset_mint.decimals,
            )?;

            // custody holds exactly the unsold reserve at this point
            transfer_checked(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    TransferChecked {
                        from: self.pair_token_vault.to_account_info(),
                        mint: self.mint.to_account_info(),
                        to: self.pool_token_vault.to_account_info(),
                        authority: self.pair.to_account_info(),
                    },
                    pair_signer,
                ),
                migrated_tokens,
                self.mint.decimals,
            )?;

            let pool_seeds = &[ExternalPool::SEED, mint_key.as_ref(), &[self.pool.bump]];
            let pool_signer = &[&pool_seeds[..]];

            mint_to(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    MintTo {
                        mint: self.lp_mint.to_account_info(),
                        to: self.lock_lp_vault.to_account_info(),
                        authority: self.pool.to_account_info(),
                    },
                    pool_signer,
                ),
                lp_shares,
            )?;

            msg!("Graduated at market cap {}", cap);
            emit!(Graduated { mint: mint_key });
        }

        Ok(tokens_out)
    }
}
