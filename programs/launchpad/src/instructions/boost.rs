//! Staged Boost Path
//!
//! Privileged direct liquidity injection that bypasses the virtual
//! curve. Stage 1 creates the token already graduated and seeds the real
//! pool; stages 2 and 3 top the pool up behind strictly sequential
//! market-cap gates. LP shares from every stage land in the same lock,
//! whose release time is fixed by the first deposit.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{
        mint_to, transfer_checked, Mint, MintTo, TokenAccount, TokenInterface, TransferChecked,
    },
};

use crate::amm::{VirtualCurve, PRICE_SCALE};
use crate::error::LaunchError;
use crate::events::{Boosted, Launched};
use crate::instructions::launch::LaunchParams;
use crate::state::{
    Config, ExternalPool, LaunchPath, Lock, PriceOracle, TokenLaunch, VirtualPair,
};

/// Accounts for the stage-1 boost launch
#[derive(Accounts)]
pub struct BoostLaunch<'info> {
    /// Boost-capability holder; pays for the created accounts and the
    /// asset leg
    #[account(
        mut,
        constraint = booster.key() == config.booster @ LaunchError::Unauthorized,
    )]
    pub booster: Signer<'info>,

    /// Engine configuration
    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// Price feed bound in the configuration
    #[account(constraint = oracle.key() == config.oracle @ LaunchError::InvalidOracle)]
    pub oracle: Account<'info, PriceOracle>,

    /// The new token's mint; a fresh keypair signing the transaction
    #[account(
        init,
        payer = booster,
        mint::decimals = 6,
        mint::authority = pair,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    /// Settlement asset mint
    #[account(constraint = asset_mint.key() == config.asset_mint @ LaunchError::InvalidToken)]
    pub asset_mint: InterfaceAccount<'info, Mint>,

    /// Registry entry (created)
    #[account(
        init,
        payer = booster,
        space = 8 + TokenLaunch::INIT_SPACE,
        seeds = [TokenLaunch::SEED, mint.key().as_ref()],
        bump,
    )]
    pub launch: Account<'info, TokenLaunch>,

    /// Virtual pair (created for registry parity, never seeded)
    #[account(
        init,
        payer = booster,
        space = 8 + VirtualPair::INIT_SPACE,
        seeds = [VirtualPair::SEED, mint.key().as_ref()],
        bump,
    )]
    pub pair: Account<'info, VirtualPair>,

    /// Liquidity lock (created)
    #[account(
        init,
        payer = booster,
        space = 8 + Lock::INIT_SPACE,
        seeds = [Lock::SEED, mint.key().as_ref()],
        bump,
    )]
    pub lock: Account<'info, Lock>,

    /// Real pool (created and seeded here)
    #[account(
        init,
        payer = booster,
        space = 8 + ExternalPool::INIT_SPACE,
        seeds = [ExternalPool::SEED, mint.key().as_ref()],
        bump,
    )]
    pub pool: Account<'info, ExternalPool>,

    /// LP share mint (created)
    #[account(
        init,
        payer = booster,
        seeds = [b"lp", mint.key().as_ref()],
        bump,
        mint::decimals = 6,
        mint::authority = pool,
    )]
    pub lp_mint: InterfaceAccount<'info, Mint>,

    /// Booster's settlement account funding the asset leg
    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = booster,
    )]
    pub booster_asset: InterfaceAccount<'info, TokenAccount>,

    /// Lock's token vault holding the undeposited supply remainder
    #[account(
        init,
        payer = booster,
        associated_token::mint = mint,
        associated_token::authority = lock,
    )]
    pub lock_token_vault: InterfaceAccount<'info, TokenAccount>,

    /// Lock's LP vault
    #[account(
        init,
        payer = booster,
        associated_token::mint = lp_mint,
        associated_token::authority = lock,
    )]
    pub lock_lp_vault: InterfaceAccount<'info, TokenAccount>,

    /// Pool's token vault
    #[account(
        init,
        payer = booster,
        associated_token::mint = mint,
        associated_token::authority = pool,
    )]
    pub pool_token_vault: InterfaceAccount<'info, TokenAccount>,

    /// Pool's settlement vault
    #[account(
        init,
        payer = booster,
        associated_token::mint = asset_mint,
        associated_token::authority = pool,
    )]
    pub pool_asset_vault: InterfaceAccount<'info, TokenAccount>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> BoostLaunch<'info> {
    /// Create an already-graduated token with real stage-1 liquidity.
    #[allow(clippy::too_many_arguments)]
    pub fn boost_stage1(
        &mut self,
        params: LaunchParams,
        creator: Pubkey,
        token_amount: u64,
        asset_amount_desired: u64,
        token_amount_min: u64,
        asset_amount_min: u64,
        deadline: i64,
        bumps: &BoostLaunchBumps,
    ) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        require!(now <= deadline, LaunchError::DeadlineExpired);
        params.validate()?;
        require!(creator != Pubkey::default(), LaunchError::RecipientIsZeroAddress);
        require!(
            token_amount > 0 && token_amount <= self.config.initial_supply,
            LaunchError::InsufficientAmount
        );
        require!(
            self.booster_asset.amount >= asset_amount_desired,
            LaunchError::InsufficientAmount
        );

        // one-sided deposit value implies roughly twice the pool value
        let price = self.oracle.asset_price()?;
        let deposit_value = ((asset_amount_desired as u128)
            .checked_mul(price as u128)
            .ok_or(error!(LaunchError::InsufficientAmount))?
            / PRICE_SCALE) as u64;
        require!(
            deposit_value >= self.config.stage_threshold(1)? / 2,
            LaunchError::LiquidityTooLow
        );

        let engine = self.config.key();
        let mint = self.mint.key();

        VirtualPair::validate_new(&engine, &mint)?;
        self.pair.set_inner(VirtualPair {
            mint,
            router: engine,
            reserve_asset: 0,
            reserve_token: 0,
            price_asset_last: 0,
            price_token_last: 0,
            k_last: 0,
            minted: false,
            bump: bumps.pair,
        });

        self.launch.set_inner(TokenLaunch {
            mint,
            creator,
            pair: self.pair.key(),
            locker: self.lock.key(),
            path: LaunchPath::Boosted { stage: 1 },
            transfer_disabled: false,
            name: params.name.clone(),
            symbol: params.symbol.clone(),
            cores: params.cores,
            description: params.description,
            image: params.image,
            urls: params.urls,
            bump: bumps.launch,
        });

        self.lock.set_inner(Lock {
            mint,
            engine,
            creator,
            lp_mint: self.lp_mint.key(),
            locked_amount: 0,
            released_time: 0,
            trading_fee_at_bonding: 0,
            bump: bumps.lock,
        });

        self.pool.set_inner(ExternalPool {
            token_mint: mint,
            asset_mint: self.asset_mint.key(),
            lp_mint: self.lp_mint.key(),
            reserve_token: 0,
            reserve_asset: 0,
            lp_supply: 0,
            bump: bumps.pool,
        });

        let (token_leg, asset_leg) = self.pool.plan_deposit(
            token_amount,
            asset_amount_desired,
            token_amount_min,
            asset_amount_min,
        )?;
        let lp_shares = self.pool.deposit(token_leg, asset_leg, 0)?;
        self.lock
            .lock_lp(&engine, lp_shares, now, self.config.locked_time)?;

        self.config.token_count += 1;
        self.config.boost_count += 1;

        // fund the pool and park the supply remainder in the lock
        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.booster_asset.to_account_info(),
                    mint: self.asset_mint.to_account_info(),
                    to: self.pool_asset_vault.to_account_info(),
                    authority: self.booster.to_account_info(),
                },
            ),
            asset_leg,
            self.asset_mint.decimals,
        )?;

        let pair_seeds = &[VirtualPair::SEED, mint.as_ref(), &[self.pair.bump]];
        let pair_signer = &[&pair_seeds[..]];

        mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.mint.to_account_info(),
                    to: self.pool_token_vault.to_account_info(),
                    authority: self.pair.to_account_info(),
                },
                pair_signer,
            ),
            token_leg,
        )?;

        let remainder = self.config.initial_supply - token_leg;
        if remainder > 0 {
            mint_to(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    MintTo {
                        mint: self.mint.to_account_info(),
                        to: self.lock_token_vault.to_account_info(),
                        authority: self.pair.to_account_info(),
                    },
                    pair_signer,
                ),
                remainder,
            )?;
        }

        let pool_seeds = &[ExternalPool::SEED, mint.as_ref(), &[self.pool.bump]];
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

        emit!(Launched {
            mint,
            creator,
            name: params.name,
            symbol: params.symbol,
        });
        emit!(Boosted { mint, stage: 1 });
        msg!("Boost stage 1 for {} with {} assets", mint, asset_leg);

        Ok(())
    }
}

/// Accounts for the stage-2 and stage-3 top-ups
#[derive(Accounts)]
pub struct BoostNext<'info> {
    /// Boost-capability holder
    #[account(
        mut,
        constraint = booster.key() == config.booster @ LaunchError::Unauthorized,
    )]
    pub booster: Signer<'info>,

    /// Engine configuration
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// Price feed bound in the configuration
    #[account(constraint = oracle.key() == config.oracle @ LaunchError::InvalidOracle)]
    pub oracle: Account<'info, PriceOracle>,

    /// Registry entry of the boosted token
    #[account(
        mut,
        seeds = [TokenLaunch::SEED, mint.key().as_ref()],
        bump = launch.bump,
        constraint = launch.mint == mint.key() @ LaunchError::InvalidToken,
    )]
    pub launch: Account<'info, TokenLaunch>,

    /// Lock holding the staged shares and the supply remainder
    #[account(
        mut,
        seeds = [Lock::SEED, mint.key().as_ref()],
        bump = lock.bump,
    )]
    pub lock: Account<'info, Lock>,

    /// Real pool being topped up
    #[account(
        mut,
        seeds = [ExternalPool::SEED, mint.key().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, ExternalPool>,

    /// Boosted token mint
    pub mint: InterfaceAccount<'info, Mint>,

    /// Settlement asset mint
    #[account(constraint = asset_mint.key() == config.asset_mint @ LaunchError::InvalidToken)]
    pub asset_mint: InterfaceAccount<'info, Mint>,

    /// Booster's settlement account funding the asset leg
    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = booster,
    )]
    pub booster_asset: InterfaceAccount<'info, TokenAccount>,

    /// Lock's token vault funding the token leg
    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = lock,
    )]
    pub lock_token_vault: InterfaceAccount<'info, TokenAccount>,

    /// Lock's LP vault
    #[account(
        mut,
        associated_token::mint = lp_mint,
        associated_token::authority = lock,
    )]
    pub lock_lp_vault: InterfaceAccount<'info, TokenAccount>,

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

    /// LP share mint
    #[account(mut, constraint = lp_mint.key() == pool.lp_mint @ LaunchError::InvalidToken)]
    pub lp_mint: InterfaceAccount<'info, Mint>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> BoostNext<'info> {
    /// Advance a boosted token to `target_stage` (2 or 3) and top up
    /// the pool behind its market-cap gate.
    #[allow(clippy::too_many_arguments)]
    pub fn boost_next(
        &mut self,
        target_stage: u8,
        token_amount_desired: u64,
        asset_amount_desired: u64,
        token_amount_min: u64,
        asset_amount_min: u64,
        deadline: i64,
    ) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        require!(now <= deadline, LaunchError::DeadlineExpired);
        require!(
            self.booster_asset.amount >= asset_amount_desired,
            LaunchError::InsufficientAmount
        );

        // stage sequencing before the market-cap gate
        self.launch.advance_boost_stage(target_stage)?;

        let price = self.oracle.asset_price()?;
        let cap = VirtualCurve::market_cap(
            self.pool.reserve_asset,
            self.pool.reserve_token,
            self.config.initial_supply,
            price,
        )?;
        require!(
            cap >= self.config.stage_threshold(target_stage)?,
            LaunchError::MarketCapTooLow
        );

        let engine = self.config.key();
        let (token_leg, asset_leg) = self.pool.plan_deposit(
            token_amount_desired,
            asset_amount_desired,
            token_amount_min,
            asset_amount_min,
        )?;
        require!(
            self.lock_token_vault.amount >= token_leg,
            LaunchError::InsufficientAmount
        );

        let lp_shares = self.pool.deposit(token_leg, asset_leg, 0)?;
        self.lock
            .lock_lp(&engine, lp_shares, now, self.config.locked_time)?;

        // move both legs and mint the shares into the lock
        let mint = self.mint.key();
        let lock_seeds = &[Lock::SEED, mint.as_ref(), &[self.lock.bump]];
        let lock_signer = &[&lock_seeds[..]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.lock_token_vault.to_account_info(),
                    mint: self.mint.to_account_info(),
                    to: self.pool_token_vault.to_account_info(),
                    authority: self.lock.to_account_info(),
                },
                lock_signer,
            ),
            token_leg,
            self.mint.decimals,
        )?;

        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.booster_asset.to_account_info(),
                    mint: self.asset_mint.to_account_info(),
                    to: self.pool_asset_vault.to_account_info(),
                    authority: self.booster.to_account_info(),
                },
            ),
            asset_leg,
            self.asset_mint.decimals,
        )?;

        let pool_seeds = &[ExternalPool::SEED, mint.as_ref(), &[self.pool.bump]];
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

        emit!(Boosted {
            mint,
            stage: target_stage,
        });
        msg!("Boost stage {} for {} at cap {}", target_stage, mint, cap);

        Ok(())
    }
}
