//! Token Launch
//!
//! Creates a token together with its virtual pair, lock, and (still
//! empty) real pool, mints the full supply into the pair's custody,
//! seeds the virtual reserves so the opening price is
//! `initial_market_cap / initial_supply`, and charges the flat launch
//! fee. Whatever the caller paid beyond the fee funds an immediate first
//! buy, which can graduate the token in the same instruction.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{
        mint_to, transfer_checked, Mint, MintTo, TokenAccount, TokenInterface, TransferChecked,
    },
};

use crate::amm::VirtualCurve;
use crate::error::LaunchError;
use crate::events::Launched;
use crate::instructions::trade::CurveBuyRoutine;
use crate::state::{
    Config, ExternalPool, LaunchPath, Lock, PriceOracle, TokenLaunch, TokenStatus, VirtualPair,
};

/// Token metadata supplied at launch
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct LaunchParams {
    pub name: String,
    pub symbol: String,
    pub cores: Vec<u8>,
    pub description: String,
    pub image: String,
    pub urls: Vec<String>,
}

impl LaunchParams {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.name.len() <= 32
                && self.symbol.len() <= 16
                && self.cores.len() <= 8
                && self.description.len() <= 256
                && self.image.len() <= 128
                && self.urls.len() <= 4
                && self.urls.iter().all(|u| u.len() <= 96),
            LaunchError::InvalidMetadata
        );
        Ok(())
    }
}

/// Accounts for launching a token onto the curve
#[derive(Accounts)]
pub struct Launch<'info> {
    /// Caller; pays for every created account and the launch fee
    #[account(mut)]
    pub payer: Signer<'info>,

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
        payer = payer,
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
        payer = payer,
        space = 8 + TokenLaunch::INIT_SPACE,
        seeds = [TokenLaunch::SEED, mint.key().as_ref()],
        bump,
    )]
    pub launch: Account<'info, TokenLaunch>,

    /// Virtual pair (created)
    #[account(
        init,
        payer = payer,
        space = 8 + VirtualPair::INIT_SPACE,
        seeds = [VirtualPair::SEED, mint.key().as_ref()],
        bump,
    )]
    pub pair: Account<'info, VirtualPair>,

    /// Liquidity lock (created)
    #[account(
        init,
        payer = payer,
        space = 8 + Lock::INIT_SPACE,
        seeds = [Lock::SEED, mint.key().as_ref()],
        bump,
    )]
    pub lock: Account<'info, Lock>,

    /// Real pool, empty until graduation (created)
    #[account(
        init,
        payer = payer,
        space = 8 + ExternalPool::INIT_SPACE,
        seeds = [ExternalPool::SEED, mint.key().as_ref()],
        bump,
    )]
    pub pool: Account<'info, ExternalPool>,

    /// LP share mint for the real pool (created)
    #[account(
        init,
        payer = payer,
        seeds = [b"lp", mint.key().as_ref()],
        bump,
        mint::decimals = 6,
        mint::authority = pool,
    )]
    pub lp_mint: InterfaceAccount<'info, Mint>,

    /// Payer's settlement account funding fee and first buy
    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = payer,
    )]
    pub payer_asset: InterfaceAccount<'info, TokenAccount>,

    /// Payer's account for the first-buy tokens
    #[account(
        init,
        payer = payer,
        associated_token::mint = mint,
        associated_token::authority = payer,
    )]
    pub payer_token: InterfaceAccount<'info, TokenAccount>,

    /// Pair's settlement vault
    #[account(
        init,
        payer = payer,
        associated_token::mint = asset_mint,
        associated_token::authority = pair,
    )]
    pub pair_asset_vault: InterfaceAccount<'info, TokenAccount>,

    /// Pair's custody for the unsold supply
    #[account(
        init,
        payer = payer,
        associated_token::mint = mint,
        associated_token::authority = pair,
    )]
    pub pair_token_vault: InterfaceAccount<'info, TokenAccount>,

    /// Treasury wallet recorded in the configuration
    /// CHECK: validated against the config
    #[account(constraint = treasury.key() == config.treasury @ LaunchError::InvalidToken)]
    pub treasury: UncheckedAccount<'info>,

    /// Treasury's settlement account
    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = asset_mint,
        associated_token::authority = treasury,
    )]
    pub treasury_vault: InterfaceAccount<'info, TokenAccount>,

    /// Lock's settlement vault for accrued creator fees
    #[account(
        init,
        payer = payer,
        associated_token::mint = asset_mint,
        associated_token::authority = lock,
    )]
    pub lock_asset_vault: InterfaceAccount<'info, TokenAccount>,

    /// Lock's LP vault
    #[account(
        init,
        payer = payer,
        associated_token::mint = lp_mint,
        associated_token::authority = lock,
    )]
    pub lock_lp_vault: InterfaceAccount<'info, TokenAccount>,

    /// Pool's token vault
    #[account(
        init,
        payer = payer,
        associated_token::mint = mint,
        associated_token::authority = pool,
    )]
    pub pool_token_vault: InterfaceAccount<'info, TokenAccount>,

    /// Pool's settlement vault
    #[account(
        init,
        payer = payer,
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

impl<'info> Launch<'info> {
    /// Create the token and seed its curve. `creator` is the fee
    /// beneficiary of record; callers launching for themselves pass
    /// their own key.
    pub fn launch(
        &mut self,
        params: LaunchParams,
        purchase_amount: u64,
        creator: Pubkey,
        bumps: &LaunchBumps,
    ) -> Result<()> {
        params.validate()?;
        require!(creator != Pubkey::default(), LaunchError::RecipientIsZeroAddress);
        require!(
            purchase_amount >= self.config.launch_fee,
            LaunchError::InsufficientAmount
        );
        require!(
            self.payer_asset.amount >= purchase_amount,
            LaunchError::InsufficientAmount
        );

        let engine = self.config.key();
        let mint = self.mint.key();
        let price = self.oracle.asset_price()?;

        // seed the virtual reserves
        let virtual_base =
            VirtualCurve::initial_asset_reserve(self.config.initial_market_cap, price)?;
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
        self.pair
            .mint(&engine, virtual_base, self.config.initial_supply)?;

        self.launch.set_inner(TokenLaunch {
            mint,
            creator,
            pair: self.pair.key(),
            locker: self.lock.key(),
            path: LaunchPath::Bonding {
                status: TokenStatus::Trading,
            },
            transfer_disabled: true,
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
            lp_mint: Pubkey::default(),
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

        self.config.token_count += 1;

        // the full supply sits in pair custody until bought or migrated
        let pair_seeds = &[VirtualPair::SEED, mint.as_ref(), &[bumps.pair]];
        let pair_signer = &[&pair_seeds[..]];
        mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.mint.to_account_info(),
                    to: self.pair_token_vault.to_account_info(),
                    authority: self.pair.to_account_info(),
                },
                pair_signer,
            ),
            self.config.initial_supply,
        )?;

        // flat launch fee to the treasury
        if self.config.launch_fee > 0 {
            transfer_checked(
                CpiContext::new(
                    self.token_program.to_account_info(),
                    TransferChecked {
                        from: self.payer_asset.to_account_info(),
                        mint: self.asset_mint.to_account_info(),
                        to: self.treasury_vault.to_account_info(),
                        authority: self.payer.to_account_info(),
                    },
                ),
                self.config.launch_fee,
                self.asset_mint.decimals,
            )?;
        }

        emit!(Launched {
            mint,
            creator,
            name: params.name,
            symbol: params.symbol,
        });
        msg!("Launched {} with virtual base {}", mint, virtual_base);

        // remainder of the payment funds the first buy
        let first_buy = purchase_amount - self.config.launch_fee;
        if first_buy > 0 {
            let now = Clock::get()?.unix_timestamp;
            let routine = CurveBuyRoutine {
                config: &self.config,
                oracle: &self.oracle,
                launch: &mut self.launch,
                pair: &mut self.pair,
                lock: &mut self.lock,
                pool: &mut self.pool,
                mint: &self.mint,
                asset_mint: &self.asset_mint,
                buyer: self.payer.to_account_info(),
                buyer_asset: &self.payer_asset,
                buyer_token: &self.payer_token,
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
            routine.execute(first_buy, 0, now)?;
        }

        Ok(())
    }
}
