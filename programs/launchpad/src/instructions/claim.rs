//! Creator Fee Claim
//!
//! Pays a token creator the trade fees that accrued to the lock while
//! the token was on the curve. Anyone may crank the claim; the payout
//! always goes to the creator of record. Repeated claims after a full
//! payout succeed and pay zero.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::error::LaunchError;
use crate::events::FeeClaimed;
use crate::state::{Config, Lock, TokenLaunch};

/// Accounts for claiming accrued creator fees
#[derive(Accounts)]
pub struct ClaimForTokenCreator<'info> {
    /// Crank payer; any key
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Engine configuration
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// Registry entry of the claimed token
    #[account(
        seeds = [TokenLaunch::SEED, launch.mint.as_ref()],
        bump = launch.bump,
    )]
    pub launch: Account<'info, TokenLaunch>,

    /// Lock accruing the creator's fee share
    #[account(
        mut,
        seeds = [Lock::SEED, launch.mint.as_ref()],
        bump = lock.bump,
        constraint = lock.creator == launch.creator @ LaunchError::InvalidToken,
    )]
    pub lock: Account<'info, Lock>,

    /// Settlement asset mint
    #[account(constraint = asset_mint.key() == config.asset_mint @ LaunchError::InvalidToken)]
    pub asset_mint: InterfaceAccount<'info, Mint>,

    /// Lock's settlement vault holding the accrued fees
    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = lock,
    )]
    pub lock_asset_vault: InterfaceAccount<'info, TokenAccount>,

    /// Creator of record
    /// CHECK: validated against the registry entry
    #[account(constraint = creator.key() == launch.creator @ LaunchError::InvalidToken)]
    pub creator: UncheckedAccount<'info>,

    /// Creator's settlement account receiving the payout
    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = asset_mint,
        associated_token::authority = creator,
    )]
    pub creator_asset: InterfaceAccount<'info, TokenAccount>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> ClaimForTokenCreator<'info> {
    pub fn claim_for_token_creator(&mut self) -> Result<u64> {
        let amount = self.lock.take_trading_fee(self.launch.has_graduated())?;

        if amount > 0 {
            let mint = self.launch.mint;
            let lock_seeds = &[Lock::SEED, mint.as_ref(), &[self.lock.bump]];
            let lock_signer = &[&lock_seeds[..]];

            transfer_checked(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    TransferChecked {
                        from: self.lock_asset_vault.to_account_info(),
                        mint: self.asset_mint.to_account_info(),
                        to: self.creator_asset.to_account_info(),
                        authority: self.lock.to_account_info(),
                    },
                    lock_signer,
                ),
                amount,
                self.asset_mint.decimals,
            )?;
        }

        emit!(FeeClaimed {
            mint: self.launch.mint,
            creator: self.launch.creator,
            amount,
        });

        Ok(amount)
    }
}
