//! LP Delegation
//!
//! After a lock matures, the admin may grant a delegatee an allowance
//! over the custodied LP shares. The shares stay in the lock's vault;
//! delegation is an approval for the full locked amount.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{approve, Approve, TokenAccount, TokenInterface};

use crate::error::LaunchError;
use crate::events::DelegatedLp;
use crate::state::{Config, Lock};

/// Accounts for delegating one lock's shares
#[derive(Accounts)]
pub struct DelegateLp<'info> {
    pub admin: Signer<'info>,

    #[account(
        has_one = admin @ LaunchError::Unauthorized,
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// Lock whose shares are being delegated
    #[account(
        seeds = [Lock::SEED, lock.mint.as_ref()],
        bump = lock.bump,
        constraint = lock.engine == config.key() @ LaunchError::NotBonding,
    )]
    pub lock: Account<'info, Lock>,

    /// Lock's LP vault the allowance is granted on
    #[account(
        mut,
        constraint = lock_lp_vault.owner == lock.key() @ LaunchError::InvalidToken,
        constraint = lock_lp_vault.mint == lock.lp_mint @ LaunchError::InvalidToken,
    )]
    pub lock_lp_vault: InterfaceAccount<'info, TokenAccount>,

    /// Recipient of the allowance
    /// CHECK: any key; the zero key is rejected in the handler
    pub delegatee: UncheckedAccount<'info>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> DelegateLp<'info> {
    pub fn delegate_lp_to(&mut self) -> Result<()> {
        let delegatee = self.delegatee.key();
        let amount = self.lock.delegatable(Clock::get()?.unix_timestamp, &delegatee)?;

        let mint = self.lock.mint;
        let lock_seeds = &[Lock::SEED, mint.as_ref(), &[self.lock.bump]];
        let lock_signer = &[&lock_seeds[..]];

        approve(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                Approve {
                    to: self.lock_lp_vault.to_account_info(),
                    delegate: self.delegatee.to_account_info(),
                    authority: self.lock.to_account_info(),
                },
                lock_signer,
            ),
            amount,
        )?;

        emit!(DelegatedLp {
            mint,
            delegatee,
            amount,
        });

        Ok(())
    }
}

/// Accounts for batch delegation; remaining accounts arrive in
/// `[lock, lock_lp_vault, delegatee]` triples matching `delegatees`
#[derive(Accounts)]
pub struct DelegateLpBatch<'info> {
    pub admin: Signer<'info>,

    #[account(
        has_one = admin @ LaunchError::Unauthorized,
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> DelegateLpBatch<'info> {
    pub fn delegate_lp_to_batch(
        &mut self,
        remaining: &'info [AccountInfo<'info>],
        delegatees: Vec<Pubkey>,
    ) -> Result<()> {
        require!(
            remaining.len() == delegatees.len() * 3,
            LaunchError::InputArrayMismatch
        );

        let now = Clock::get()?.unix_timestamp;

        for (entry, delegatee) in remaining.chunks(3).zip(delegatees) {
            let lock = Account::<Lock>::try_from(&entry[0])?;
            let vault = InterfaceAccount::<TokenAccount>::try_from(&entry[1])?;

            require_keys_eq!(lock.engine, self.config.key(), LaunchError::NotBonding);
            require_keys_eq!(vault.owner, lock.key(), LaunchError::InvalidToken);
            require_keys_eq!(vault.mint, lock.lp_mint, LaunchError::InvalidToken);
            require_keys_eq!(entry[2].key(), delegatee, LaunchError::InputArrayMismatch);

            let amount = lock.delegatable(now, &delegatee)?;

            let mint = lock.mint;
            let lock_seeds = &[Lock::SEED, mint.as_ref(), &[lock.bump]];
            let lock_signer = &[&lock_seeds[..]];

            approve(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    Approve {
                        to: entry[1].clone(),
                        delegate: entry[2].clone(),
                        authority: entry[0].clone(),
                    },
                    lock_signer,
                ),
                amount,
            )?;

            emit!(DelegatedLp {
                mint,
                delegatee,
                amount,
            });
        }

        Ok(())
    }
}
