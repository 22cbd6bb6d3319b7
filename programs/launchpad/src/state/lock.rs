//! Per-token liquidity lock.
//!
//! Receives LP shares at graduation (or across boost stages) and holds
//! them until the release time recorded at the first deposit. Trading
//! fees reserved for the creator accrue here while the curve is live and
//! become claimable once the token leaves the curve.

use anchor_lang::prelude::*;

use crate::error::LaunchError;

/// Seeds: ["lock", mint]
#[account]
#[derive(InitSpace)]
pub struct Lock {
    /// Token this lock belongs to
    pub mint: Pubkey,

    /// Engine allowed to deposit and accrue (the config PDA)
    pub engine: Pubkey,

    /// Launch creator, the only party fees are claimable by
    pub creator: Pubkey,

    /// LP share mint locked here, set once shares exist
    pub lp_mint: Pubkey,

    /// LP shares held under the lock
    pub locked_amount: u64,

    /// Unix time the LP shares unlock; fixed by the first deposit
    pub released_time: i64,

    /// Creator fee balance accrued during the trading phase
    pub trading_fee_at_bonding: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl Lock {
    pub const SEED: &'static [u8] = b"lock";

    fn assert_engine(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.engine, LaunchError::NotBonding);
        Ok(())
    }

    /// Record the LP mint the locked shares belong to.
    pub fn set_lp(&mut self, caller: &Pubkey, lp_mint: Pubkey) -> Result<()> {
        self.assert_engine(caller)?;
        self.lp_mint = lp_mint;
        Ok(())
    }

    /// Deposit LP shares. The first deposit fixes the release time;
    /// later deposits never extend it.
    pub fn lock_lp(&mut self, caller: &Pubkey, amount: u64, now: i64, locked_time: i64) -> Result<()> {
        self.assert_engine(caller)?;

        if self.locked_amount == 0 && self.released_time == 0 {
            self.released_time = now
                .checked_add(locked_time)
                .ok_or(error!(LaunchError::InvalidLockTime))?;
        }
        self.locked_amount = self
            .locked_amount
            .checked_add(amount)
            .ok_or(error!(LaunchError::InsufficientAmount))?;

        Ok(())
    }

    /// Accrue a creator fee share while the token trades on the curve.
    pub fn accrue_trading_fee(&mut self, caller: &Pubkey, amount: u64) -> Result<()> {
        self.assert_engine(caller)?;
        self.trading_fee_at_bonding = self
            .trading_fee_at_bonding
            .checked_add(amount)
            .ok_or(error!(LaunchError::InsufficientAmount))?;
        Ok(())
    }

    /// Drain the accrued creator fee. Requires that the token has left
    /// the curve; once drained, further calls pay zero.
    pub fn take_trading_fee(&mut self, graduated: bool) -> Result<u64> {
        require!(graduated, LaunchError::TokenDoesNotGraduate);
        let amount = self.trading_fee_at_bonding;
        self.trading_fee_at_bonding = 0;
        Ok(amount)
    }

    /// Amount a delegatee may be approved for after the unlock time has
    /// passed. Delegation grants an allowance on the custodied shares;
    /// the balance itself never leaves the lock.
    pub fn delegatable(&self, now: i64, delegatee: &Pubkey) -> Result<u64> {
        require!(self.released_time > 0 && now >= self.released_time, LaunchError::NotReleased);
        require!(*delegatee != Pubkey::default(), LaunchError::InvalidDelegatee);
        Ok(self.locked_amount)
    }
}
