//! Token Launch Registry
//!
//! One account per launched token, covering both lifecycle paths. A token
//! either trades on the virtual curve until it graduates, or it is boosted
//! with staged real liquidity and is born graduated. The two registries
//! share a key space (the mint), so the path is a tagged variant rather
//! than two parallel records: a boosted token never holds a valid
//! `Trading` state.

use anchor_lang::prelude::*;

use crate::error::LaunchError;
use crate::state::config::BOOST_STAGES;

/// Individual token launch account
///
/// Seeds: ["launch", mint]
#[account]
#[derive(InitSpace)]
pub struct TokenLaunch {
    /// The launched token's mint
    pub mint: Pubkey,

    /// Creator of record; receives accrued lock-side trade fees
    pub creator: Pubkey,

    /// Virtual pair serving the trading phase (unused on the boost path)
    pub pair: Pubkey,

    /// Liquidity lock holding migrated shares and accrued fees
    pub locker: Pubkey,

    /// Lifecycle path and current state
    pub path: LaunchPath,

    /// Mirrors the created token's transfer gate: launched tokens are
    /// non-transferable while trading and free forever after graduation.
    /// Enforcement lives in the token ledger; this flag is the engine's
    /// observable record of it.
    pub transfer_disabled: bool,

    #[max_len(32)]
    pub name: String,

    #[max_len(16)]
    pub symbol: String,

    #[max_len(8)]
    pub cores: Vec<u8>,

    #[max_len(256)]
    pub description: String,

    #[max_len(128)]
    pub image: String,

    #[max_len(4, 96)]
    pub urls: Vec<String>,

    /// PDA bump seed
    pub bump: u8,
}

impl TokenLaunch {
    pub const SEED: &'static [u8] = b"launch";

    pub fn is_trading(&self) -> bool {
        matches!(
            self.path,
            LaunchPath::Bonding {
                status: TokenStatus::Trading
            }
        )
    }

    /// True for graduated curve tokens and for every boost token.
    pub fn has_graduated(&self) -> bool {
        !self.is_trading()
    }

    /// Current boost stage; zero for curve tokens.
    pub fn boost_stage(&self) -> u8 {
        match self.path {
            LaunchPath::Boosted { stage } => stage,
            LaunchPath::Bonding { .. } => 0,
        }
    }

    /// One-way flip out of the trading phase.
    pub fn graduate(&mut self) -> Result<()> {
        require!(self.is_trading(), LaunchError::NotTrading);
        self.path = LaunchPath::Bonding {
            status: TokenStatus::Graduated,
        };
        self.transfer_disabled = false;
        Ok(())
    }

    /// Advance the boost stage by exactly one.
    pub fn advance_boost_stage(&mut self, target: u8) -> Result<()> {
        require!(target >= 2 && target as usize <= BOOST_STAGES, LaunchError::InvalidStage);
        match self.path {
            LaunchPath::Boosted { stage } if stage + 1 == target => {
                self.path = LaunchPath::Boosted { stage: target };
                Ok(())
            }
            _ => err!(LaunchError::WrongBoostStage),
        }
    }
}

/// Which market venue a token was born into.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum LaunchPath {
    /// Trades on the virtual curve until graduation
    Bonding { status: TokenStatus },
    /// Received staged direct liquidity; never traded on the curve
    Boosted { stage: u8 },
}

impl Space for LaunchPath {
    // variant tag + largest payload (one byte either way)
    const INIT_SPACE: usize = 1 + 1;
}

/// Trading-phase status; flips once, never reverts.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TokenStatus {
    #[default]
    Trading,
    Graduated,
}
