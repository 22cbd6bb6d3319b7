//! Global Engine Configuration
//!
//! Singleton account holding every owner-mutable parameter of the launch
//! engine. Its PDA key doubles as the engine identity: pairs and locks
//! record it and reject mutations from anybody else.

use anchor_lang::prelude::*;

use crate::amm::curve::MIN_LOCKED_TIME;
use crate::error::LaunchError;

/// Number of gated boost stages.
pub const BOOST_STAGES: usize = 3;

/// Global configuration account (singleton PDA)
///
/// Seeds: ["config"]
#[account]
#[derive(InitSpace)]
pub struct Config {
    /// Engine administrator; holds every owner-only capability
    pub admin: Pubkey,

    /// Recipient of flat launch fees and the treasury share of trade fees
    pub treasury: Pubkey,

    /// Holder of the boost capability
    pub booster: Pubkey,

    /// Price oracle account consulted for every market-cap computation
    pub oracle: Pubkey,

    /// Settlement asset mint
    pub asset_mint: Pubkey,

    /// Flat fee charged on every launch, in settlement base units
    pub launch_fee: u64,

    /// Total supply minted for every launched token
    pub initial_supply: u64,

    /// Trade fee on buys, basis points of the gross input
    pub buy_fee_bps: u64,

    /// Trade fee on sells, basis points of the gross asset output
    pub sell_fee_bps: u64,

    /// Percent of each trade fee routed to the treasury; the remainder
    /// accrues to the token's lock for the creator
    pub treasury_fee_ratio: u64,

    /// Lock duration applied at graduation and first boost, seconds
    pub locked_time: i64,

    /// Market cap implied by freshly seeded virtual reserves
    pub initial_market_cap: u64,

    /// Market cap at which a trading token graduates
    pub grad_market_cap: u64,

    /// Market-cap gates for boost stages 1..=3, strictly increasing
    pub boost_stage_thresholds: [u64; BOOST_STAGES],

    /// Tokens launched so far (both paths)
    pub token_count: u64,

    /// Boost tokens launched so far
    pub boost_count: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl Config {
    pub const SEED: &'static [u8] = b"config";

    /// Explicit capability check: owner-only operations.
    pub fn require_admin(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.admin, LaunchError::Unauthorized);
        Ok(())
    }

    /// Explicit capability check: boost operations.
    pub fn require_booster(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.booster, LaunchError::Unauthorized);
        Ok(())
    }

    pub fn validate_trade_fees(buy_fee_bps: u64, sell_fee_bps: u64, treasury_fee_ratio: u64) -> Result<()> {
        require!(buy_fee_bps <= 3000 && sell_fee_bps <= 3000, LaunchError::FeeTooHigh);
        require!(treasury_fee_ratio <= 100, LaunchError::FeeTooHigh);
        Ok(())
    }

    pub fn validate_market_caps(initial: u64, grad: u64) -> Result<()> {
        require!(initial > 0 && grad > initial, LaunchError::InvalidMarketCap);
        Ok(())
    }

    pub fn validate_locked_time(locked_time: i64) -> Result<()> {
        require!(locked_time >= MIN_LOCKED_TIME, LaunchError::InvalidLockTime);
        Ok(())
    }

    /// Update a single stage threshold, keeping the sequence strictly
    /// increasing against both neighbors. Stages are 1-based.
    pub fn set_stage_threshold(&mut self, stage: u8, value: u64) -> Result<()> {
        require!(stage >= 1 && stage as usize <= BOOST_STAGES, LaunchError::InvalidStage);
        require!(value > 0, LaunchError::InvalidThreshold);

        let idx = stage as usize - 1;
        if idx > 0 {
            require!(value > self.boost_stage_thresholds[idx - 1], LaunchError::InvalidThreshold);
        }
        if idx + 1 < BOOST_STAGES {
            let next = self.boost_stage_thresholds[idx + 1];
            if next > 0 {
                require!(value < next, LaunchError::InvalidThreshold);
            }
        }

        self.boost_stage_thresholds[idx] = value;
        Ok(())
    }

    /// Replace the whole threshold sequence at once.
    pub fn set_stage_thresholds(&mut self, values: &[u64]) -> Result<()> {
        require!(values.len() == BOOST_STAGES, LaunchError::InputArrayMismatch);

        let mut prev = 0u64;
        for &value in values {
            require!(value > prev, LaunchError::InvalidThreshold);
            prev = value;
        }

        self.boost_stage_thresholds.copy_from_slice(values);
        Ok(())
    }

    /// Market-cap gate for a boost stage. Stages are 1-based.
    pub fn stage_threshold(&self, stage: u8) -> Result<u64> {
        require!(stage >= 1 && stage as usize <= BOOST_STAGES, LaunchError::InvalidStage);
        Ok(self.boost_stage_thresholds[stage as usize - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            admin: Pubkey::new_unique(),
            treasury: Pubkey::new_unique(),
            booster: Pubkey::new_unique(),
            oracle: Pubkey::new_unique(),
            asset_mint: Pubkey::new_unique(),
            launch_fee: 10_000_000,
            initial_supply: 1_000_000_000_000_000,
            buy_fee_bps: 100,
            sell_fee_bps: 100,
            treasury_fee_ratio: 80,
            locked_time: MIN_LOCKED_TIME,
            initial_market_cap: 6_000_000_000,
            grad_market_cap: 50_000_000_000,
            boost_stage_thresholds: [50_000, 500_000, 2_000_000],
            token_count: 0,
            boost_count: 0,
            bump: 255,
        }
    }

    #[test]
    fn capability_checks() {
        let cfg = config();
        assert!(cfg.require_admin(&cfg.admin).is_ok());
        assert!(cfg.require_admin(&cfg.booster).is_err());
        assert!(cfg.require_booster(&cfg.booster).is_ok());
        assert!(cfg.require_booster(&cfg.admin).is_err());
    }

    #[test]
    fn thresholds_must_strictly_increase() {
        let mut cfg = config();

        assert!(cfg.set_stage_thresholds(&[50, 50, 100]).is_err());
        assert!(cfg.set_stage_thresholds(&[50, 40, 100]).is_err());
        assert!(cfg.set_stage_thresholds(&[0, 1, 2]).is_err());
        assert!(cfg.set_stage_thresholds(&[1, 2]).is_err());
        assert!(cfg.set_stage_thresholds(&[1, 2, 3, 4]).is_err());

        assert!(cfg.set_stage_thresholds(&[50, 500, 2000]).is_ok());
        assert_eq!(cfg.boost_stage_thresholds, [50, 500, 2000]);
    }

    #[test]
    fn single_threshold_respects_neighbors() {
        let mut cfg = config();

        assert!(cfg.set_stage_threshold(0, 1).is_err());
        assert!(cfg.set_stage_threshold(4, 1).is_err());
        assert!(cfg.set_stage_threshold(1, 0).is_err());

        // stage 2 must sit strictly between stages 1 and 3
        assert!(cfg.set_stage_threshold(2, 50_000).is_err());
        assert!(cfg.set_stage_threshold(2, 2_000_000).is_err());
        assert!(cfg.set_stage_threshold(2, 60_000).is_ok());
        assert_eq!(cfg.boost_stage_thresholds[1], 60_000);

        assert!(cfg.set_stage_threshold(1, 50_001).is_ok());
        assert!(cfg.set_stage_threshold(3, 60_001).is_ok());
    }

    #[test]
    fn market_cap_bounds() {
        assert!(Config::validate_market_caps(0, 10).is_err());
        assert!(Config::validate_market_caps(10, 10).is_err());
        assert!(Config::validate_market_caps(10, 9).is_err());
        assert!(Config::validate_market_caps(10, 11).is_ok());
    }

    #[test]
    fn locked_time_floor_is_one_year() {
        assert!(Config::validate_locked_time(MIN_LOCKED_TIME - 1).is_err());
        assert!(Config::validate_locked_time(MIN_LOCKED_TIME).is_ok());
    }
}
