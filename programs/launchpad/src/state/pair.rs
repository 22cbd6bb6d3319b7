//! Virtual Pair
//!
//! Holds the virtual reserves pricing one token during its trading phase.
//! Real balances live in SPL vaults under the pair PDA's authority; the
//! reserves tracked here carry the virtual offset on the asset side.
//!
//! Every mutating method takes the caller's key and rejects anything but
//! the recorded router (the engine's config PDA).

use anchor_lang::prelude::*;

use crate::amm::PRICE_SCALE;
use crate::error::LaunchError;

/// Virtual reserve pair account
///
/// Seeds: ["pair", mint]
#[account]
#[derive(InitSpace)]
pub struct VirtualPair {
    /// Token priced by this pair
    pub mint: Pubkey,

    /// Sole caller allowed to mutate reserves (the engine config PDA)
    pub router: Pubkey,

    /// Asset-side reserve, including the virtual offset
    pub reserve_asset: u64,

    /// Token-side reserve
    pub reserve_token: u64,

    /// Spot price of the asset in tokens after the last reserve change,
    /// scaled by `PRICE_SCALE`
    pub price_asset_last: u64,

    /// Spot price of the token in assets after the last reserve change,
    /// scaled by `PRICE_SCALE`
    pub price_token_last: u64,

    /// Reserve product after the last swap; never decreases while the
    /// pair trades
    pub k_last: u128,

    /// Whether the single-shot seeding has happened
    pub minted: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl VirtualPair {
    pub const SEED: &'static [u8] = b"pair";

    /// Validate construction inputs before the account is populated.
    pub fn validate_new(router: &Pubkey, mint: &Pubkey) -> Result<()> {
        require!(*router != Pubkey::default(), LaunchError::FactoryIsZeroAddress);
        require!(*mint != Pubkey::default(), LaunchError::TokenIsZeroAddress);
        Ok(())
    }

    fn assert_router(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.router, LaunchError::CallerIsNotRouter);
        Ok(())
    }

    /// Single-shot reserve seeding at launch.
    pub fn mint(&mut self, caller: &Pubkey, reserve_asset: u64, reserve_token: u64) -> Result<()> {
        self.assert_router(caller)?;
        require!(!self.minted, LaunchError::AlreadyMinted);

        self.reserve_asset = reserve_asset;
        self.reserve_token = reserve_token;
        self.k_last = (reserve_asset as u128) * (reserve_token as u128);
        self.minted = true;
        self.update_prices();

        Ok(())
    }

    /// Swap a net asset deposit for tokens, with the caller's minimum-output
    /// bound. Returns the token amount released.
    pub fn swap_asset_in(&mut self, caller: &Pubkey, net_in: u64, min_tokens_out: u64) -> Result<u64> {
        self.assert_router(caller)?;

        let tokens_out =
            crate::amm::VirtualCurve::tokens_out(self.reserve_asset, self.reserve_token, net_in)?;
        require!(tokens_out >= min_tokens_out, LaunchError::SlippageExceeded);

        self.apply(
            self.reserve_asset
                .checked_add(net_in)
                .ok_or(error!(LaunchError::InsufficientAmount))?,
            self.reserve_token - tokens_out,
        )?;

        Ok(tokens_out)
    }

    /// Swap a token deposit for net assets, with the caller's minimum-output
    /// bound. Returns the gross asset amount released.
    pub fn swap_token_in(&mut self, caller: &Pubkey, token_in: u64, min_asset_out: u64) -> Result<u64> {
        self.assert_router(caller)?;

        let asset_out =
            crate::amm::VirtualCurve::asset_out(self.reserve_asset, self.reserve_token, token_in)?;
        require!(asset_out >= min_asset_out, LaunchError::SlippageExceeded);

        self.apply(
            self.reserve_asset - asset_out,
            self.reserve_token
                .checked_add(token_in)
                .ok_or(error!(LaunchError::InsufficientAmount))?,
        )?;

        Ok(asset_out)
    }

    /// Commit new reserves. Curve rounding keeps remainders inside the
    /// reserves, so the product may only grow from swap to swap.
    fn apply(&mut self, reserve_asset: u64, reserve_token: u64) -> Result<()> {
        let k = (reserve_asset as u128) * (reserve_token as u128);
        require!(k >= self.k_last, LaunchError::LiquidityTooLow);

        self.reserve_asset = reserve_asset;
        self.reserve_token = reserve_token;
        self.k_last = k;
        self.update_prices();

        Ok(())
    }

    fn update_prices(&mut self) {
        if self.reserve_asset > 0 {
            self.price_asset_last =
                ((self.reserve_token as u128) * PRICE_SCALE / (self.reserve_asset as u128)) as u64;
        }
        if self.reserve_token > 0 {
            self.price_token_last =
                ((self.reserve_asset as u128) * PRICE_SCALE / (self.reserve_token as u128)) as u64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(router: Pubkey) -> VirtualPair {
        VirtualPair {
            mint: Pubkey::new_unique(),
            router,
            reserve_asset: 0,
            reserve_token: 0,
            price_asset_last: 0,
            price_token_last: 0,
            k_last: 0,
            minted: false,
            bump: 255,
        }
    }

    #[test]
    fn construction_rejects_default_keys() {
        let key = Pubkey::new_unique();
        assert!(VirtualPair::validate_new(&Pubkey::default(), &key).is_err());
        assert!(VirtualPair::validate_new(&key, &Pubkey::default()).is_err());
        assert!(VirtualPair::validate_new(&key, &key).is_ok());
    }

    #[test]
    fn only_router_may_mutate() {
        let router = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();
        let mut p = pair(router);

        assert!(p.mint(&stranger, 100, 100).is_err());
        assert!(p.swap_asset_in(&stranger, 10, 0).is_err());
        assert!(p.swap_token_in(&stranger, 10, 0).is_err());

        assert!(p.mint(&router, 100, 100).is_ok());
    }

    #[test]
    fn seeding_is_single_shot() {
        let router = Pubkey::new_unique();
        let mut p = pair(router);

        p.mint(&router, 100, 100).unwrap();
        assert_eq!(p.price_asset_last, PRICE_SCALE as u64);
        assert_eq!(p.price_token_last, PRICE_SCALE as u64);

        let err = p.mint(&router, 100, 100).unwrap_err();
        assert_eq!(err, error!(LaunchError::AlreadyMinted));
    }

    #[test]
    fn swap_respects_min_out() {
        let router = Pubkey::new_unique();
        let mut p = pair(router);
        p.mint(&router, 6000, 1_000_000_000).unwrap();

        // quoted output for 10 in is 1_663_893
        assert!(p.swap_asset_in(&router, 10, 1_663_894).is_err());
        let out = p.swap_asset_in(&router, 10, 1_663_893).unwrap();
        assert_eq!(out, 1_663_893);
        assert_eq!(p.reserve_asset, 6010);
        assert_eq!(p.reserve_token, 998_336_107);
    }

    #[test]
    fn product_never_decreases_across_swaps() {
        let router = Pubkey::new_unique();
        let mut p = pair(router);
        p.mint(&router, 6000, 1_000_000_000).unwrap();
        let k0 = p.k_last;

        let out = p.swap_asset_in(&router, 1234, 0).unwrap();
        assert_eq!(p.k_last, (p.reserve_asset as u128) * (p.reserve_token as u128));
        assert!(p.k_last >= k0);
        let k1 = p.k_last;

        p.swap_token_in(&router, out, 0).unwrap();
        assert_eq!(p.k_last, (p.reserve_asset as u128) * (p.reserve_token as u128));
        assert!(p.k_last >= k1);

        // prices carry the fixed-point scale
        assert!(p.price_token_last > 0);
    }
}
