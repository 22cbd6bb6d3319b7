//! # Virtual Constant-Product Curve
//!
//! Pricing primitive for the pre-graduation trading phase.
//!
//! ## The Core Invariant
//!
//! ```text
//! reserve_asset × reserve_token = k   (non-decreasing net of fees)
//! ```
//!
//! The asset side of the pair starts out purely virtual: at launch it is
//! seeded with
//!
//! ```text
//! R = initial_market_cap × SCALE / asset_price
//! ```
//!
//! so that the opening spot price equals `initial_market_cap / supply`.
//! Real settlement assets accumulate on top of that offset as trades come
//! in, which is why the market cap is discontinuous at graduation: the
//! virtual base R disappears when reserves migrate to the real pool.
//!
//! ## Swap Formulas
//!
//! ```text
//! tokens_out(net_in)  = S − R·S / (R + net_in)
//! net_in(tokens_out)  = R·S / (S − tokens_out) − R
//! ```
//!
//! Fees apply to gross amounts before these formulas; the functions here
//! take amounts net of fees. The new opposite reserve rounds up, so the
//! taker's output floors and the reserve product never decreases across
//! a swap.

use anchor_lang::prelude::*;

/// Errors specific to the reserve math
#[error_code]
pub enum CurveError {
    #[msg("Reserves must be positive")]
    InvalidReserves,
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Division by zero")]
    DivisionByZero,
    #[msg("Swap would drain the reserve")]
    InsufficientReserve,
}

/// Fixed-point scale shared by oracle prices and market caps (1e6 = 1.0).
pub const PRICE_SCALE: u128 = 1_000_000;

/// Seconds in 365 days, the minimum liquidity lock duration.
pub const MIN_LOCKED_TIME: i64 = 31_536_000;

/// Fee amount split between the treasury and a token's lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    pub total: u64,
    pub treasury: u64,
    pub lock: u64,
}

/// Split a gross fee taken at `fee_bps` of `amount`: the treasury takes
/// `treasury_ratio` percent, the remainder accrues to the lock.
pub fn split_fee(amount: u64, fee_bps: u64, treasury_ratio: u64) -> Result<FeeSplit> {
    let total = (amount as u128)
        .checked_mul(fee_bps as u128)
        .ok_or(CurveError::Overflow)?
        / 10_000;
    let treasury = total
        .checked_mul(treasury_ratio as u128)
        .ok_or(CurveError::Overflow)?
        / 100;
    let total = total as u64;
    let treasury = treasury as u64;
    Ok(FeeSplit {
        total,
        treasury,
        lock: total - treasury,
    })
}

/// ceil(num / den); keeps rounding remainders inside the reserves.
fn div_up(num: u128, den: u128) -> Result<u128> {
    let quotient = num.checked_div(den).ok_or(CurveError::DivisionByZero)?;
    if num % den == 0 {
        Ok(quotient)
    } else {
        Ok(quotient + 1)
    }
}

/// Constant-product curve over a virtual reserve pair.
pub struct VirtualCurve;

impl VirtualCurve {
    /// Tokens released for a net asset deposit.
    pub fn tokens_out(reserve_asset: u64, reserve_token: u64, net_in: u64) -> Result<u64> {
        require!(reserve_asset > 0 && reserve_token > 0, CurveError::InvalidReserves);

        let k = (reserve_asset as u128)
            .checked_mul(reserve_token as u128)
            .ok_or(CurveError::Overflow)?;
        let new_asset = (reserve_asset as u128)
            .checked_add(net_in as u128)
            .ok_or(CurveError::Overflow)?;
        let new_token = div_up(k, new_asset)?;
        let out = (reserve_token as u128)
            .checked_sub(new_token)
            .ok_or(CurveError::InsufficientReserve)?;

        Ok(out as u64)
    }

    /// Net asset released for a token deposit.
    pub fn asset_out(reserve_asset: u64, reserve_token: u64, token_in: u64) -> Result<u64> {
        require!(reserve_asset > 0 && reserve_token > 0, CurveError::InvalidReserves);

        let k = (reserve_asset as u128)
            .checked_mul(reserve_token as u128)
            .ok_or(CurveError::Overflow)?;
        let new_token = (reserve_token as u128)
            .checked_add(token_in as u128)
            .ok_or(CurveError::Overflow)?;
        let new_asset = div_up(k, new_token)?;
        let out = (reserve_asset as u128)
            .checked_sub(new_asset)
            .ok_or(CurveError::InsufficientReserve)?;

        Ok(out as u64)
    }

    /// Net asset deposit required to receive exactly `tokens_out` tokens.
    pub fn asset_in_for(reserve_asset: u64, reserve_token: u64, tokens_out: u64) -> Result<u64> {
        require!(reserve_asset > 0 && reserve_token > 0, CurveError::InvalidReserves);
        require!(tokens_out < reserve_token, CurveError::InsufficientReserve);

        let k = (reserve_asset as u128)
            .checked_mul(reserve_token as u128)
            .ok_or(CurveError::Overflow)?;
        let new_token = (reserve_token as u128) - (tokens_out as u128);
        let new_asset = div_up(k, new_token)?;
        let net_in = new_asset
            .checked_sub(reserve_asset as u128)
            .ok_or(CurveError::Overflow)?;

        Ok(net_in as u64)
    }

    /// Virtual asset reserve seeded at launch so that the opening price
    /// equals `initial_market_cap / supply`.
    pub fn initial_asset_reserve(initial_market_cap: u64, asset_price: u64) -> Result<u64> {
        require!(asset_price > 0, CurveError::DivisionByZero);

        let reserve = (initial_market_cap as u128)
            .checked_mul(PRICE_SCALE)
            .ok_or(CurveError::Overflow)?
            / (asset_price as u128);

        Ok(reserve as u64)
    }

    /// Market cap of the full supply implied by the current reserves,
    /// converted through the oracle price.
    ///
    /// ```text
    /// market_cap = reserve_asset · supply / reserve_token · price / SCALE
    /// ```
    pub fn market_cap(
        reserve_asset: u64,
        reserve_token: u64,
        total_supply: u64,
        asset_price: u64,
    ) -> Result<u64> {
        require!(reserve_token > 0, CurveError::DivisionByZero);

        let implied_asset = (reserve_asset as u128)
            .checked_mul(total_supply as u128)
            .ok_or(CurveError::Overflow)?
            / (reserve_token as u128);
        let cap = implied_asset
            .checked_mul(asset_price as u128)
            .ok_or(CurveError::Overflow)?
            / PRICE_SCALE;

        Ok(cap as u64)
    }
}

/// Quote a buy of `amount` gross settlement assets: `(tokens_out, fee)`.
pub fn quote_buy(
    reserve_asset: u64,
    reserve_token: u64,
    amount: u64,
    buy_fee_bps: u64,
    treasury_ratio: u64,
) -> Result<(u64, FeeSplit)> {
    let fees = split_fee(amount, buy_fee_bps, treasury_ratio)?;
    let net_in = amount
        .checked_sub(fees.total)
        .ok_or(CurveError::Overflow)?;
    let tokens_out = VirtualCurve::tokens_out(reserve_asset, reserve_token, net_in)?;
    Ok((tokens_out, fees))
}

/// Quote a sell of `amount` tokens: `(net_asset_out, fee)`. The fee is
/// carved out of the gross asset proceeds.
pub fn quote_sell(
    reserve_asset: u64,
    reserve_token: u64,
    amount: u64,
    sell_fee_bps: u64,
    treasury_ratio: u64,
) -> Result<(u64, FeeSplit)> {
    let gross_out = VirtualCurve::asset_out(reserve_asset, reserve_token, amount)?;
    let fees = split_fee(gross_out, sell_fee_bps, treasury_ratio)?;
    let net_out = gross_out
        .checked_sub(fees.total)
        .ok_or(CurveError::Overflow)?;
    Ok((net_out, fees))
}

/// Integer square root using Newton's method; floor(√x).
pub fn sqrt(x: u128) -> u128 {
    if x == 0 {
        return 0;
    }

    let mut z = (x + 1) / 2;
    let mut y = x;

    while z < y {
        y = z;
        z = (x / z + z) / 2;
    }

    y
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SUPPLY: u64 = 1_000_000_000;

    #[test]
    fn test_sqrt() {
        assert_eq!(sqrt(0), 0);
        assert_eq!(sqrt(1), 1);
        assert_eq!(sqrt(4), 2);
        assert_eq!(sqrt(10), 3); // floor(√10) = 3
        assert_eq!(sqrt(1_000_000), 1000);
        let root = sqrt(u128::from(u64::MAX));
        assert!(root * root <= u128::from(u64::MAX));
    }

    #[test]
    fn test_initial_reserve_matches_market_cap() {
        // market cap 6000 at price 1.0 gives a virtual reserve of 6000
        let r = VirtualCurve::initial_asset_reserve(6000, PRICE_SCALE as u64).unwrap();
        assert_eq!(r, 6000);

        // doubling the price halves the reserve
        let r = VirtualCurve::initial_asset_reserve(6000, 2 * PRICE_SCALE as u64).unwrap();
        assert_eq!(r, 3000);

        // seeded reserves reproduce the initial market cap exactly
        let cap = VirtualCurve::market_cap(6000, SUPPLY, SUPPLY, PRICE_SCALE as u64).unwrap();
        assert_eq!(cap, 6000);
    }

    #[test]
    fn test_tokens_out_reference_values() {
        // S = 1e9, R = 6000, net in = 10:
        // remaining reserve ceil(6000e9 / 6010) = 998_336_107
        let out = VirtualCurve::tokens_out(6000, SUPPLY, 10).unwrap();
        assert_eq!(out, SUPPLY - 998_336_107);
        assert_eq!(out, 1_663_893);
    }

    #[test]
    fn test_asset_in_inverts_tokens_out() {
        let out = VirtualCurve::tokens_out(6000, SUPPLY, 250).unwrap();
        let back = VirtualCurve::asset_in_for(6000, SUPPLY, out).unwrap();
        // minimal deposit reaching `out`, never more than the original
        assert!(back <= 250);
        assert!(VirtualCurve::tokens_out(6000, SUPPLY, back).unwrap() >= out);
    }

    #[test]
    fn test_round_trip_never_profits() {
        let reserve_asset = 6000u64;
        let reserve_token = SUPPLY;
        let amount_in = 500u64;

        let out = VirtualCurve::tokens_out(reserve_asset, reserve_token, amount_in).unwrap();
        let recovered = VirtualCurve::asset_out(
            reserve_asset + amount_in,
            reserve_token - out,
            out,
        )
        .unwrap();

        assert!(recovered <= amount_in);
    }

    #[test]
    fn test_reserve_product_never_decreases() {
        let mut reserve_asset = 6000u64;
        let mut reserve_token = SUPPLY;
        let mut k_prev = (reserve_asset as u128) * (reserve_token as u128);

        for amount in [1u64, 7, 99, 500] {
            let out = VirtualCurve::tokens_out(reserve_asset, reserve_token, amount).unwrap();
            reserve_asset += amount;
            reserve_token -= out;
            let k = (reserve_asset as u128) * (reserve_token as u128);
            assert!(k >= k_prev);
            k_prev = k;

            // selling the exact output back releases at most the deposit
            let back = VirtualCurve::asset_out(reserve_asset, reserve_token, out).unwrap();
            assert!(back <= amount);
            reserve_asset -= back;
            reserve_token += out;
            let k = (reserve_asset as u128) * (reserve_token as u128);
            assert!(k >= k_prev);
            k_prev = k;
        }
    }

    #[test]
    fn test_round_trip_with_fees_strictly_lossy() {
        let (out, buy_fees) = quote_buy(6000, SUPPLY, 1000, 100, 80).unwrap();
        assert_eq!(buy_fees.total, 10); // 1% of 1000
        assert_eq!(buy_fees.treasury, 8);
        assert_eq!(buy_fees.lock, 2);

        let net_in = 1000 - buy_fees.total;
        let (recovered, sell_fees) = quote_sell(
            6000 + net_in,
            SUPPLY - out,
            out,
            100,
            80,
        )
        .unwrap();

        assert!(sell_fees.total > 0);
        assert!(recovered < 1000);
    }

    #[test]
    fn test_fee_split_accounts_for_every_unit() {
        for amount in [0u64, 1, 99, 100, 12345, 10_000_000] {
            let fees = split_fee(amount, 100, 80).unwrap();
            assert_eq!(fees.total, fees.treasury + fees.lock);
            assert!(fees.total <= amount);
        }
    }

    #[test]
    fn test_market_cap_grows_with_buys() {
        let mut reserve_asset = 6000u64;
        let mut reserve_token = SUPPLY;

        let before = VirtualCurve::market_cap(
            reserve_asset,
            reserve_token,
            SUPPLY,
            PRICE_SCALE as u64,
        )
        .unwrap();

        let out = VirtualCurve::tokens_out(reserve_asset, reserve_token, 2000).unwrap();
        reserve_asset += 2000;
        reserve_token -= out;

        let after = VirtualCurve::market_cap(
            reserve_asset,
            reserve_token,
            SUPPLY,
            PRICE_SCALE as u64,
        )
        .unwrap();

        assert!(after > before);
    }

    #[test]
    fn test_graduation_threshold_crossing() {
        // (R + x)² / R >= grad cap, R = 6000, grad = 50_000, price = 1.0:
        // crossing point x ≈ 11_320
        let reserve_asset = 6000u64 + 11_321;
        let out = VirtualCurve::tokens_out(6000, SUPPLY, 11_321).unwrap();
        let reserve_token = SUPPLY - out;

        let cap = VirtualCurve::market_cap(
            reserve_asset,
            reserve_token,
            SUPPLY,
            PRICE_SCALE as u64,
        )
        .unwrap();
        assert!(cap >= 50_000);

        let under = VirtualCurve::tokens_out(6000, SUPPLY, 11_000).unwrap();
        let cap_under = VirtualCurve::market_cap(
            6000 + 11_000,
            SUPPLY - under,
            SUPPLY,
            PRICE_SCALE as u64,
        )
        .unwrap();
        assert!(cap_under < 50_000);
    }

    #[test]
    fn test_zero_price_rejected() {
        assert!(VirtualCurve::initial_asset_reserve(6000, 0).is_err());
    }
}
