//! # Automated Market Maker (AMM) Module
//!
//! Pricing math for both market venues a token passes through:
//!
//! - the **virtual constant-product curve** used during the trading phase,
//!   where the asset side of the pair is seeded with a purely virtual
//!   reserve `R = initial_market_cap / asset_price`, and
//! - the integer square root and fee-split helpers backing the real pool
//!   that receives the reserves at graduation.
//!
//! ```text
//!            reserve_asset × reserve_token = k
//!
//!   ┌────────────────────────────────────────┐
//!   │   token │                              │
//!   │ reserve │ ╲                            │
//!   │         │   ╲__   k = constant         │
//!   │         │      ╲______                 │
//!   │         │             ╲──────          │
//!   │         └──────────────────────▶ asset │
//!   │           R = virtual offset           │
//!   └────────────────────────────────────────┘
//! ```
//!
//! Everything here is pure: no accounts, no CPIs, no clock. The instruction
//! handlers own custody and ordering; these functions are the authoritative
//! reference for every quoted or executed amount.

pub mod curve;

pub use curve::*;
