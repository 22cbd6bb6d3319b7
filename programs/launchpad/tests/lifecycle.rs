//! End-to-end lifecycle checks over the engine's state machines and
//! reserve math, driven the way the instruction handlers drive them:
//! curve launch through graduation, the staged boost path, and the
//! lock's fee and delegation rules.

use anchor_lang::prelude::*;

use launchpad::amm::{quote_buy, quote_sell, VirtualCurve, PRICE_SCALE};
use launchpad::error::LaunchError;
use launchpad::state::{
    Config, ExternalPool, LaunchPath, Lock, TokenLaunch, TokenStatus, VirtualPair,
};

const SUPPLY: u64 = 1_000_000_000;
const INITIAL_CAP: u64 = 6_000;
const GRAD_CAP: u64 = 50_000;
const PRICE: u64 = PRICE_SCALE as u64; // $1.00
const BUY_FEE_BPS: u64 = 100;
const SELL_FEE_BPS: u64 = 100;
const TREASURY_RATIO: u64 = 80;
const LOCKED_TIME: i64 = 31_536_000;

struct Engine {
    key: Pubkey,
    launch: TokenLaunch,
    pair: VirtualPair,
    lock: Lock,
    pool: ExternalPool,
    // settlement units held by the pair's vault (real, no virtual base)
    vault: u64,
    // token units held by the pair's custody vault
    custody: u64,
    price: u64,
}

impl Engine {
    fn launch_token() -> Self {
        let key = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let creator = Pubkey::new_unique();

        let base = VirtualCurve::initial_asset_reserve(INITIAL_CAP, PRICE).unwrap();
        let mut pair = VirtualPair {
            mint,
            router: key,
            reserve_asset: 0,
            reserve_token: 0,
            price_asset_last: 0,
            price_token_last: 0,
            k_last: 0,
            minted: false,
            bump: 255,
        };
        pair.mint(&key, base, SUPPLY).unwrap();

        Engine {
            key,
            launch: TokenLaunch {
                mint,
                creator,
                pair: Pubkey::new_unique(),
                locker: Pubkey::new_unique(),
                path: LaunchPath::Bonding {
                    status: TokenStatus::Trading,
                },
                transfer_disabled: true,
                name: "Test".into(),
                symbol: "TST".into(),
                cores: vec![],
                description: String::new(),
                image: String::new(),
                urls: vec![],
                bump: 255,
            },
            pair,
            lock: Lock {
                mint,
                engine: key,
                creator,
                lp_mint: Pubkey::default(),
                locked_amount: 0,
                released_time: 0,
                trading_fee_at_bonding: 0,
                bump: 255,
            },
            pool: ExternalPool {
                token_mint: mint,
                asset_mint: Pubkey::new_unique(),
                lp_mint: Pubkey::new_unique(),
                reserve_token: 0,
                reserve_asset: 0,
                lp_supply: 0,
                bump: 255,
            },
            vault: 0,
            // launch mints the full supply into custody up front
            custody: SUPPLY,
            price: PRICE,
        }
    }

    fn market_cap(&self) -> u64 {
        let (ra, rt) = if self.launch.is_trading() {
            (self.pair.reserve_asset, self.pair.reserve_token)
        } else {
            (self.pool.reserve_asset, self.pool.reserve_token)
        };
        VirtualCurve::market_cap(ra, rt, SUPPLY, self.price).unwrap()
    }

    fn buy(&mut self, amount: u64, now: i64) -> Result<u64> {
        require!(self.launch.is_trading(), LaunchError::NotTrading);

        let (_, fees) = quote_buy(
            self.pair.reserve_asset,
            self.pair.reserve_token,
            amount,
            BUY_FEE_BPS,
            TREASURY_RATIO,
        )?;
        let net_in = amount - fees.total;

        let out = self.pair.swap_asset_in(&self.key, net_in, 0)?;
        self.lock.accrue_trading_fee(&self.key, fees.lock)?;
        self.vault += net_in;
        self.custody -= out;

        if self.market_cap() >= GRAD_CAP {
            let tokens = self.pair.reserve_token;
            let assets = self.vault;
            self.launch.graduate()?;
            let shares = self.pool.deposit(tokens, assets, 0)?;
            self.lock.lock_lp(&self.key, shares, now, LOCKED_TIME)?;
            self.vault = 0;
            self.custody -= tokens;
        }

        Ok(out)
    }

    fn sell(&mut self, amount: u64) -> Result<u64> {
        require!(self.launch.is_trading(), LaunchError::NotTrading);

        let (net_out, fees) = quote_sell(
            self.pair.reserve_asset,
            self.pair.reserve_token,
            amount,
            SELL_FEE_BPS,
            TREASURY_RATIO,
        )?;
        self.pair.swap_token_in(&self.key, amount, net_out + fees.total)?;
        self.lock.accrue_trading_fee(&self.key, fees.lock)?;
        self.vault -= net_out + fees.total;
        self.custody += amount;

        Ok(net_out)
    }
}

#[test]
fn curve_lifecycle_reaches_graduation() {
    let mut engine = Engine::launch_token();
    assert_eq!(engine.market_cap(), INITIAL_CAP);

    let mut bought = 0u64;
    let mut trades = 0;
    while engine.launch.is_trading() {
        bought += engine.buy(1_000, 1_000).unwrap();
        trades += 1;
        assert!(trades < 100, "graduation never reached");
    }

    // roughly 11.3k net assets cross the 50k threshold at $1
    assert!(trades >= 11 && trades <= 13);
    assert!(engine.launch.has_graduated());
    assert!(!engine.launch.transfer_disabled);

    // curve is closed afterwards
    assert!(engine.buy(1_000, 1_000).is_err());
    assert!(engine.sell(1).is_err());

    // migrated pool reproduces the curve's real holdings
    assert_eq!(engine.vault, 0);
    assert_eq!(engine.custody, 0);
    assert!(engine.pool.reserve_asset > 11_000);
    assert_eq!(engine.pool.reserve_token + bought, SUPPLY);

    // shares locked for a year from the graduating trade
    assert!(engine.lock.locked_amount > 0);
    assert_eq!(engine.lock.released_time, 1_000 + LOCKED_TIME);

    // the real-pool cap sits below the curve cap: the virtual base is gone
    assert!(engine.market_cap() < GRAD_CAP);
}

#[test]
fn creator_fees_accrue_and_claim_once() {
    let mut engine = Engine::launch_token();

    engine.buy(10_000, 0).unwrap();
    // 1% fee, 20% of it to the lock
    assert_eq!(engine.lock.trading_fee_at_bonding, 20);

    // not claimable while trading
    assert!(engine
        .lock
        .take_trading_fee(engine.launch.has_graduated())
        .is_err());

    while engine.launch.is_trading() {
        engine.buy(5_000, 0).unwrap();
    }

    let claimed = engine
        .lock
        .take_trading_fee(engine.launch.has_graduated())
        .unwrap();
    assert!(claimed >= 20);

    // repeat claims pay zero instead of failing
    assert_eq!(
        engine
            .lock
            .take_trading_fee(engine.launch.has_graduated())
            .unwrap(),
        0
    );
}

#[test]
fn quotes_match_execution() {
    let mut engine = Engine::launch_token();

    let (quoted, fees) = quote_buy(
        engine.pair.reserve_asset,
        engine.pair.reserve_token,
        2_500,
        BUY_FEE_BPS,
        TREASURY_RATIO,
    )
    .unwrap();
    assert_eq!(fees.total, 25);

    let out = engine.buy(2_500, 0).unwrap();
    assert_eq!(out, quoted);

    let (quoted_back, _) = quote_sell(
        engine.pair.reserve_asset,
        engine.pair.reserve_token,
        out,
        SELL_FEE_BPS,
        TREASURY_RATIO,
    )
    .unwrap();
    let back = engine.sell(out).unwrap();
    assert_eq!(back, quoted_back);

    // two fee legs make the round trip strictly lossy
    assert!(back < 2_500);
}

#[test]
fn launch_mints_the_full_supply_up_front() {
    let mut engine = Engine::launch_token();

    // total supply exists from the first slot and never changes
    assert_eq!(engine.custody, SUPPLY);
    assert_eq!(engine.custody, engine.pair.reserve_token);

    let out = engine.buy(2_000, 0).unwrap();
    assert_eq!(engine.custody + out, SUPPLY);
    assert_eq!(engine.custody, engine.pair.reserve_token);

    engine.sell(out).unwrap();
    assert_eq!(engine.custody, SUPPLY);
}

#[test]
fn sell_never_drains_past_real_holdings() {
    let mut engine = Engine::launch_token();

    for _ in 0..5 {
        engine.buy(2_000, 0).unwrap();
    }
    let held = SUPPLY - engine.pair.reserve_token;

    engine.sell(held).unwrap();
    // the vault keeps the rounding dust, never goes negative
    assert!(engine.pair.reserve_asset >= 6_000);
}

fn boost_config() -> Config {
    Config {
        admin: Pubkey::new_unique(),
        treasury: Pubkey::new_unique(),
        booster: Pubkey::new_unique(),
        oracle: Pubkey::new_unique(),
        asset_mint: Pubkey::new_unique(),
        launch_fee: 10,
        initial_supply: SUPPLY,
        buy_fee_bps: BUY_FEE_BPS,
        sell_fee_bps: SELL_FEE_BPS,
        treasury_fee_ratio: TREASURY_RATIO,
        locked_time: LOCKED_TIME,
        initial_market_cap: INITIAL_CAP,
        grad_market_cap: GRAD_CAP,
        boost_stage_thresholds: [50_000, 500_000, 2_000_000],
        token_count: 0,
        boost_count: 0,
        bump: 255,
    }
}

#[test]
fn boost_path_walks_the_stage_gates() {
    let cfg = boost_config();
    let engine_key = Pubkey::new_unique();
    let mint = Pubkey::new_unique();

    // stage 1: one-sided deposit value must cover half the first gate
    let asset_leg = 25_000u64;
    let value = (asset_leg as u128 * PRICE as u128 / PRICE_SCALE) as u64;
    assert!(value >= cfg.stage_threshold(1).unwrap() / 2);

    let mut launch = TokenLaunch {
        mint,
        creator: Pubkey::new_unique(),
        pair: Pubkey::new_unique(),
        locker: Pubkey::new_unique(),
        path: LaunchPath::Boosted { stage: 1 },
        transfer_disabled: false,
        name: "Boosted".into(),
        symbol: "BST".into(),
        cores: vec![],
        description: String::new(),
        image: String::new(),
        urls: vec![],
        bump: 255,
    };
    let mut lock = Lock {
        mint,
        engine: engine_key,
        creator: launch.creator,
        lp_mint: Pubkey::new_unique(),
        locked_amount: 0,
        released_time: 0,
        trading_fee_at_bonding: 0,
        bump: 255,
    };
    let mut pool = ExternalPool {
        token_mint: mint,
        asset_mint: Pubkey::new_unique(),
        lp_mint: lock.lp_mint,
        reserve_token: 0,
        reserve_asset: 0,
        lp_supply: 0,
        bump: 255,
    };

    // born graduated, never tradable
    assert!(launch.has_graduated());
    assert!(!launch.is_trading());
    assert_eq!(launch.boost_stage(), 1);

    let (t, a) = pool.plan_deposit(SUPPLY, asset_leg, 0, 0).unwrap();
    let shares = pool.deposit(t, a, 0).unwrap();
    lock.lock_lp(&engine_key, shares, 500, LOCKED_TIME).unwrap();
    assert_eq!(lock.released_time, 500 + LOCKED_TIME);

    // stage 3 cannot come before stage 2
    assert!(launch.advance_boost_stage(3).is_err());
    assert_eq!(launch.boost_stage(), 1);

    // stage 2 gate: cap at $1 is only 25k, far below the 500k threshold
    let mut price = PRICE;
    let cap = VirtualCurve::market_cap(pool.reserve_asset, pool.reserve_token, SUPPLY, price)
        .unwrap();
    assert!(cap < cfg.stage_threshold(2).unwrap());

    // the asset appreciating to $30 lifts the cap over the gate
    price = 30 * PRICE;
    let cap = VirtualCurve::market_cap(pool.reserve_asset, pool.reserve_token, SUPPLY, price)
        .unwrap();
    assert!(cap >= cfg.stage_threshold(2).unwrap());

    launch.advance_boost_stage(2).unwrap();
    let (t, a) = pool.plan_deposit(SUPPLY / 2, 100_000, 0, 0).unwrap();
    let shares = pool.deposit(t, a, 0).unwrap();
    lock.lock_lp(&engine_key, shares, 9_000, LOCKED_TIME).unwrap();

    // top-ups never extend the original maturity
    assert_eq!(lock.released_time, 500 + LOCKED_TIME);

    // stage 2 cannot repeat, stage 3 follows once
    assert!(launch.advance_boost_stage(2).is_err());
    launch.advance_boost_stage(3).unwrap();
    assert!(launch.advance_boost_stage(4).is_err());
    assert_eq!(launch.boost_stage(), 3);
}

#[test]
fn delegation_waits_for_maturity() {
    let engine_key = Pubkey::new_unique();
    let delegatee = Pubkey::new_unique();
    let mut lock = Lock {
        mint: Pubkey::new_unique(),
        engine: engine_key,
        creator: Pubkey::new_unique(),
        lp_mint: Pubkey::new_unique(),
        locked_amount: 0,
        released_time: 0,
        trading_fee_at_bonding: 0,
        bump: 255,
    };
    lock.lock_lp(&engine_key, 777, 100, LOCKED_TIME).unwrap();

    let maturity = 100 + LOCKED_TIME;
    assert!(lock.delegatable(maturity - 1, &delegatee).is_err());
    assert_eq!(lock.delegatable(maturity, &delegatee).unwrap(), 777);
    assert!(lock.delegatable(maturity, &Pubkey::default()).is_err());
}
