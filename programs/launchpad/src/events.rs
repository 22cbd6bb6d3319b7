use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy)]
pub enum TradeSide {
    Buy,
    Sell,
}

/// Emitted once per launch, from both the bonding and the boost paths.
#[event]
pub struct Launched {
    pub mint: Pubkey,
    pub creator: Pubkey,
    pub name: String,
    pub symbol: String,
}

#[event]
pub struct TradeEvent {
    pub mint: Pubkey,
    pub trader: Pubkey,
    pub side: TradeSide,
    pub asset_amount: u64,
    pub token_amount: u64,
}

#[event]
pub struct Graduated {
    pub mint: Pubkey,
}

#[event]
pub struct Boosted {
    pub mint: Pubkey,
    pub stage: u8,
}

#[event]
pub struct DelegatedLp {
    pub mint: Pubkey,
    pub delegatee: Pubkey,
    pub amount: u64,
}

#[event]
pub struct FeeClaimed {
    pub mint: Pubkey,
    pub creator: Pubkey,
    pub amount: u64,
}
