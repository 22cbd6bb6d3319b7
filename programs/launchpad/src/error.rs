use anchor_lang::prelude::*;

#[error_code]
pub enum LaunchError {
    #[msg("Caller does not hold the required capability")]
    Unauthorized,
    #[msg("Token is not in the trading phase")]
    NotTrading,
    #[msg("Token is not registered with the launchpad")]
    InvalidToken,
    #[msg("Oracle reported a zero asset price")]
    InvalidAssetPrice,
    #[msg("Amount is below the required minimum or exceeds the balance")]
    InsufficientAmount,
    #[msg("Oracle is not usable")]
    InvalidOracle,
    #[msg("Market cap bounds must satisfy grad > initial > 0")]
    InvalidMarketCap,
    #[msg("Lock duration must be at least 365 days")]
    InvalidLockTime,
    #[msg("Boost stage must be 1, 2 or 3")]
    InvalidStage,
    #[msg("Stage thresholds must be positive and strictly increasing")]
    InvalidThreshold,
    #[msg("Input array lengths do not match")]
    InputArrayMismatch,
    #[msg("Delegatee must not be the default address")]
    InvalidDelegatee,
    #[msg("Initial boost liquidity is below half of the stage-1 threshold")]
    LiquidityTooLow,
    #[msg("Boost stages must advance sequentially")]
    WrongBoostStage,
    #[msg("Market cap has not reached the stage threshold")]
    MarketCapTooLow,
    #[msg("Locked liquidity has not reached its release time")]
    NotReleased,
    #[msg("Caller is not the bonding engine")]
    NotBonding,
    #[msg("Token has not graduated")]
    TokenDoesNotGraduate,
    #[msg("Caller is not the router")]
    CallerIsNotRouter,
    #[msg("Virtual reserves were already seeded")]
    AlreadyMinted,
    #[msg("Router must not be the default address")]
    FactoryIsZeroAddress,
    #[msg("Token must not be the default address")]
    TokenIsZeroAddress,
    #[msg("Recipient must not be the default address")]
    RecipientIsZeroAddress,
    #[msg("Deadline has passed")]
    DeadlineExpired,
    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,
    #[msg("Combined trade fees cannot exceed 30%")]
    FeeTooHigh,
    #[msg("Metadata field exceeds its maximum length")]
    InvalidMetadata,
}
