use anchor_lang::prelude::*;

#[error_code]
pub enum StrikeBetsError {
    #[msg("Bids and refunds are only accepted during the bidding phase")]
    NotDuringBidding,

    #[msg("Options cannot be claimed until bidding has ended")]
    BiddingNotEnded,

    #[msg("Market cannot resolve before maturity")]
    NotMatured,

    #[msg("Market is already resolved")]
    AlreadyResolved,

    #[msg("Market has not reached the expiry phase")]
    NotExpirable,

    #[msg("Oracle price was not updated recently enough to resolve")]
    StaleOraclePrice,

    #[msg("Oracle price is non-positive")]
    InvalidOraclePrice,

    #[msg("Phase times must satisfy biddingEnd <= maturity <= expiry")]
    TimesOutOfOrder,

    #[msg("Fee fractions are out of range")]
    FeesOutOfRange,

    #[msg("Prices cannot be computed while either side has no bids")]
    ZeroBids,

    #[msg("Insufficient capital")]
    InsufficientCapital,

    #[msg("Bids too skewed")]
    BidsTooSkewed,

    #[msg("Refund value exceeds the account's bid")]
    InsufficientPosition,

    #[msg("Nothing to claim")]
    NothingToClaim,

    #[msg("Nothing to exercise")]
    NothingToExercise,

    #[msg("Position still holds bids or balances")]
    PositionNotEmpty,

    #[msg("Markets are paused")]
    MarketsPaused,

    #[msg("Protocol operations are halted")]
    ProtocolHalted,

    #[msg("Arithmetic overflow")]
    MathOverflow,

    #[msg("Division by zero")]
    DivisionByZero,

    #[msg("Insufficient balance for rent exemption")]
    InsufficientRentBalance,

    #[msg("Invalid config parameter")]
    InvalidConfigParam,
}
