use anchor_lang::prelude::*;
use crate::state::Side;

#[event]
pub struct MarketCreated {
    pub market: Pubkey,
    pub creator: Pubkey,
    pub oracle_feed: Pubkey,
    pub strike_price: u64,
    pub bidding_end: i64,
    pub maturity: i64,
    pub expiry: i64,
    pub market_id: u64,
}

#[event]
pub struct Bid {
    pub market: Pubkey,
    pub account: Pubkey,
    pub side: Side,
    pub value: u64,
}

#[event]
pub struct Refund {
    pub market: Pubkey,
    pub account: Pubkey,
    pub side: Side,
    pub value: u64,
    pub refund_minus_fee: u64,
}

#[event]
pub struct PricesUpdated {
    pub market: Pubkey,
    pub long_price: u64,
    pub short_price: u64,
}

#[event]
pub struct MarketResolved {
    pub market: Pubkey,
    pub result: Side,
    pub oracle_price: u64,
    pub oracle_timestamp: i64,
    pub deposited: u64,
    pub pool_fees: u64,
    pub creator_fees: u64,
}

#[event]
pub struct OptionsClaimed {
    pub market: Pubkey,
    pub account: Pubkey,
    pub long_options: u64,
    pub short_options: u64,
}

#[event]
pub struct OptionsExercised {
    pub market: Pubkey,
    pub account: Pubkey,
    pub side: Side,
    pub value: u64,
}

#[event]
pub struct MarketExpired {
    pub market: Pubkey,
    pub beneficiary: Pubkey,
}

#[event]
pub struct MarketsPauseToggled {
    pub paused: bool,
}

#[event]
pub struct ProtocolHaltChanged {
    pub halted: bool,
}

#[event]
pub struct AuthorityTransferred {
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
}
