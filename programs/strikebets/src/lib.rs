use anchor_lang::prelude::*;

declare_id!("2Rx8PGPBarTf1Xxz1gzLQdoP13ZonTvCUwj61yKiKgQj");

pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod oracle;
pub mod pricing;
pub mod state;

use instructions::*;
use state::Side;

#[program]
pub mod strikebets {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        treasury: Pubkey,
        max_oracle_price_age: i64,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, treasury, max_oracle_price_age)
    }

    pub fn update_config(
        ctx: Context<UpdateConfig>,
        treasury: Option<Pubkey>,
        max_oracle_price_age: Option<i64>,
    ) -> Result<()> {
        instructions::update_config::handler(ctx, treasury, max_oracle_price_age)
    }

    pub fn toggle_pause(ctx: Context<TogglePause>) -> Result<()> {
        instructions::toggle_pause::handler(ctx)
    }

    pub fn set_halted(ctx: Context<SetHalted>, halted: bool) -> Result<()> {
        instructions::set_halted::handler(ctx, halted)
    }

    pub fn transfer_authority(ctx: Context<TransferAuthority>, new_authority: Pubkey) -> Result<()> {
        instructions::transfer_authority::handler(ctx, new_authority)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_market(
        ctx: Context<CreateMarket>,
        oracle_feed: Pubkey,
        strike_price: u64,
        bidding_end: i64,
        maturity: i64,
        expiry: i64,
        pool_fee: u64,
        creator_fee: u64,
        refund_fee: u64,
        capital_requirement: u64,
        skew_limit: u64,
        long_bid: u64,
        short_bid: u64,
    ) -> Result<()> {
        instructions::create_market::handler(
            ctx,
            oracle_feed,
            strike_price,
            bidding_end,
            maturity,
            expiry,
            pool_fee,
            creator_fee,
            refund_fee,
            capital_requirement,
            skew_limit,
            long_bid,
            short_bid,
        )
    }

    pub fn bid(ctx: Context<PlaceBid>, side: Side, value: u64) -> Result<()> {
        instructions::bid::handler(ctx, side, value)
    }

    pub fn refund(ctx: Context<RefundBid>, side: Side, value: u64) -> Result<()> {
        instructions::refund::handler(ctx, side, value)
    }

    pub fn claim_options(ctx: Context<ClaimOptions>) -> Result<()> {
        instructions::claim_options::handler(ctx)
    }

    pub fn exercise_options(ctx: Context<ExerciseOptions>) -> Result<()> {
        instructions::exercise_options::handler(ctx)
    }

    pub fn resolve_market(ctx: Context<ResolveMarket>) -> Result<()> {
        instructions::resolve_market::handler(ctx)
    }

    pub fn expire_market(ctx: Context<ExpireMarket>) -> Result<()> {
        instructions::expire_market::handler(ctx)
    }

    pub fn close_position(ctx: Context<ClosePosition>) -> Result<()> {
        instructions::close_position::handler(ctx)
    }
}
