use anchor_lang::prelude::*;
use anchor_lang::system_program;
use crate::state::*;
use crate::errors::StrikeBetsError;
use crate::events::{Bid, MarketCreated, PricesUpdated};
use crate::math;
use crate::pricing;

#[derive(Accounts)]
pub struct CreateMarket<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = creator,
        space = Market::SIZE,
        seeds = [b"market", config.market_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub market: Account<'info, Market>,

    #[account(
        init,
        payer = creator,
        space = OptionLedger::SIZE,
        seeds = [b"long_ledger", market.key().as_ref()],
        bump,
    )]
    pub long_ledger: Account<'info, OptionLedger>,

    #[account(
        init,
        payer = creator,
        space = OptionLedger::SIZE,
        seeds = [b"short_ledger", market.key().as_ref()],
        bump,
    )]
    pub short_ledger: Account<'info, OptionLedger>,

    #[account(
        init,
        payer = creator,
        space = OptionPosition::SIZE,
        seeds = [b"position", long_ledger.key().as_ref(), creator.key().as_ref()],
        bump,
    )]
    pub long_position: Account<'info, OptionPosition>,

    #[account(
        init,
        payer = creator,
        space = OptionPosition::SIZE,
        seeds = [b"position", short_ledger.key().as_ref(), creator.key().as_ref()],
        bump,
    )]
    pub short_position: Account<'info, OptionPosition>,

    pub system_program: Program<'info, System>,
}

#[allow(clippy::too_many_arguments)]
pub fn handler(
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
    require!(!ctx.accounts.config.halted, StrikeBetsError::ProtocolHalted);
    require!(!ctx.accounts.config.paused, StrikeBetsError::MarketsPaused);

    let clock = Clock::get()?;
    require!(
        clock.unix_timestamp < bidding_end && bidding_end <= maturity && maturity <= expiry,
        StrikeBetsError::TimesOutOfOrder
    );

    let fee_multiplier = pricing::fee_multiplier(pool_fee, creator_fee)?;
    require!(refund_fee < math::UNIT, StrikeBetsError::FeesOutOfRange);
    require!(skew_limit <= math::UNIT / 2, StrikeBetsError::InvalidConfigParam);
    // prices are undefined while either side is empty, so the market
    // must open two-sided
    require!(long_bid > 0 && short_bid > 0, StrikeBetsError::ZeroBids);

    let market = &mut ctx.accounts.market;
    let config = &mut ctx.accounts.config;

    market.creator = ctx.accounts.creator.key();
    market.oracle_feed = oracle_feed;
    market.strike_price = strike_price;
    market.final_price = 0;
    market.final_timestamp = 0;
    market.bidding_end = bidding_end;
    market.maturity = maturity;
    market.expiry = expiry;
    market.pool_fee = pool_fee;
    market.creator_fee = creator_fee;
    market.refund_fee = refund_fee;
    market.fee_multiplier = fee_multiplier;
    market.capital_requirement = capital_requirement;
    market.skew_limit = skew_limit;
    market.deposited = 0;
    market.price_long = 0;
    market.price_short = 0;
    market.resolved = false;
    market.market_id = config.market_count;
    market.bump = ctx.bumps.market;

    market.check_creator_limits(long_bid, short_bid)?;

    let long_ledger = &mut ctx.accounts.long_ledger;
    long_ledger.market = market.key();
    long_ledger.side = Side::Long;
    long_ledger.total_bids = 0;
    long_ledger.total_supply = 0;
    long_ledger.bump = ctx.bumps.long_ledger;

    let short_ledger = &mut ctx.accounts.short_ledger;
    short_ledger.market = market.key();
    short_ledger.side = Side::Short;
    short_ledger.total_bids = 0;
    short_ledger.total_supply = 0;
    short_ledger.bump = ctx.bumps.short_ledger;

    let long_position = &mut ctx.accounts.long_position;
    long_position.ledger = long_ledger.key();
    long_position.account = ctx.accounts.creator.key();
    long_position.bid = 0;
    long_position.balance = 0;
    long_position.bump = ctx.bumps.long_position;

    let short_position = &mut ctx.accounts.short_position;
    short_position.ledger = short_ledger.key();
    short_position.account = ctx.accounts.creator.key();
    short_position.bid = 0;
    short_position.balance = 0;
    short_position.bump = ctx.bumps.short_position;

    long_ledger.record_bid(long_position, long_bid)?;
    short_ledger.record_bid(short_position, short_bid)?;

    let value = long_bid
        .checked_add(short_bid)
        .ok_or(StrikeBetsError::MathOverflow)?;
    market.increment_deposited(config, value)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.creator.to_account_info(),
                to: market.to_account_info(),
            },
        ),
        value,
    )?;

    market.update_prices(long_ledger.total_bids, short_ledger.total_bids)?;

    config.market_count = config
        .market_count
        .checked_add(1)
        .ok_or(StrikeBetsError::MathOverflow)?;

    emit!(MarketCreated {
        market: market.key(),
        creator: ctx.accounts.creator.key(),
        oracle_feed,
        strike_price,
        bidding_end,
        maturity,
        expiry,
        market_id: market.market_id,
    });
    emit!(Bid {
        market: market.key(),
        account: ctx.accounts.creator.key(),
        side: Side::Long,
        value: long_bid,
    });
    emit!(Bid {
        market: market.key(),
        account: ctx.accounts.creator.key(),
        side: Side::Short,
        value: short_bid,
    });
    emit!(PricesUpdated {
        market: market.key(),
        long_price: market.price_long,
        short_price: market.price_short,
    });

    Ok(())
}
