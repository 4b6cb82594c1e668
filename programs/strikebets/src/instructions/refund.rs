use anchor_lang::prelude::*;
use crate::state::*;
use crate::errors::StrikeBetsError;
use crate::events::{PricesUpdated, Refund};
use crate::math;

#[derive(Accounts)]
pub struct RefundBid<'info> {
    #[account(mut)]
    pub bidder: Signer<'info>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [b"market", market.market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    #[account(
        mut,
        seeds = [b"long_ledger", market.key().as_ref()],
        bump = long_ledger.bump,
    )]
    pub long_ledger: Account<'info, OptionLedger>,

    #[account(
        mut,
        seeds = [b"short_ledger", market.key().as_ref()],
        bump = short_ledger.bump,
    )]
    pub short_ledger: Account<'info, OptionLedger>,

    #[account(
        mut,
        seeds = [b"position", long_ledger.key().as_ref(), bidder.key().as_ref()],
        bump = long_position.bump,
    )]
    pub long_position: Account<'info, OptionPosition>,

    #[account(
        mut,
        seeds = [b"position", short_ledger.key().as_ref(), bidder.key().as_ref()],
        bump = short_position.bump,
    )]
    pub short_position: Account<'info, OptionPosition>,
}

pub fn handler(ctx: Context<RefundBid>, side: Side, value: u64) -> Result<()> {
    require!(!ctx.accounts.config.halted, StrikeBetsError::ProtocolHalted);
    require!(!ctx.accounts.config.paused, StrikeBetsError::MarketsPaused);

    let clock = Clock::get()?;
    require!(
        ctx.accounts.market.phase(clock.unix_timestamp) == Phase::Bidding,
        StrikeBetsError::NotDuringBidding
    );

    // a zero refund is a silent no-op, not an error
    if value == 0 {
        return Ok(());
    }

    let market = &ctx.accounts.market;
    // the creator's remaining stake must still satisfy the limits after
    // this withdrawal
    if ctx.accounts.bidder.key() == market.creator {
        let (long_after, short_after) = match side {
            Side::Long => (
                ctx.accounts
                    .long_position
                    .bid
                    .checked_sub(value)
                    .ok_or(StrikeBetsError::InsufficientPosition)?,
                ctx.accounts.short_position.bid,
            ),
            Side::Short => (
                ctx.accounts.long_position.bid,
                ctx.accounts
                    .short_position
                    .bid
                    .checked_sub(value)
                    .ok_or(StrikeBetsError::InsufficientPosition)?,
            ),
        };
        market.check_creator_limits(long_after, short_after)?;
    }

    let refund_minus_fee = math::mul_unit(value, math::UNIT - market.refund_fee)?;

    {
        let (ledger, position) = match side {
            Side::Long => (&mut ctx.accounts.long_ledger, &mut ctx.accounts.long_position),
            Side::Short => (&mut ctx.accounts.short_ledger, &mut ctx.accounts.short_position),
        };
        ledger.record_refund(position, value)?;
    }

    let market = &mut ctx.accounts.market;
    market.decrement_deposited(&mut ctx.accounts.config, refund_minus_fee)?;

    // Rent-exemption guard: the market PDA must stay rent exempt
    let rent = Rent::get()?;
    let min_balance = rent.minimum_balance(Market::SIZE);
    let market_lamports = market.to_account_info().lamports();
    require!(
        market_lamports.checked_sub(refund_minus_fee).unwrap_or(0) >= min_balance,
        StrikeBetsError::InsufficientRentBalance
    );

    **market.to_account_info().try_borrow_mut_lamports()? -= refund_minus_fee;
    **ctx.accounts.bidder.to_account_info().try_borrow_mut_lamports()? += refund_minus_fee;

    market.update_prices(
        ctx.accounts.long_ledger.total_bids,
        ctx.accounts.short_ledger.total_bids,
    )?;

    emit!(Refund {
        market: market.key(),
        account: ctx.accounts.bidder.key(),
        side,
        value,
        refund_minus_fee,
    });
    emit!(PricesUpdated {
        market: market.key(),
        long_price: market.price_long,
        short_price: market.price_short,
    });

    Ok(())
}
