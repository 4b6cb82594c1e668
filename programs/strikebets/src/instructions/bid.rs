use anchor_lang::prelude::*;
use anchor_lang::system_program;
use crate::state::*;
use crate::errors::StrikeBetsError;
use crate::events::{Bid, PricesUpdated};

#[derive(Accounts)]
pub struct PlaceBid<'info> {
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
        init_if_needed,
        payer = bidder,
        space = OptionPosition::SIZE,
        seeds = [b"position", long_ledger.key().as_ref(), bidder.key().as_ref()],
        bump,
    )]
    pub long_position: Account<'info, OptionPosition>,

    #[account(
        init_if_needed,
        payer = bidder,
        space = OptionPosition::SIZE,
        seeds = [b"position", short_ledger.key().as_ref(), bidder.key().as_ref()],
        bump,
    )]
    pub short_position: Account<'info, OptionPosition>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<PlaceBid>, side: Side, value: u64) -> Result<()> {
    require!(!ctx.accounts.config.halted, StrikeBetsError::ProtocolHalted);
    require!(!ctx.accounts.config.paused, StrikeBetsError::MarketsPaused);

    let clock = Clock::get()?;
    require!(
        ctx.accounts.market.phase(clock.unix_timestamp) == Phase::Bidding,
        StrikeBetsError::NotDuringBidding
    );

    let long_position = &mut ctx.accounts.long_position;
    if long_position.ledger == Pubkey::default() {
        long_position.ledger = ctx.accounts.long_ledger.key();
        long_position.account = ctx.accounts.bidder.key();
        long_position.bump = ctx.bumps.long_position;
    }
    let short_position = &mut ctx.accounts.short_position;
    if short_position.ledger == Pubkey::default() {
        short_position.ledger = ctx.accounts.short_ledger.key();
        short_position.account = ctx.accounts.bidder.key();
        short_position.bump = ctx.bumps.short_position;
    }

    // a zero bid is a silent no-op, not an error
    if value == 0 {
        return Ok(());
    }

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.bidder.to_account_info(),
                to: ctx.accounts.market.to_account_info(),
            },
        ),
        value,
    )?;

    {
        let (ledger, position) = match side {
            Side::Long => (&mut ctx.accounts.long_ledger, &mut ctx.accounts.long_position),
            Side::Short => (&mut ctx.accounts.short_ledger, &mut ctx.accounts.short_position),
        };
        ledger.record_bid(position, value)?;
    }

    let market = &mut ctx.accounts.market;
    market.increment_deposited(&mut ctx.accounts.config, value)?;
    market.update_prices(
        ctx.accounts.long_ledger.total_bids,
        ctx.accounts.short_ledger.total_bids,
    )?;

    emit!(Bid {
        market: market.key(),
        account: ctx.accounts.bidder.key(),
        side,
        value,
    });
    emit!(PricesUpdated {
        market: market.key(),
        long_price: market.price_long,
        short_price: market.price_short,
    });

    Ok(())
}
