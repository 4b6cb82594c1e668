use anchor_lang::prelude::*;
use crate::state::*;
use crate::errors::StrikeBetsError;
use crate::events::OptionsClaimed;

#[derive(Accounts)]
pub struct ClaimOptions<'info> {
    pub claimant: Signer<'info>,

    #[account(
        seeds = [b"config"],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
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
        seeds = [b"position", long_ledger.key().as_ref(), claimant.key().as_ref()],
        bump = long_position.bump,
    )]
    pub long_position: Account<'info, OptionPosition>,

    #[account(
        mut,
        seeds = [b"position", short_ledger.key().as_ref(), claimant.key().as_ref()],
        bump = short_position.bump,
    )]
    pub short_position: Account<'info, OptionPosition>,
}

pub fn handler(ctx: Context<ClaimOptions>) -> Result<()> {
    require!(!ctx.accounts.config.halted, StrikeBetsError::ProtocolHalted);
    require!(!ctx.accounts.config.paused, StrikeBetsError::MarketsPaused);

    let clock = Clock::get()?;
    let market = &ctx.accounts.market;
    require!(
        market.bidding_end <= clock.unix_timestamp,
        StrikeBetsError::BiddingNotEnded
    );

    // the conversion rate is fixed here: the prices prevailing at claim
    // time and the exercisable share of the pool
    let exercisable = market.exercisable_deposits()?;
    let long_options = ctx.accounts.long_ledger.claim(
        &mut ctx.accounts.long_position,
        market.price_long,
        exercisable,
    )?;
    let short_options = ctx.accounts.short_ledger.claim(
        &mut ctx.accounts.short_position,
        market.price_short,
        exercisable,
    )?;
    require!(
        long_options != 0 || short_options != 0,
        StrikeBetsError::NothingToClaim
    );

    emit!(OptionsClaimed {
        market: market.key(),
        account: ctx.accounts.claimant.key(),
        long_options,
        short_options,
    });

    Ok(())
}
