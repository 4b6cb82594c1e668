use anchor_lang::prelude::*;
use crate::state::*;
use crate::errors::StrikeBetsError;
use crate::events::MarketExpired;

/// Terminal teardown: the market and both ledgers are closed, so every
/// later instruction against them fails at account validation.
#[derive(Accounts)]
pub struct ExpireMarket<'info> {
    #[account(
        constraint = authority.key() == config.authority,
    )]
    pub authority: Signer<'info>,

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
        close = beneficiary,
    )]
    pub market: Account<'info, Market>,

    #[account(
        mut,
        seeds = [b"long_ledger", market.key().as_ref()],
        bump = long_ledger.bump,
        close = beneficiary,
    )]
    pub long_ledger: Account<'info, OptionLedger>,

    #[account(
        mut,
        seeds = [b"short_ledger", market.key().as_ref()],
        bump = short_ledger.bump,
        close = beneficiary,
    )]
    pub short_ledger: Account<'info, OptionLedger>,

    /// Receives the residual pool, any stray lamports and the rent
    #[account(mut)]
    pub beneficiary: SystemAccount<'info>,
}

pub fn handler(ctx: Context<ExpireMarket>) -> Result<()> {
    require!(!ctx.accounts.config.halted, StrikeBetsError::ProtocolHalted);

    let clock = Clock::get()?;
    require!(
        ctx.accounts.market.expired(clock.unix_timestamp),
        StrikeBetsError::NotExpirable
    );

    // whatever was never exercised leaves the registry aggregate here;
    // the lamports themselves follow through the account closures
    let residual = ctx.accounts.market.deposited;
    let market = &mut ctx.accounts.market;
    market.decrement_deposited(&mut ctx.accounts.config, residual)?;

    emit!(MarketExpired {
        market: market.key(),
        beneficiary: ctx.accounts.beneficiary.key(),
    });

    Ok(())
}
