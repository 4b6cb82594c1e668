use anchor_lang::prelude::*;
use crate::state::*;
use crate::errors::StrikeBetsError;
use crate::events::MarketResolved;
use crate::oracle;
use pyth_solana_receiver_sdk::price_update::PriceUpdateV2;

#[derive(Accounts)]
pub struct ResolveMarket<'info> {
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
    )]
    pub market: Account<'info, Market>,

    /// Fee sink for the pool fees
    #[account(
        mut,
        constraint = treasury.key() == config.treasury,
    )]
    pub treasury: SystemAccount<'info>,

    /// CHECK: receives the creator fees; validated against the market
    #[account(
        mut,
        constraint = creator.key() == market.creator,
    )]
    pub creator: UncheckedAccount<'info>,

    pub price_update: Account<'info, PriceUpdateV2>,
}

pub fn handler(ctx: Context<ResolveMarket>) -> Result<()> {
    require!(!ctx.accounts.config.halted, StrikeBetsError::ProtocolHalted);
    require!(!ctx.accounts.config.paused, StrikeBetsError::MarketsPaused);

    let clock = Clock::get()?;
    let (oracle_price, updated_at) =
        oracle::price_and_timestamp(&ctx.accounts.price_update, &ctx.accounts.market.oracle_feed)?;

    let market = &mut ctx.accounts.market;
    let (pool_fees, creator_fees) = market.resolve(
        &mut ctx.accounts.config,
        clock.unix_timestamp,
        oracle_price,
        updated_at,
    )?;

    // Rent-exemption guard before the fee transfers leave the PDA
    let rent = Rent::get()?;
    let min_balance = rent.minimum_balance(Market::SIZE);
    let total_fees = pool_fees
        .checked_add(creator_fees)
        .ok_or(StrikeBetsError::MathOverflow)?;
    let market_lamports = market.to_account_info().lamports();
    require!(
        market_lamports.checked_sub(total_fees).unwrap_or(0) >= min_balance,
        StrikeBetsError::InsufficientRentBalance
    );

    **market.to_account_info().try_borrow_mut_lamports()? -= pool_fees;
    **ctx.accounts.treasury.to_account_info().try_borrow_mut_lamports()? += pool_fees;
    **market.to_account_info().try_borrow_mut_lamports()? -= creator_fees;
    **ctx.accounts.creator.to_account_info().try_borrow_mut_lamports()? += creator_fees;

    emit!(MarketResolved {
        market: market.key(),
        result: market.result(market.final_price),
        oracle_price,
        oracle_timestamp: updated_at,
        deposited: market.deposited,
        pool_fees,
        creator_fees,
    });

    Ok(())
}
