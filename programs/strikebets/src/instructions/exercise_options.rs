use anchor_lang::prelude::*;
use crate::state::*;
use crate::errors::StrikeBetsError;
use crate::events::{MarketResolved, OptionsClaimed, OptionsExercised};
use crate::oracle;
use pyth_solana_receiver_sdk::price_update::PriceUpdateV2;

#[derive(Accounts)]
pub struct ExerciseOptions<'info> {
    #[account(mut)]
    pub claimant: Signer<'info>,

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

    /// Fee sink, needed when this call resolves the market implicitly
    #[account(
        mut,
        constraint = treasury.key() == config.treasury,
    )]
    pub treasury: SystemAccount<'info>,

    /// CHECK: receives the creator fees on implicit resolution
    #[account(
        mut,
        constraint = creator.key() == market.creator,
    )]
    pub creator: UncheckedAccount<'info>,

    pub price_update: Account<'info, PriceUpdateV2>,
}

pub fn handler(ctx: Context<ExerciseOptions>) -> Result<()> {
    require!(!ctx.accounts.config.halted, StrikeBetsError::ProtocolHalted);
    require!(!ctx.accounts.config.paused, StrikeBetsError::MarketsPaused);

    let clock = Clock::get()?;
    let rent = Rent::get()?;
    let min_balance = rent.minimum_balance(Market::SIZE);

    // an exercise on an unresolved market resolves it first, under the
    // same gates as an explicit resolution
    if !ctx.accounts.market.resolved {
        let (oracle_price, updated_at) = oracle::price_and_timestamp(
            &ctx.accounts.price_update,
            &ctx.accounts.market.oracle_feed,
        )?;

        let market = &mut ctx.accounts.market;
        let (pool_fees, creator_fees) = market.resolve(
            &mut ctx.accounts.config,
            clock.unix_timestamp,
            oracle_price,
            updated_at,
        )?;

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
    }

    // sweep any unclaimed bids into balances before exercising
    let market = &ctx.accounts.market;
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
    if long_options != 0 || short_options != 0 {
        emit!(OptionsClaimed {
            market: market.key(),
            account: ctx.accounts.claimant.key(),
            long_options,
            short_options,
        });
    }

    let long_balance = ctx.accounts.long_position.balance;
    let short_balance = ctx.accounts.short_position.balance;
    require!(
        long_balance != 0 || short_balance != 0,
        StrikeBetsError::NothingToExercise
    );

    if long_balance != 0 {
        ctx.accounts
            .long_ledger
            .exercise(&mut ctx.accounts.long_position)?;
    }
    if short_balance != 0 {
        ctx.accounts
            .short_ledger
            .exercise(&mut ctx.accounts.short_position)?;
    }

    let market = &mut ctx.accounts.market;
    let result = market.result(market.final_price);
    let payout = match result {
        Side::Long => long_balance,
        Side::Short => short_balance,
    };
    // fee rounding can leave the pool a unit short of the last winning
    // balance; the pool never pays out more than it holds
    let payout = payout.min(market.deposited);

    // a losing-side-only exercise is a valid zero-payout outcome
    emit!(OptionsExercised {
        market: market.key(),
        account: ctx.accounts.claimant.key(),
        side: result,
        value: payout,
    });

    if payout != 0 {
        market.decrement_deposited(&mut ctx.accounts.config, payout)?;

        let market_lamports = market.to_account_info().lamports();
        require!(
            market_lamports.checked_sub(payout).unwrap_or(0) >= min_balance,
            StrikeBetsError::InsufficientRentBalance
        );

        **market.to_account_info().try_borrow_mut_lamports()? -= payout;
        **ctx.accounts.claimant.to_account_info().try_borrow_mut_lamports()? += payout;
    }

    Ok(())
}
