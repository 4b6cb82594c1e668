use anchor_lang::prelude::*;
use crate::state::Config;
use crate::errors::StrikeBetsError;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = Config::SIZE,
        seeds = [b"config"],
        bump,
    )]
    pub config: Account<'info, Config>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<Initialize>,
    treasury: Pubkey,
    max_oracle_price_age: i64,
) -> Result<()> {
    require!(max_oracle_price_age > 0, StrikeBetsError::InvalidConfigParam);

    let config = &mut ctx.accounts.config;
    config.authority = ctx.accounts.authority.key();
    config.treasury = treasury;
    config.max_oracle_price_age = max_oracle_price_age;
    config.total_deposited = 0;
    config.market_count = 0;
    config.halted = false;
    config.paused = false;
    config.bump = ctx.bumps.config;

    Ok(())
}
