use anchor_lang::prelude::*;
use crate::state::Config;
use crate::errors::StrikeBetsError;

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        has_one = authority,
    )]
    pub config: Account<'info, Config>,
}

pub fn handler(
    ctx: Context<UpdateConfig>,
    treasury: Option<Pubkey>,
    max_oracle_price_age: Option<i64>,
) -> Result<()> {
    let config = &mut ctx.accounts.config;

    if let Some(t) = treasury {
        config.treasury = t;
    }
    if let Some(age) = max_oracle_price_age {
        require!(age > 0, StrikeBetsError::InvalidConfigParam);
        config.max_oracle_price_age = age;
    }

    Ok(())
}
