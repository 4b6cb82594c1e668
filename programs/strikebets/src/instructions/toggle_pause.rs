use anchor_lang::prelude::*;
use crate::state::Config;
use crate::events::MarketsPauseToggled;

#[derive(Accounts)]
pub struct TogglePause<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        has_one = authority,
    )]
    pub config: Account<'info, Config>,
}

pub fn handler(ctx: Context<TogglePause>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.paused = !config.paused;

    emit!(MarketsPauseToggled {
        paused: config.paused,
    });

    Ok(())
}
