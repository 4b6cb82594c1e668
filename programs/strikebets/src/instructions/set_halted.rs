use anchor_lang::prelude::*;
use crate::state::Config;
use crate::events::ProtocolHaltChanged;

/// The system-wide activity switch. Unlike the markets pause this stops
/// everything, including resolution.
#[derive(Accounts)]
pub struct SetHalted<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        has_one = authority,
    )]
    pub config: Account<'info, Config>,
}

pub fn handler(ctx: Context<SetHalted>, halted: bool) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.halted = halted;

    emit!(ProtocolHaltChanged { halted });

    Ok(())
}
