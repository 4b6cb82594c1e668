use anchor_lang::prelude::*;
use crate::state::OptionPosition;
use crate::errors::StrikeBetsError;

/// Rent reclamation for a position that has been fully refunded or
/// exercised. Works whether or not the market still exists.
#[derive(Accounts)]
pub struct ClosePosition<'info> {
    #[account(mut)]
    pub account: Signer<'info>,

    #[account(
        mut,
        constraint = position.account == account.key(),
        constraint = position.bid == 0 && position.balance == 0
            @ StrikeBetsError::PositionNotEmpty,
        close = account,
    )]
    pub position: Account<'info, OptionPosition>,
}

pub fn handler(_ctx: Context<ClosePosition>) -> Result<()> {
    Ok(())
}
