use anchor_lang::prelude::*;
use crate::errors::StrikeBetsError;
use crate::math::{div_unit, mul_unit, sub_to_zero, UNIT};
use crate::state::Side;

/// The fraction of every deposit that remains exercisable once the pool
/// and creator fees are set aside. The two fees must leave room for a
/// nonzero payout pool.
pub fn fee_multiplier(pool_fee: u64, creator_fee: u64) -> Result<u64> {
    let total_fees = pool_fee
        .checked_add(creator_fee)
        .ok_or(StrikeBetsError::MathOverflow)?;
    require!(total_fees < UNIT, StrikeBetsError::FeesOutOfRange);
    Ok(UNIT - total_fees)
}

/// Price each side as its share of the exercisable pool. Unreachable
/// while either side is empty; the creator limits guarantee both sides
/// hold stake for the whole bidding phase.
pub fn compute_prices(long_bids: u64, short_bids: u64, exercisable: u64) -> Result<(u64, u64)> {
    require!(long_bids != 0 && short_bids != 0, StrikeBetsError::ZeroBids);
    Ok((
        div_unit(long_bids, exercisable)?,
        div_unit(short_bids, exercisable)?,
    ))
}

/// Project the prices that would result from a bid or refund, without
/// mutating anything. A refund removes its full face value from the side
/// total but only the fee-discounted value from the pool. Not binding:
/// other calls may land between a preview and the real action.
#[allow(clippy::too_many_arguments)]
pub fn prices_after_bid_or_refund(
    side: Side,
    value: u64,
    refund: bool,
    long_bids: u64,
    short_bids: u64,
    deposited: u64,
    fee_multiplier: u64,
    refund_fee: u64,
    resolved: bool,
) -> Result<(u64, u64)> {
    let mut long = long_bids;
    let mut short = short_bids;
    let mut pool = deposited;

    let side_total = match side {
        Side::Long => &mut long,
        Side::Short => &mut short,
    };
    if refund {
        let leaving_pool = mul_unit(value, UNIT - refund_fee)?;
        *side_total = side_total
            .checked_sub(value)
            .ok_or(StrikeBetsError::InsufficientPosition)?;
        pool = pool
            .checked_sub(leaving_pool)
            .ok_or(StrikeBetsError::MathOverflow)?;
    } else {
        *side_total = side_total
            .checked_add(value)
            .ok_or(StrikeBetsError::MathOverflow)?;
        pool = pool
            .checked_add(value)
            .ok_or(StrikeBetsError::MathOverflow)?;
    }

    let exercisable = if resolved {
        pool
    } else {
        mul_unit(pool, fee_multiplier)?
    };
    compute_prices(long, short, exercisable)
}

/// Inverse of the price formula: the value to bid or refund on
/// `bid_side` that moves `price_side` to `price`, holding the other
/// side fixed. Targets already met (or unreachable in the requested
/// direction) floor at zero rather than failing.
#[allow(clippy::too_many_arguments)]
pub fn bid_or_refund_for_price(
    bid_side: Side,
    price_side: Side,
    price: u64,
    refund: bool,
    price_side_bids: u64,
    deposited: u64,
    fee_multiplier: u64,
    refund_fee: u64,
) -> Result<u64> {
    let adjusted = mul_unit(price, fee_multiplier)?;
    let refund_multiplier = UNIT - refund_fee;

    if bid_side == price_side {
        let deposited_by_price = mul_unit(deposited, adjusted)?;
        // A refund pulls the price down instead of up, so the operands
        // swap; the refund discount lands on the adjusted price in the
        // denominator, not on the value.
        let (minuend, subtrahend, denominator) = if refund {
            (
                price_side_bids,
                deposited_by_price,
                UNIT.checked_sub(mul_unit(adjusted, refund_multiplier)?)
                    .ok_or(StrikeBetsError::MathOverflow)?,
            )
        } else {
            (
                deposited_by_price,
                price_side_bids,
                UNIT.checked_sub(adjusted)
                    .ok_or(StrikeBetsError::MathOverflow)?,
            )
        };
        div_unit(sub_to_zero(minuend, subtrahend), denominator)
    } else {
        let bids_per_price = div_unit(price_side_bids, adjusted)?;
        if refund {
            // The pool only loses the discounted value per unit refunded.
            div_unit(sub_to_zero(deposited, bids_per_price), refund_multiplier)
        } else {
            Ok(sub_to_zero(bids_per_price, deposited))
        }
    }
}
