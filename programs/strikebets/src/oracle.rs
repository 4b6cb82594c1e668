use anchor_lang::prelude::*;
use pyth_solana_receiver_sdk::price_update::PriceUpdateV2;
use crate::errors::StrikeBetsError;

/// Oracle readings are normalized to the same nine-decimal scale as
/// `math::UNIT` so they compare directly against strike prices.
pub const ORACLE_DECIMALS: i32 = 9;

/// Read `(price, publish_time)` for the given feed. Freshness against
/// the market's maturity is the caller's concern; this only rejects
/// non-positive readings and normalizes the exponent.
pub fn price_and_timestamp(
    price_update: &Account<PriceUpdateV2>,
    feed: &Pubkey,
) -> Result<(u64, i64)> {
    let feed_id = feed.to_bytes();
    let price = price_update
        .get_price_unchecked(&feed_id)
        .map_err(|_| StrikeBetsError::InvalidOraclePrice)?;
    require!(price.price > 0, StrikeBetsError::InvalidOraclePrice);

    let shift = ORACLE_DECIMALS + price.exponent;
    let raw = price.price as u128;
    let scaled = if shift >= 0 {
        raw.checked_mul(10u128.pow(shift as u32))
            .ok_or(StrikeBetsError::MathOverflow)?
    } else {
        raw / 10u128.pow((-shift) as u32)
    };
    let rate = u64::try_from(scaled).map_err(|_| StrikeBetsError::MathOverflow)?;

    Ok((rate, price.publish_time))
}
