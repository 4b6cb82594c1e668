use anchor_lang::prelude::*;
use crate::errors::StrikeBetsError;
use crate::math;
use crate::pricing;

/// Registry and protocol-wide switches. Also tracks the aggregate
/// deposited total across every live market.
#[account]
pub struct Config {
    pub authority: Pubkey,
    pub treasury: Pubkey,
    pub max_oracle_price_age: i64,
    pub total_deposited: u64,
    pub market_count: u64,
    pub halted: bool,
    pub paused: bool,
    pub bump: u8,
}

impl Config {
    pub const SIZE: usize = 8 + 32 + 32 + 8 + 8 + 8 + 1 + 1 + 1;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    Long,
    Short,
}

/// Derived from the clock on every query, never stored.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Bidding,
    Trading,
    Maturity,
    Expiry,
}

#[account]
pub struct Market {
    pub creator: Pubkey,
    pub oracle_feed: Pubkey,
    pub strike_price: u64,
    pub final_price: u64,
    pub final_timestamp: i64,
    pub bidding_end: i64,
    pub maturity: i64,
    pub expiry: i64,
    pub pool_fee: u64,
    pub creator_fee: u64,
    pub refund_fee: u64,
    pub fee_multiplier: u64,
    pub capital_requirement: u64,
    pub skew_limit: u64,
    pub deposited: u64,
    pub price_long: u64,
    pub price_short: u64,
    pub resolved: bool,
    pub market_id: u64,
    pub bump: u8,
}

impl Market {
    pub const SIZE: usize = 8  // discriminator
        + 32                   // creator
        + 32                   // oracle_feed
        + 8                    // strike_price
        + 8                    // final_price
        + 8                    // final_timestamp
        + 8                    // bidding_end
        + 8                    // maturity
        + 8                    // expiry
        + 8                    // pool_fee
        + 8                    // creator_fee
        + 8                    // refund_fee
        + 8                    // fee_multiplier
        + 8                    // capital_requirement
        + 8                    // skew_limit
        + 8                    // deposited
        + 8                    // price_long
        + 8                    // price_short
        + 1                    // resolved
        + 8                    // market_id
        + 1;                   // bump

    pub fn phase(&self, now: i64) -> Phase {
        if now < self.bidding_end {
            Phase::Bidding
        } else if now < self.maturity {
            Phase::Trading
        } else if self.expired(now) {
            Phase::Expiry
        } else {
            Phase::Maturity
        }
    }

    pub fn expired(&self, now: i64) -> bool {
        self.resolved && (self.expiry <= now || self.deposited == 0)
    }

    /// A reading is usable for resolution if the oracle updated it at or
    /// after `maturity - max_oracle_price_age`.
    pub fn oracle_fresh(&self, updated_at: i64, max_oracle_price_age: i64) -> bool {
        self.maturity.saturating_sub(max_oracle_price_age) <= updated_at
    }

    pub fn can_resolve(&self, now: i64, updated_at: i64, max_oracle_price_age: i64) -> bool {
        !self.resolved && self.maturity <= now && self.oracle_fresh(updated_at, max_oracle_price_age)
    }

    /// The winning side. Uses the frozen price once resolved, the given
    /// live oracle reading before then.
    pub fn result(&self, live_price: u64) -> Side {
        let price = if self.resolved { self.final_price } else { live_price };
        if self.strike_price <= price {
            Side::Long
        } else {
            Side::Short
        }
    }

    /// The portion of the pool payable to winners: fees are set aside
    /// until resolution deducts them for real.
    pub fn exercisable_deposits(&self) -> Result<u64> {
        if self.resolved {
            Ok(self.deposited)
        } else {
            math::mul_unit(self.deposited, self.fee_multiplier)
        }
    }

    pub fn price_of(&self, side: Side) -> u64 {
        match side {
            Side::Long => self.price_long,
            Side::Short => self.price_short,
        }
    }

    pub fn update_prices(&mut self, long_bids: u64, short_bids: u64) -> Result<()> {
        let (long, short) =
            pricing::compute_prices(long_bids, short_bids, self.exercisable_deposits()?)?;
        self.price_long = long;
        self.price_short = short;
        Ok(())
    }

    pub fn prices_after_bid_or_refund(
        &self,
        side: Side,
        value: u64,
        refund: bool,
        long_bids: u64,
        short_bids: u64,
    ) -> Result<(u64, u64)> {
        pricing::prices_after_bid_or_refund(
            side,
            value,
            refund,
            long_bids,
            short_bids,
            self.deposited,
            self.fee_multiplier,
            self.refund_fee,
            self.resolved,
        )
    }

    pub fn bid_or_refund_for_price(
        &self,
        bid_side: Side,
        price_side: Side,
        price: u64,
        refund: bool,
        long_bids: u64,
        short_bids: u64,
    ) -> Result<u64> {
        let price_side_bids = match price_side {
            Side::Long => long_bids,
            Side::Short => short_bids,
        };
        pricing::bid_or_refund_for_price(
            bid_side,
            price_side,
            price,
            refund,
            price_side_bids,
            self.deposited,
            self.fee_multiplier,
            self.refund_fee,
        )
    }

    /// The creator must keep `capital_requirement` of total stake and at
    /// least a `skew_limit` fraction of it on each side.
    pub fn check_creator_limits(&self, long_bid: u64, short_bid: u64) -> Result<()> {
        let total = long_bid
            .checked_add(short_bid)
            .ok_or(StrikeBetsError::MathOverflow)?;
        require!(
            self.capital_requirement <= total,
            StrikeBetsError::InsufficientCapital
        );
        require!(
            self.skew_limit <= math::div_unit(long_bid, total)?,
            StrikeBetsError::BidsTooSkewed
        );
        require!(
            self.skew_limit <= math::div_unit(short_bid, total)?,
            StrikeBetsError::BidsTooSkewed
        );
        Ok(())
    }

    /// The deposit ledger moves only through these two operations so the
    /// registry aggregate stays in lock-step.
    pub fn increment_deposited(&mut self, config: &mut Config, value: u64) -> Result<()> {
        self.deposited = self
            .deposited
            .checked_add(value)
            .ok_or(StrikeBetsError::MathOverflow)?;
        config.total_deposited = config
            .total_deposited
            .checked_add(value)
            .ok_or(StrikeBetsError::MathOverflow)?;
        Ok(())
    }

    pub fn decrement_deposited(&mut self, config: &mut Config, value: u64) -> Result<()> {
        self.deposited = self
            .deposited
            .checked_sub(value)
            .ok_or(StrikeBetsError::MathOverflow)?;
        config.total_deposited = config
            .total_deposited
            .checked_sub(value)
            .ok_or(StrikeBetsError::MathOverflow)?;
        Ok(())
    }

    /// One-way transition. Freezes the oracle reading and carves the pool
    /// and creator fees out of the deposit ledger; the caller moves the
    /// actual lamports. Returns `(pool_fees, creator_fees)`.
    pub fn resolve(
        &mut self,
        config: &mut Config,
        now: i64,
        oracle_price: u64,
        updated_at: i64,
    ) -> Result<(u64, u64)> {
        require!(!self.resolved, StrikeBetsError::AlreadyResolved);
        require!(self.maturity <= now, StrikeBetsError::NotMatured);
        require!(
            self.oracle_fresh(updated_at, config.max_oracle_price_age),
            StrikeBetsError::StaleOraclePrice
        );

        self.final_price = oracle_price;
        self.final_timestamp = updated_at;
        self.resolved = true;

        let pool_fees = math::mul_unit(self.deposited, self.pool_fee)?;
        let creator_fees = math::mul_unit(self.deposited, self.creator_fee)?;
        let total_fees = pool_fees
            .checked_add(creator_fees)
            .ok_or(StrikeBetsError::MathOverflow)?;
        self.decrement_deposited(config, total_fees)?;

        Ok((pool_fees, creator_fees))
    }
}

/// One per side. The market mutates per-account positions only through
/// these operations, mirroring the ledger totals in the same call.
#[account]
pub struct OptionLedger {
    pub market: Pubkey,
    pub side: Side,
    pub total_bids: u64,
    pub total_supply: u64,
    pub bump: u8,
}

impl OptionLedger {
    pub const SIZE: usize = 8 + 32 + 1 + 8 + 8 + 1;

    pub fn record_bid(&mut self, position: &mut OptionPosition, value: u64) -> Result<()> {
        position.bid = position
            .bid
            .checked_add(value)
            .ok_or(StrikeBetsError::MathOverflow)?;
        self.total_bids = self
            .total_bids
            .checked_add(value)
            .ok_or(StrikeBetsError::MathOverflow)?;
        Ok(())
    }

    pub fn record_refund(&mut self, position: &mut OptionPosition, value: u64) -> Result<()> {
        position.bid = position
            .bid
            .checked_sub(value)
            .ok_or(StrikeBetsError::InsufficientPosition)?;
        self.total_bids = self
            .total_bids
            .checked_sub(value)
            .ok_or(StrikeBetsError::MathOverflow)?;
        Ok(())
    }

    /// Convert the account's bid into option units at the price fixed at
    /// claim time. The cap keeps the side's supply within the exercisable
    /// pool, so price rounding can only ever favor the pool.
    pub fn claim(
        &mut self,
        position: &mut OptionPosition,
        price: u64,
        exercisable: u64,
    ) -> Result<u64> {
        let bid = position.bid;
        let claimable = self.claimable_balance_of(position, price, exercisable)?;
        if claimable == 0 {
            return Ok(0);
        }

        position.bid = 0;
        self.total_bids = self
            .total_bids
            .checked_sub(bid)
            .ok_or(StrikeBetsError::MathOverflow)?;
        position.balance = position
            .balance
            .checked_add(claimable)
            .ok_or(StrikeBetsError::MathOverflow)?;
        self.total_supply = self
            .total_supply
            .checked_add(claimable)
            .ok_or(StrikeBetsError::MathOverflow)?;

        Ok(claimable)
    }

    pub fn claimable_balance_of(
        &self,
        position: &OptionPosition,
        price: u64,
        exercisable: u64,
    ) -> Result<u64> {
        if position.bid == 0 {
            return Ok(0);
        }
        let owed = math::div_unit(position.bid, price)?;
        Ok(owed.min(self.total_claimable_supply(exercisable)))
    }

    pub fn total_claimable_supply(&self, exercisable: u64) -> u64 {
        if self.total_bids == 0 {
            return 0;
        }
        math::sub_to_zero(exercisable, self.total_supply)
    }

    /// Burn the account's whole balance; returns the units burned.
    pub fn exercise(&mut self, position: &mut OptionPosition) -> Result<u64> {
        let balance = position.balance;
        position.balance = 0;
        self.total_supply = self
            .total_supply
            .checked_sub(balance)
            .ok_or(StrikeBetsError::MathOverflow)?;
        Ok(balance)
    }
}

#[account]
pub struct OptionPosition {
    pub ledger: Pubkey,
    pub account: Pubkey,
    pub bid: u64,
    pub balance: u64,
    pub bump: u8,
}

impl OptionPosition {
    pub const SIZE: usize = 8 + 32 + 32 + 8 + 8 + 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::UNIT;

    fn test_market() -> Market {
        Market {
            creator: Pubkey::default(),
            oracle_feed: Pubkey::default(),
            strike_price: 50_000 * UNIT,
            final_price: 0,
            final_timestamp: 0,
            bidding_end: 1_000,
            maturity: 2_000,
            expiry: 3_000,
            pool_fee: UNIT / 100,
            creator_fee: UNIT / 100,
            refund_fee: UNIT / 20,
            fee_multiplier: UNIT - 2 * (UNIT / 100),
            capital_requirement: 500 * UNIT,
            skew_limit: UNIT / 10,
            deposited: 1_000 * UNIT,
            price_long: 0,
            price_short: 0,
            resolved: false,
            market_id: 0,
            bump: 0,
        }
    }

    fn test_config() -> Config {
        Config {
            authority: Pubkey::default(),
            treasury: Pubkey::default(),
            max_oracle_price_age: 120,
            total_deposited: 1_000 * UNIT,
            market_count: 1,
            halted: false,
            paused: false,
            bump: 0,
        }
    }

    #[test]
    fn test_phase_follows_the_clock() {
        let mut market = test_market();
        assert_eq!(market.phase(999), Phase::Bidding);
        assert_eq!(market.phase(1_000), Phase::Trading);
        assert_eq!(market.phase(1_999), Phase::Trading);
        assert_eq!(market.phase(2_000), Phase::Maturity);
        // not Expiry until resolved, even past the expiry instant
        assert_eq!(market.phase(3_000), Phase::Maturity);

        market.resolved = true;
        assert_eq!(market.phase(2_999), Phase::Maturity);
        assert_eq!(market.phase(3_000), Phase::Expiry);

        // a drained market expires early
        market.deposited = 0;
        assert_eq!(market.phase(2_000), Phase::Expiry);
    }

    #[test]
    fn test_result_side_at_the_strike() {
        let mut market = test_market();
        // strike <= price pays Long, including exact equality
        assert_eq!(market.result(50_000 * UNIT), Side::Long);
        assert_eq!(market.result(50_000 * UNIT + 1), Side::Long);
        assert_eq!(market.result(50_000 * UNIT - 1), Side::Short);

        // once resolved the frozen price wins over any live reading
        market.resolved = true;
        market.final_price = 60_000 * UNIT;
        assert_eq!(market.result(0), Side::Long);
    }

    #[test]
    fn test_resolve_distributes_fees_once() {
        let mut market = test_market();
        let mut config = test_config();
        // the live result and the resolved result agree while the
        // oracle reading is unchanged
        assert_eq!(market.result(60_000 * UNIT), Side::Long);

        let (pool_fees, creator_fees) = market
            .resolve(&mut config, 2_000, 60_000 * UNIT, 1_950)
            .unwrap();
        assert_eq!(market.result(60_000 * UNIT), Side::Long);
        assert_eq!(pool_fees, 10 * UNIT);
        assert_eq!(creator_fees, 10 * UNIT);
        assert_eq!(market.deposited, 980 * UNIT);
        assert_eq!(config.total_deposited, 980 * UNIT);
        assert!(market.resolved);
        assert_eq!(market.final_price, 60_000 * UNIT);
        assert_eq!(market.final_timestamp, 1_950);

        // second resolution must fail and leave the frozen price alone
        assert!(market
            .resolve(&mut config, 2_500, 10_000 * UNIT, 2_400)
            .is_err());
        assert_eq!(market.final_price, 60_000 * UNIT);
    }

    #[test]
    fn test_resolve_rejects_early_and_stale() {
        let mut market = test_market();
        let mut config = test_config();

        // before maturity
        assert!(market
            .resolve(&mut config, 1_999, 60_000 * UNIT, 1_990)
            .is_err());
        // price older than maturity - max_oracle_price_age
        assert!(market
            .resolve(&mut config, 2_000, 60_000 * UNIT, 1_879)
            .is_err());
        // exactly at the freshness bound is acceptable
        assert!(market
            .resolve(&mut config, 2_000, 60_000 * UNIT, 1_880)
            .is_ok());
    }

    #[test]
    fn test_can_resolve() {
        let market = test_market();
        assert!(market.can_resolve(2_000, 1_950, 120));
        assert!(!market.can_resolve(1_999, 1_950, 120));
        assert!(!market.can_resolve(2_000, 1_879, 120));
    }

    #[test]
    fn test_exercisable_deposits_sets_fees_aside() {
        let mut market = test_market();
        assert_eq!(market.exercisable_deposits().unwrap(), 980 * UNIT);
        market.resolved = true;
        assert_eq!(market.exercisable_deposits().unwrap(), 1_000 * UNIT);
    }

    #[test]
    fn test_creator_limits() {
        let market = test_market();
        // 600/400 split of 1000 meets a 500 requirement and 0.1 skew
        assert!(market.check_creator_limits(600 * UNIT, 400 * UNIT).is_ok());
        // under-capitalized
        assert!(market.check_creator_limits(300 * UNIT, 100 * UNIT).is_err());
        // capital fine, short side under the 10% floor
        assert!(market.check_creator_limits(950 * UNIT, 50 * UNIT).is_err());
        // boundary: exactly 10% on the small side passes
        assert!(market.check_creator_limits(900 * UNIT, 100 * UNIT).is_ok());
    }

    #[test]
    fn test_deposited_moves_in_lock_step_with_registry() {
        let mut market = test_market();
        let mut config = test_config();

        market.increment_deposited(&mut config, 50 * UNIT).unwrap();
        assert_eq!(market.deposited, 1_050 * UNIT);
        assert_eq!(config.total_deposited, 1_050 * UNIT);

        market.decrement_deposited(&mut config, 1_050 * UNIT).unwrap();
        assert_eq!(market.deposited, 0);
        assert_eq!(config.total_deposited, 0);

        // draining past zero is an invariant violation, not a floor
        assert!(market.decrement_deposited(&mut config, 1).is_err());
    }

    fn ledger_and_position(bid: u64) -> (OptionLedger, OptionPosition) {
        let ledger = OptionLedger {
            market: Pubkey::default(),
            side: Side::Long,
            total_bids: bid,
            total_supply: 0,
            bump: 0,
        };
        let position = OptionPosition {
            ledger: Pubkey::default(),
            account: Pubkey::default(),
            bid,
            balance: 0,
            bump: 0,
        };
        (ledger, position)
    }

    #[test]
    fn test_ledger_bid_and_refund_mirror_totals() {
        let (mut ledger, mut position) = ledger_and_position(0);
        ledger.record_bid(&mut position, 600 * UNIT).unwrap();
        assert_eq!(position.bid, 600 * UNIT);
        assert_eq!(ledger.total_bids, 600 * UNIT);

        ledger.record_refund(&mut position, 100 * UNIT).unwrap();
        assert_eq!(position.bid, 500 * UNIT);
        assert_eq!(ledger.total_bids, 500 * UNIT);

        // refunding more than the bid fails without touching state
        assert!(ledger.record_refund(&mut position, 501 * UNIT).is_err());
        assert_eq!(position.bid, 500 * UNIT);
    }

    #[test]
    fn test_claim_converts_bid_at_the_given_price() {
        let (mut ledger, mut position) = ledger_and_position(600 * UNIT);
        // price 0.6122..., exercisable pool 980: the whole side is owed
        // roughly the full exercisable amount
        let price = crate::math::div_unit(600 * UNIT, 980 * UNIT).unwrap();
        let claimed = ledger.claim(&mut position, price, 980 * UNIT).unwrap();

        assert!(claimed <= 980 * UNIT);
        assert!(980 * UNIT - claimed < 1_000);
        assert_eq!(position.bid, 0);
        assert_eq!(ledger.total_bids, 0);
        assert_eq!(position.balance, claimed);
        assert_eq!(ledger.total_supply, claimed);

        // a second claim is a zero no-op
        assert_eq!(ledger.claim(&mut position, price, 980 * UNIT).unwrap(), 0);
    }

    #[test]
    fn test_claim_caps_at_the_exercisable_pool() {
        let (mut ledger, mut position) = ledger_and_position(600 * UNIT);
        ledger.total_supply = 979 * UNIT;
        let price = crate::math::div_unit(600 * UNIT, 980 * UNIT).unwrap();
        // owed ~980 but only 1 unit of supply headroom remains
        let claimed = ledger.claim(&mut position, price, 980 * UNIT).unwrap();
        assert_eq!(claimed, UNIT);
        assert_eq!(ledger.total_supply, 980 * UNIT);
    }

    #[test]
    fn test_bid_sequences_conserve_the_pool() {
        // deposited always equals the sum of both sides' bid totals as
        // long as only bids occur
        let mut market = test_market();
        let mut config = test_config();
        market.deposited = 0;
        config.total_deposited = 0;

        let (mut long_ledger, mut long_position) = ledger_and_position(0);
        let (mut short_ledger, mut short_position) = ledger_and_position(0);

        for value in [600 * UNIT, 400 * UNIT, 17, 3 * UNIT] {
            long_ledger.record_bid(&mut long_position, value).unwrap();
            market.increment_deposited(&mut config, value).unwrap();
            short_ledger.record_bid(&mut short_position, value / 2).unwrap();
            market.increment_deposited(&mut config, value / 2).unwrap();

            assert_eq!(
                market.deposited,
                long_ledger.total_bids + short_ledger.total_bids
            );
            assert_eq!(market.deposited, config.total_deposited);
        }
    }

    #[test]
    fn test_claimable_supply_is_zero_without_bids() {
        let (ledger, _) = ledger_and_position(0);
        assert_eq!(ledger.total_claimable_supply(980 * UNIT), 0);
    }

    #[test]
    fn test_exercise_burns_the_whole_balance() {
        let (mut ledger, mut position) = ledger_and_position(0);
        position.balance = 400 * UNIT;
        ledger.total_supply = 400 * UNIT;

        assert_eq!(ledger.exercise(&mut position).unwrap(), 400 * UNIT);
        assert_eq!(position.balance, 0);
        assert_eq!(ledger.total_supply, 0);

        // exercising an empty balance burns nothing
        assert_eq!(ledger.exercise(&mut position).unwrap(), 0);
    }
}
