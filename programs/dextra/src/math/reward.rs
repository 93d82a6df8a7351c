//! Reward accrual over a pool's APY and rate history.
//!
//! APY is in basis points per year, rate is `RATE_SCALE` fixed point. For
//! every stretch of time in which neither series changes:
//!
//! ```text
//! yield  = amount * seconds * apy / (10_000 * SECONDS_PER_YEAR)
//! reward = yield * rate / RATE_SCALE
//! ```
//!
//! The sum is then rescaled from deposit token decimals to reward token
//! decimals.

use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, RATE_SCALE, SECONDS_PER_YEAR};
use crate::error::ErrorCode;
use crate::state::history::{self, RateEntry};
use crate::state::Pool;

/// Read-only view of the parts of a pool the reward math needs.
#[derive(Clone, Copy, Debug)]
pub struct YieldSchedule<'a> {
    pub apys: &'a [RateEntry],
    pub rates: &'a [RateEntry],
    pub fallback_apy: u64,
    pub fallback_rate: u64,
    pub deposit_decimals: u8,
    pub reward_decimals: u8,
}

impl<'a> YieldSchedule<'a> {
    pub fn of(pool: &'a Pool) -> Self {
        Self {
            apys: &pool.apys,
            rates: &pool.rates,
            fallback_apy: pool.last_apy,
            fallback_rate: pool.last_rate,
            deposit_decimals: pool.deposit_decimals,
            reward_decimals: pool.reward_decimals,
        }
    }

    fn apy_at(&self, timestamp: i64) -> u64 {
        history::value_at(self.apys, timestamp).unwrap_or(self.fallback_apy)
    }

    fn rate_at(&self, timestamp: i64) -> u64 {
        history::value_at(self.rates, timestamp).unwrap_or(self.fallback_rate)
    }

    fn next_change(&self, timestamp: i64) -> Option<i64> {
        match (
            history::next_change(self.apys, timestamp),
            history::next_change(self.rates, timestamp),
        ) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

/// Reward earned by a constant stake of `amount` over `[since, now)`.
///
/// `since == 0` means the stake never started accruing.
pub fn accrued_reward(amount: u64, since: i64, now: i64, schedule: &YieldSchedule) -> Result<u64> {
    if amount == 0 || since == 0 || now <= since {
        return Ok(0);
    }

    let denominator = u128::from(BPS_DENOMINATOR) * SECONDS_PER_YEAR as u128;
    let mut total: u128 = 0;
    let mut cursor = since;

    while cursor < now {
        let segment_end = schedule
            .next_change(cursor)
            .map_or(now, |change| change.min(now));
        let seconds = (segment_end - cursor) as u128;

        let yield_amount = u128::from(amount)
            .checked_mul(seconds)
            .and_then(|v| v.checked_mul(u128::from(schedule.apy_at(cursor))))
            .map(|v| v / denominator)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        let segment_reward = yield_amount
            .checked_mul(u128::from(schedule.rate_at(cursor)))
            .map(|v| v / u128::from(RATE_SCALE))
            .ok_or(ErrorCode::ArithmeticOverflow)?;

        total = total
            .checked_add(segment_reward)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        cursor = segment_end;
    }

    let rescaled = rescale(total, schedule.deposit_decimals, schedule.reward_decimals)?;
    u64::try_from(rescaled).map_err(|_| error!(ErrorCode::ArithmeticOverflow))
}

/// Moves `value` from `from_decimals` units into `to_decimals` units.
pub fn rescale(value: u128, from_decimals: u8, to_decimals: u8) -> Result<u128> {
    if to_decimals >= from_decimals {
        10u128
            .checked_pow(u32::from(to_decimals - from_decimals))
            .and_then(|factor| value.checked_mul(factor))
            .ok_or_else(|| error!(ErrorCode::ArithmeticOverflow))
    } else {
        let divisor = 10u128
            .checked_pow(u32::from(from_decimals - to_decimals))
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        Ok(value / divisor)
    }
}
