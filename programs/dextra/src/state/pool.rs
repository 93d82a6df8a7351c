use anchor_lang::prelude::*;

use super::history::{self, RateEntry};
use crate::error::ErrorCode;

/// A deposit/reward token pair at `["pool", protocol, pool_id]`.
#[account]
#[derive(Default, Debug)]
pub struct Pool {
    pub pool_id: u64,
    pub deposit_token: Pubkey,
    pub reward_token: Pubkey,
    pub deposit_decimals: u8,
    pub reward_decimals: u8,
    pub minimum_deposit: u64,
    pub lock_period: i64,
    pub can_swap: bool,
    pub last_rate: u64,
    pub last_apy: u64,
    pub bump: u8,
    pub rates: Vec<RateEntry>,
    pub apys: Vec<RateEntry>,
}

impl Pool {
    pub const BASE_LEN: usize = 8 + // discriminator
        8 +  // pool_id
        32 + // deposit_token
        32 + // reward_token
        1 +  // deposit_decimals
        1 +  // reward_decimals
        8 +  // minimum_deposit
        8 +  // lock_period
        1 +  // can_swap
        8 +  // last_rate
        8 +  // last_apy
        1 +  // bump
        4 + 4; // history length prefixes

    pub fn space(rates: usize, apys: usize) -> usize {
        Self::BASE_LEN + (rates + apys) * RateEntry::LEN
    }

    pub fn rate_at(&self, timestamp: i64) -> u64 {
        history::value_at(&self.rates, timestamp).unwrap_or(self.last_rate)
    }

    pub fn apy_at(&self, timestamp: i64) -> u64 {
        history::value_at(&self.apys, timestamp).unwrap_or(self.last_apy)
    }

    pub fn set_rate(&mut self, timestamp: i64, rate: u64) -> Result<()> {
        require!(rate > 0, ErrorCode::InvalidRate);
        self.rates.push(RateEntry { timestamp, value: rate });
        self.last_rate = rate;
        Ok(())
    }

    pub fn set_apy(&mut self, timestamp: i64, apy: u64) {
        self.apys.push(RateEntry { timestamp, value: apy });
        self.last_apy = apy;
    }

    pub fn configure(&mut self, minimum_deposit: u64, lock_period: i64, can_swap: bool) {
        self.minimum_deposit = minimum_deposit;
        self.lock_period = lock_period;
        self.can_swap = can_swap;
    }

    pub fn locked_until(&self, now: i64) -> Result<i64> {
        now.checked_add(self.lock_period)
            .ok_or_else(|| error!(ErrorCode::ArithmeticOverflow))
    }
}
