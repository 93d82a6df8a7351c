use anchor_lang::prelude::*;

#[constant]
pub const PROTOCOL_SEED: &[u8] = b"protocol";
#[constant]
pub const POOL_SEED: &[u8] = b"pool";
#[constant]
pub const USER_INFO_SEED: &[u8] = b"user_info";

/// Referral share applied to claimed rewards, in basis points (2%).
pub const DEFAULT_REF_PERCENT: u64 = 200;
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Fixed point scale of pool rates: 1_000_000 is a 1:1 rate.
pub const RATE_SCALE: u64 = 1_000_000;

pub const SECONDS_PER_DAY: i64 = 86_400;
pub const SECONDS_PER_YEAR: i64 = 365 * SECONDS_PER_DAY;

pub const APPROVAL_CLAIM: u8 = 0;
pub const APPROVAL_WITHDRAW: u8 = 1;
pub const APPROVAL_BOTH: u8 = 2;
