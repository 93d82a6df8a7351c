//! Read-only queries. Clients call these through simulation and read the
//! return data.

use anchor_lang::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{POOL_SEED, PROTOCOL_SEED, USER_INFO_SEED};
use crate::state::{Pool, ProtocolAccount, UserDeposit, UserInfo};

#[derive(Accounts)]
pub struct ViewState<'info> {
    #[account(seeds = [PROTOCOL_SEED], bump = protocol.bump)]
    pub protocol: Account<'info, ProtocolAccount>,
}

#[derive(Accounts)]
#[instruction(pid: u64)]
pub struct ViewPool<'info> {
    #[account(seeds = [PROTOCOL_SEED], bump = protocol.bump)]
    pub protocol: Account<'info, ProtocolAccount>,
    #[account(
        seeds = [POOL_SEED, protocol.key().as_ref(), &pid.to_le_bytes()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
}

#[derive(Accounts)]
#[instruction(pid: u64)]
pub struct ViewUserPoolInfo<'info> {
    /// CHECK: only used to derive the stake record address
    pub user: UncheckedAccount<'info>,
    #[account(seeds = [PROTOCOL_SEED], bump = protocol.bump)]
    pub protocol: Account<'info, ProtocolAccount>,
    #[account(
        seeds = [POOL_SEED, protocol.key().as_ref(), &pid.to_le_bytes()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
    #[account(
        seeds = [USER_INFO_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = user_info.bump
    )]
    pub user_info: Account<'info, UserInfo>,
}

#[derive(
    AnchorSerialize, AnchorDeserialize, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq,
)]
#[serde(rename_all = "camelCase")]
pub struct PoolRates {
    pub apy: u64,
    pub rate: u64,
}

#[derive(
    AnchorSerialize, AnchorDeserialize, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq,
)]
#[serde(rename_all = "camelCase")]
pub struct DepositInfo {
    pub amount: u64,
    pub timestamp: i64,
    pub locked_until: i64,
    pub is_withdrawn: bool,
}

impl From<&UserDeposit> for DepositInfo {
    fn from(deposit: &UserDeposit) -> Self {
        Self {
            amount: deposit.amount,
            timestamp: deposit.timestamp,
            locked_until: deposit.locked_until,
            is_withdrawn: deposit.is_withdrawn,
        }
    }
}

pub fn pool_length_handler(ctx: Context<ViewState>) -> Result<u64> {
    Ok(ctx.accounts.protocol.pool_count)
}

pub fn deposits_pool_length_handler(ctx: Context<ViewUserPoolInfo>, pid: u64) -> Result<u64> {
    if pid >= ctx.accounts.protocol.pool_count {
        return Ok(0);
    }
    Ok(ctx.accounts.user_info.deposits_len())
}

pub fn get_available_sum_for_withdraw_handler(
    ctx: Context<ViewUserPoolInfo>,
    pid: u64,
) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.protocol.ensure_pool_exists(pid)?;
    ctx.accounts.user_info.available_for_withdraw(now)
}

pub fn get_claimable_handler(ctx: Context<ViewUserPoolInfo>, pid: u64) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.protocol.ensure_pool_exists(pid)?;
    ctx.accounts.user_info.claimable(&ctx.accounts.pool, now)
}

pub fn get_pool_rate_and_apy_handler(
    ctx: Context<ViewPool>,
    pid: u64,
    timestamp: i64,
) -> Result<PoolRates> {
    ctx.accounts.protocol.ensure_pool_exists(pid)?;
    Ok(pool_rates(&ctx.accounts.pool, timestamp))
}

pub fn get_deposit_info_handler(
    ctx: Context<ViewUserPoolInfo>,
    pid: u64,
    did: u64,
) -> Result<DepositInfo> {
    ctx.accounts.protocol.ensure_pool_exists(pid)?;
    ctx.accounts.user_info.deposit(did).map(DepositInfo::from)
}

pub(crate) fn pool_rates(pool: &Pool, timestamp: i64) -> PoolRates {
    PoolRates {
        apy: pool.apy_at(timestamp),
        rate: pool.rate_at(timestamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RATE_SCALE;

    #[test]
    fn test_pool_rates_follow_history() {
        let mut pool = Pool::default();
        pool.set_rate(100, RATE_SCALE).unwrap();
        pool.set_apy(100, 1000);
        pool.set_apy(200, 1500);

        assert_eq!(pool_rates(&pool, 150), PoolRates { apy: 1000, rate: RATE_SCALE });
        assert_eq!(pool_rates(&pool, 200), PoolRates { apy: 1500, rate: RATE_SCALE });
        assert_eq!(pool_rates(&pool, 50), PoolRates { apy: 1000, rate: RATE_SCALE });
    }

    #[test]
    fn test_deposit_info_json_shape() {
        let info = DepositInfo::from(&UserDeposit {
            amount: 5_000_000,
            timestamp: 10,
            locked_until: 15,
            is_withdrawn: false,
        });
        let json = serde_json::to_value(info).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "amount": 5_000_000,
                "timestamp": 10,
                "lockedUntil": 15,
                "isWithdrawn": false,
            })
        );
        let back: DepositInfo = serde_json::from_value(json).unwrap();
        assert_eq!(back, info);
    }

    #[test]
    fn test_pool_rates_json_shape() {
        let json = serde_json::to_string(&PoolRates { apy: 1000, rate: RATE_SCALE }).unwrap();
        assert_eq!(json, r#"{"apy":1000,"rate":1000000}"#);
    }
}
