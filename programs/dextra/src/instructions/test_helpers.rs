//! Owner-only state overrides used by integration suites to reach
//! time-dependent states without waiting on the clock.

use anchor_lang::prelude::*;

use crate::constants::PROTOCOL_SEED;
use crate::error::ErrorCode;
use crate::state::{ProtocolAccount, UserInfo};

#[derive(Accounts)]
pub struct TestUpdateUserInfo<'info> {
    #[account(
        seeds = [PROTOCOL_SEED],
        bump = protocol.bump,
        constraint = protocol.owner == authority.key() @ ErrorCode::Unauthorized
    )]
    pub protocol: Account<'info, ProtocolAccount>,
    #[account(mut)]
    pub user_info: Account<'info, UserInfo>,
    pub authority: Signer<'info>,
}

pub fn set_pending_reward_handler(ctx: Context<TestUpdateUserInfo>, amount: u64) -> Result<()> {
    ctx.accounts.user_info.pending_reward = amount;
    Ok(())
}

pub fn set_deposit_unlocked_handler(
    ctx: Context<TestUpdateUserInfo>,
    deposit_index: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    unlock_deposit(&mut ctx.accounts.user_info, deposit_index, now)
}

/// Moves the lock of one deposit into the past.
pub(crate) fn unlock_deposit(user_info: &mut UserInfo, deposit_index: u64, now: i64) -> Result<()> {
    let deposit = user_info.deposit_mut(deposit_index)?;
    deposit.locked_until = now
        .checked_sub(1)
        .ok_or(ErrorCode::ArithmeticOverflow)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_deposit_makes_it_withdrawable() {
        let mut user_info = UserInfo::default();
        user_info.record_deposit(5_000_000, 100, 10_000).unwrap();
        assert_eq!(user_info.available_for_withdraw(200).unwrap(), 0);

        unlock_deposit(&mut user_info, 0, 200).unwrap();
        assert_eq!(user_info.available_for_withdraw(200).unwrap(), 5_000_000);
        assert_eq!(
            unlock_deposit(&mut user_info, 1, 200).unwrap_err(),
            ErrorCode::DepositNotFound.into()
        );
    }
}
