use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{POOL_SEED, PROTOCOL_SEED, USER_INFO_SEED};
use crate::error::ErrorCode;
use crate::events::WithdrawEvent;
use crate::state::{Pool, ProtocolAccount, UserInfo};
use crate::transfer_helper::send_from_vault;

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub user: Signer<'info>,
    #[account(seeds = [PROTOCOL_SEED], bump = protocol.bump)]
    pub protocol: Account<'info, ProtocolAccount>,
    #[account(
        seeds = [POOL_SEED, protocol.key().as_ref(), &pool_id.to_le_bytes()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
    #[account(
        mut,
        seeds = [USER_INFO_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = user_info.bump
    )]
    pub user_info: Account<'info, UserInfo>,
    #[account(
        mut,
        token::mint = pool.deposit_token,
        token::authority = protocol
    )]
    pub protocol_token_account: Account<'info, TokenAccount>,
    #[account(mut, token::mint = pool.deposit_token)]
    pub user_token_account: Account<'info, TokenAccount>,
    pub token_program: Program<'info, Token>,
}

pub fn handler(mut ctx: Context<Withdraw>, pool_id: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let user = ctx.accounts.user.key();
    let accounts = &mut ctx.accounts;

    let amount = apply_withdraw(
        &accounts.protocol,
        &accounts.pool,
        &mut accounts.user_info,
        &user,
        now,
    )?;

    send_from_vault(
        &accounts.token_program.to_account_info(),
        &accounts.protocol_token_account,
        accounts.user_token_account.to_account_info(),
        accounts.protocol.to_account_info(),
        accounts.protocol.bump,
        amount,
    )?;

    msg!("User {} withdrew {} from pool {}", user, amount, pool_id);
    emit!(WithdrawEvent {
        user,
        pool_id,
        amount,
    });
    Ok(())
}

/// Releases every unlocked deposit and returns the amount to send back.
/// Reward accrued so far is kept in `pending_reward`.
pub(crate) fn apply_withdraw(
    protocol: &ProtocolAccount,
    pool: &Pool,
    user_info: &mut UserInfo,
    user: &Pubkey,
    now: i64,
) -> Result<u64> {
    protocol.ensure_pool_exists(pool.pool_id)?;
    protocol.ensure_withdraw_allowed(user)?;
    require!(
        user_info.available_for_withdraw(now)? > 0,
        ErrorCode::NothingToWithdraw
    );

    user_info.checkpoint(pool, now)?;
    user_info.release_unlocked(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RATE_SCALE;
    use crate::state::RateEntry;

    const NOW: i64 = 1_700_000_000;

    fn pool() -> Pool {
        Pool {
            lock_period: 5,
            last_rate: RATE_SCALE,
            last_apy: 1000,
            deposit_decimals: 6,
            reward_decimals: 6,
            rates: vec![RateEntry { timestamp: NOW, value: RATE_SCALE }],
            apys: vec![RateEntry { timestamp: NOW, value: 1000 }],
            ..Default::default()
        }
    }

    fn protocol() -> ProtocolAccount {
        ProtocolAccount {
            pool_count: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_locked_deposit_stays_put() {
        let mut user_info = UserInfo::default();
        user_info.record_deposit(5_000_000, NOW, NOW + 5).unwrap();

        let res = apply_withdraw(&protocol(), &pool(), &mut user_info, &Pubkey::new_unique(), NOW + 4);
        assert_eq!(res.unwrap_err(), ErrorCode::NothingToWithdraw.into());
        assert!(!user_info.deposits[0].is_withdrawn);
        assert_eq!(user_info.amount, 5_000_000);
        assert_eq!(user_info.pending_reward, 0);
    }

    #[test]
    fn test_unlocked_deposit_released_with_reward_kept() {
        let mut user_info = UserInfo::default();
        user_info.record_deposit(5_000_000, NOW, NOW + 5).unwrap();

        let released = apply_withdraw(
            &protocol(),
            &pool(),
            &mut user_info,
            &Pubkey::new_unique(),
            NOW + crate::constants::SECONDS_PER_YEAR,
        )
        .unwrap();

        assert_eq!(released, 5_000_000);
        assert_eq!(user_info.amount, 0);
        assert!(user_info.deposits[0].is_withdrawn);
        assert_eq!(user_info.pending_reward, 500_000);
        assert_eq!(user_info.stake_timestamp, 0);
    }

    #[test]
    fn test_only_unlocked_part_released() {
        let mut user_info = UserInfo::default();
        user_info.record_deposit(2_000_000, NOW, NOW + 5).unwrap();
        user_info.record_deposit(3_000_000, NOW + 10, NOW + 15).unwrap();

        let released =
            apply_withdraw(&protocol(), &pool(), &mut user_info, &Pubkey::new_unique(), NOW + 12)
                .unwrap();

        assert_eq!(released, 2_000_000);
        assert_eq!(user_info.amount, 3_000_000);
        assert!(user_info.deposits[0].is_withdrawn);
        assert!(!user_info.deposits[1].is_withdrawn);
        assert_eq!(user_info.last_claimed, NOW + 12);
    }

    #[test]
    fn test_flagged_user_cannot_withdraw() {
        let mut protocol = protocol();
        let user = Pubkey::new_unique();
        protocol.set_withdrawable(user, true);
        let mut user_info = UserInfo::default();
        user_info.record_deposit(5_000_000, NOW, NOW + 5).unwrap();

        assert_eq!(
            apply_withdraw(&protocol, &pool(), &mut user_info, &user, NOW + 100).unwrap_err(),
            ErrorCode::Unauthorized.into()
        );
        assert!(!user_info.deposits[0].is_withdrawn);
    }
}
