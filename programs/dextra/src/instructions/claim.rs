use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{BPS_DENOMINATOR, POOL_SEED, PROTOCOL_SEED, USER_INFO_SEED};
use crate::error::ErrorCode;
use crate::events::{ClaimEvent, ReferralRewardEvent};
use crate::state::{Pool, ProtocolAccount, UserInfo};
use crate::transfer_helper::{reload_vault, send_from_vault};

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Claim<'info> {
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
        token::mint = pool.reward_token,
        token::authority = protocol
    )]
    pub protocol_vault: Account<'info, TokenAccount>,
    #[account(mut, token::mint = pool.reward_token)]
    pub user_token_account: Account<'info, TokenAccount>,
    /// Reward token account of the user's referrer, required once one is recorded.
    #[account(mut, token::mint = pool.reward_token)]
    pub referrer_vault: Option<Account<'info, TokenAccount>>,
    pub token_program: Program<'info, Token>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ClaimPayout {
    pub reward: u64,
    pub referral: Option<(Pubkey, u64)>,
}

pub fn handler(mut ctx: Context<Claim>, pool_id: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let user = ctx.accounts.user.key();
    let accounts = &mut ctx.accounts;

    let payout = apply_claim(
        &accounts.protocol,
        &accounts.pool,
        &mut accounts.user_info,
        &user,
        now,
    )?;

    let token_program = accounts.token_program.to_account_info();
    let protocol_info = accounts.protocol.to_account_info();
    let bump = accounts.protocol.bump;

    send_from_vault(
        &token_program,
        &accounts.protocol_vault,
        accounts.user_token_account.to_account_info(),
        protocol_info.clone(),
        bump,
        payout.reward,
    )?;
    msg!("User {} claimed {} from pool {}", user, payout.reward, pool_id);
    emit!(ClaimEvent {
        user,
        pool_id,
        amount: payout.reward,
    });

    if let Some((referrer, amount)) = payout.referral {
        let referrer_vault = accounts
            .referrer_vault
            .as_ref()
            .ok_or(ErrorCode::MissingReferrerVault)?;
        require_keys_eq!(referrer_vault.owner, referrer, ErrorCode::InvalidTokenAccount);

        // the first transfer lowered the vault balance
        reload_vault(&mut accounts.protocol_vault)?;
        send_from_vault(
            &token_program,
            &accounts.protocol_vault,
            referrer_vault.to_account_info(),
            protocol_info,
            bump,
            amount,
        )?;
        emit!(ReferralRewardEvent {
            user,
            referrer,
            pool_id,
            amount,
        });
    }
    Ok(())
}

/// Settles the user's reward in the record and reports what to pay out.
///
/// The referral share is paid on top of the user's reward, it is not
/// deducted from it.
pub(crate) fn apply_claim(
    protocol: &ProtocolAccount,
    pool: &Pool,
    user_info: &mut UserInfo,
    user: &Pubkey,
    now: i64,
) -> Result<ClaimPayout> {
    protocol.ensure_pool_exists(pool.pool_id)?;
    protocol.ensure_claim_allowed(user)?;

    let reward = user_info.claimable(pool, now)?;
    require!(reward > 0, ErrorCode::NoReward);

    // the registry is shared by every pool, the record may predate it
    if let Some(recorded) = protocol.get_referrer(user) {
        if !user_info.has_referrer() {
            user_info.referrer = recorded;
        }
    }
    let referral = if user_info.has_referrer() {
        Some((user_info.referrer, referral_share(reward, protocol.ref_percent)?))
    } else {
        None
    };

    user_info.total_claimed = user_info
        .total_claimed
        .checked_add(reward)
        .ok_or(ErrorCode::ArithmeticOverflow)?;
    user_info.pending_reward = 0;
    if user_info.amount > 0 {
        user_info.last_claimed = now;
    }

    Ok(ClaimPayout { reward, referral })
}

pub(crate) fn referral_share(reward: u64, ref_percent: u64) -> Result<u64> {
    let share = u128::from(reward)
        .checked_mul(u128::from(ref_percent))
        .map(|v| v / u128::from(BPS_DENOMINATOR))
        .ok_or(ErrorCode::ArithmeticOverflow)?;
    u64::try_from(share).map_err(|_| error!(ErrorCode::ArithmeticOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{RATE_SCALE, SECONDS_PER_YEAR};
    use crate::state::RateEntry;

    const NOW: i64 = 1_700_000_000;

    fn pool() -> Pool {
        Pool {
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
            owner: Pubkey::new_unique(),
            pool_count: 1,
            ref_percent: 200,
            ..Default::default()
        }
    }

    fn staker(amount: u64) -> UserInfo {
        let mut user_info = UserInfo::default();
        user_info.record_deposit(amount, NOW, NOW + 5).unwrap();
        user_info
    }

    #[test]
    fn test_claim_after_a_year() {
        let protocol = protocol();
        let mut user_info = staker(5_000_000);
        let user = Pubkey::new_unique();

        let payout =
            apply_claim(&protocol, &pool(), &mut user_info, &user, NOW + SECONDS_PER_YEAR).unwrap();
        assert_eq!(payout, ClaimPayout { reward: 500_000, referral: None });
        assert_eq!(user_info.total_claimed, 500_000);
        assert_eq!(user_info.pending_reward, 0);
        assert_eq!(user_info.last_claimed, NOW + SECONDS_PER_YEAR);
    }

    #[test]
    fn test_claim_twice_at_same_instant_has_no_reward() {
        let protocol = protocol();
        let mut user_info = staker(5_000_000);
        let user = Pubkey::new_unique();
        let at = NOW + SECONDS_PER_YEAR;

        apply_claim(&protocol, &pool(), &mut user_info, &user, at).unwrap();
        assert_eq!(
            apply_claim(&protocol, &pool(), &mut user_info, &user, at).unwrap_err(),
            ErrorCode::NoReward.into()
        );
    }

    #[test]
    fn test_referrer_gets_share() {
        let protocol = protocol();
        let mut user_info = staker(5_000_000);
        let referrer = Pubkey::new_unique();
        user_info.referrer = referrer;

        let payout = apply_claim(
            &protocol,
            &pool(),
            &mut user_info,
            &Pubkey::new_unique(),
            NOW + SECONDS_PER_YEAR,
        )
        .unwrap();
        assert_eq!(payout.reward, 500_000);
        assert_eq!(payout.referral, Some((referrer, 10_000)));
    }

    #[test]
    fn test_flagged_user_cannot_claim() {
        let mut protocol = protocol();
        let user = Pubkey::new_unique();
        protocol.set_claimable(user, true);
        let mut user_info = staker(5_000_000);
        user_info.pending_reward = 7;

        assert_eq!(
            apply_claim(&protocol, &pool(), &mut user_info, &user, NOW + 10).unwrap_err(),
            ErrorCode::Unauthorized.into()
        );
        assert_eq!(user_info.pending_reward, 7);
        assert_eq!(user_info.total_claimed, 0);
    }

    #[test]
    fn test_pending_reward_paid_after_full_exit() {
        let protocol = protocol();
        let mut user_info = UserInfo {
            pending_reward: 1_234,
            ..Default::default()
        };

        let payout =
            apply_claim(&protocol, &pool(), &mut user_info, &Pubkey::new_unique(), NOW).unwrap();
        assert_eq!(payout.reward, 1_234);
        assert_eq!(user_info.last_claimed, 0);
    }

    #[test]
    fn test_referral_share_rounds_down() {
        assert_eq!(referral_share(10_000, 200).unwrap(), 200);
        assert_eq!(referral_share(49, 200).unwrap(), 0);
        assert_eq!(referral_share(u64::MAX, 10_000).unwrap(), u64::MAX);
    }
}
