use anchor_lang::prelude::*;

use super::pool::Pool;
use crate::error::ErrorCode;
use crate::math::reward;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UserDeposit {
    pub amount: u64,
    pub timestamp: i64,
    pub locked_until: i64,
    pub is_withdrawn: bool,
}

impl UserDeposit {
    pub const LEN: usize = 8 + 8 + 8 + 1;

    pub fn is_withdrawable(&self, now: i64) -> bool {
        !self.is_withdrawn && self.locked_until <= now
    }
}

/// Stake of one user in one pool, at `["user_info", pool, user]`.
///
/// `amount` always equals the sum of the non-withdrawn deposits. The
/// account grows by one `UserDeposit` per deposit.
#[account]
#[derive(Default, Debug)]
pub struct UserInfo {
    pub authority: Pubkey,
    pub pool: Pubkey,
    pub amount: u64,
    pub stake_timestamp: i64,
    pub last_claimed: i64,
    pub pending_reward: u64,
    pub referrer: Pubkey,
    pub total_claimed: u64,
    pub bump: u8,
    pub deposits: Vec<UserDeposit>,
}

impl UserInfo {
    pub const BASE_LEN: usize = 8 + // discriminator
        32 + // authority
        32 + // pool
        8 +  // amount
        8 +  // stake_timestamp
        8 +  // last_claimed
        8 +  // pending_reward
        32 + // referrer
        8 +  // total_claimed
        1 +  // bump
        4; // vec length prefix

    pub fn space(deposits: usize) -> usize {
        Self::BASE_LEN + deposits * UserDeposit::LEN
    }

    /// Stamps a freshly created record with its owner and pool.
    pub fn bind(&mut self, authority: Pubkey, pool: Pubkey, bump: u8) -> Result<()> {
        if self.authority == Pubkey::default() {
            self.authority = authority;
            self.pool = pool;
            self.bump = bump;
        }
        require_keys_eq!(self.authority, authority, ErrorCode::InvalidAuthority);
        Ok(())
    }

    pub fn has_referrer(&self) -> bool {
        self.referrer != Pubkey::default()
    }

    /// Pending reward plus whatever accrued since `last_claimed`.
    pub fn claimable(&self, pool: &Pool, now: i64) -> Result<u64> {
        let accrued = reward::accrued_reward(
            self.amount,
            self.last_claimed,
            now,
            &reward::YieldSchedule::of(pool),
        )?;
        self.pending_reward
            .checked_add(accrued)
            .ok_or_else(|| error!(ErrorCode::ArithmeticOverflow))
    }

    /// Folds accrued reward into `pending_reward` so the stake can change.
    pub fn checkpoint(&mut self, pool: &Pool, now: i64) -> Result<()> {
        self.pending_reward = self.claimable(pool, now)?;
        if self.amount > 0 {
            self.last_claimed = now;
        }
        Ok(())
    }

    pub fn record_deposit(&mut self, amount: u64, now: i64, locked_until: i64) -> Result<()> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        if self.stake_timestamp == 0 {
            self.stake_timestamp = now;
        }
        self.last_claimed = now;
        self.deposits.push(UserDeposit {
            amount,
            timestamp: now,
            locked_until,
            is_withdrawn: false,
        });
        Ok(())
    }

    pub fn available_for_withdraw(&self, now: i64) -> Result<u64> {
        self.deposits
            .iter()
            .filter(|deposit| deposit.is_withdrawable(now))
            .try_fold(0u64, |sum, deposit| sum.checked_add(deposit.amount))
            .ok_or_else(|| error!(ErrorCode::ArithmeticOverflow))
    }

    /// Marks every unlocked deposit withdrawn and returns their sum.
    /// A full exit resets the stake timestamps.
    pub fn release_unlocked(&mut self, now: i64) -> Result<u64> {
        let released = self.available_for_withdraw(now)?;
        require!(released > 0, ErrorCode::NothingToWithdraw);

        self.amount = self
            .amount
            .checked_sub(released)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        for deposit in self.deposits.iter_mut() {
            if deposit.is_withdrawable(now) {
                deposit.is_withdrawn = true;
            }
        }
        if self.amount == 0 {
            self.stake_timestamp = 0;
            self.last_claimed = 0;
        }
        Ok(released)
    }

    /// Number of deposit records, reported as zero once the stake is empty.
    pub fn deposits_len(&self) -> u64 {
        if self.amount == 0 {
            return 0;
        }
        self.deposits.len() as u64
    }

    pub fn deposit(&self, index: u64) -> Result<&UserDeposit> {
        usize::try_from(index)
            .ok()
            .and_then(|idx| self.deposits.get(idx))
            .ok_or_else(|| error!(ErrorCode::DepositNotFound))
    }

    pub fn deposit_mut(&mut self, index: u64) -> Result<&mut UserDeposit> {
        usize::try_from(index)
            .ok()
            .and_then(|idx| self.deposits.get_mut(idx))
            .ok_or_else(|| error!(ErrorCode::DepositNotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staked(deposits: &[(u64, i64)]) -> UserInfo {
        let mut user_info = UserInfo::default();
        for &(amount, locked_until) in deposits {
            user_info.record_deposit(amount, 1, locked_until).unwrap();
        }
        user_info
    }

    #[test]
    fn test_user_info_space_matches_serialized_len() {
        for deposits in [0, 1, 150] {
            let user_info = UserInfo {
                deposits: vec![UserDeposit::default(); deposits],
                ..Default::default()
            };
            let mut serialized = Vec::new();
            user_info.serialize(&mut serialized).unwrap();
            assert_eq!(8 + serialized.len(), UserInfo::space(deposits));
        }
    }

    #[test]
    fn test_bind_only_stamps_new_records() {
        let owner = Pubkey::new_unique();
        let pool = Pubkey::new_unique();
        let mut user_info = UserInfo::default();
        user_info.bind(owner, pool, 250).unwrap();
        user_info.bind(owner, Pubkey::new_unique(), 1).unwrap();

        assert_eq!(user_info.pool, pool);
        assert_eq!(user_info.bump, 250);
        assert_eq!(
            user_info.bind(Pubkey::new_unique(), pool, 250).unwrap_err(),
            ErrorCode::InvalidAuthority.into()
        );
    }

    #[test]
    fn test_record_deposit_keeps_first_stake_timestamp() {
        let mut user_info = UserInfo::default();
        user_info.record_deposit(10, 100, 105).unwrap();
        user_info.record_deposit(20, 200, 205).unwrap();

        assert_eq!(user_info.amount, 30);
        assert_eq!(user_info.stake_timestamp, 100);
        assert_eq!(user_info.last_claimed, 200);
        assert_eq!(user_info.deposits[1].locked_until, 205);
    }

    #[test]
    fn test_available_sum_only_counts_unlocked() {
        let user_info = staked(&[(10, 50), (20, 150), (30, 100)]);
        assert_eq!(user_info.available_for_withdraw(49).unwrap(), 0);
        assert_eq!(user_info.available_for_withdraw(100).unwrap(), 40);
        assert_eq!(user_info.available_for_withdraw(150).unwrap(), 60);
    }

    #[test]
    fn test_partial_release_keeps_timestamps() {
        let mut user_info = staked(&[(10, 50), (20, 150)]);
        assert_eq!(user_info.release_unlocked(100).unwrap(), 10);

        assert_eq!(user_info.amount, 20);
        assert!(user_info.deposits[0].is_withdrawn);
        assert!(!user_info.deposits[1].is_withdrawn);
        assert_eq!(user_info.stake_timestamp, 1);
    }

    #[test]
    fn test_full_release_resets_timestamps() {
        let mut user_info = staked(&[(10, 50), (20, 60)]);
        assert_eq!(user_info.release_unlocked(60).unwrap(), 30);

        assert_eq!(user_info.amount, 0);
        assert_eq!(user_info.stake_timestamp, 0);
        assert_eq!(user_info.last_claimed, 0);
        assert_eq!(user_info.deposits_len(), 0);
    }

    #[test]
    fn test_release_before_unlock_is_rejected() {
        let mut user_info = staked(&[(10, 50)]);
        assert_eq!(
            user_info.release_unlocked(49).unwrap_err(),
            ErrorCode::NothingToWithdraw.into()
        );
        assert_eq!(user_info.amount, 10);
        assert!(!user_info.deposits[0].is_withdrawn);
    }

    #[test]
    fn test_deposits_keep_coming_after_full_exit() {
        let mut user_info = staked(&[(1, 0); 100]);
        assert_eq!(user_info.release_unlocked(5).unwrap(), 100);

        user_info.record_deposit(7, 10, 15).unwrap();
        assert_eq!(user_info.amount, 7);
        assert_eq!(user_info.deposits.len(), 101);
        assert_eq!(user_info.stake_timestamp, 10);
        assert_eq!(user_info.available_for_withdraw(15).unwrap(), 7);
    }

    #[test]
    fn test_deposit_lookup_out_of_range() {
        let user_info = staked(&[(10, 50)]);
        assert_eq!(user_info.deposit(0).unwrap().amount, 10);
        assert_eq!(
            user_info.deposit(1).unwrap_err(),
            ErrorCode::DepositNotFound.into()
        );
    }
}
