use anchor_lang::prelude::*;

use crate::constants::{APPROVAL_BOTH, APPROVAL_CLAIM, APPROVAL_WITHDRAW};
use crate::error::ErrorCode;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReferrerEntry {
    pub user: Pubkey,
    pub referrer: Pubkey,
}

impl ReferrerEntry {
    pub const LEN: usize = 32 + 32;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UserFlagEntry {
    pub user: Pubkey,
    pub flag: bool,
}

impl UserFlagEntry {
    pub const LEN: usize = 32 + 1;
}

/// Global protocol record, one per deployment at `["protocol"]`.
///
/// The three registries are kept sorted by user key so lookups are a
/// binary search instead of a scan. The account grows through `realloc`
/// as entries are added.
#[account]
#[derive(Default, Debug)]
pub struct ProtocolAccount {
    pub owner: Pubkey,
    pub governance: Pubkey,
    pub ref_percent: u64,
    pub pool_count: u64,
    pub bump: u8,
    pub referrers: Vec<ReferrerEntry>,
    pub claimable_users: Vec<UserFlagEntry>,
    pub withdrawable_users: Vec<UserFlagEntry>,
}

impl ProtocolAccount {
    pub const BASE_LEN: usize = 8 + // discriminator
        32 + // owner
        32 + // governance
        8 +  // ref_percent
        8 +  // pool_count
        1 +  // bump
        4 + 4 + 4; // registry length prefixes

    pub fn space(referrers: usize, claimable: usize, withdrawable: usize) -> usize {
        Self::BASE_LEN
            + referrers * ReferrerEntry::LEN
            + (claimable + withdrawable) * UserFlagEntry::LEN
    }

    /// Space needed if each registry gains at most `extra_*` entries.
    pub fn space_with(&self, extra_referrers: usize, extra_flags: usize) -> usize {
        Self::space(
            self.referrers.len() + extra_referrers,
            self.claimable_users.len() + extra_flags,
            self.withdrawable_users.len() + extra_flags,
        )
    }

    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }

    pub fn is_owner_or_governance(&self, key: &Pubkey) -> bool {
        self.owner == *key || self.governance == *key
    }

    /// Returns the id the next pool gets and bumps the counter.
    pub fn next_pool_id(&mut self) -> Result<u64> {
        let pool_id = self.pool_count;
        self.pool_count = self
            .pool_count
            .checked_add(1)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        Ok(pool_id)
    }

    pub fn ensure_pool_exists(&self, pool_id: u64) -> Result<()> {
        require!(pool_id < self.pool_count, ErrorCode::PoolNotFound);
        Ok(())
    }

    pub fn get_referrer(&self, user: &Pubkey) -> Option<Pubkey> {
        self.referrers
            .binary_search_by(|entry| entry.user.cmp(user))
            .ok()
            .map(|idx| self.referrers[idx].referrer)
    }

    /// Records `referrer` for `user` unless one is already recorded.
    /// The first write wins; returns whether anything was stored.
    pub fn setup_referrer(&mut self, user: Pubkey, referrer: Pubkey) -> bool {
        if referrer == Pubkey::default() {
            return false;
        }
        match self.referrers.binary_search_by(|entry| entry.user.cmp(&user)) {
            Ok(_) => false,
            Err(idx) => {
                self.referrers.insert(idx, ReferrerEntry { user, referrer });
                true
            }
        }
    }

    pub fn is_claimable(&self, user: &Pubkey) -> bool {
        flag_of(&self.claimable_users, user)
    }

    pub fn is_withdrawable(&self, user: &Pubkey) -> bool {
        flag_of(&self.withdrawable_users, user)
    }

    pub fn set_claimable(&mut self, user: Pubkey, can_claim: bool) {
        upsert_flag(&mut self.claimable_users, user, can_claim);
    }

    pub fn set_withdrawable(&mut self, user: Pubkey, can_withdraw: bool) {
        upsert_flag(&mut self.withdrawable_users, user, can_withdraw);
    }

    /// Gate for `claim`. See [`inverted_approval_gate`].
    pub fn ensure_claim_allowed(&self, user: &Pubkey) -> Result<()> {
        inverted_approval_gate(self.is_claimable(user))
    }

    /// Gate for `withdraw`. See [`inverted_approval_gate`].
    pub fn ensure_withdraw_allowed(&self, user: &Pubkey) -> Result<()> {
        inverted_approval_gate(self.is_withdrawable(user))
    }

    /// Writes `value` into the registry selected by `approval_type`
    /// (0 claim, 1 withdraw, 2 both). Last write wins.
    pub fn apply_approval(&mut self, user: Pubkey, approval_type: u8, value: bool) -> Result<()> {
        match approval_type {
            APPROVAL_CLAIM => self.set_claimable(user, value),
            APPROVAL_WITHDRAW => self.set_withdrawable(user, value),
            APPROVAL_BOTH => {
                self.set_claimable(user, value);
                self.set_withdrawable(user, value);
            }
            _ => return err!(ErrorCode::InvalidApprovalType),
        }
        Ok(())
    }
}

/// Approval policy shared by claim and withdraw.
///
/// A user passes while their registry flag is absent or `false`. Setting
/// the flag to `true`, which is what `approve` does, blocks the user.
/// The name of the registries suggests the opposite reading; the deployed
/// protocol behaves this way and product owners have not confirmed which
/// one is intended, so the gate is kept in this single place.
pub fn inverted_approval_gate(flagged: bool) -> Result<()> {
    if flagged {
        msg!("User is flagged in the approval registry");
        return err!(ErrorCode::Unauthorized);
    }
    Ok(())
}

fn flag_of(entries: &[UserFlagEntry], user: &Pubkey) -> bool {
    entries
        .binary_search_by(|entry| entry.user.cmp(user))
        .map(|idx| entries[idx].flag)
        .unwrap_or(false)
}

fn upsert_flag(entries: &mut Vec<UserFlagEntry>, user: Pubkey, flag: bool) {
    match entries.binary_search_by(|entry| entry.user.cmp(&user)) {
        Ok(idx) => entries[idx].flag = flag,
        Err(idx) => entries.insert(idx, UserFlagEntry { user, flag }),
    }
}
