use anchor_lang::prelude::*;

use crate::math::swap::SwapDirection;

#[event]
pub struct ProtocolInitialized {
    pub owner: Pubkey,
    pub ref_percent: u64,
}

#[event]
pub struct PoolAdded {
    pub pool_id: u64,
    pub pool: Pubkey,
    pub deposit_token: Pubkey,
    pub reward_token: Pubkey,
    pub rate: u64,
    pub apy: u64,
}

#[event]
pub struct PoolUpdated {
    pub pool_id: u64,
    pub minimum_deposit: u64,
    pub lock_period: i64,
    pub can_swap: bool,
}

#[event]
pub struct RateUpdated {
    pub pool_id: u64,
    pub rate: u64,
    pub timestamp: i64,
}

#[event]
pub struct ApyUpdated {
    pub pool_id: u64,
    pub apy: u64,
    pub timestamp: i64,
}

#[event]
pub struct DepositEvent {
    pub user: Pubkey,
    pub pool_id: u64,
    pub amount: u64,
    pub referrer: Pubkey,
}

#[event]
pub struct WithdrawEvent {
    pub user: Pubkey,
    pub pool_id: u64,
    pub amount: u64,
}

#[event]
pub struct SwapEvent {
    pub user: Pubkey,
    pub pool_id: u64,
    pub amount: u64,
    pub direction: SwapDirection,
    pub received_amount: u64,
}

#[event]
pub struct ClaimEvent {
    pub user: Pubkey,
    pub pool_id: u64,
    pub amount: u64,
}

#[event]
pub struct ReferralRewardEvent {
    pub user: Pubkey,
    pub referrer: Pubkey,
    pub pool_id: u64,
    pub amount: u64,
}

#[event]
pub struct ApprovalEvent {
    pub user: Pubkey,
    pub approval_type: u8,
    pub value: bool,
}

#[event]
pub struct MasscallEvent {
    pub authority: Pubkey,
    pub target_program: Pubkey,
    pub data_len: u32,
    pub account_count: u32,
    pub signed_by_protocol: bool,
}

#[event]
pub struct GovernanceChanged {
    pub previous: Pubkey,
    pub governance: Pubkey,
}

#[event]
pub struct OwnershipTransferred {
    pub previous: Pubkey,
    pub owner: Pubkey,
}

#[event]
pub struct RefPercentChanged {
    pub previous: u64,
    pub ref_percent: u64,
}
