use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod forwarder;
pub mod instructions;
pub mod math;
pub mod state;
mod transfer_helper;

#[cfg(test)]
mod tests;

pub use constants::*;
pub use instructions::*;
pub use math::swap::SwapDirection;
pub use state::*;

declare_id!("EkDU4dizCrRyaNfRfTcsHFH4rTmeBP4PQBkH74Ua3RvD");

#[program]
pub mod dextra {
    use super::*;

    pub fn pool_length(ctx: Context<ViewState>) -> Result<u64> {
        instructions::views::pool_length_handler(ctx)
    }

    pub fn deposits_pool_length(ctx: Context<ViewUserPoolInfo>, pid: u64) -> Result<u64> {
        instructions::views::deposits_pool_length_handler(ctx, pid)
    }

    pub fn get_available_sum_for_withdraw(ctx: Context<ViewUserPoolInfo>, pid: u64) -> Result<u64> {
        instructions::views::get_available_sum_for_withdraw_handler(ctx, pid)
    }

    pub fn get_claimable(ctx: Context<ViewUserPoolInfo>, pid: u64) -> Result<u64> {
        instructions::views::get_claimable_handler(ctx, pid)
    }

    pub fn get_pool_rate_and_apy(
        ctx: Context<ViewPool>,
        pid: u64,
        timestamp: i64,
    ) -> Result<PoolRates> {
        instructions::views::get_pool_rate_and_apy_handler(ctx, pid, timestamp)
    }

    pub fn get_deposit_info(
        ctx: Context<ViewUserPoolInfo>,
        pid: u64,
        did: u64,
    ) -> Result<DepositInfo> {
        instructions::views::get_deposit_info_handler(ctx, pid, did)
    }

    pub fn verify_owner_or_governance(ctx: Context<VerifyOwnerOrGovernance>) -> Result<()> {
        instructions::admin::verify_owner_or_governance_handler(ctx)
    }

    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }

    pub fn add_pool(
        ctx: Context<AddPool>,
        minimum_deposit: u64,
        lock_period: i64,
        can_swap: bool,
        rate: u64,
        apy: u64,
    ) -> Result<()> {
        instructions::pool_admin::add_pool_handler(
            ctx,
            PoolParams {
                minimum_deposit,
                lock_period,
                can_swap,
                rate,
                apy,
            },
        )
    }

    pub fn update_pool(
        ctx: Context<UpdatePool>,
        pool_id: u64,
        minimum_deposit: u64,
        lock_period: i64,
        can_swap: bool,
    ) -> Result<()> {
        instructions::pool_admin::update_pool_handler(
            ctx,
            pool_id,
            minimum_deposit,
            lock_period,
            can_swap,
        )
    }

    pub fn update_rate(ctx: Context<UpdateRate>, pool_id: u64, new_rate: u64) -> Result<()> {
        instructions::pool_admin::update_rate_handler(ctx, pool_id, new_rate)
    }

    pub fn update_apy(ctx: Context<UpdateApy>, pool_id: u64, new_apy: u64) -> Result<()> {
        instructions::pool_admin::update_apy_handler(ctx, pool_id, new_apy)
    }

    pub fn deposit(
        ctx: Context<Deposit>,
        pool_id: u64,
        amount: u64,
        referrer: Option<Pubkey>,
    ) -> Result<()> {
        instructions::deposit::handler(ctx, pool_id, amount, referrer)
    }

    pub fn claim(ctx: Context<Claim>, pool_id: u64) -> Result<()> {
        instructions::claim::handler(ctx, pool_id)
    }

    pub fn withdraw(ctx: Context<Withdraw>, pool_id: u64) -> Result<()> {
        instructions::withdraw::handler(ctx, pool_id)
    }

    pub fn swap(
        ctx: Context<Swap>,
        pool_id: u64,
        amount: u64,
        direction: SwapDirection,
    ) -> Result<()> {
        instructions::swap::handler(ctx, pool_id, amount, direction)
    }

    pub fn approve(ctx: Context<SetFlag>, user: Pubkey, approval_type: u8) -> Result<()> {
        instructions::approve::approve_handler(ctx, user, approval_type)
    }

    pub fn set_governance(ctx: Context<OwnerOnly>, governance: Pubkey) -> Result<()> {
        instructions::admin::set_governance_handler(ctx, governance)
    }

    pub fn transfer_ownership(ctx: Context<OwnerOnly>, new_owner: Pubkey) -> Result<()> {
        instructions::admin::transfer_ownership_handler(ctx, new_owner)
    }

    pub fn set_ref_percent(ctx: Context<OwnerOnly>, ref_percent: u64) -> Result<()> {
        instructions::admin::set_ref_percent_handler(ctx, ref_percent)
    }

    pub fn masscall<'info>(
        ctx: Context<'_, '_, '_, 'info, Masscall<'info>>,
        data: Vec<u8>,
    ) -> Result<()> {
        instructions::masscall::handler(ctx, data)
    }

    pub fn test_helper_set_pending_reward(
        ctx: Context<TestUpdateUserInfo>,
        amount: u64,
    ) -> Result<()> {
        instructions::test_helpers::set_pending_reward_handler(ctx, amount)
    }

    pub fn test_helper_set_deposit_unlocked(
        ctx: Context<TestUpdateUserInfo>,
        deposit_index: u64,
    ) -> Result<()> {
        instructions::test_helpers::set_deposit_unlocked_handler(ctx, deposit_index)
    }

    pub fn test_helper_set_flag(
        ctx: Context<SetFlag>,
        user: Pubkey,
        flag_type: u8,
        value: bool,
    ) -> Result<()> {
        instructions::approve::set_flag_handler(ctx, user, flag_type, value)
    }
}
