use anchor_lang::prelude::*;

use crate::constants::{DEFAULT_REF_PERCENT, POOL_SEED, PROTOCOL_SEED, USER_INFO_SEED};
use crate::error::ErrorCode;
use crate::events::ProtocolInitialized;
use crate::state::{ProtocolAccount, UserInfo};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,
    #[account(
        init_if_needed,
        payer = owner,
        space = ProtocolAccount::space(0, 0, 0),
        seeds = [PROTOCOL_SEED],
        bump
    )]
    pub protocol: Account<'info, ProtocolAccount>,
    /// CHECK: address of pool 0; only used to derive the owner's stake record
    #[account(seeds = [POOL_SEED, protocol.key().as_ref(), &0u64.to_le_bytes()], bump)]
    pub first_pool: UncheckedAccount<'info>,
    #[account(
        init_if_needed,
        payer = owner,
        space = UserInfo::space(0),
        seeds = [USER_INFO_SEED, first_pool.key().as_ref(), owner.key().as_ref()],
        bump
    )]
    pub user_info: Account<'info, UserInfo>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let first_pool = ctx.accounts.first_pool.key();

    init_protocol(&mut ctx.accounts.protocol, owner, ctx.bumps.protocol)?;
    ctx.accounts
        .user_info
        .bind(owner, first_pool, ctx.bumps.user_info)?;

    msg!("Protocol initialized by {}", owner);
    emit!(ProtocolInitialized {
        owner,
        ref_percent: DEFAULT_REF_PERCENT,
    });
    Ok(())
}

/// Fills a blank protocol record. A record with an owner is never reset.
pub(crate) fn init_protocol(protocol: &mut ProtocolAccount, owner: Pubkey, bump: u8) -> Result<()> {
    require!(!protocol.is_initialized(), ErrorCode::AlreadyInitialized);

    protocol.owner = owner;
    protocol.governance = owner;
    protocol.ref_percent = DEFAULT_REF_PERCENT;
    protocol.pool_count = 0;
    protocol.bump = bump;
    protocol.referrers = Vec::new();
    protocol.claimable_users = Vec::new();
    protocol.withdrawable_users = Vec::new();
    Ok(())
}
