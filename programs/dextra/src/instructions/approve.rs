use anchor_lang::prelude::*;

use crate::constants::PROTOCOL_SEED;
use crate::error::ErrorCode;
use crate::events::ApprovalEvent;
use crate::state::ProtocolAccount;
use crate::transfer_helper::grow_account;

/// Owner-only write access to the claim/withdraw registries.
#[derive(Accounts)]
pub struct SetFlag<'info> {
    #[account(
        mut,
        seeds = [PROTOCOL_SEED],
        bump = protocol.bump,
        constraint = protocol.owner == authority.key() @ ErrorCode::Unauthorized
    )]
    pub protocol: Account<'info, ProtocolAccount>,
    #[account(mut)]
    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

/// `approval_type` 0 flags claims, 1 withdrawals, 2 both.
///
/// The flag is set to `true`, which under the current approval policy
/// blocks the user (see [`crate::state::inverted_approval_gate`]).
pub fn approve_handler(ctx: Context<SetFlag>, user: Pubkey, approval_type: u8) -> Result<()> {
    set_flag_handler(ctx, user, approval_type, true)
}

pub fn set_flag_handler(
    ctx: Context<SetFlag>,
    user: Pubkey,
    approval_type: u8,
    value: bool,
) -> Result<()> {
    ctx.accounts
        .protocol
        .apply_approval(user, approval_type, value)?;
    grow_account(
        &ctx.accounts.protocol.to_account_info(),
        &ctx.accounts.authority.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
        ctx.accounts.protocol.space_with(0, 0),
    )?;

    msg!(
        "Approval type {} for {} set to {}",
        approval_type,
        user,
        value
    );
    emit!(ApprovalEvent {
        user,
        approval_type,
        value,
    });
    Ok(())
}
