use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, PROTOCOL_SEED};
use crate::error::ErrorCode;
use crate::events::{GovernanceChanged, OwnershipTransferred, RefPercentChanged};
use crate::state::ProtocolAccount;

#[derive(Accounts)]
pub struct OwnerOnly<'info> {
    #[account(
        mut,
        seeds = [PROTOCOL_SEED],
        bump = protocol.bump,
        constraint = protocol.owner == owner.key() @ ErrorCode::Unauthorized
    )]
    pub protocol: Account<'info, ProtocolAccount>,
    pub owner: Signer<'info>,
}

#[derive(Accounts)]
pub struct VerifyOwnerOrGovernance<'info> {
    #[account(seeds = [PROTOCOL_SEED], bump = protocol.bump)]
    pub protocol: Account<'info, ProtocolAccount>,
    pub signer: Signer<'info>,
}

pub fn set_governance_handler(ctx: Context<OwnerOnly>, governance: Pubkey) -> Result<()> {
    let protocol = &mut ctx.accounts.protocol;
    let previous = protocol.governance;
    protocol.governance = governance;

    emit!(GovernanceChanged {
        previous,
        governance,
    });
    Ok(())
}

pub fn transfer_ownership_handler(ctx: Context<OwnerOnly>, new_owner: Pubkey) -> Result<()> {
    let protocol = &mut ctx.accounts.protocol;
    let previous = protocol.owner;
    transfer_ownership(protocol, new_owner)?;

    msg!("Ownership transferred from {} to {}", previous, new_owner);
    emit!(OwnershipTransferred {
        previous,
        owner: new_owner,
    });
    Ok(())
}

pub fn set_ref_percent_handler(ctx: Context<OwnerOnly>, ref_percent: u64) -> Result<()> {
    let protocol = &mut ctx.accounts.protocol;
    let previous = protocol.ref_percent;
    set_ref_percent(protocol, ref_percent)?;

    emit!(RefPercentChanged {
        previous,
        ref_percent,
    });
    Ok(())
}

pub fn verify_owner_or_governance_handler(ctx: Context<VerifyOwnerOrGovernance>) -> Result<()> {
    require!(
        ctx.accounts
            .protocol
            .is_owner_or_governance(&ctx.accounts.signer.key()),
        ErrorCode::Unauthorized
    );
    Ok(())
}

pub(crate) fn transfer_ownership(protocol: &mut ProtocolAccount, new_owner: Pubkey) -> Result<()> {
    require_keys_neq!(new_owner, Pubkey::default(), ErrorCode::InvalidAuthority);
    protocol.owner = new_owner;
    Ok(())
}

pub(crate) fn set_ref_percent(protocol: &mut ProtocolAccount, ref_percent: u64) -> Result<()> {
    require!(ref_percent <= BPS_DENOMINATOR, ErrorCode::InvalidRefPercent);
    protocol.ref_percent = ref_percent;
    Ok(())
}
