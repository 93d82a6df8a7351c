use anchor_lang::prelude::*;

use crate::constants::PROTOCOL_SEED;
use crate::error::ErrorCode;
use crate::events::MasscallEvent;
use crate::forwarder::{self, RuntimeCpi};
use crate::state::ProtocolAccount;

/// Accounts for the forwarded instruction follow as remaining accounts,
/// in the order the target program expects them.
#[derive(Accounts)]
pub struct Masscall<'info> {
    #[account(mut, seeds = [PROTOCOL_SEED], bump = protocol.bump)]
    pub protocol: Account<'info, ProtocolAccount>,
    #[account(
        mut,
        constraint = protocol.is_owner_or_governance(&authority.key()) @ ErrorCode::Unauthorized
    )]
    pub authority: Signer<'info>,
    /// CHECK: any executable program; the forwarder refuses this program itself
    #[account(constraint = target_program.executable @ ErrorCode::InvalidProgramId)]
    pub target_program: UncheckedAccount<'info>,
}

pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, Masscall<'info>>,
    data: Vec<u8>,
) -> Result<()> {
    let protocol_key = ctx.accounts.protocol.key();
    let authority = ctx.accounts.authority.key();
    let target_program = ctx.accounts.target_program.key();
    let data_len = data.len();

    let metas = forwarder::account_metas(ctx.remaining_accounts);
    let plan = forwarder::plan_forward(target_program, data, &metas, &protocol_key, &authority)?;

    let mut account_infos = ctx.remaining_accounts.to_vec();
    account_infos.push(ctx.accounts.target_program.to_account_info());

    let bump = [ctx.accounts.protocol.bump];
    let seeds: &[&[u8]] = &[PROTOCOL_SEED, &bump];

    msg!("Executing CPI to program: {}", target_program);
    forwarder::dispatch(&RuntimeCpi, &plan, &account_infos, seeds)?;

    emit!(MasscallEvent {
        authority,
        target_program,
        data_len: u32::try_from(data_len).map_err(|_| error!(ErrorCode::ArithmeticOverflow))?,
        account_count: u32::try_from(metas.len())
            .map_err(|_| error!(ErrorCode::ArithmeticOverflow))?,
        signed_by_protocol: plan.signs_for_protocol,
    });
    Ok(())
}
