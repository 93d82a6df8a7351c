//! Instruction forwarding behind `masscall`.
//!
//! Planning (which accounts sign, whether the protocol PDA co-signs) is
//! kept apart from the actual cross-program invocation, which goes
//! through [`CpiTarget`].

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;

use crate::error::ErrorCode;

/// Something able to execute a prepared instruction.
pub trait CpiTarget<'info> {
    fn invoke(
        &self,
        instruction: &Instruction,
        accounts: &[AccountInfo<'info>],
        signer_seeds: &[&[&[u8]]],
    ) -> Result<()>;
}

/// Executes through the runtime with `invoke_signed`.
pub struct RuntimeCpi;

impl<'info> CpiTarget<'info> for RuntimeCpi {
    fn invoke(
        &self,
        instruction: &Instruction,
        accounts: &[AccountInfo<'info>],
        signer_seeds: &[&[&[u8]]],
    ) -> Result<()> {
        invoke_signed(instruction, accounts, signer_seeds).map_err(|err| {
            msg!("Failed to execute CPI call: {:?}", err);
            error!(ErrorCode::CpiFailed)
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForwardPlan {
    pub instruction: Instruction,
    pub signs_for_protocol: bool,
}

pub fn account_metas(accounts: &[AccountInfo]) -> Vec<AccountMeta> {
    accounts
        .iter()
        .map(|info| AccountMeta {
            pubkey: *info.key,
            is_signer: info.is_signer,
            is_writable: info.is_writable,
        })
        .collect()
}

/// Builds the forwarded instruction.
///
/// The protocol PDA never signs the outer transaction, so wherever it
/// appears it is forwarded as a signer and the plan asks for PDA seeds.
/// Every other signer must be the calling authority.
pub fn plan_forward(
    target_program: Pubkey,
    data: Vec<u8>,
    accounts: &[AccountMeta],
    protocol: &Pubkey,
    authority: &Pubkey,
) -> Result<ForwardPlan> {
    require_keys_neq!(target_program, crate::ID, ErrorCode::ReentrantCall);

    let mut signs_for_protocol = false;
    let mut metas = Vec::with_capacity(accounts.len());
    for (index, meta) in accounts.iter().enumerate() {
        if meta.pubkey == *protocol {
            msg!("Protocol PDA will sign for account at index {}", index);
            signs_for_protocol = true;
            metas.push(AccountMeta {
                pubkey: meta.pubkey,
                is_signer: true,
                is_writable: meta.is_writable,
            });
            continue;
        }
        if meta.is_signer && meta.pubkey != *authority {
            msg!("Unauthorized signer detected: {}", meta.pubkey);
            return err!(ErrorCode::UnauthorizedSigner);
        }
        metas.push(meta.clone());
    }

    Ok(ForwardPlan {
        instruction: Instruction {
            program_id: target_program,
            accounts: metas,
            data,
        },
        signs_for_protocol,
    })
}

/// Runs `plan` on `target`, passing the protocol seeds only when needed.
pub fn dispatch<'info, T: CpiTarget<'info>>(
    target: &T,
    plan: &ForwardPlan,
    accounts: &[AccountInfo<'info>],
    protocol_seeds: &[&[u8]],
) -> Result<()> {
    if plan.signs_for_protocol {
        target.invoke(&plan.instruction, accounts, &[protocol_seeds])
    } else {
        target.invoke(&plan.instruction, accounts, &[])
    }
}
