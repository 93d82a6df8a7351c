use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::constants::PROTOCOL_SEED;
use crate::error::ErrorCode;

/// Moves `amount` out of a protocol-owned vault, signing as the protocol PDA.
pub fn send_from_vault<'info>(
    token_program: &AccountInfo<'info>,
    vault: &Account<'info, TokenAccount>,
    to: AccountInfo<'info>,
    protocol: AccountInfo<'info>,
    protocol_bump: u8,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    require!(vault.amount >= amount, ErrorCode::InsufficientFunds);

    let bump = [protocol_bump];
    let seeds: &[&[u8]] = &[PROTOCOL_SEED, &bump];
    let signer = &[seeds];

    token::transfer(
        CpiContext::new_with_signer(
            token_program.clone(),
            Transfer {
                from: vault.to_account_info(),
                to,
                authority: protocol,
            },
            signer,
        ),
        amount,
    )
}

/// Moves `amount` from a user token account into a protocol vault.
pub fn receive_into_vault<'info>(
    token_program: &AccountInfo<'info>,
    from: &Account<'info, TokenAccount>,
    vault: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    require!(from.amount >= amount, ErrorCode::InsufficientFunds);

    token::transfer(
        CpiContext::new(
            token_program.clone(),
            Transfer {
                from: from.to_account_info(),
                to: vault,
                authority,
            },
        ),
        amount,
    )
}

/// Re-reads a vault whose balance an earlier transfer in the same
/// instruction changed, and returns the fresh amount.
pub fn reload_vault(vault: &mut Account<'_, TokenAccount>) -> Result<u64> {
    vault.reload()?;
    Ok(vault.amount)
}

/// Bytes to add so an account of `current_len` can hold `needed`.
/// Accounts never shrink here.
pub fn required_growth(current_len: usize, needed: usize) -> usize {
    needed.saturating_sub(current_len)
}

/// Grows a program-owned account to at least `needed` bytes, with `payer`
/// topping up rent for the new size.
pub fn grow_account<'info>(
    account: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    system: &AccountInfo<'info>,
    needed: usize,
) -> Result<()> {
    if required_growth(account.data_len(), needed) == 0 {
        return Ok(());
    }

    let rent = Rent::get()?.minimum_balance(needed);
    let shortfall = rent.saturating_sub(account.lamports());
    if shortfall > 0 {
        system_program::transfer(
            CpiContext::new(
                system.clone(),
                system_program::Transfer {
                    from: payer.clone(),
                    to: account.clone(),
                },
            ),
            shortfall,
        )?;
    }
    account.realloc(needed, false)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::solana_program::program_pack::Pack;
    use anchor_spl::token::spl_token::state::{Account as SplAccount, AccountState};

    fn packed(amount: u64) -> Vec<u8> {
        let state = SplAccount {
            mint: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
            amount,
            state: AccountState::Initialized,
            ..Default::default()
        };
        let mut data = vec![0u8; SplAccount::LEN];
        SplAccount::pack(state, &mut data).unwrap();
        data
    }

    #[test]
    fn test_required_growth_never_shrinks() {
        assert_eq!(required_growth(100, 164), 64);
        assert_eq!(required_growth(164, 100), 0);
        assert_eq!(required_growth(164, 164), 0);
    }

    #[test]
    fn test_reload_vault_sees_balance_written_after_load() {
        let key = Pubkey::new_unique();
        let token_program = token::ID;
        let mut lamports = 2_039_280u64;
        let mut data = packed(0);
        let info = AccountInfo::new(
            &key,
            false,
            true,
            &mut lamports,
            &mut data,
            &token_program,
            false,
            0,
        );
        let mut vault = Account::<TokenAccount>::try_from(&info).unwrap();
        assert_eq!(vault.amount, 0);

        // the input leg of a swap credits the same vault
        let credited = packed(5_000);
        info.try_borrow_mut_data().unwrap()[64..72].copy_from_slice(&credited[64..72]);

        assert_eq!(vault.amount, 0);
        assert_eq!(reload_vault(&mut vault).unwrap(), 5_000);
    }
}
