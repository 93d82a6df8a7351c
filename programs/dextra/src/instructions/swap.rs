use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{POOL_SEED, PROTOCOL_SEED};
use crate::error::ErrorCode;
use crate::events::SwapEvent;
use crate::math::swap::{self, SwapDirection};
use crate::state::{Pool, ProtocolAccount};
use crate::transfer_helper::{receive_into_vault, reload_vault, send_from_vault};

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Swap<'info> {
    #[account(seeds = [PROTOCOL_SEED], bump = protocol.bump)]
    pub protocol: Account<'info, ProtocolAccount>,
    #[account(
        seeds = [POOL_SEED, protocol.key().as_ref(), &pool_id.to_le_bytes()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
    #[account(mut, token::authority = user)]
    pub user_input_account: Account<'info, TokenAccount>,
    #[account(mut, token::authority = protocol)]
    pub protocol_input_account: Account<'info, TokenAccount>,
    #[account(mut, token::authority = protocol)]
    pub protocol_output_account: Account<'info, TokenAccount>,
    #[account(mut)]
    pub user_output_account: Account<'info, TokenAccount>,
    #[account(mut)]
    pub user: Signer<'info>,
    pub token_program: Program<'info, Token>,
}

impl<'info> Swap<'info> {
    /// Both legs must carry the mints the direction implies.
    fn validate_mints(&self, direction: SwapDirection) -> Result<()> {
        let (input_mint, output_mint) = match direction {
            SwapDirection::DepositToReward => (self.pool.deposit_token, self.pool.reward_token),
            SwapDirection::RewardToDeposit => (self.pool.reward_token, self.pool.deposit_token),
        };
        require_keys_eq!(self.user_input_account.mint, input_mint, ErrorCode::InvalidTokenAccount);
        require_keys_eq!(self.protocol_input_account.mint, input_mint, ErrorCode::InvalidTokenAccount);
        require_keys_eq!(self.protocol_output_account.mint, output_mint, ErrorCode::InvalidTokenAccount);
        require_keys_eq!(self.user_output_account.mint, output_mint, ErrorCode::InvalidTokenAccount);
        Ok(())
    }
}

pub fn handler(
    mut ctx: Context<Swap>,
    pool_id: u64,
    amount: u64,
    direction: SwapDirection,
) -> Result<()> {
    let user = ctx.accounts.user.key();
    let accounts = &mut ctx.accounts;

    accounts.protocol.ensure_pool_exists(pool_id)?;
    let received_amount = quote_swap(&accounts.pool, amount, direction)?;
    accounts.validate_mints(direction)?;

    let token_program = accounts.token_program.to_account_info();
    receive_into_vault(
        &token_program,
        &accounts.user_input_account,
        accounts.protocol_input_account.to_account_info(),
        accounts.user.to_account_info(),
        amount,
    )?;
    // pools may pair a mint with itself, making both legs one vault
    reload_vault(&mut accounts.protocol_output_account)?;
    send_from_vault(
        &token_program,
        &accounts.protocol_output_account,
        accounts.user_output_account.to_account_info(),
        accounts.protocol.to_account_info(),
        accounts.protocol.bump,
        received_amount,
    )?;

    msg!(
        "User {} swapped {} for {} in pool {}",
        user,
        amount,
        received_amount,
        pool_id
    );
    emit!(SwapEvent {
        user,
        pool_id,
        amount,
        direction,
        received_amount,
    });
    Ok(())
}

/// Output of a swap against the pool's current rate.
pub(crate) fn quote_swap(pool: &Pool, amount: u64, direction: SwapDirection) -> Result<u64> {
    require!(pool.can_swap, ErrorCode::SwapDisabled);
    swap::quote(amount, pool.last_rate, direction)
}
