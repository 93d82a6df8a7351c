use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{POOL_SEED, PROTOCOL_SEED, USER_INFO_SEED};
use crate::error::ErrorCode;
use crate::events::DepositEvent;
use crate::state::{Pool, ProtocolAccount, UserInfo};
use crate::transfer_helper::{grow_account, receive_into_vault};

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub user: Signer<'info>,
    #[account(
        mut,
        seeds = [PROTOCOL_SEED],
        bump = protocol.bump
    )]
    pub protocol: Account<'info, ProtocolAccount>,
    #[account(
        seeds = [POOL_SEED, protocol.key().as_ref(), &pool_id.to_le_bytes()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
    #[account(
        init_if_needed,
        payer = user,
        space = UserInfo::space(0),
        seeds = [USER_INFO_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_info: Account<'info, UserInfo>,
    #[account(
        mut,
        token::mint = pool.deposit_token,
        token::authority = user
    )]
    pub user_token_account: Account<'info, TokenAccount>,
    #[account(
        mut,
        token::mint = pool.deposit_token,
        token::authority = protocol
    )]
    pub protocol_token_account: Account<'info, TokenAccount>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> Deposit<'info> {
    /// Makes room for what the deposit just appended. The registry and the
    /// deposit list only grow, so neither account is ever shrunk.
    fn fit_records(&self) -> Result<()> {
        let payer = self.user.to_account_info();
        let system = self.system_program.to_account_info();
        grow_account(
            &self.protocol.to_account_info(),
            &payer,
            &system,
            self.protocol.space_with(0, 0),
        )?;
        grow_account(
            &self.user_info.to_account_info(),
            &payer,
            &system,
            UserInfo::space(self.user_info.deposits.len()),
        )
    }
}

pub fn handler(
    mut ctx: Context<Deposit>,
    pool_id: u64,
    amount: u64,
    referrer: Option<Pubkey>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let user = ctx.accounts.user.key();
    let pool_key = ctx.accounts.pool.key();
    let accounts = &mut ctx.accounts;

    accounts
        .user_info
        .bind(user, pool_key, ctx.bumps.user_info)?;
    apply_deposit(
        &mut accounts.protocol,
        &accounts.pool,
        &mut accounts.user_info,
        user,
        amount,
        referrer,
        now,
    )?;
    accounts.fit_records()?;

    receive_into_vault(
        &accounts.token_program.to_account_info(),
        &accounts.user_token_account,
        accounts.protocol_token_account.to_account_info(),
        accounts.user.to_account_info(),
        amount,
    )?;

    msg!("User {} deposited {} into pool {}", user, amount, pool_id);
    emit!(DepositEvent {
        user,
        pool_id,
        amount,
        referrer: accounts.user_info.referrer,
    });
    Ok(())
}

/// Book-keeping half of a deposit: referrer registry, reward checkpoint
/// and the new lock record. No tokens move here.
pub(crate) fn apply_deposit(
    protocol: &mut ProtocolAccount,
    pool: &Pool,
    user_info: &mut UserInfo,
    user: Pubkey,
    amount: u64,
    referrer: Option<Pubkey>,
    now: i64,
) -> Result<()> {
    protocol.ensure_pool_exists(pool.pool_id)?;
    require!(
        amount > 0 && amount >= pool.minimum_deposit,
        ErrorCode::BelowMinimumDeposit
    );

    if let Some(referrer) = referrer {
        if referrer != user && protocol.setup_referrer(user, referrer) {
            msg!("Referrer {} recorded for {}", referrer, user);
        }
    }
    if !user_info.has_referrer() {
        if let Some(recorded) = protocol.get_referrer(&user) {
            user_info.referrer = recorded;
        }
    }

    user_info.checkpoint(pool, now)?;
    let locked_until = pool.locked_until(now)?;
    user_info.record_deposit(amount, now, locked_until)
}
