use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::constants::{POOL_SEED, PROTOCOL_SEED};
use crate::error::ErrorCode;
use crate::events::{ApyUpdated, PoolAdded, PoolUpdated, RateUpdated};
use crate::state::{Pool, ProtocolAccount};

#[derive(Accounts)]
pub struct AddPool<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,
    #[account(
        mut,
        seeds = [PROTOCOL_SEED],
        bump = protocol.bump,
        constraint = protocol.owner == authority.key() @ ErrorCode::Unauthorized
    )]
    pub protocol: Account<'info, ProtocolAccount>,
    #[account(
        init,
        payer = authority,
        space = Pool::space(1, 1),
        seeds = [POOL_SEED, protocol.key().as_ref(), &protocol.pool_count.to_le_bytes()],
        bump
    )]
    pub pool: Account<'info, Pool>,
    pub deposit_token: Account<'info, Mint>,
    pub reward_token: Account<'info, Mint>,
    pub system_program: Program<'info, System>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolParams {
    pub minimum_deposit: u64,
    pub lock_period: i64,
    pub can_swap: bool,
    pub rate: u64,
    pub apy: u64,
}

pub fn add_pool_handler(mut ctx: Context<AddPool>, params: PoolParams) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut ctx.accounts;

    accounts.pool.deposit_token = accounts.deposit_token.key();
    accounts.pool.reward_token = accounts.reward_token.key();
    accounts.pool.deposit_decimals = accounts.deposit_token.decimals;
    accounts.pool.reward_decimals = accounts.reward_token.decimals;
    accounts.pool.bump = ctx.bumps.pool;

    let pool_id = open_pool(&mut accounts.protocol, &mut accounts.pool, params, now)?;

    msg!("Pool {} added", pool_id);
    emit!(PoolAdded {
        pool_id,
        pool: accounts.pool.key(),
        deposit_token: accounts.pool.deposit_token,
        reward_token: accounts.pool.reward_token,
        rate: params.rate,
        apy: params.apy,
    });
    Ok(())
}

/// Assigns the next pool id and seeds both histories at `now`.
pub(crate) fn open_pool(
    protocol: &mut ProtocolAccount,
    pool: &mut Pool,
    params: PoolParams,
    now: i64,
) -> Result<u64> {
    pool.configure(params.minimum_deposit, params.lock_period, params.can_swap);
    pool.set_rate(now, params.rate)?;
    pool.set_apy(now, params.apy);
    pool.pool_id = protocol.next_pool_id()?;
    Ok(pool.pool_id)
}

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct UpdatePool<'info> {
    #[account(
        seeds = [PROTOCOL_SEED],
        bump = protocol.bump,
        constraint = protocol.owner == authority.key() @ ErrorCode::Unauthorized
    )]
    pub protocol: Account<'info, ProtocolAccount>,
    #[account(
        mut,
        seeds = [POOL_SEED, protocol.key().as_ref(), &pool_id.to_le_bytes()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
    pub authority: Signer<'info>,
}

pub fn update_pool_handler(
    ctx: Context<UpdatePool>,
    pool_id: u64,
    minimum_deposit: u64,
    lock_period: i64,
    can_swap: bool,
) -> Result<()> {
    ctx.accounts.protocol.ensure_pool_exists(pool_id)?;
    ctx.accounts
        .pool
        .configure(minimum_deposit, lock_period, can_swap);

    emit!(PoolUpdated {
        pool_id,
        minimum_deposit,
        lock_period,
        can_swap,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct UpdateRate<'info> {
    #[account(
        seeds = [PROTOCOL_SEED],
        bump = protocol.bump,
        constraint = protocol.owner == authority.key() @ ErrorCode::Unauthorized
    )]
    pub protocol: Account<'info, ProtocolAccount>,
    #[account(
        mut,
        seeds = [POOL_SEED, protocol.key().as_ref(), &pool_id.to_le_bytes()],
        bump = pool.bump,
        realloc = Pool::space(pool.rates.len() + 1, pool.apys.len()),
        realloc::payer = authority,
        realloc::zero = false
    )]
    pub pool: Account<'info, Pool>,
    #[account(mut)]
    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

pub fn update_rate_handler(ctx: Context<UpdateRate>, pool_id: u64, new_rate: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.protocol.ensure_pool_exists(pool_id)?;
    ctx.accounts.pool.set_rate(now, new_rate)?;

    msg!("Pool {} rate set to {}", pool_id, new_rate);
    emit!(RateUpdated {
        pool_id,
        rate: new_rate,
        timestamp: now,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct UpdateApy<'info> {
    #[account(
        seeds = [PROTOCOL_SEED],
        bump = protocol.bump,
        constraint = protocol.owner == authority.key() @ ErrorCode::Unauthorized
    )]
    pub protocol: Account<'info, ProtocolAccount>,
    #[account(
        mut,
        seeds = [POOL_SEED, protocol.key().as_ref(), &pool_id.to_le_bytes()],
        bump = pool.bump,
        realloc = Pool::space(pool.rates.len(), pool.apys.len() + 1),
        realloc::payer = authority,
        realloc::zero = false
    )]
    pub pool: Account<'info, Pool>,
    #[account(mut)]
    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

pub fn update_apy_handler(ctx: Context<UpdateApy>, pool_id: u64, new_apy: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.protocol.ensure_pool_exists(pool_id)?;
    ctx.accounts.pool.set_apy(now, new_apy);

    msg!("Pool {} APY set to {}", pool_id, new_apy);
    emit!(ApyUpdated {
        pool_id,
        apy: new_apy,
        timestamp: now,
    });
    Ok(())
}
